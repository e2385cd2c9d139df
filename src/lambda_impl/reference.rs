//! Recorded engine output for the fixed Lambda doubles derivation
//!
//! Captured from a bridge run of the derivation in
//! [`LambdaDoublesGenerator`](super::LambdaDoublesGenerator) and checked in
//! so the generator runs without a Python environment and so regressions in
//! the parser or the emitter are caught against stable input. External
//! indices are m, n (occupied) and e, f (virtual); i, j and a, b are
//! contracted.

use crate::algebra_impl::RecordedEngine;

/// Fully-contracted doubles residual terms, in engine output order.
pub const LAMBDA_DOUBLES_CONTRACTED: [&str; 30] = [
    "+1.00000000000000 <m,n||e,f>",
    "+1.00000000000000 P(e,f) f(a,f) l2(m,n,e,a)",
    "-1.00000000000000 P(e,f) f(i,f) l2(m,n,e,a) t1(a,i)",
    "+1.00000000000000 P(e,f) <i,a||b,f> l2(m,n,e,a) t1(b,i)",
    "-0.50000000000000 P(e,f) <i,j||b,f> l2(m,n,e,a) t2(a,b,i,j)",
    "-1.00000000000000 P(m,n) f(n,i) l2(m,i,e,f)",
    "-1.00000000000000 P(m,n) f(n,a) l2(m,i,e,f) t1(a,i)",
    "-1.00000000000000 P(m,n) <n,j||i,a> l2(m,i,e,f) t1(a,j)",
    "-0.50000000000000 P(m,n) <n,j||a,b> l2(m,i,e,f) t2(a,b,i,j)",
    "+0.50000000000000 <m,n||i,j> l2(i,j,e,f)",
    "+1.00000000000000 <m,n||i,a> l2(i,j,e,f) t1(a,j)",
    "+0.25000000000000 <m,n||a,b> l2(i,j,e,f) t2(a,b,i,j)",
    "+0.50000000000000 <m,n||a,b> l2(i,j,e,f) t1(a,i) t1(b,j)",
    "+0.50000000000000 <a,b||e,f> l2(m,n,a,b)",
    "-1.00000000000000 <a,i||e,f> l2(m,n,a,b) t1(b,i)",
    "+0.25000000000000 <i,j||e,f> l2(m,n,a,b) t2(a,b,i,j)",
    "+0.50000000000000 <i,j||e,f> l2(m,n,a,b) t1(a,i) t1(b,j)",
    "+1.00000000000000 P(m,n) P(e,f) <n,a||f,i> l2(m,i,e,a)",
    "+1.00000000000000 P(m,n) P(e,f) <n,a||f,b> l2(m,i,e,a) t1(b,i)",
    "-1.00000000000000 P(m,n) P(e,f) <n,j||f,i> l2(m,i,e,a) t1(a,j)",
    "-1.00000000000000 P(m,n) P(e,f) <n,j||f,b> l2(m,i,e,a) t2(b,a,i,j)",
    "-1.00000000000000 P(m,n) P(e,f) <n,j||f,b> l2(m,i,e,a) t1(b,i) t1(a,j)",
    "+1.00000000000000 P(m,n) P(e,f) f(n,f) l1(m,e)",
    "+1.00000000000000 P(m,n) P(e,f) <n,i||f,a> l1(m,e) t1(a,i)",
    "+1.00000000000000 P(m,n) <a,n||e,f> l1(m,a)",
    "-1.00000000000000 P(m,n) <i,n||e,f> l1(m,a) t1(a,i)",
    "-1.00000000000000 P(e,f) <m,n||i,f> l1(i,e)",
    "-1.00000000000000 P(e,f) <m,n||a,f> l1(i,e) t1(a,i)",
    "-0.50000000000000 P(e,f) <m,n||e,a> l2(i,j,a,b) t2(f,b,i,j)",
    "-0.50000000000000 P(m,n) <m,i||e,f> l2(i,j,a,b) t2(a,b,n,j)",
];

/// Replay engine preloaded with the recorded derivation output.
pub fn recorded_lambda_engine() -> RecordedEngine {
    RecordedEngine::from_strings(
        LAMBDA_DOUBLES_CONTRACTED
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )
}
