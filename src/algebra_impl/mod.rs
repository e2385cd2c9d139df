//! Second-quantized operator algebra driving layer
//!
//! This module owns the symbolic side of the Lambda-equation generator: the
//! operator tokens submitted to the algebra engine, the truncated
//! Baker-Campbell-Hausdorff expansion of similarity-transformed operators,
//! and the `TermSimplifier` capability behind which the external
//! Wick-contraction engine sits. The engine itself is an external
//! collaborator; nothing here performs operator contractions.

mod operators;
mod simplifier;
mod st;
#[cfg(test)]
mod tests;

pub use operators::{ClusterOperator, LambdaOperator, Operator, OperatorProduct, OperatorTerm};
pub use simplifier::{PdaggerqBridge, RecordedEngine, TermSimplifier};
pub use st::{similarity_transform, BCH_TRUNCATION};
