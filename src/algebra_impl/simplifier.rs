//! TermSimplifier capability and engine implementations
//!
//! The Wick-theorem contraction machinery lives in an external
//! operator-algebra engine. This module defines the capability the rest of
//! the crate programs against, plus two implementations: a subprocess bridge
//! to the real engine and a replay engine for recorded output.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use color_eyre::eyre::{bail, Result, WrapErr};
use serde::Serialize;
use tracing::info;

use super::operators::{ClusterOperator, OperatorProduct, OperatorTerm};
use super::st::similarity_transform;

/// Capability of an operator-algebra engine able to contract second-quantized
/// operator strings against a fixed vacuum.
///
/// Lifecycle: configure left/right projection sets, submit weighted operator
/// products, `simplify`, read the fully-contracted strings, `clear`.
pub trait TermSimplifier {
    /// Replace the left projection operator set applied to subsequently
    /// submitted products.
    fn set_left_operators(&mut self, operators: Vec<OperatorProduct>);

    /// Replace the right projection operator set applied to subsequently
    /// submitted products.
    fn set_right_operators(&mut self, operators: Vec<OperatorProduct>);

    /// Submit one weighted operator product.
    fn add_operator_product(&mut self, coefficient: f64, product: OperatorProduct);

    /// Reduce everything submitted so far to fully-contracted form.
    fn simplify(&mut self) -> Result<()>;

    /// The fully-contracted terms produced by the last `simplify`, one
    /// engine-formatted string per term.
    fn fully_contracted_strings(&self) -> Vec<String>;

    /// Release all engine state.
    fn clear(&mut self);

    /// Submit the similarity-transformed product `e^{-T} O e^{T}`, expanded
    /// crate-side into plain products (see [`similarity_transform`]).
    fn add_st_operator(
        &mut self,
        coefficient: f64,
        product: OperatorProduct,
        cluster: &[ClusterOperator],
    ) {
        for term in similarity_transform(coefficient, &product, cluster) {
            self.add_operator_product(term.coefficient, term.product);
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct BridgeEntry {
    coefficient: f64,
    product: Vec<String>,
    left: Vec<Vec<String>>,
    right: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct BridgeRequest<'a> {
    vacuum: &'a str,
    entries: &'a [BridgeEntry],
}

/// Subprocess bridge to the external `pdaggerq` engine.
///
/// The submitted program is serialized to JSON and handed to a helper script
/// on stdin; the script replies with one fully-contracted string per stdout
/// line. Engine failures surface as errors carrying the exit status; nothing
/// is retried.
pub struct PdaggerqBridge {
    python: String,
    script: PathBuf,
    vacuum: String,
    left: Vec<OperatorProduct>,
    right: Vec<OperatorProduct>,
    entries: Vec<BridgeEntry>,
    contracted: Vec<String>,
}

impl PdaggerqBridge {
    pub fn new(python: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        PdaggerqBridge {
            python: python.into(),
            script: script.into(),
            vacuum: "fermi".to_string(),
            left: Vec::new(),
            right: Vec::new(),
            entries: Vec::new(),
            contracted: Vec::new(),
        }
    }

    fn projection_tokens(products: &[OperatorProduct]) -> Vec<Vec<String>> {
        products.iter().map(OperatorProduct::tokens).collect()
    }
}

impl TermSimplifier for PdaggerqBridge {
    fn set_left_operators(&mut self, operators: Vec<OperatorProduct>) {
        self.left = operators;
    }

    fn set_right_operators(&mut self, operators: Vec<OperatorProduct>) {
        self.right = operators;
    }

    fn add_operator_product(&mut self, coefficient: f64, product: OperatorProduct) {
        // Left/right context is snapshotted per entry so the script can
        // replay set_* calls in submission order.
        self.entries.push(BridgeEntry {
            coefficient,
            product: product.tokens(),
            left: Self::projection_tokens(&self.left),
            right: Self::projection_tokens(&self.right),
        });
    }

    fn simplify(&mut self) -> Result<()> {
        let request = BridgeRequest {
            vacuum: &self.vacuum,
            entries: &self.entries,
        };
        let payload = serde_json::to_string(&request)
            .wrap_err("failed to serialize the operator-algebra request")?;

        info!(
            "Submitting {} operator products to the algebra engine",
            self.entries.len()
        );

        let mut child = Command::new(&self.python)
            .arg(&self.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .wrap_err_with(|| {
                format!(
                    "failed to launch the operator-algebra bridge: {} {}",
                    self.python,
                    self.script.display()
                )
            })?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin
                .write_all(payload.as_bytes())
                .wrap_err("failed to write the request to the bridge")?;
        }

        let output = child
            .wait_with_output()
            .wrap_err("failed to collect bridge output")?;
        if !output.status.success() {
            bail!("operator-algebra bridge exited with {}", output.status);
        }

        let stdout =
            String::from_utf8(output.stdout).wrap_err("bridge output is not valid UTF-8")?;
        self.contracted = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        info!(
            "Engine returned {} fully-contracted terms",
            self.contracted.len()
        );
        Ok(())
    }

    fn fully_contracted_strings(&self) -> Vec<String> {
        self.contracted.clone()
    }

    fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.entries.clear();
        self.contracted.clear();
    }
}

/// Replay engine over a recorded list of fully-contracted strings.
///
/// Used for offline runs of the fixed derivation (the recorded bridge output
/// ships with the crate) and as a recording collaborator in tests: every
/// submitted product and projection change is kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordedEngine {
    strings: Vec<String>,
    submitted: Vec<OperatorTerm>,
    left_history: Vec<Vec<OperatorProduct>>,
    right_history: Vec<Vec<OperatorProduct>>,
    simplified: bool,
}

impl RecordedEngine {
    pub fn from_strings(strings: Vec<String>) -> Self {
        RecordedEngine {
            strings,
            ..RecordedEngine::default()
        }
    }

    /// Every product submitted since construction or the last `clear`.
    pub fn submitted_terms(&self) -> &[OperatorTerm] {
        &self.submitted
    }

    /// Every left projection set installed, in order.
    pub fn left_history(&self) -> &[Vec<OperatorProduct>] {
        &self.left_history
    }

    /// Every right projection set installed, in order.
    pub fn right_history(&self) -> &[Vec<OperatorProduct>] {
        &self.right_history
    }
}

impl TermSimplifier for RecordedEngine {
    fn set_left_operators(&mut self, operators: Vec<OperatorProduct>) {
        self.left_history.push(operators);
    }

    fn set_right_operators(&mut self, operators: Vec<OperatorProduct>) {
        self.right_history.push(operators);
    }

    fn add_operator_product(&mut self, coefficient: f64, product: OperatorProduct) {
        self.submitted.push(OperatorTerm::new(coefficient, product));
    }

    fn simplify(&mut self) -> Result<()> {
        self.simplified = true;
        Ok(())
    }

    fn fully_contracted_strings(&self) -> Vec<String> {
        if self.simplified {
            self.strings.clone()
        } else {
            Vec::new()
        }
    }

    fn clear(&mut self) {
        self.submitted.clear();
        self.left_history.clear();
        self.right_history.clear();
        self.simplified = false;
    }
}
