//! Driver for the Lambda doubles residual derivation

use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use crate::algebra_impl::{
    ClusterOperator, LambdaOperator, Operator, OperatorProduct, TermSimplifier,
};
use crate::parser_impl::TensorTerm;

/// Accumulation target of the emitted contraction code.
pub const LAMBDA_TARGET: &str = "lambda_two";

/// Free indices of the doubles residual: occupied m, n and virtual e, f.
pub const LAMBDA_OUTPUT: [char; 4] = ['m', 'n', 'e', 'f'];

/// Labels of the explicit pair excitation operator e2(e,f,n,m).
const EXCITATION_LABELS: [char; 4] = ['e', 'f', 'n', 'm'];

/// One fully-contracted term of the residual, in its three renditions.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTerm {
    /// The engine's contracted string, verbatim.
    pub contracted: String,
    /// Parsed structural form.
    pub term: TensorTerm,
    /// Einsum accumulation lines (permutation operators expanded).
    pub einsum: Vec<String>,
}

/// Complete generator output for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaDoublesReport {
    pub header: String,
    pub terms: Vec<GeneratedTerm>,
}

/// Assembles the similarity-transformed residual expression, hands it to an
/// engine, and converts the contracted terms to tensor-contraction code.
#[derive(Debug, Default)]
pub struct LambdaDoublesGenerator;

impl LambdaDoublesGenerator {
    pub fn new() -> Self {
        LambdaDoublesGenerator
    }

    /// Run the fixed derivation against `engine`.
    pub fn generate<S: TermSimplifier>(&self, engine: &mut S) -> Result<LambdaDoublesReport> {
        let e2 = Operator::PairExcitation(EXCITATION_LABELS);
        let cluster = [ClusterOperator::T1, ClusterOperator::T2];
        let identity = vec![OperatorProduct::new(vec![Operator::Identity])];
        let hamiltonian = [Operator::Fock, Operator::Repulsion];

        info!("Assembling <0| e(-T) H e2(e,f,n,m) e(T) |0>");
        engine.set_left_operators(identity.clone());
        engine.set_right_operators(identity);
        for piece in &hamiltonian {
            engine.add_st_operator(
                1.0,
                OperatorProduct::new(vec![piece.clone(), e2.clone()]),
                &cluster,
            );
        }

        // The commutator [H, e2] enters as two signed insertions: the direct
        // product with +1 and the order-reversed product with -1.
        info!("Assembling <0| L e(-T) [H, e2(e,f,n,m)] e(T) |0>");
        engine.set_left_operators(vec![
            OperatorProduct::new(vec![Operator::Lambda(LambdaOperator::L1)]),
            OperatorProduct::new(vec![Operator::Lambda(LambdaOperator::L2)]),
        ]);
        for piece in &hamiltonian {
            engine.add_st_operator(
                1.0,
                OperatorProduct::new(vec![piece.clone(), e2.clone()]),
                &cluster,
            );
        }
        for piece in &hamiltonian {
            engine.add_st_operator(
                -1.0,
                OperatorProduct::new(vec![e2.clone(), piece.clone()]),
                &cluster,
            );
        }

        engine.simplify()?;

        let mut terms = Vec::new();
        for contracted in engine.fully_contracted_strings() {
            let term = TensorTerm::parse(&contracted)
                .wrap_err_with(|| format!("engine returned an unparsable term '{}'", contracted))?;
            let einsum = term
                .einsum_strings(LAMBDA_TARGET, &LAMBDA_OUTPUT)
                .wrap_err_with(|| format!("term '{}' failed einsum emission", contracted))?;
            terms.push(GeneratedTerm {
                contracted,
                term,
                einsum,
            });
        }

        engine.clear();

        info!("Generated {} residual terms", terms.len());
        Ok(LambdaDoublesReport {
            header: format!(
                "0 = <0| e(-T) H e2({labels}) e(T)|0> + <0| L e(-T) [H, e2({labels})] e(T)|0>",
                labels = "e,f,n,m"
            ),
            terms,
        })
    }
}
