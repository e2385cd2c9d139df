//! Operator tokens and products
//!
//! Every token renders to the exact text the external operator-algebra
//! engine expects, so a product can be shipped across the bridge verbatim.

use std::fmt;

/// Orbital label used to parameterize explicit excitation operators.
pub type OrbitalLabel = char;

/// Cluster excitation operators available for similarity transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterOperator {
    /// Singles excitation amplitudes t_i^a
    T1,
    /// Doubles excitation amplitudes t_ij^ab
    T2,
}

impl ClusterOperator {
    pub fn token(&self) -> &'static str {
        match self {
            ClusterOperator::T1 => "t1",
            ClusterOperator::T2 => "t2",
        }
    }
}

impl fmt::Display for ClusterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Lambda de-excitation operators used as left projection states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LambdaOperator {
    L1,
    L2,
}

impl LambdaOperator {
    pub fn token(&self) -> &'static str {
        match self {
            LambdaOperator::L1 => "l1",
            LambdaOperator::L2 => "l2",
        }
    }
}

impl fmt::Display for LambdaOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One symbolic operator token.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// The identity operator, used for trivial left/right projection sets.
    Identity,
    /// One-electron fluctuation potential (Fock operator) `f`.
    Fock,
    /// Two-electron repulsion operator `v`.
    Repulsion,
    /// Cluster excitation amplitudes `t1` / `t2`.
    Cluster(ClusterOperator),
    /// Lambda de-excitation amplitudes `l1` / `l2`.
    Lambda(LambdaOperator),
    /// Explicit pair excitation operator `e2(p,q,r,s)` over fixed labels.
    PairExcitation([OrbitalLabel; 4]),
}

impl Operator {
    /// Engine-facing text of this token.
    pub fn token(&self) -> String {
        match self {
            Operator::Identity => "1".to_string(),
            Operator::Fock => "f".to_string(),
            Operator::Repulsion => "v".to_string(),
            Operator::Cluster(c) => c.token().to_string(),
            Operator::Lambda(l) => l.token().to_string(),
            Operator::PairExcitation(labels) => format!(
                "e2({},{},{},{})",
                labels[0], labels[1], labels[2], labels[3]
            ),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Ordered product of operator tokens. Order is physical: the leftmost
/// operator acts last.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperatorProduct(Vec<Operator>);

impl OperatorProduct {
    pub fn new(operators: Vec<Operator>) -> Self {
        OperatorProduct(operators)
    }

    pub fn operators(&self) -> &[Operator] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The same factors in reversed order, as needed for the signed
    /// counterpart of a commutator insertion.
    pub fn reversed(&self) -> Self {
        let mut ops = self.0.clone();
        ops.reverse();
        OperatorProduct(ops)
    }

    /// Engine-facing token list for this product.
    pub fn tokens(&self) -> Vec<String> {
        self.0.iter().map(Operator::token).collect()
    }
}

impl From<Vec<Operator>> for OperatorProduct {
    fn from(operators: Vec<Operator>) -> Self {
        OperatorProduct::new(operators)
    }
}

impl fmt::Display for OperatorProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

/// A product tagged with its numeric coefficient. Immutable once submitted
/// to a simplifier.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorTerm {
    pub coefficient: f64,
    pub product: OperatorProduct,
}

impl OperatorTerm {
    pub fn new(coefficient: f64, product: OperatorProduct) -> Self {
        OperatorTerm {
            coefficient,
            product,
        }
    }
}

impl fmt::Display for OperatorTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.6} {}", self.coefficient, self.product)
    }
}
