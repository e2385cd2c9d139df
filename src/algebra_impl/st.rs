//! Similarity-transform assembly
//!
//! Expands `e^{-T} O e^{T}` with `T = t1 + t2 + ...` into a weighted sum of
//! plain operator products via the truncated Baker-Campbell-Hausdorff series
//!
//! ```text
//! e^{-T} O e^{T} = sum_{n=0}^{4} 1/n! [..[[O,T],T]..,T]        (n-fold)
//!                = sum_{n=0}^{4} 1/n! sum_{k=0}^{n} (-1)^k C(n,k) T^k O T^{n-k}
//! ```
//!
//! The series terminates exactly after the four-fold commutator for a
//! two-body Hamiltonian, so the truncation is not an approximation here.
//! `T^m` is expanded over all ordered m-tuples of the configured cluster
//! operators; the cluster operators commute, so each ordered tuple carries
//! unit weight.

use itertools::Itertools;

use super::operators::{ClusterOperator, Operator, OperatorProduct, OperatorTerm};

/// Nesting depth at which the commutator series terminates.
pub const BCH_TRUNCATION: usize = 4;

fn factorial(n: usize) -> f64 {
    (1..=n).map(|k| k as f64).product()
}

fn binomial(n: usize, k: usize) -> f64 {
    factorial(n) / (factorial(k) * factorial(n - k))
}

/// All ordered k-tuples over the cluster operator set, as operator vectors.
fn cluster_tuples(cluster: &[ClusterOperator], k: usize) -> Vec<Vec<Operator>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    std::iter::repeat(cluster.iter().copied())
        .take(k)
        .multi_cartesian_product()
        .map(|tuple| tuple.into_iter().map(Operator::Cluster).collect())
        .collect()
}

/// Expand the similarity transform of `product` under the given cluster
/// operators into signed, weighted operator products.
///
/// The returned terms are exactly what an engine without native
/// similarity-transform support must be fed through plain
/// `add_operator_product` calls.
pub fn similarity_transform(
    coefficient: f64,
    product: &OperatorProduct,
    cluster: &[ClusterOperator],
) -> Vec<OperatorTerm> {
    let mut terms = Vec::new();
    for n in 0..=BCH_TRUNCATION {
        for k in 0..=n {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            let weight = coefficient * sign * binomial(n, k) / factorial(n);
            for left in cluster_tuples(cluster, k) {
                for right in cluster_tuples(cluster, n - k) {
                    let mut operators = left.clone();
                    operators.extend(product.operators().iter().cloned());
                    operators.extend(right.iter().cloned());
                    terms.push(OperatorTerm::new(weight, OperatorProduct::new(operators)));
                }
            }
        }
    }
    terms
}
