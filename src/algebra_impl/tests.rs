//! Tests for the operator algebra driving layer

#[cfg(test)]
mod tests {
    use super::super::{
        similarity_transform, ClusterOperator, LambdaOperator, Operator, OperatorProduct,
        RecordedEngine, TermSimplifier,
    };

    fn fock_e2() -> OperatorProduct {
        OperatorProduct::new(vec![
            Operator::Fock,
            Operator::PairExcitation(['e', 'f', 'n', 'm']),
        ])
    }

    #[test]
    fn test_operator_tokens() {
        assert_eq!(Operator::Identity.token(), "1");
        assert_eq!(Operator::Fock.token(), "f");
        assert_eq!(Operator::Repulsion.token(), "v");
        assert_eq!(Operator::Cluster(ClusterOperator::T1).token(), "t1");
        assert_eq!(Operator::Cluster(ClusterOperator::T2).token(), "t2");
        assert_eq!(Operator::Lambda(LambdaOperator::L2).token(), "l2");
        assert_eq!(
            Operator::PairExcitation(['e', 'f', 'n', 'm']).token(),
            "e2(e,f,n,m)"
        );
    }

    #[test]
    fn test_product_reversal() {
        let product = fock_e2();
        let reversed = product.reversed();
        assert_eq!(reversed.tokens(), vec!["e2(e,f,n,m)", "f"]);
        assert_eq!(reversed.reversed(), product);
    }

    #[test]
    fn test_bch_term_count_single_cluster() {
        // With one cluster operator every T^m has a single tuple, so order n
        // contributes n + 1 products: 1 + 2 + 3 + 4 + 5 terms through n = 4.
        let terms = similarity_transform(1.0, &fock_e2(), &[ClusterOperator::T1]);
        assert_eq!(terms.len(), 15);
    }

    #[test]
    fn test_bch_term_count_two_clusters() {
        // Order n contributes (n + 1) * 2^n products for two cluster
        // operators: 1 + 4 + 12 + 32 + 80.
        let cluster = [ClusterOperator::T1, ClusterOperator::T2];
        let terms = similarity_transform(1.0, &fock_e2(), &cluster);
        assert_eq!(terms.len(), 129);
    }

    #[test]
    fn test_bch_second_order_weights() {
        // 1/2! [[O,T],T] = 1/2 OTT - TOT + 1/2 TTO
        let terms = similarity_transform(1.0, &fock_e2(), &[ClusterOperator::T1]);
        let second_order: Vec<_> = terms.iter().filter(|t| t.product.len() == 4).collect();
        assert_eq!(second_order.len(), 3);

        let weights: Vec<f64> = second_order.iter().map(|t| t.coefficient).collect();
        assert!((weights[0] - 0.5).abs() < 1e-12);
        assert!((weights[1] + 1.0).abs() < 1e-12);
        assert!((weights[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_bch_commutator_orders_cancel() {
        // Every order above n = 0 is a sum of commutators, so its expansion
        // coefficients cancel: the total weight of the series is the bare
        // coefficient of the untransformed product.
        let cluster = [ClusterOperator::T1, ClusterOperator::T2];
        let terms = similarity_transform(2.0, &fock_e2(), &cluster);
        let total: f64 = terms.iter().map(|t| t.coefficient).sum();
        assert!((total - 2.0).abs() < 1e-10, "total weight was {}", total);
    }

    #[test]
    fn test_commutator_by_signed_insertions() {
        // [O1 O2] and -[O2 O1] submitted through the ST expansion must pair
        // product-for-product with opposite coefficients once the product
        // factors are compared order-insensitively at n = 0.
        let cluster = [ClusterOperator::T1, ClusterOperator::T2];
        let direct = similarity_transform(1.0, &fock_e2(), &cluster);
        let reversed = similarity_transform(-1.0, &fock_e2().reversed(), &cluster);

        assert_eq!(direct.len(), reversed.len());
        for (d, r) in direct.iter().zip(reversed.iter()) {
            assert!((d.coefficient + r.coefficient).abs() < 1e-12);
            // Same cluster dressing on both sides, core operators swapped.
            assert_eq!(d.product.len(), r.product.len());
        }
    }

    #[test]
    fn test_empty_cluster_set_leaves_product_untouched() {
        let terms = similarity_transform(1.0, &fock_e2(), &[]);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].product, fock_e2());
        assert!((terms[0].coefficient - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_add_st_operator_feeds_expansion_to_engine() {
        let mut engine = RecordedEngine::default();
        let cluster = [ClusterOperator::T1, ClusterOperator::T2];
        engine.add_st_operator(1.0, fock_e2(), &cluster);
        assert_eq!(engine.submitted_terms().len(), 129);

        // The first submitted product is the bare n = 0 term.
        assert_eq!(engine.submitted_terms()[0].product, fock_e2());
    }

    #[test]
    fn test_recorded_engine_lifecycle() {
        let mut engine = RecordedEngine::from_strings(vec!["+1.00 <m,n||e,f>".to_string()]);

        // Nothing is visible before simplify.
        assert!(engine.fully_contracted_strings().is_empty());

        engine.simplify().unwrap();
        assert_eq!(engine.fully_contracted_strings().len(), 1);

        engine.clear();
        assert!(engine.fully_contracted_strings().is_empty());
        assert!(engine.submitted_terms().is_empty());
    }
}
