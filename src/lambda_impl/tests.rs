//! Tests for the Lambda doubles generator

#[cfg(test)]
mod tests {
    use super::super::{
        recorded_lambda_engine, LambdaDoublesGenerator, LAMBDA_DOUBLES_CONTRACTED, LAMBDA_OUTPUT,
    };
    use crate::algebra_impl::{OperatorProduct, OperatorTerm, TermSimplifier};
    use crate::parser_impl::TensorTerm;
    use color_eyre::eyre::Result;

    /// Engine double that keeps its submission trace across `clear`.
    #[derive(Default)]
    struct TracingEngine {
        products: Vec<OperatorTerm>,
        left_sets: Vec<Vec<OperatorProduct>>,
    }

    impl TermSimplifier for TracingEngine {
        fn set_left_operators(&mut self, operators: Vec<OperatorProduct>) {
            self.left_sets.push(operators);
        }

        fn set_right_operators(&mut self, _operators: Vec<OperatorProduct>) {}

        fn add_operator_product(&mut self, coefficient: f64, product: OperatorProduct) {
            self.products.push(OperatorTerm::new(coefficient, product));
        }

        fn simplify(&mut self) -> Result<()> {
            Ok(())
        }

        fn fully_contracted_strings(&self) -> Vec<String> {
            Vec::new()
        }

        fn clear(&mut self) {}
    }

    #[test]
    fn test_reference_terms_are_index_balanced() {
        // Every recorded term must contract cleanly over the fixed output
        // indices; this guards the fixture itself against editing mistakes.
        for contracted in LAMBDA_DOUBLES_CONTRACTED {
            let term = TensorTerm::parse(contracted).unwrap();
            term.validate(&LAMBDA_OUTPUT)
                .unwrap_or_else(|e| panic!("{}: {}", contracted, e));
        }
    }

    #[test]
    fn test_generator_produces_one_einsum_block_per_term() {
        let generator = LambdaDoublesGenerator::new();
        let mut engine = recorded_lambda_engine();
        let report = generator.generate(&mut engine).unwrap();

        assert_eq!(report.terms.len(), LAMBDA_DOUBLES_CONTRACTED.len());
        for generated in &report.terms {
            // P(x,y) doubles the line count per operator.
            let expected = 1 << generated.term.permutations.len();
            assert_eq!(generated.einsum.len(), expected, "{}", generated.contracted);
            for line in &generated.einsum {
                assert!(line.starts_with("lambda_two += "), "{}", line);
                assert!(line.contains("->mnef'"), "{}", line);
            }
        }
    }

    #[test]
    fn test_generator_output_is_deterministic() {
        let generator = LambdaDoublesGenerator::new();
        let first = generator.generate(&mut recorded_lambda_engine()).unwrap();
        let second = generator.generate(&mut recorded_lambda_engine()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generator_submission_trace() {
        let generator = LambdaDoublesGenerator::new();
        let mut engine = TracingEngine::default();
        generator.generate(&mut engine).unwrap();

        // Six ST insertions (two right-hand, four commutator-side), each
        // expanding to 129 products for the {t1, t2} cluster set.
        assert_eq!(engine.products.len(), 6 * 129);

        // The left projection set changes twice: identity, then the Lambda
        // de-excitation operators.
        assert_eq!(engine.left_sets.len(), 2);
        assert_eq!(engine.left_sets[0].len(), 1);
        assert_eq!(engine.left_sets[1].len(), 2);
    }

    #[test]
    fn test_generator_submits_commutator_as_signed_pairs() {
        let generator = LambdaDoublesGenerator::new();
        let mut engine = TracingEngine::default();
        generator.generate(&mut engine).unwrap();

        // Insertions 2 and 4 are the +[f e2] / -[e2 f] commutator halves;
        // they must pair product-for-product with opposite coefficients.
        // The same holds for insertions 3 and 5 with v in place of f.
        let block = 129;
        for offset in 0..2 * block {
            let direct = &engine.products[2 * block + offset];
            let reversed = &engine.products[4 * block + offset];
            assert!(
                (direct.coefficient + reversed.coefficient).abs() < 1e-12,
                "coefficients at offset {} do not cancel",
                offset
            );
            assert_eq!(direct.product.len(), reversed.product.len());
        }
    }

    #[test]
    fn test_first_terms_render_known_einsum_lines() {
        let generator = LambdaDoublesGenerator::new();
        let report = generator.generate(&mut recorded_lambda_engine()).unwrap();

        assert_eq!(
            report.terms[0].einsum,
            vec!["lambda_two += +1.00000000000000 * einsum('mnef->mnef', g[o, o, v, v])"]
        );
        assert_eq!(
            report.terms[1].einsum,
            vec![
                "lambda_two += +1.00000000000000 * einsum('af,mnea->mnef', f[v, v], l2)",
                "lambda_two += -1.00000000000000 * einsum('ae,mnfa->mnef', f[v, v], l2)",
            ]
        );
    }

    #[test]
    fn test_header_mentions_both_projections() {
        let generator = LambdaDoublesGenerator::new();
        let report = generator.generate(&mut recorded_lambda_engine()).unwrap();
        assert!(report.header.contains("e(-T) H e2(e,f,n,m) e(T)"));
        assert!(report.header.contains("[H, e2(e,f,n,m)]"));
    }
}
