//! Integration tests for the Lambda generator and the RDM preparation
//!
//! These tests exercise the end-to-end paths: checkpoint round-trip through
//! disk, converter runs with report printing, and full generator output
//! against the recorded engine. Example-file scenarios follow the layout of
//! the files under example/.

use std::path::PathBuf;

use nalgebra::DMatrix;
use ndarray::Array4;

use qcgen::config::Config;
use qcgen::io::{print_lambda_report, print_restricted_summary, print_unrestricted_summary};
use qcgen::lambda_impl::{recorded_lambda_engine, LambdaDoublesGenerator};
use qcgen::rdm_impl::{
    restricted_to_rdm, unrestricted_to_rdm, EriStorage, IndexOrdering, MeanField, RdmConstraint,
    SpinRestriction,
};

/// Helper function to get the path to example files
fn example_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("example")
        .join(filename)
}

fn synthetic_restricted(n: usize) -> MeanField {
    MeanField {
        restriction: SpinRestriction::Restricted,
        mo_coeff: DMatrix::identity(n, n),
        mo_coeff_beta: None,
        mo_energy: vec![-0.5; n],
        mo_energy_beta: None,
        hcore: DMatrix::from_fn(n, n, |i, j| if i == j { -1.0 } else { -0.1 }),
        eri: EriStorage::Dense(Array4::from_shape_fn((n, n, n, n), |(p, q, r, s)| {
            1.0 / (1.0 + (p + q + r + s) as f64)
        })),
        nelec: (1, 1),
        spin: 0,
    }
}

#[test]
fn test_checkpoint_file_roundtrip_and_conversion() {
    let n = 4;
    let mean_field = synthetic_restricted(n);

    let path = std::env::temp_dir().join("qcgen_checkpoint_roundtrip.json");
    std::fs::write(&path, serde_json::to_string(&mean_field).unwrap()).unwrap();

    let loaded = MeanField::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let inputs = restricted_to_rdm(&loaded, RdmConstraint::DQG).unwrap();
    assert_eq!(inputs.eri.dim(), (n, n, n, n));
    assert_eq!((inputs.h1.nrows(), inputs.h1.ncols()), (n, n));

    let mut report = Vec::new();
    print_restricted_summary(&mut report, &inputs).unwrap();
    let report = String::from_utf8(report).unwrap();
    assert!(report.contains("eri shape: (4, 4, 4, 4)"));
    assert!(report.contains("norb: 4"));
    assert!(report.contains("hand off to an external v2RDM solver"));
}

#[test]
fn test_unrestricted_conversion_report() {
    let n = 3;
    let mut mean_field = synthetic_restricted(n);
    mean_field.restriction = SpinRestriction::Unrestricted;
    mean_field.mo_coeff_beta = Some(DMatrix::identity(n, n) * 0.5);
    mean_field.mo_energy_beta = Some(vec![-0.25; n]);
    mean_field.nelec = (2, 1);
    mean_field.spin = 1;
    mean_field.validate().unwrap();

    let inputs =
        unrestricted_to_rdm(&mean_field, RdmConstraint::DQGT, IndexOrdering::Physicist).unwrap();
    assert_eq!(inputs.eri_ab.dim(), (n, n, n, n));
    assert_eq!(inputs.multiplicity, 2);

    let mut report = Vec::new();
    print_unrestricted_summary(&mut report, &inputs).unwrap();
    let report = String::from_utf8(report).unwrap();
    assert!(report.contains("eri_aa shape: (3, 3, 3, 3)"));
    assert!(report.contains("index ordering: Physicist"));
    assert!(report.contains("constraints: DQGT"));
}

#[test]
fn test_lambda_report_printing_is_deterministic() {
    let generator = LambdaDoublesGenerator::new();

    let mut runs = Vec::new();
    for _ in 0..2 {
        let report = generator.generate(&mut recorded_lambda_engine()).unwrap();
        let mut buffer = Vec::new();
        print_lambda_report(&mut buffer, &report).unwrap();
        runs.push(String::from_utf8(buffer).unwrap());
    }
    assert_eq!(runs[0], runs[1]);

    assert!(runs[0].contains("0 = <0| e(-T) H e2(e,f,n,m) e(T)|0>"));
    assert!(runs[0].contains("+1.00000000000000 <m,n||e,f>"));
    assert!(runs[0]
        .contains("lambda_two += +1.00000000000000 * einsum('mnef->mnef', g[o, o, v, v])"));
}

#[test]
fn test_example_configs_parse() {
    for filename in [
        "lambda_bridge.yaml",
        "h2_rhf_rdm.yaml",
        "n2_ccpvtz_rdm.yaml",
        "o2_uhf_rdm.yaml",
    ] {
        let path = example_path(filename);
        assert!(path.exists(), "{} should exist", path.display());

        let text = std::fs::read_to_string(&path).unwrap();
        let config: Config = serde_yml::from_str::<Config>(&text).unwrap().with_defaults();
        match filename {
            "lambda_bridge.yaml" => {
                assert_eq!(config.task(), "lambda");
                assert_eq!(config.lambda_engine(), "bridge");
            }
            "o2_uhf_rdm.yaml" => {
                assert_eq!(config.task(), "rdm");
                assert_eq!(config.rdm_reference(), "uhf");
                assert!(config.rdm_physicist_ordering());
            }
            _ => {
                assert_eq!(config.task(), "rdm");
                config.rdm_constraints().parse::<RdmConstraint>().unwrap();
            }
        }
    }
}

#[test]
#[ignore] // Exercises the bundled checkpoint artifact; run with --ignored.
fn test_h2_example_checkpoint_runs() {
    let path = example_path("h2_sto3g.json");
    if !path.exists() {
        eprintln!("Skipping test: {} not found", path.display());
        return;
    }

    let mean_field = MeanField::load(&path).unwrap();
    assert_eq!(mean_field.norb(), 2);

    let inputs = restricted_to_rdm(&mean_field, RdmConstraint::DQG).unwrap();
    assert_eq!(inputs.eri.dim(), (2, 2, 2, 2));
    // (11|11) in the MO basis for H2/STO-3G is about 0.675 Eh.
    assert!(inputs.eri[[0, 0, 0, 0]] > 0.5 && inputs.eri[[0, 0, 0, 0]] < 0.8);
}
