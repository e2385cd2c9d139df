//! Per-task run functions

use color_eyre::eyre::{bail, eyre, Result};
use tracing::info;

use crate::algebra_impl::PdaggerqBridge;
use crate::config::{Args, Config};
use crate::io::{print_lambda_report, print_restricted_summary, print_unrestricted_summary};
use crate::lambda_impl::{recorded_lambda_engine, LambdaDoublesGenerator, LambdaDoublesReport};
use crate::rdm_impl::{
    restricted_open_to_rdm, restricted_to_rdm, unrestricted_to_rdm, IndexOrdering, MeanField,
    RdmConstraint,
};

pub fn run_lambda(args: &Args, config: &Config) -> Result<()> {
    info!("===========================================");
    info!("   CCSD Lambda Doubles Residual");
    info!("===========================================");

    let engine_kind = args.engine.clone().unwrap_or_else(|| config.lambda_engine());
    let generator = LambdaDoublesGenerator::new();

    let report: LambdaDoublesReport = match engine_kind.to_lowercase().as_str() {
        "recorded" => {
            info!("Using the recorded engine output");
            let mut engine = recorded_lambda_engine();
            generator.generate(&mut engine)?
        }
        "bridge" => {
            info!(
                "Using the operator-algebra bridge: {} {}",
                config.lambda_python(),
                config.lambda_bridge_script()
            );
            let mut engine =
                PdaggerqBridge::new(config.lambda_python(), config.lambda_bridge_script());
            generator.generate(&mut engine)?
        }
        other => bail!("unknown lambda engine '{}' (expected recorded or bridge)", other),
    };

    print_lambda_report(&mut std::io::stdout(), &report)
}

pub fn run_rdm(args: &Args, config: &Config) -> Result<()> {
    info!("===========================================");
    info!("   Mean-field to 2-RDM Integral Preparation");
    info!("===========================================");

    let checkpoint = args
        .checkpoint
        .clone()
        .or_else(|| config.rdm_checkpoint())
        .ok_or_else(|| eyre!("no mean-field checkpoint configured (rdm.checkpoint or --checkpoint)"))?;

    info!("Loading mean-field checkpoint: {}", checkpoint);
    let mean_field = MeanField::load(&checkpoint)?;
    info!(
        "Loaded a {} solution with {} molecular orbitals",
        mean_field.restriction,
        mean_field.norb()
    );

    let constraints: RdmConstraint = args
        .constraints
        .clone()
        .unwrap_or_else(|| config.rdm_constraints())
        .parse()?;
    let reference = args.reference.clone().unwrap_or_else(|| config.rdm_reference());
    let ordering = if args.physicist_ordering || config.rdm_physicist_ordering() {
        IndexOrdering::Physicist
    } else {
        IndexOrdering::Chemist
    };

    let stdout = &mut std::io::stdout();
    match reference.to_lowercase().as_str() {
        "rhf" => {
            let inputs = restricted_to_rdm(&mean_field, constraints)?;
            print_restricted_summary(stdout, &inputs)
        }
        "rohf" => {
            let inputs = restricted_open_to_rdm(&mean_field, constraints)?;
            print_restricted_summary(stdout, &inputs)
        }
        "uhf" => {
            let inputs = unrestricted_to_rdm(&mean_field, constraints, ordering)?;
            print_unrestricted_summary(stdout, &inputs)
        }
        other => bail!("unknown mean-field reference '{}' (expected rhf, rohf or uhf)", other),
    }
}
