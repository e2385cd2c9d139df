//! Command-line argument parsing

use clap::Parser;

/// Lambda-equation generation and 2-RDM integral preparation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override output file (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the task to run (lambda or rdm)
    #[arg(long)]
    pub task: Option<String>,

    /// Override the lambda engine (recorded or bridge)
    #[arg(long)]
    pub engine: Option<String>,

    /// Override the mean-field checkpoint path
    #[arg(long)]
    pub checkpoint: Option<String>,

    /// Override the mean-field reference kind (rhf, rohf or uhf)
    #[arg(long)]
    pub reference: Option<String>,

    /// Override the RDM constraint hierarchy (D, DQ, DG, DQG, DQGT)
    #[arg(long)]
    pub constraints: Option<String>,

    /// Reorder UHF two-electron blocks into the physicist convention
    #[arg(long)]
    pub physicist_ordering: bool,
}
