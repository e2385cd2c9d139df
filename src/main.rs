//! qcgen command-line interface
//!
//! Entry point for the two batch tasks: CCSD Lambda-equation code generation
//! and mean-field to 2-RDM integral preparation.

use color_eyre::eyre::Result;
use qcgen::app::Application;

fn main() -> Result<()> {
    color_eyre::install()?;
    Application::from_cli()?.run()
}
