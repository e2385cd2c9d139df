//! Application shell
//!
//! CLI entry, configuration loading and task dispatch.

mod tasks;

use crate::config::{Args, Config};
use crate::io::setup_output;
use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};
use std::fs;
use tracing::info;

pub struct Application {
    args: Args,
    config: Config,
}

impl Application {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());

        match TaskSelection::determine(&self.args, &self.config)? {
            TaskSelection::Lambda => {
                info!("Running the Lambda-equation generation task");
                tasks::run_lambda(&self.args, &self.config)
            }
            TaskSelection::Rdm => {
                info!("Running the RDM integral preparation task");
                tasks::run_rdm(&self.args, &self.config)
            }
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}

enum TaskSelection {
    Lambda,
    Rdm,
}

impl TaskSelection {
    fn determine(args: &Args, config: &Config) -> Result<Self> {
        let task = args.task.clone().unwrap_or_else(|| config.task());
        match task.to_lowercase().as_str() {
            "lambda" => Ok(TaskSelection::Lambda),
            "rdm" => Ok(TaskSelection::Rdm),
            other => bail!("unknown task '{}' (expected lambda or rdm)", other),
        }
    }
}
