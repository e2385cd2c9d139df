//! Configuration management for the qcgen tasks
//!
//! This module handles the YAML configuration structure, defaults, and the
//! accessor layer the application dispatches on.

mod args;

pub use args::Args;

use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Which pipeline to run: "lambda" or "rdm".
    pub task: Option<String>,
    pub lambda: Option<LambdaParams>,
    pub rdm: Option<RdmParams>,
}

/// Lambda-generator parameters.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LambdaParams {
    /// Engine selection: "recorded" or "bridge".
    pub engine: Option<String>,
    /// Python executable for the bridge engine.
    pub python: Option<String>,
    /// Bridge script path.
    pub bridge_script: Option<String>,
}

impl Default for LambdaParams {
    fn default() -> Self {
        LambdaParams {
            engine: Some("recorded".to_string()),
            python: Some("python3".to_string()),
            bridge_script: Some("tools/pdaggerq_bridge.py".to_string()),
        }
    }
}

impl LambdaParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.engine.is_none() {
            self.engine = defaults.engine;
        }
        if self.python.is_none() {
            self.python = defaults.python;
        }
        if self.bridge_script.is_none() {
            self.bridge_script = defaults.bridge_script;
        }
        self
    }
}

/// RDM-preparation parameters.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RdmParams {
    /// Mean-field checkpoint file (JSON).
    pub checkpoint: Option<String>,
    /// Mean-field reference kind: "rhf", "rohf" or "uhf".
    pub reference: Option<String>,
    /// Requested N-representability hierarchy (D, DQ, DG, DQG, DQGT).
    pub constraints: Option<String>,
    /// Reorder two-electron blocks into the physicist convention (UHF only).
    pub physicist_ordering: Option<bool>,
}

impl Default for RdmParams {
    fn default() -> Self {
        RdmParams {
            checkpoint: None,
            reference: Some("rhf".to_string()),
            constraints: Some("DQG".to_string()),
            physicist_ordering: Some(false),
        }
    }
}

impl RdmParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.reference.is_none() {
            self.reference = defaults.reference;
        }
        if self.constraints.is_none() {
            self.constraints = defaults.constraints;
        }
        if self.physicist_ordering.is_none() {
            self.physicist_ordering = defaults.physicist_ordering;
        }
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        if let Some(lambda) = self.lambda.take() {
            self.lambda = Some(lambda.with_defaults());
        }
        if let Some(rdm) = self.rdm.take() {
            self.rdm = Some(rdm.with_defaults());
        }
        self
    }

    /// Get the requested task name
    pub fn task(&self) -> String {
        self.task.clone().unwrap_or_else(|| "lambda".to_string())
    }

    /// Get the lambda engine selection
    pub fn lambda_engine(&self) -> String {
        self.lambda
            .as_ref()
            .and_then(|l| l.engine.clone())
            .unwrap_or_else(|| "recorded".to_string())
    }

    /// Get the python executable for the bridge engine
    pub fn lambda_python(&self) -> String {
        self.lambda
            .as_ref()
            .and_then(|l| l.python.clone())
            .unwrap_or_else(|| "python3".to_string())
    }

    /// Get the bridge script path
    pub fn lambda_bridge_script(&self) -> String {
        self.lambda
            .as_ref()
            .and_then(|l| l.bridge_script.clone())
            .unwrap_or_else(|| "tools/pdaggerq_bridge.py".to_string())
    }

    /// Get the checkpoint path, if configured
    pub fn rdm_checkpoint(&self) -> Option<String> {
        self.rdm.as_ref().and_then(|r| r.checkpoint.clone())
    }

    /// Get the mean-field reference kind
    pub fn rdm_reference(&self) -> String {
        self.rdm
            .as_ref()
            .and_then(|r| r.reference.clone())
            .unwrap_or_else(|| "rhf".to_string())
    }

    /// Get the requested constraint hierarchy
    pub fn rdm_constraints(&self) -> String {
        self.rdm
            .as_ref()
            .and_then(|r| r.constraints.clone())
            .unwrap_or_else(|| "DQG".to_string())
    }

    /// Check if physicist index ordering is requested
    pub fn rdm_physicist_ordering(&self) -> bool {
        self.rdm
            .as_ref()
            .and_then(|r| r.physicist_ordering)
            .unwrap_or(false)
    }
}
