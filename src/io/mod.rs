//! Input/Output operations
//!
//! This module handles logging setup and report writing.

mod output;

pub use output::{print_lambda_report, print_restricted_summary, print_unrestricted_summary, setup_output};
