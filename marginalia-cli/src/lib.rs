//! marginalia CLI library
//!
//! Command-line front end for the marginalia annotation pipeline: reads
//! text/annotation bundles, runs them through the pipeline and prints the
//! resulting segments.

pub mod commands;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
