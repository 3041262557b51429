//! Calcpad CLI library
//!
//! Argument parsing, configuration overrides and the terminal session for
//! the `calcpad` binary.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod commands;
mod error;
mod session;

pub use commands::Cli;
pub use error::{CliError, CliResult};
pub use session::{build_app, init_tracing, run_interactive, run_keys};
