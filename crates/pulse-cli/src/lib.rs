//! Pulse CLI library.
//!
//! Terminal dashboard for the Pulse 5G incident-monitoring edge: configuration
//! profiles, the derived views over REST snapshots, output formatting and the
//! live view fed by the alert stream.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod views;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
