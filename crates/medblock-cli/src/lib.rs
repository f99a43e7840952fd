//! MedBlock CLI library.
//!
//! This library provides the core functionality for the `medblock` command-line
//! interface: configuration and caller profiles, the local ledger session,
//! command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;

pub use cli::{Cli, Command, LedgerCommand};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session::Session;
