//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur while building an access policy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatekeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
