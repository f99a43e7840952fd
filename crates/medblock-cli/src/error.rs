//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The contract refused or failed the operation
    #[error(transparent)]
    Contract(#[from] medblock_contract::ContractError),

    /// Ledger storage error
    #[error("Ledger error: {0}")]
    Store(#[from] medblock_store::StoreError),

    /// Policy configuration could not be turned into an access policy
    #[error("Policy error: {0}")]
    Policy(#[from] medblock_gatekeeper::GatekeeperError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// No caller identity could be determined
    #[error("No caller identity: {0}")]
    NoIdentity(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
