//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// MedBlock CLI - Anchor medical records and decide insurance claims on a local ledger.
#[derive(Debug, Parser)]
#[command(name = "medblock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MEDBLOCK_CONFIG")]
    pub config: Option<String>,

    /// Ledger database path (overrides the configured one)
    #[arg(short, long, global = true, env = "MEDBLOCK_LEDGER")]
    pub ledger: Option<String>,

    /// Profile to act as
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Caller identifier (overrides the profile)
    #[arg(long, global = true, env = "MEDBLOCK_IDENTITY")]
    pub identity: Option<String>,

    /// Caller membership tag (overrides the profile)
    #[arg(long, global = true, env = "MEDBLOCK_MEMBERSHIP")]
    pub membership: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Ledger(LedgerCommand),

    /// Manage caller profiles
    Profile(ProfileArgs),
}

/// Commands that run against the ledger.
#[derive(Debug, Subcommand)]
pub enum LedgerCommand {
    /// Anchor a new medical record (hospital members)
    CreateRecord(CreateRecordArgs),

    /// Show a medical record
    GetRecord(RecordIdArgs),

    /// List the calling patient's records
    ListRecords,

    /// Request an insurance claim against a record (patient members)
    RequestClaim(RequestClaimArgs),

    /// Approve a pending claim (insurer members)
    ApproveClaim(ClaimIdArgs),

    /// Reject a pending claim (insurer members)
    RejectClaim(ClaimIdArgs),

    /// Show a claim
    GetClaim(ClaimIdArgs),
}

/// Arguments for the create-record command.
#[derive(Debug, Parser)]
pub struct CreateRecordArgs {
    /// Record ID
    pub id: String,

    /// Patient the record belongs to
    pub patient_id: String,

    /// Pointer to the off-ledger document (e.g. a content hash)
    pub content_reference: String,
}

/// Arguments naming a record.
#[derive(Debug, Parser)]
pub struct RecordIdArgs {
    /// Record ID
    pub id: String,
}

/// Arguments for the request-claim command.
#[derive(Debug, Parser)]
pub struct RequestClaimArgs {
    /// Claim ID
    pub claim_id: String,

    /// Record the claim is made against
    pub record_id: String,
}

/// Arguments naming a claim.
#[derive(Debug, Parser)]
pub struct ClaimIdArgs {
    /// Claim ID
    pub claim_id: String,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Create or update a profile
    Add {
        /// Profile name
        name: String,
        /// Caller identifier, or a raw X.509 identity with --certificate
        caller: String,
        /// Organization membership tag
        msp: String,
        /// Derive the identifier from the certificate common name
        #[arg(long)]
        certificate: bool,
    },

    /// Switch to a different profile
    Use {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
