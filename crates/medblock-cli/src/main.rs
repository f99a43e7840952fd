//! MedBlock CLI - Command-line interface for the MedBlock ledger contract.

use clap::Parser;
use medblock_cli::commands;
use medblock_cli::{Cli, Command, Config, Formatter, Session};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `MEDBLOCK_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("MEDBLOCK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> medblock_cli::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::default_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    // Override profile for this invocation only
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let command = match cli.command {
        Command::Profile(args) => {
            return commands::execute_profile(args, &mut config, &config_path, &formatter);
        }
        Command::Ledger(command) => command,
    };

    let ledger_path = cli
        .ledger
        .map(PathBuf::from)
        .unwrap_or_else(|| config.ledger_path.clone());
    let mut session = Session::open(&ledger_path, &config.policy)?;
    let caller = || config.resolve_caller(cli.identity.as_deref(), cli.membership.as_deref());

    commands::execute_ledger(command, &mut session, caller, &formatter)
}
