//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use medblock_domain::CallerIdentity;
use std::path::Path;

/// Execute the profile command, saving changes to `config_path`.
pub fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Add {
            name,
            caller,
            msp,
            certificate,
        } => add_profile(config, config_path, name, caller, msp, certificate, formatter),
        ProfileAction::Use { name } => use_profile(config, config_path, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        println!(
            "{}",
            formatter.profile(name, profile, name == &config.active_profile)
        );
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;
    println!("Active profile:");
    println!("{}", formatter.profile(&config.active_profile, profile, true));
    Ok(())
}

/// Create or update a profile.
fn add_profile(
    config: &mut Config,
    config_path: &Path,
    name: String,
    caller: String,
    msp: String,
    certificate: bool,
    formatter: &Formatter,
) -> Result<()> {
    let identity = if certificate {
        CallerIdentity::from_certificate_id(&caller, msp)
    } else {
        CallerIdentity::new(caller, msp)
    };

    if identity.id().trim().is_empty() || identity.membership().trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Profile identity and membership cannot be empty".to_string(),
        ));
    }

    let profile = Profile {
        identity: identity.id().to_string(),
        membership: identity.membership().to_string(),
    };

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save_to(config_path)?;

    println!(
        "{}",
        formatter.success(&format!(
            "{} profile '{}' ({} @ {})",
            action,
            name,
            identity.id(),
            identity.membership()
        ))
    );

    Ok(())
}

/// Switch to a different profile.
fn use_profile(config: &mut Config, config_path: &Path, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save_to(config_path)?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}
