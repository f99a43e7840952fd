//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use medblock_domain::CallerIdentity;
use medblock_gatekeeper::PolicyConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file holding the local ledger
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,

    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Enrolled caller identities by profile name
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Access policy and write validation rules
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// A caller identity the CLI acts as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Short caller identifier (certificate common name)
    pub identity: String,

    /// Organization membership tag
    pub membership: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".medblock").join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Resolve the caller for this invocation.
    ///
    /// Explicit `identity`/`membership` values win over the active profile,
    /// field by field.
    pub fn resolve_caller(
        &self,
        identity: Option<&str>,
        membership: Option<&str>,
    ) -> Result<CallerIdentity> {
        let profile = self.profiles.get(&self.active_profile);

        let identity = identity
            .or_else(|| profile.map(|p| p.identity.as_str()))
            .ok_or_else(|| {
                CliError::NoIdentity(format!(
                    "profile '{}' is not configured and --identity was not given",
                    self.active_profile
                ))
            })?;
        let membership = membership
            .or_else(|| profile.map(|p| p.membership.as_str()))
            .ok_or_else(|| {
                CliError::NoIdentity(format!(
                    "profile '{}' is not configured and --membership was not given",
                    self.active_profile
                ))
            })?;

        Ok(CallerIdentity::new(identity, membership))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
            active_profile: default_profile(),
            profiles: BTreeMap::new(),
            policy: PolicyConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_ledger_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".medblock").join("ledger.db"))
        .unwrap_or_else(|| PathBuf::from("medblock-ledger.db"))
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
