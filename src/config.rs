use crate::orders::Role;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for rackops
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RackopsConfig {
    /// Console session settings
    pub console: ConsoleConfig,
    /// Startup data
    pub seed: SeedConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Roster id of the employee using the console
    pub current_user: String,
    /// Role the console starts in
    pub initial_role: Role,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedConfig {
    /// TOML or JSON seed file; the built-in seed is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level, overridden by RUST_LOG
    pub log_level: String,
    /// Emit JSON log lines instead of the compact format
    pub json: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            current_user: "emp-002".to_string(),
            initial_role: Role::TeamLead,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
        }
    }
}

impl RackopsConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (`rackops.toml`, or `explicit` when given)
    /// 3. Environment variables (prefixed with RACKOPS__)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        // Missing keys fall back to the serde defaults
        let mut builder = Config::builder();

        match explicit {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                if Path::new("rackops.toml").exists() {
                    builder = builder.add_source(File::with_name("rackops"));
                }
            }
        }

        // Override with environment variables
        builder = builder.add_source(
            Environment::with_prefix("RACKOPS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let rackops_config: RackopsConfig = config.try_deserialize()?;
        Ok(rackops_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists. Returns whether one was loaded.
    ///
    /// Runs before telemetry is up, so callers log the outcome themselves.
    pub fn load_env_file() -> Result<bool> {
        Self::load_env_file_from(".env")
    }

    pub fn load_env_file_from<P: AsRef<Path>>(path: P) -> Result<bool> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(false);
        }
        dotenvy::from_path(path)
            .with_context(|| format!("Failed to load environment file {}", path.display()))?;
        Ok(true)
    }
}
