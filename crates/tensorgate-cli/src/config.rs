//! CLI configuration management
//!
//! The configuration file is created with default values the first time a
//! command runs without one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tensorgate_types::{GateError, Result};
use tensorgate_validator::WireFormat;
use tokio::fs;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Contract and request defaults
    pub contracts: ContractsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,

    /// Emit logs as JSON lines
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// Contract file used when no `--contracts` flag is given
    pub path: PathBuf,

    /// Request format used when no `--request-format` flag is given
    pub default_format: WireFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "warn".to_string(),
                json: false,
            },
            contracts: ContractsConfig {
                path: PathBuf::from("contracts.toml"),
                default_format: WireFormat::Kfs,
            },
        }
    }
}

impl CliConfig {
    /// Load configuration, writing the defaults first if the file is missing
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            let default_config = Self::default();
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await.map_err(|e| {
                    GateError::io(format!("Failed to create config directory: {}", e))
                })?;
            }
            default_config.save(path).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| GateError::io(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| GateError::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        fs::write(path, content)
            .await
            .map_err(|e| GateError::io(format!("Failed to write config file: {}", e)))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| GateError::config(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(GateError::config("Log level cannot be empty"));
        }
        if self.contracts.path.as_os_str().is_empty() {
            return Err(GateError::config("Contract file path cannot be empty"));
        }
        Ok(())
    }
}
