//! Field Configuration - default parameters and service settings as TOML
//!
//! Each section implements `Default` with the reference development case,
//! so the service runs unchanged when no config file is present.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::{
    DEFAULT_FIELD_NAME, DEFAULT_SERVER_ADDR, MAX_BODY_BYTES, RUN_TIMEOUT_SECS,
};
use crate::engine::EngineOptions;
use crate::types::SimulationParameters;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "GASFIELD_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "field_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a simulator deployment.
///
/// Load with `FieldConfig::load()` which searches:
/// 1. `$GASFIELD_CONFIG` env var
/// 2. `./field_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Field identification
    #[serde(default)]
    pub field: FieldInfo,

    /// Default parameter record offered to clients.
    ///
    /// Optional as a section, but complete when present: every field of the
    /// record is required, same as on the wire.
    #[serde(default)]
    pub parameters: SimulationParameters,

    /// Engine execution tuning
    #[serde(default)]
    pub engine: EngineOptions,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl FieldConfig {
    /// Load configuration using the standard search order:
    /// 1. `$GASFIELD_CONFIG` environment variable
    /// 2. `./field_config.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A file that fails to load is logged and skipped.
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), field = %config.field.name, "Loaded field config from GASFIELD_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from GASFIELD_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "GASFIELD_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./field_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(field = %config.field.name, "Loaded field config from ./field_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./field_config.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No field_config.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents)
            .map_err(|e| match e {
                ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
                other => other,
            })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings with a suggested correction and
    /// never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Field config saved");
        Ok(())
    }

    /// Validate every section.
    ///
    /// Rules:
    /// - The default parameter record must itself be runnable
    /// - Field name must not be blank
    /// - Server address must parse, timeout and body limit must be > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = self
            .parameters
            .violations()
            .into_iter()
            .map(|e| format!("parameters: {e}"))
            .collect();

        if self.field.name.trim().is_empty() {
            errors.push("field.name must not be blank".to_string());
        }

        if self.server.addr.parse::<SocketAddr>().is_err() {
            errors.push(format!(
                "server.addr = '{}' is not a valid socket address",
                self.server.addr
            ));
        }
        if self.server.run_timeout_secs == 0 {
            errors.push("server.run_timeout_secs must be > 0".to_string());
        }
        if self.server.max_body_bytes == 0 {
            errors.push("server.max_body_bytes must be > 0".to_string());
        }

        // Plausibility checks: warnings only
        for w in super::validation::validate_physical_ranges(&self.parameters) {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Field Info
// ============================================================================

/// Identification metadata - appears in logs and API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Field name
    #[serde(default = "default_field_name")]
    pub name: String,
}

fn default_field_name() -> String {
    DEFAULT_FIELD_NAME.to_string()
}

impl Default for FieldInfo {
    fn default() -> Self {
        Self {
            name: default_field_name(),
        }
    }
}

// ============================================================================
// Server Config
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `GASFIELD_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,

    /// Wall-clock limit for one simulation request (seconds).
    #[serde(default = "default_run_timeout_secs")]
    pub run_timeout_secs: u64,

    /// Largest accepted request body (bytes).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_server_addr() -> String {
    DEFAULT_SERVER_ADDR.to_string()
}
fn default_run_timeout_secs() -> u64 { RUN_TIMEOUT_SECS }
fn default_max_body_bytes() -> usize { MAX_BODY_BYTES }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
            run_timeout_secs: default_run_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = FieldConfig::from_toml_str("").unwrap();
        assert_eq!(config, FieldConfig::default());
        assert_eq!(config.field.name, "Fairfields");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = FieldConfig::default();
        config.field.name = "Moomba South".to_string();
        config.parameters.num_rigs = 4;
        config.engine.parallel_well_threshold = 0;
        let text = config.to_toml().unwrap();
        let back = FieldConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_parameters_section_rejected() {
        let toml_str = r#"
[parameters]
gasPrice = 12.0
"#;
        assert!(matches!(
            FieldConfig::from_toml_str(toml_str),
            Err(ConfigError::Parse(..))
        ));
    }

    #[test]
    fn test_invalid_server_settings() {
        let mut config = FieldConfig::default();
        config.server.addr = "not-an-address".to_string();
        config.server.run_timeout_secs = 0;
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2, "got {errors:?}");
                assert!(errors.iter().any(|e| e.contains("server.addr")));
                assert!(errors.iter().any(|e| e.contains("run_timeout_secs")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parameter_violations_prefixed() {
        let mut config = FieldConfig::default();
        config.parameters.drill_time = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("parameters: drillTime"));
    }
}
