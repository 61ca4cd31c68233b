// crates/infra-protocol-config/src/config.rs
// ============================================================================
// Module: Infra Protocol Configuration
// Description: Configuration loading and validation for payload decoding.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: infra-protocol, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with a strict size limit. The path
//! is taken from the caller, then from `INFRA_PROTOCOL_CONFIG`, then from
//! `infra-protocol.toml` in the working directory. An environment path goes
//! through the same length checks as an explicit one. Missing or invalid
//! configuration fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use infra_protocol::DEFAULT_MAX_PAYLOAD_BYTES;
use infra_protocol::DecodeOptions;
use infra_protocol::ProtocolVersion;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "infra-protocol.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "INFRA_PROTOCOL_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum allowed payload size limit in bytes.
pub(crate) const MAX_PAYLOAD_BYTES_LIMIT: usize = 64 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Infra protocol configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolConfig {
    /// Payload decoding configuration.
    #[serde(default)]
    pub decode: DecodeConfig,
}

impl ProtocolConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = config_path(path)?;
        let content = read_config_text(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.decode.validate()
    }

    /// Returns the decode options described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn decode_options(&self) -> Result<DecodeOptions, ConfigError> {
        self.decode.to_options()
    }
}

/// Payload decoding configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeConfig {
    /// Protocol versions accepted by the pipeline.
    #[serde(default = "default_accepted_versions")]
    pub accepted_versions: Vec<u8>,
    /// Maximum payload size in bytes.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            accepted_versions: default_accepted_versions(),
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

impl DecodeConfig {
    /// Validates decode configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.to_options().map(|_| ())
    }

    /// Converts the configuration into validated decode options.
    fn to_options(&self) -> Result<DecodeOptions, ConfigError> {
        if self.accepted_versions.is_empty() {
            return Err(ConfigError::Invalid(
                "decode.accepted_versions must not be empty".to_string(),
            ));
        }
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "decode.max_payload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_payload_bytes > MAX_PAYLOAD_BYTES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "decode.max_payload_bytes must be at most {MAX_PAYLOAD_BYTES_LIMIT}"
            )));
        }

        let mut accepted_versions = Vec::with_capacity(self.accepted_versions.len());
        for raw in &self.accepted_versions {
            let version = ProtocolVersion::try_from(u64::from(*raw)).map_err(|_| {
                ConfigError::Invalid(format!("decode.accepted_versions contains unknown version {raw}"))
            })?;
            if accepted_versions.contains(&version) {
                return Err(ConfigError::Invalid(format!(
                    "decode.accepted_versions contains duplicate version {raw}"
                )));
            }
            accepted_versions.push(version);
        }
        accepted_versions.sort_unstable();

        Ok(DecodeOptions {
            accepted_versions,
            max_payload_bytes: self.max_payload_bytes,
        })
    }
}

/// Default accepted protocol versions.
fn default_accepted_versions() -> Vec<u8> {
    ProtocolVersion::ALL.iter().map(|version| version.as_u8()).collect()
}

/// Default maximum payload size.
const fn default_max_payload_bytes() -> usize {
    DEFAULT_MAX_PAYLOAD_BYTES
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Picks the config path: caller first, then the environment, then the default
/// file name. The chosen path is checked against the length limits.
fn config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => env::var_os(CONFIG_ENV_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from),
    };
    check_path_limits(&path)?;
    Ok(path)
}

/// Rejects paths whose total or per-segment length exceeds the limits.
fn check_path_limits(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "infra-protocol config path is longer than {MAX_TOTAL_PATH_LENGTH} bytes"
        )));
    }
    let oversized = path
        .components()
        .any(|segment| segment.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH);
    if oversized {
        return Err(ConfigError::Invalid(format!(
            "infra-protocol config path has a segment longer than {MAX_PATH_COMPONENT_LENGTH} bytes"
        )));
    }
    Ok(())
}

/// Reads the config file as UTF-8 text within the size limit.
fn read_config_text(path: &Path) -> Result<String, ConfigError> {
    let bytes = fs::read(path)
        .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid(format!(
            "infra-protocol config file is larger than {MAX_CONFIG_FILE_SIZE} bytes"
        )));
    }
    String::from_utf8(bytes).map_err(|_| {
        ConfigError::Invalid("infra-protocol config file is not valid utf-8".to_string())
    })
}
