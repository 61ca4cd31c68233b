// crates/infra-protocol/src/core/version.rs
// ============================================================================
// Module: Infra Protocol Versions
// Description: Raw and recognized protocol version values.
// Purpose: Keep the wire version opaque while exposing a closed recognized set.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Producers emit `protocol_version` as a JSON number or a decimal string.
//! The wire value is preserved untouched in [`RawProtocolVersion`] and only
//! interpreted on request. Unrecognized values are a hard error; no dataset
//! should be trusted until the version resolves.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Raw Versions
// ============================================================================

/// Protocol version exactly as written by the producer.
///
/// # Invariants
/// - The value is opaque; `Null` means the field was absent or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProtocolVersion(Value);

impl RawProtocolVersion {
    /// Wraps a raw JSON value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns true when no version was supplied.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self.0, Value::Null)
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Resolves the raw value into a recognized version.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] when the value is absent or not recognized.
    pub fn resolve(&self) -> Result<ProtocolVersion, VersionError> {
        ProtocolVersion::try_from(self)
    }
}

impl From<ProtocolVersion> for RawProtocolVersion {
    fn from(value: ProtocolVersion) -> Self {
        Self(Value::from(value.as_u8()))
    }
}

impl fmt::Display for RawProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(text) => f.write_str(text),
            other => fmt::Display::fmt(other, f),
        }
    }
}

/// Minimal payload view used to read the version before choosing a shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginProtocolVersion {
    /// Raw protocol version; open-ended for validation purposes.
    #[serde(default)]
    pub protocol_version: RawProtocolVersion,
}

// ============================================================================
// SECTION: Recognized Versions
// ============================================================================

/// Protocol versions understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolVersion {
    /// Single dataset per payload.
    V1,
    /// Multiple datasets per payload.
    V2,
    /// Multiple datasets with cluster and service tags.
    V3,
    /// Dimensional metrics with typed values.
    V4,
}

impl ProtocolVersion {
    /// All recognized versions in ascending order.
    pub const ALL: [Self; 4] = [Self::V1, Self::V2, Self::V3, Self::V4];

    /// Returns the numeric version.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
            Self::V4 => 4,
        }
    }

    /// Returns true when payloads of this version use the legacy dataset shapes.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        !matches!(self, Self::V4)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl TryFrom<u64> for ProtocolVersion {
    type Error = VersionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            4 => Ok(Self::V4),
            other => Err(VersionError::Unrecognized(other.to_string())),
        }
    }
}

impl TryFrom<&RawProtocolVersion> for ProtocolVersion {
    type Error = VersionError;

    fn try_from(raw: &RawProtocolVersion) -> Result<Self, Self::Error> {
        match &raw.0 {
            Value::Null => Err(VersionError::Missing),
            Value::Number(number) => {
                let recognized = match number.as_u64() {
                    Some(value) => Self::try_from(value).ok(),
                    None => number.as_f64().and_then(version_from_float),
                };
                recognized.ok_or_else(|| VersionError::Unrecognized(number.to_string()))
            }
            Value::String(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|_| VersionError::Unrecognized(text.clone()))
                .and_then(Self::try_from),
            other => Err(VersionError::Unrecognized(other.to_string())),
        }
    }
}

/// Matches a float such as `4.0` against the recognized versions.
fn version_from_float(value: f64) -> Option<ProtocolVersion> {
    ProtocolVersion::ALL
        .into_iter()
        .find(|version| (f64::from(version.as_u8()) - value).abs() < f64::EPSILON)
}

/// Protocol version resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The payload carries no protocol version.
    #[error("payload is missing protocol_version")]
    Missing,
    /// The payload carries a version this crate does not recognize.
    #[error("unrecognized protocol_version: {0}")]
    Unrecognized(String),
}
