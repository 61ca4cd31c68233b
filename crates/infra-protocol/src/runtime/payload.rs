// crates/infra-protocol/src/runtime/payload.rs
// ============================================================================
// Module: Infra Protocol Payload Decoding
// Description: Version-dispatched decoding of raw payload bytes.
// Purpose: Reject unrecognized versions before trusting any dataset.
// Dependencies: crate::core, crate::runtime::adapter, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! Decoding probes `protocol_version` first, then checks it against the
//! caller's [`DecodeOptions`]. Only then is the payload parsed in the shape
//! its version declares. Protocol 1 payloads are promoted to the protocol 3
//! shape, so callers see two shapes: legacy multi-dataset and current.
//!
//! Security posture: payload bytes are untrusted; size is bounded before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::core::DataV4;
use crate::core::PluginDataV1;
use crate::core::PluginDataV3;
use crate::core::PluginProtocolVersion;
use crate::core::ProtocolVersion;
use crate::core::VersionError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum payload size in bytes.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Caller policy for payload decoding.
///
/// # Invariants
/// - The recognized-version set evolves; the caller decides which versions
///   are trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Versions accepted by the consuming pipeline stage.
    pub accepted_versions: Vec<ProtocolVersion>,
    /// Maximum payload size in bytes.
    pub max_payload_bytes: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            accepted_versions: ProtocolVersion::ALL.to_vec(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl DecodeOptions {
    /// Returns true when `version` is accepted.
    #[must_use]
    pub fn accepts(&self, version: ProtocolVersion) -> bool {
        self.accepted_versions.contains(&version)
    }
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Decoded payload in one of the two shapes downstream code handles.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Protocol 1-3 payload, promoted to the multi-dataset shape.
    Legacy {
        /// Version declared by the producer.
        version: ProtocolVersion,
        /// Multi-dataset payload.
        data: PluginDataV3,
    },
    /// Protocol 4 payload.
    Current(DataV4),
}

impl Payload {
    /// Returns the protocol version declared by the producer.
    #[must_use]
    pub const fn version(&self) -> ProtocolVersion {
        match self {
            Self::Legacy { version, .. } => *version,
            Self::Current(_) => ProtocolVersion::V4,
        }
    }

    /// Returns the integration name.
    #[must_use]
    pub fn integration_name(&self) -> &str {
        match self {
            Self::Legacy { data, .. } => &data.identifier.name,
            Self::Current(data) => &data.integration.name,
        }
    }
}

/// Payload decoding errors.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Payload exceeds the configured size limit.
    #[error("payload of {size} bytes exceeds limit of {limit} bytes")]
    TooLarge {
        /// Payload size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
    /// Payload is not valid JSON for its declared shape.
    #[error("invalid payload json: {0}")]
    Json(#[from] serde_json::Error),
    /// Protocol version is absent or unrecognized.
    #[error(transparent)]
    Version(#[from] VersionError),
    /// Protocol version is recognized but not accepted by the caller.
    #[error("protocol_version {0} is not accepted")]
    NotAccepted(ProtocolVersion),
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes raw payload bytes according to their declared protocol version.
///
/// # Errors
///
/// Returns [`PayloadError`] when the payload is too large, malformed, or
/// declares a version that is unrecognized or not accepted.
pub fn decode_payload(bytes: &[u8], options: &DecodeOptions) -> Result<Payload, PayloadError> {
    if bytes.len() > options.max_payload_bytes {
        return Err(PayloadError::TooLarge {
            size: bytes.len(),
            limit: options.max_payload_bytes,
        });
    }

    let probe: PluginProtocolVersion = serde_json::from_slice(bytes)?;
    let version = probe.protocol_version.resolve().inspect_err(|err| {
        warn!(error = %err, "rejecting payload with unusable protocol_version");
    })?;
    if !options.accepts(version) {
        warn!(version = %version, "rejecting payload with unaccepted protocol_version");
        return Err(PayloadError::NotAccepted(version));
    }

    debug!(version = %version, size_bytes = bytes.len(), "decoding integration payload");
    match version {
        ProtocolVersion::V1 => {
            let legacy: PluginDataV1 = serde_json::from_slice(bytes)?;
            debug!(integration = %legacy.identifier.name, "promoting protocol 1 payload");
            Ok(Payload::Legacy {
                version,
                data: legacy.into_v3(),
            })
        }
        ProtocolVersion::V2 | ProtocolVersion::V3 => Ok(Payload::Legacy {
            version,
            data: serde_json::from_slice(bytes)?,
        }),
        ProtocolVersion::V4 => Ok(Payload::Current(serde_json::from_slice(bytes)?)),
    }
}
