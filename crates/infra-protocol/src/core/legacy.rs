// crates/infra-protocol/src/core/legacy.rs
// ============================================================================
// Module: Infra Protocol Legacy Payloads
// Description: Protocol 1-3 payload shapes.
// Purpose: Model single- and multi-dataset payloads from pre-dimensional integrations.
// Dependencies: crate::core::{envelope, records, version}, serde
// ============================================================================

//! ## Overview
//! Protocol 1 payloads carry one dataset flattened into the top-level object.
//! Protocols 2 and 3 carry a `data` array of datasets; protocol 3 adds the
//! `cluster` and `service` tags, which protocol 2 producers simply omit.
//! Protocol 1 payloads are promoted to the protocol 3 shape by
//! [`crate::runtime::adapter`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::envelope::EntityFields;
use crate::core::records::EventData;
use crate::core::records::InventoryData;
use crate::core::records::MetricData;
use crate::core::records::null_as_default;
use crate::core::version::RawProtocolVersion;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Fields identifying a plugin and the version of its output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginOutputIdentifier {
    /// Integration name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Raw protocol version; open-ended for validation purposes.
    #[serde(rename = "protocol_version", default)]
    pub raw_protocol_version: RawProtocolVersion,
    /// Integration version.
    #[serde(default, deserialize_with = "null_as_default")]
    pub integration_version: String,
    /// Integration status.
    #[serde(rename = "integration_status", default, deserialize_with = "null_as_default")]
    pub status: String,
}

// ============================================================================
// SECTION: Datasets
// ============================================================================

/// Data produced by a plugin for a single entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginDataSet {
    /// Entity identity fields.
    #[serde(default, skip_serializing_if = "EntityFields::is_absent")]
    pub entity: EntityFields,
    /// Flattened metric records, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<MetricData>>,
    /// Inventory items keyed by item identifier, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<BTreeMap<String, InventoryData>>,
    /// Events, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventData>>,
    /// Accepted for SDK compatibility; ignored.
    #[serde(default)]
    pub add_hostname: bool,
}

/// Protocol 2/3 dataset with cluster and service tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginDataSetV3 {
    /// Dataset content.
    #[serde(flatten)]
    pub data_set: PluginDataSet,
    /// Cluster name; empty when not supplied.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster: String,
    /// Service name; empty when not supplied.
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: String,
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Protocol 1 payload: a single dataset for a single entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginDataV1 {
    /// Plugin identity.
    #[serde(flatten)]
    pub identifier: PluginOutputIdentifier,
    /// The payload's only dataset.
    #[serde(flatten)]
    pub data_set: PluginDataSet,
}

/// Protocol 2/3 payload: one dataset per entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginDataV3 {
    /// Plugin identity.
    #[serde(flatten)]
    pub identifier: PluginOutputIdentifier,
    /// Datasets in producer order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<PluginDataSetV3>,
}
