// crates/infra-protocol/src/core/envelope.rs
// ============================================================================
// Module: Infra Protocol Envelope
// Description: Current (protocol 4) payload envelope and dataset structures.
// Purpose: Model the multi-dataset envelope emitted by dimensional integrations.
// Dependencies: crate::core::{metric, records, version}, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`DataV4`] envelope names the emitting integration and carries one
//! [`Dataset`] per entity. Each dataset shares a [`Common`] block of defaults
//! with its metrics. Metrics, inventory and events are independently
//! optional; absence is recorded as `None`, never as an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::metric::Metric;
use crate::core::records::Attributes;
use crate::core::records::EventData;
use crate::core::records::InventoryData;
use crate::core::records::null_as_default;
use crate::core::version::RawProtocolVersion;

// ============================================================================
// SECTION: Entity Fields
// ============================================================================

/// Entity identity fields supplied by the producer.
///
/// # Invariants
/// - Opaque to this crate; resolution and validation belong to the entity
///   identity resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityFields(Value);

impl EntityFields {
    /// Wraps raw entity fields.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns true when no entity was supplied.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self.0, Value::Null)
    }

    /// Returns the raw entity value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Identity of the integration that produced a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationMetadata {
    /// Integration name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Integration version.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
}

/// Protocol 4 payload envelope.
///
/// # Invariants
/// - `protocol_version` must resolve before `data` is trusted.
/// - A `null` container or string decodes the same as an absent one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataV4 {
    /// Raw protocol version; open-ended for validation purposes.
    #[serde(default)]
    pub protocol_version: RawProtocolVersion,
    /// Emitting integration.
    #[serde(default, deserialize_with = "null_as_default")]
    pub integration: IntegrationMetadata,
    /// Datasets in producer order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Dataset>,
}

/// Telemetry for a single entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Defaults shared by the dataset's metrics.
    #[serde(default, deserialize_with = "null_as_default")]
    pub common: Common,
    /// Dimensional metrics, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<Metric>>,
    /// Entity identity fields.
    #[serde(default, skip_serializing_if = "EntityFields::is_absent")]
    pub entity: EntityFields,
    /// Inventory items keyed by item identifier, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<BTreeMap<String, InventoryData>>,
    /// Events, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventData>>,
}

impl Dataset {
    /// Returns the dataset's metrics, or an empty slice when none were supplied.
    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        self.metrics.as_deref().unwrap_or_default()
    }

    /// Returns the dataset's events, or an empty slice when none were supplied.
    #[must_use]
    pub fn events(&self) -> &[EventData] {
        self.events.as_deref().unwrap_or_default()
    }

    /// Returns inventory items ordered by their derived sort key.
    #[must_use]
    pub fn inventory_by_sort_key(&self) -> Vec<(&str, &InventoryData)> {
        let mut items: Vec<(&str, &InventoryData)> = self
            .inventory
            .iter()
            .flatten()
            .map(|(key, item)| (key.as_str(), item))
            .collect();
        items.sort_by(|left, right| left.1.sort_key().cmp(right.1.sort_key()));
        items
    }
}

// ============================================================================
// SECTION: Common Block
// ============================================================================

/// Defaults applied to metrics that omit them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Common {
    /// Default timestamp in seconds or milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Default interval in milliseconds.
    #[serde(rename = "interval.ms", default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<i64>,
    /// Default attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl Common {
    /// Returns a copy of `metric` with omitted fields filled from this block.
    ///
    /// The metric's own timestamp, interval and attribute keys always win.
    #[must_use]
    pub fn apply_to(&self, metric: &Metric) -> Metric {
        let mut resolved = metric.clone();
        resolved.timestamp = metric.timestamp.or(self.timestamp);
        resolved.interval_ms = metric.interval_ms.or(self.interval_ms);
        resolved.attributes = match (&self.attributes, &metric.attributes) {
            (None, None) => None,
            (None, Some(own)) => Some(own.clone()),
            (Some(defaults), own) => {
                let mut merged = defaults.clone();
                if let Some(own) = own {
                    merged.extend(own.iter().map(|(key, value)| (key.clone(), value.clone())));
                }
                Some(merged)
            }
        };
        resolved
    }
}
