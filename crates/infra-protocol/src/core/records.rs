// crates/infra-protocol/src/core/records.rs
// ============================================================================
// Module: Infra Protocol Free-Form Records
// Description: Inventory, metric and event maps carried by datasets.
// Purpose: Provide string-keyed JSON records with stable serde forms.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Inventory items, flattened legacy metrics and events are free-form JSON
//! objects. Each record type is a transparent wrapper over a string-keyed map
//! so it serializes exactly as the producer wrote it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Attributes
// ============================================================================

/// String-keyed attribute mapping attached to metrics and common blocks.
pub type Attributes = Map<String, Value>;

/// Inventory key holding the item identifier used for sorting.
const INVENTORY_ID_KEY: &str = "id";

// ============================================================================
// SECTION: Serde Helpers
// ============================================================================

/// Deserializes a field where JSON `null` means the same as an absent field.
///
/// Pair with `#[serde(default)]` so a missing key also yields `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// SECTION: Record Types
// ============================================================================

/// Generates a transparent string-keyed record wrapper with map accessors.
macro_rules! record_map {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Map<String, Value>);

        impl $name {
            /// Creates an empty record.
            #[must_use]
            pub fn new() -> Self {
                Self(Map::new())
            }

            /// Returns the value stored under `key`, if any.
            #[must_use]
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            /// Returns true when `key` is present.
            #[must_use]
            pub fn contains_key(&self, key: &str) -> bool {
                self.0.contains_key(key)
            }

            /// Inserts a value, returning the previous value for the key.
            pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
                self.0.insert(key.into(), value.into())
            }

            /// Removes a key, returning its value when present.
            pub fn remove(&mut self, key: &str) -> Option<Value> {
                self.0.remove(key)
            }

            /// Returns the number of fields.
            #[must_use]
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Returns true when the record has no fields.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Returns the underlying map.
            #[must_use]
            pub const fn as_map(&self) -> &Map<String, Value> {
                &self.0
            }

            /// Consumes the record and returns the underlying map.
            #[must_use]
            pub fn into_map(self) -> Map<String, Value> {
                self.0
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(value: Map<String, Value>) -> Self {
                Self(value)
            }
        }

        impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for $name {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
            }
        }
    };
}

record_map! {
    /// Inventory item produced by an integration for the agent's inventory store.
    ///
    /// # Invariants
    /// - Keys are free-form; only `"id"` carries meaning (see [`InventoryData::sort_key`]).
    InventoryData
}

record_map! {
    /// Flattened metric record emitted by legacy (V1-V3) integrations.
    MetricData
}

record_map! {
    /// Single-shot event record.
    ///
    /// # Invariants
    /// - Records produced by the event builder always carry `eventType`,
    ///   `category` and `summary`, and never carry `hostname`.
    EventData
}

impl InventoryData {
    /// Returns the string stored under `"id"`, or an empty string when the key
    /// is absent or not a string.
    #[must_use]
    pub fn sort_key(&self) -> &str {
        self.0.get(INVENTORY_ID_KEY).and_then(Value::as_str).unwrap_or_default()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
