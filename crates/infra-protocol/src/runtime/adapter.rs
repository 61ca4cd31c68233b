// crates/infra-protocol/src/runtime/adapter.rs
// ============================================================================
// Module: Infra Protocol Version Adapter
// Description: Promotion of protocol 1 payloads to the protocol 3 shape.
// Purpose: Let downstream code handle every legacy payload as multi-dataset.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Protocol 1 and protocol 3 differ only in dataset cardinality and the
//! `cluster`/`service` tags. Promotion wraps the single dataset into a
//! one-element sequence with empty tags. Nothing is validated here; dataset
//! contents are checked later, and independently, by their consumers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::PluginDataSetV3;
use crate::core::PluginDataV1;
use crate::core::PluginDataV3;

// ============================================================================
// SECTION: Promotion
// ============================================================================

impl PluginDataV1 {
    /// Promotes this payload to the protocol 3 shape.
    ///
    /// The identifier is kept unchanged, including its raw protocol version.
    #[must_use]
    pub fn into_v3(self) -> PluginDataV3 {
        PluginDataV3 {
            identifier: self.identifier,
            data: vec![PluginDataSetV3 {
                data_set: self.data_set,
                cluster: String::new(),
                service: String::new(),
            }],
        }
    }
}

impl From<PluginDataV1> for PluginDataV3 {
    fn from(value: PluginDataV1) -> Self {
        value.into_v3()
    }
}
