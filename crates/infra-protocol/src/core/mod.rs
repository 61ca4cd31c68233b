// crates/infra-protocol/src/core/mod.rs
// ============================================================================
// Module: Infra Protocol Core Types
// Description: Canonical wire structures for integration payloads.
// Purpose: Provide stable, serializable types for current and legacy payloads.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types define the current (`DataV4`) envelope, the legacy V1/V3
//! shapes, metric records with their typed value shapes, and the free-form
//! inventory, metric and event maps. Field names match the wire format
//! exactly. All types are read-only views once deserialized.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod envelope;
pub mod legacy;
pub mod metric;
pub mod records;
pub mod timestamp;
pub mod values;
pub mod version;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use envelope::Common;
pub use envelope::DataV4;
pub use envelope::Dataset;
pub use envelope::EntityFields;
pub use envelope::IntegrationMetadata;
pub use legacy::PluginDataSet;
pub use legacy::PluginDataSetV3;
pub use legacy::PluginDataV1;
pub use legacy::PluginDataV3;
pub use legacy::PluginOutputIdentifier;
pub use metric::Metric;
pub use metric::MetricType;
pub use metric::RawMetricValue;
pub use records::Attributes;
pub use records::EventData;
pub use records::InventoryData;
pub use records::MetricData;
pub use timestamp::MILLIS_SINCE_JANUARY_FIRST_1978;
pub use timestamp::MetricTime;
pub use timestamp::TimestampUnit;
pub use values::HistogramBucket;
pub use values::PrometheusHistogramValue;
pub use values::PrometheusSummaryValue;
pub use values::Quantile;
pub use values::SummaryValue;
pub use version::PluginProtocolVersion;
pub use version::ProtocolVersion;
pub use version::RawProtocolVersion;
pub use version::VersionError;
