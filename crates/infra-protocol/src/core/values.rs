// crates/infra-protocol/src/core/values.rs
// ============================================================================
// Module: Infra Protocol Metric Values
// Description: Typed value shapes selected by a metric's type tag.
// Purpose: Define the structured payloads behind summary and Prometheus metrics.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A metric's raw value decodes into exactly one of these shapes, chosen by
//! its type tag. Scalar metrics decode to a bare `f64` and have no struct.
//! Histogram buckets are accepted in any order; ordering by strictly
//! increasing upper bound is a producer contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Summary
// ============================================================================

/// Pre-aggregated summary value carried by `summary` metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryValue {
    /// Number of samples.
    pub count: f64,
    /// Minimum sample value.
    pub min: f64,
    /// Maximum sample value.
    pub max: f64,
    /// Sum of sample values.
    pub sum: f64,
}

// ============================================================================
// SECTION: Prometheus Histogram
// ============================================================================

/// Prometheus histogram value carried by `prometheus-histogram` metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrometheusHistogramValue {
    /// Total number of observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<u64>,
    /// Sum of all observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_sum: Option<f64>,
    /// Buckets into which observations are counted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Vec<HistogramBucket>>,
}

/// Single cumulative histogram bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Observations less than or equal to the upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulative_count: Option<f64>,
    /// Inclusive upper bound of the bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

// ============================================================================
// SECTION: Prometheus Summary
// ============================================================================

/// Prometheus summary value carried by `prometheus-summary` metrics.
///
/// # Invariants
/// - Producers omit zero-valued fields and empty quantile lists on the wire,
///   so absent fields decode to zero and empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrometheusSummaryValue {
    /// Total number of observations.
    #[serde(default)]
    pub sample_count: f64,
    /// Sum of all observations.
    #[serde(default)]
    pub sample_sum: f64,
    /// Quantile estimates in producer order.
    #[serde(default)]
    pub quantiles: Vec<Quantile>,
}

/// Single quantile estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantile {
    /// Quantile rank in `[0, 1]`.
    #[serde(default)]
    pub quantile: f64,
    /// Estimated value at the quantile.
    #[serde(default)]
    pub value: f64,
}
