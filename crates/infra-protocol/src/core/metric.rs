// crates/infra-protocol/src/core/metric.rs
// ============================================================================
// Module: Infra Protocol Metrics
// Description: Dimensional metric records with type tags and raw values.
// Purpose: Preserve metric values undecoded until a typed accessor is chosen.
// Dependencies: crate::core::records, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Metric`] carries a [`MetricType`] tag and its value as unparsed JSON
//! text. Decoding is deferred to the typed accessors in
//! [`crate::runtime::decoder`], so no value shape is chosen before the
//! caller asks for one. Unknown tags round-trip unchanged and are not
//! decodable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::value::RawValue;

use crate::core::records::Attributes;
use crate::core::records::null_as_default;

// ============================================================================
// SECTION: Metric Types
// ============================================================================

/// Metric type tag selecting the shape of a metric's value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetricType {
    /// Delta count over the metric interval.
    Count,
    /// Pre-aggregated `{count, min, max, sum}` summary.
    Summary,
    /// Point-in-time scalar.
    Gauge,
    /// Per-second rate.
    Rate,
    /// Rate derived from a cumulative counter.
    CumulativeRate,
    /// Count derived from a cumulative counter.
    CumulativeCount,
    /// Prometheus summary with quantiles.
    PrometheusSummary,
    /// Prometheus cumulative histogram.
    PrometheusHistogram,
    /// Tag not recognized by this crate; preserved verbatim.
    Unknown(String),
}

impl MetricType {
    /// Parses a wire tag. Unrecognized tags map to [`MetricType::Unknown`].
    #[must_use]
    pub fn from_wire(tag: &str) -> Self {
        match tag {
            "count" => Self::Count,
            "summary" => Self::Summary,
            "gauge" => Self::Gauge,
            "rate" => Self::Rate,
            "cumulative-rate" => Self::CumulativeRate,
            "cumulative-count" => Self::CumulativeCount,
            "prometheus-summary" => Self::PrometheusSummary,
            "prometheus-histogram" => Self::PrometheusHistogram,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the wire tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Count => "count",
            Self::Summary => "summary",
            Self::Gauge => "gauge",
            Self::Rate => "rate",
            Self::CumulativeRate => "cumulative-rate",
            Self::CumulativeCount => "cumulative-count",
            Self::PrometheusSummary => "prometheus-summary",
            Self::PrometheusHistogram => "prometheus-histogram",
            Self::Unknown(tag) => tag,
        }
    }

    /// Returns true when the metric's `interval.ms` field carries meaning.
    #[must_use]
    pub const fn has_interval(&self) -> bool {
        matches!(self, Self::Count | Self::Summary)
    }

    /// Returns true when the value decodes as a single floating-point number.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Gauge | Self::Count | Self::Rate | Self::CumulativeRate | Self::CumulativeCount
        )
    }

    /// Returns true when the tag is not one of the recognized variants.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MetricType {
    fn from(value: &str) -> Self {
        Self::from_wire(value)
    }
}

impl Serialize for MetricType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Default for MetricType {
    /// An empty [`MetricType::Unknown`] tag; no typed accessor decodes it.
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl<'de> Deserialize<'de> for MetricType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Self::from_wire(&tag))
    }
}

// ============================================================================
// SECTION: Raw Values
// ============================================================================

/// Undecoded JSON text of a metric value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMetricValue(Box<RawValue>);

impl RawMetricValue {
    /// Builds a raw value from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when `json` is not valid JSON.
    pub fn from_json(json: impl Into<String>) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json.into()).map(Self)
    }

    /// Returns the JSON text exactly as received.
    #[must_use]
    pub fn get(&self) -> &str {
        self.0.get()
    }
}

impl PartialEq for RawMetricValue {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

// ============================================================================
// SECTION: Metrics
// ============================================================================

/// Dimensional metric record.
///
/// # Invariants
/// - `name` is non-empty for well-formed producers (see `Metric::validate`).
/// - A missing or `null` name or type decodes to empty, so one malformed
///   metric never fails the dataset that carries it.
/// - `value` is decoded only through the typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Type tag selecting the value shape.
    #[serde(rename = "type", default)]
    pub metric_type: MetricType,
    /// Producer timestamp in seconds or milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Interval in milliseconds; meaningful only for count and summary metrics.
    #[serde(rename = "interval.ms", default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<i64>,
    /// Metric dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Raw value whose shape depends on `metric_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawMetricValue>,
}

impl Metric {
    /// Creates a metric with a raw JSON value and no optional fields.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when `value_json` is not valid JSON.
    pub fn new(
        name: impl Into<String>,
        metric_type: MetricType,
        value_json: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: name.into(),
            metric_type,
            timestamp: None,
            interval_ms: None,
            attributes: None,
            value: Some(RawMetricValue::from_json(value_json)?),
        })
    }
}
