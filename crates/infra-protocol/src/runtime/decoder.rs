// crates/infra-protocol/src/runtime/decoder.rs
// ============================================================================
// Module: Infra Protocol Metric Value Decoder
// Description: Tag-checked accessors for a metric's raw value.
// Purpose: Decode raw metric values into exactly the shape their tag declares.
// Dependencies: crate::core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Each accessor decodes one shape and fails with
//! [`ValueError::ShapeMismatch`] when the metric's tag does not declare it.
//! A mismatched value is never coerced: a histogram's bucket array must
//! never be read as a bare number.
//!
//! Security posture: metric values are untrusted producer input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::Attributes;
use crate::core::Metric;
use crate::core::MetricType;
use crate::core::PrometheusHistogramValue;
use crate::core::PrometheusSummaryValue;
use crate::core::SummaryValue;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Metric value decoding errors.
#[derive(Debug, Error)]
pub enum ValueError {
    /// The accessor's shape does not match the metric's type tag.
    #[error("metric type {actual} is not {expected}")]
    ShapeMismatch {
        /// Tag carried by the metric.
        actual: MetricType,
        /// Shape requested by the caller.
        expected: &'static str,
    },
    /// The metric carries no value, or a null one.
    #[error("metric of type {metric_type} has no value")]
    MissingValue {
        /// Tag carried by the metric.
        metric_type: MetricType,
    },
    /// The value is malformed for the metric's shape.
    #[error("invalid {metric_type} metric value: {source}")]
    Decode {
        /// Tag carried by the metric.
        metric_type: MetricType,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The metric has an empty name.
    #[error("metric name must not be empty")]
    EmptyName,
}

// ============================================================================
// SECTION: Accessors
// ============================================================================

/// Shape label used by the numeric accessor.
const NUMERIC_SHAPE: &str = "gauge, count, rate, cumulative-rate or cumulative-count";

impl Metric {
    /// Decodes the value of a gauge, count, rate, cumulative-rate or
    /// cumulative-count metric.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] when the tag is not numeric or the value is not
    /// a JSON number.
    pub fn numeric_value(&self) -> Result<f64, ValueError> {
        self.decode_shape(self.metric_type.is_numeric(), NUMERIC_SHAPE)
    }

    /// Decodes the value of a `summary` metric.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] when the tag is not `summary` or the value is
    /// not a complete `{count, min, max, sum}` object.
    pub fn summary_value(&self) -> Result<SummaryValue, ValueError> {
        self.decode_shape(self.metric_type == MetricType::Summary, "summary")
    }

    /// Decodes the value of a `prometheus-summary` metric.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] when the tag is not `prometheus-summary` or the
    /// value is malformed.
    pub fn prometheus_summary_value(&self) -> Result<PrometheusSummaryValue, ValueError> {
        self.decode_shape(self.metric_type == MetricType::PrometheusSummary, "prometheus-summary")
    }

    /// Decodes the value of a `prometheus-histogram` metric.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] when the tag is not `prometheus-histogram` or
    /// the value is malformed.
    pub fn prometheus_histogram_value(&self) -> Result<PrometheusHistogramValue, ValueError> {
        self.decode_shape(
            self.metric_type == MetricType::PrometheusHistogram,
            "prometheus-histogram",
        )
    }

    /// Returns a one-level copy of the metric's attributes.
    ///
    /// Mutating the copy never affects this metric. Absent attributes copy to
    /// an empty mapping.
    #[must_use]
    pub fn copy_attributes(&self) -> Attributes {
        self.attributes.clone().unwrap_or_default()
    }

    /// Checks the record-level invariants that accessors do not cover.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::EmptyName`] for an empty name and
    /// [`ValueError::MissingValue`] when no value is present.
    pub fn validate(&self) -> Result<(), ValueError> {
        if self.name.is_empty() {
            return Err(ValueError::EmptyName);
        }
        if self.value.is_none() {
            return Err(ValueError::MissingValue {
                metric_type: self.metric_type.clone(),
            });
        }
        Ok(())
    }

    /// Decodes the raw value into `T` once the tag check has passed.
    fn decode_shape<T: DeserializeOwned>(
        &self,
        tag_matches: bool,
        expected: &'static str,
    ) -> Result<T, ValueError> {
        if !tag_matches {
            return Err(ValueError::ShapeMismatch {
                actual: self.metric_type.clone(),
                expected,
            });
        }
        let raw = self.value.as_ref().ok_or_else(|| ValueError::MissingValue {
            metric_type: self.metric_type.clone(),
        })?;
        serde_json::from_str(raw.get()).map_err(|source| ValueError::Decode {
            metric_type: self.metric_type.clone(),
            source,
        })
    }
}
