// crates/infra-protocol/src/runtime/normalizer.rs
// ============================================================================
// Module: Infra Protocol Timestamp Normalizer
// Description: Resolution of metric timestamps and intervals.
// Purpose: Map ambiguous producer timestamps onto absolute time values.
// Dependencies: crate::{core, interfaces}, time
// ============================================================================

//! ## Overview
//! A present timestamp is resolved with the 1978 millisecond threshold (see
//! [`crate::core::TimestampUnit`]); an absent one falls back to the injected
//! [`Clock`] at call time. Intervals are unambiguous milliseconds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Duration;

use crate::core::Metric;
use crate::core::MetricTime;
use crate::interfaces::Clock;

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves an optional raw timestamp, using `clock` when it is absent.
#[must_use]
pub fn resolve_timestamp(raw: Option<i64>, clock: &dyn Clock) -> MetricTime {
    raw.map_or_else(|| MetricTime::from(clock.now()), MetricTime::from_raw)
}

/// Converts an optional millisecond count into a duration; absent is zero.
#[must_use]
pub const fn interval_from_millis(interval_ms: Option<i64>) -> Duration {
    match interval_ms {
        Some(millis) => Duration::milliseconds(millis),
        None => Duration::ZERO,
    }
}

impl Metric {
    /// Returns the metric's absolute time.
    ///
    /// An absent timestamp resolves to `clock.now()` at the moment of the call.
    #[must_use]
    pub fn time(&self, clock: &dyn Clock) -> MetricTime {
        resolve_timestamp(self.timestamp, clock)
    }

    /// Returns the metric's interval; zero when absent.
    ///
    /// Only meaningful when [`crate::core::MetricType::has_interval`] holds.
    #[must_use]
    pub const fn interval_duration(&self) -> Duration {
        interval_from_millis(self.interval_ms)
    }
}
