// crates/infra-protocol/src/core/timestamp.rs
// ============================================================================
// Module: Infra Protocol Time Model
// Description: Timestamp unit disambiguation and resolved metric time values.
// Purpose: Resolve producer timestamps that may be seconds or milliseconds.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Integrations report timestamps as bare integers without a unit. Values
//! below the millisecond epoch of 1978-01-01T08:00:00Z are seconds; all other
//! values are milliseconds. Resolved times are kept as exact unix nanoseconds
//! so resolution never fails, whatever the input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use time::OffsetDateTime;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Milliseconds between the unix epoch and 1978-01-01T08:00:00Z.
///
/// Midnight on 1978-01-01 in US Pacific time, not UTC midnight.
pub const MILLIS_SINCE_JANUARY_FIRST_1978: i64 = 252_489_600_000;

/// Nanoseconds per second.
const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Nanoseconds per millisecond.
const NANOS_PER_MILLI: i128 = 1_000_000;

// ============================================================================
// SECTION: Timestamp Units
// ============================================================================

/// Unit a raw producer timestamp is interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampUnit {
    /// Whole seconds since the unix epoch.
    Seconds,
    /// Milliseconds since the unix epoch.
    Milliseconds,
}

impl TimestampUnit {
    /// Classifies a raw timestamp. The threshold value itself is milliseconds.
    #[must_use]
    pub const fn classify(raw: i64) -> Self {
        if raw < MILLIS_SINCE_JANUARY_FIRST_1978 { Self::Seconds } else { Self::Milliseconds }
    }

    /// Returns a stable label for the unit.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
        }
    }
}

impl fmt::Display for TimestampUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Metric Time
// ============================================================================

/// Absolute point in time resolved for a metric.
///
/// # Invariants
/// - Stores exact unix nanoseconds; every `i64` second or millisecond input is
///   representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetricTime {
    /// Nanoseconds since the unix epoch.
    unix_nanos: i128,
}

impl MetricTime {
    /// Resolves a raw producer timestamp using [`TimestampUnit::classify`].
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        match TimestampUnit::classify(raw) {
            TimestampUnit::Seconds => Self::from_unix_seconds(raw),
            TimestampUnit::Milliseconds => Self::from_unix_millis(raw),
        }
    }

    /// Creates a time from whole seconds since the unix epoch.
    #[must_use]
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self {
            unix_nanos: seconds as i128 * NANOS_PER_SECOND,
        }
    }

    /// Creates a time from milliseconds since the unix epoch.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self {
            unix_nanos: millis as i128 * NANOS_PER_MILLI,
        }
    }

    /// Creates a time from an `OffsetDateTime`.
    #[must_use]
    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self {
            unix_nanos: value.unix_timestamp_nanos(),
        }
    }

    /// Returns nanoseconds since the unix epoch.
    #[must_use]
    pub const fn unix_nanos(self) -> i128 {
        self.unix_nanos
    }

    /// Returns whole seconds since the unix epoch, rounding toward negative infinity.
    #[must_use]
    pub const fn unix_seconds(self) -> i128 {
        self.unix_nanos.div_euclid(NANOS_PER_SECOND)
    }

    /// Returns milliseconds since the unix epoch, rounding toward negative infinity.
    #[must_use]
    pub const fn unix_millis(self) -> i128 {
        self.unix_nanos.div_euclid(NANOS_PER_MILLI)
    }

    /// Converts to an `OffsetDateTime` in UTC.
    ///
    /// Returns `None` when the value lies outside the calendar range supported
    /// by `OffsetDateTime`.
    #[must_use]
    pub fn to_offset_datetime(self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp_nanos(self.unix_nanos).ok()
    }
}

impl From<OffsetDateTime> for MetricTime {
    fn from(value: OffsetDateTime) -> Self {
        Self::from_offset_datetime(value)
    }
}
