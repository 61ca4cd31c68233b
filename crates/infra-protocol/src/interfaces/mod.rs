// crates/infra-protocol/src/interfaces/mod.rs
// ============================================================================
// Module: Infra Protocol Interfaces
// Description: Capability interfaces for wall-clock time and entity identity.
// Purpose: Define the contract surfaces consumed by the decode runtime.
// Dependencies: time
// ============================================================================

//! ## Overview
//! The decode runtime never reads ambient global state. Current time is
//! supplied through [`Clock`], and resolved entity identity through
//! [`EntityIdentity`], so every decode path stays deterministic under test.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use time::OffsetDateTime;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Source of the current time.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> OffsetDateTime;
}

/// Clock backed by the system wall clock (UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

// ============================================================================
// SECTION: Entity Identity
// ============================================================================

/// Resolved entity identity, as supplied by the entity resolver.
pub trait EntityIdentity {
    /// Returns the entity key in its string form.
    fn entity_key(&self) -> String;

    /// Returns the entity identifier in its string form.
    fn entity_id(&self) -> String;
}

/// Plain resolved entity reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// Entity key.
    pub key: String,
    /// Numeric entity identifier.
    pub id: i64,
}

impl EntityRef {
    /// Creates a new entity reference.
    #[must_use]
    pub fn new(key: impl Into<String>, id: i64) -> Self {
        Self {
            key: key.into(),
            id,
        }
    }
}

impl EntityIdentity for EntityRef {
    fn entity_key(&self) -> String {
        self.key.clone()
    }

    fn entity_id(&self) -> String {
        self.id.to_string()
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.key, self.id)
    }
}
