// crates/infra-protocol/src/runtime/event.rs
// ============================================================================
// Module: Infra Protocol Event Builder
// Description: Construction of validated event records from ordered mutations.
// Purpose: Build events with well-defined override and collision rules.
// Dependencies: crate::{core, interfaces}, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! An event starts from the `InfrastructureEvent`/`notifications` template.
//! [`EventMutation`]s are then applied in order, and later writes win. Built
//! events must carry `summary`. Any `hostname` field is stripped after all
//! mutations have been applied.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::core::Attributes;
use crate::core::EventData;
use crate::interfaces::EntityIdentity;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Event type assigned to every built event.
pub const DEFAULT_EVENT_TYPE: &str = "InfrastructureEvent";
/// Category assigned to every built event.
pub const DEFAULT_EVENT_CATEGORY: &str = "notifications";

/// Field holding the event type.
const EVENT_TYPE_KEY: &str = "eventType";
/// Field holding the event category.
const CATEGORY_KEY: &str = "category";
/// Required field holding the event summary.
const SUMMARY_KEY: &str = "summary";
/// Field removed from every built event.
const HOSTNAME_KEY: &str = "hostname";
/// Field set by [`EventMutation::IntegrationUser`].
const INTEGRATION_USER_KEY: &str = "integrationUser";
/// Field set from the entity key.
const ENTITY_KEY_KEY: &str = "entityKey";
/// Field set from the entity identifier.
const ENTITY_ID_KEY: &str = "entityID";
/// Prefix for label fields.
const LABEL_PREFIX: &str = "label.";
/// Prefix for attribute fields that collide with existing fields.
const ATTRIBUTE_PREFIX: &str = "attr.";

// ============================================================================
// SECTION: Mutations
// ============================================================================

/// Ordered modification applied to an event under construction.
#[derive(Debug, Clone, PartialEq)]
pub enum EventMutation {
    /// Copies every field of an existing event, overwriting.
    Merge(EventData),
    /// Sets a single field, overwriting.
    Field {
        /// Field name.
        key: String,
        /// Field value.
        value: Value,
    },
    /// Sets `integrationUser`.
    IntegrationUser(String),
    /// Sets `entityKey` and `entityID`.
    Entity {
        /// Entity key string.
        key: String,
        /// Entity identifier string.
        id: String,
    },
    /// Adds each label as `label.<key>`.
    Labels(BTreeMap<String, String>),
    /// Adds each attribute, renaming to `attr.<key>` when the key already exists.
    Attributes(Attributes),
}

impl EventMutation {
    /// Captures an entity's key and identifier.
    #[must_use]
    pub fn entity(entity: &impl EntityIdentity) -> Self {
        Self::Entity {
            key: entity.entity_key(),
            id: entity.entity_id(),
        }
    }

    /// Sets a single field.
    #[must_use]
    pub fn field(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Field {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Applies the mutation to `record`.
    fn apply(self, record: &mut EventData) {
        match self {
            Self::Merge(original) => {
                for (key, value) in original.into_map() {
                    record.insert(key, value);
                }
            }
            Self::Field { key, value } => {
                record.insert(key, value);
            }
            Self::IntegrationUser(user) => {
                record.insert(INTEGRATION_USER_KEY, user);
            }
            Self::Entity { key, id } => {
                record.insert(ENTITY_KEY_KEY, key);
                record.insert(ENTITY_ID_KEY, id);
            }
            Self::Labels(labels) => {
                for (key, value) in labels {
                    record.insert(format!("{LABEL_PREFIX}{key}"), value);
                }
            }
            Self::Attributes(attributes) => {
                for (key, value) in attributes {
                    if record.contains_key(&key) {
                        record.insert(format!("{ATTRIBUTE_PREFIX}{key}"), value);
                    } else {
                        record.insert(key, value);
                    }
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Event construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// No mutation supplied the required `summary` field.
    #[error("invalid event format: missing required 'summary' field")]
    MissingSummary,
}

/// Fluent builder that applies [`EventMutation`]s in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBuilder {
    /// Mutations in application order.
    mutations: Vec<EventMutation>,
}

impl EventBuilder {
    /// Creates a builder with no mutations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a mutation.
    #[must_use]
    pub fn with(mut self, mutation: EventMutation) -> Self {
        self.mutations.push(mutation);
        self
    }

    /// Copies every field of an existing event.
    #[must_use]
    pub fn merge(self, original: EventData) -> Self {
        self.with(EventMutation::Merge(original))
    }

    /// Sets a single field.
    #[must_use]
    pub fn field(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(EventMutation::field(key, value))
    }

    /// Sets the event summary.
    #[must_use]
    pub fn summary(self, summary: impl Into<String>) -> Self {
        self.field(SUMMARY_KEY, summary.into())
    }

    /// Sets `integrationUser`.
    #[must_use]
    pub fn integration_user(self, user: impl Into<String>) -> Self {
        self.with(EventMutation::IntegrationUser(user.into()))
    }

    /// Sets `entityKey` and `entityID` from a resolved entity.
    #[must_use]
    pub fn entity(self, entity: &impl EntityIdentity) -> Self {
        self.with(EventMutation::entity(entity))
    }

    /// Adds labels as `label.<key>` fields.
    #[must_use]
    pub fn labels(self, labels: BTreeMap<String, String>) -> Self {
        self.with(EventMutation::Labels(labels))
    }

    /// Adds attributes, renaming colliding keys to `attr.<key>`.
    #[must_use]
    pub fn attributes(self, attributes: Attributes) -> Self {
        self.with(EventMutation::Attributes(attributes))
    }

    /// Applies all mutations and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingSummary`] when no `summary` field is set.
    pub fn build(self) -> Result<EventData, EventError> {
        let mut record = EventData::new();
        record.insert(EVENT_TYPE_KEY, DEFAULT_EVENT_TYPE);
        record.insert(CATEGORY_KEY, DEFAULT_EVENT_CATEGORY);

        for mutation in self.mutations {
            mutation.apply(&mut record);
        }

        if !record.contains_key(SUMMARY_KEY) {
            return Err(EventError::MissingSummary);
        }
        if record.remove(HOSTNAME_KEY).is_some() {
            debug!("stripped producer hostname from event");
        }
        Ok(record)
    }
}

impl EventData {
    /// Builds an event from the default template and ordered mutations.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingSummary`] when no `summary` field is set.
    pub fn from_mutations(
        mutations: impl IntoIterator<Item = EventMutation>,
    ) -> Result<Self, EventError> {
        mutations.into_iter().fold(EventBuilder::new(), EventBuilder::with).build()
    }
}
