// crates/infra-protocol/tests/event_builder.rs
// ============================================================================
// Module: Event Builder Tests
// Description: Tests for event construction from ordered mutations.
// Purpose: Ensure required fields, hostname stripping and collision renames.
// Dependencies: infra-protocol, serde_json
// ============================================================================
//! ## Overview
//! Validates the default template, the `summary` requirement, last-write-wins
//! ordering, and the label, entity and attribute mutations.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::collections::BTreeMap;

use infra_protocol::Attributes;
use infra_protocol::DEFAULT_EVENT_CATEGORY;
use infra_protocol::DEFAULT_EVENT_TYPE;
use infra_protocol::EntityRef;
use infra_protocol::EventBuilder;
use infra_protocol::EventData;
use infra_protocol::EventError;
use infra_protocol::EventMutation;
use serde_json::Value;
use serde_json::json;

fn attributes(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn template_alone_is_missing_summary() {
    assert_eq!(EventBuilder::new().build(), Err(EventError::MissingSummary));
    assert_eq!(EventData::from_mutations([]), Err(EventError::MissingSummary));
}

#[test]
fn hostname_is_stripped_after_mutations() {
    let event = EventData::from_mutations([
        EventMutation::field("summary", "x"),
        EventMutation::field("hostname", "h"),
    ])
    .unwrap();
    assert_eq!(event.get("summary"), Some(&json!("x")));
    assert!(!event.contains_key("hostname"));
    assert_eq!(event.get("eventType"), Some(&json!(DEFAULT_EVENT_TYPE)));
    assert_eq!(event.get("category"), Some(&json!(DEFAULT_EVENT_CATEGORY)));
}

#[test]
fn missing_summary_fails_even_with_other_fields() {
    let result = EventBuilder::new().field("hostname", "h").integration_user("root").build();
    assert_eq!(result, Err(EventError::MissingSummary));
}

#[test]
fn later_mutations_overwrite_earlier_ones() {
    let original: EventData =
        [("summary", json!("first")), ("category", json!("alerts"))].into_iter().collect();
    let event = EventBuilder::new().merge(original).summary("second").build().unwrap();
    assert_eq!(event.get("summary"), Some(&json!("second")));
    assert_eq!(event.get("category"), Some(&json!("alerts")));
}

#[test]
fn integration_user_and_entity_fields_are_set() {
    let entity = EntityRef::new("redis-1:6379", 9_001);
    let event = EventBuilder::new()
        .summary("restart")
        .integration_user("nri-agent")
        .entity(&entity)
        .build()
        .unwrap();
    assert_eq!(event.get("integrationUser"), Some(&json!("nri-agent")));
    assert_eq!(event.get("entityKey"), Some(&json!("redis-1:6379")));
    assert_eq!(event.get("entityID"), Some(&json!("9001")));
}

#[test]
fn labels_are_prefixed() {
    let labels = BTreeMap::from([
        ("role".to_string(), "primary".to_string()),
        ("zone".to_string(), "eu-1".to_string()),
    ]);
    let event = EventBuilder::new().summary("s").labels(labels).build().unwrap();
    assert_eq!(event.get("label.role"), Some(&json!("primary")));
    assert_eq!(event.get("label.zone"), Some(&json!("eu-1")));
    assert!(!event.contains_key("role"));
}

#[test]
fn colliding_attributes_are_renamed_instead_of_overwriting() {
    let event = EventBuilder::new()
        .summary("original")
        .attributes(attributes(json!({"summary": "incoming", "region": "us"})))
        .build()
        .unwrap();
    assert_eq!(event.get("summary"), Some(&json!("original")));
    assert_eq!(event.get("attr.summary"), Some(&json!("incoming")));
    assert_eq!(event.get("region"), Some(&json!("us")));
    assert!(!event.contains_key("attr.region"));
}

#[test]
fn attribute_hostname_is_stripped_but_renamed_copy_survives() {
    let event = EventBuilder::new()
        .summary("s")
        .field("hostname", "producer-host")
        .attributes(attributes(json!({"hostname": "attr-host"})))
        .build()
        .unwrap();
    assert!(!event.contains_key("hostname"));
    assert_eq!(event.get("attr.hostname"), Some(&json!("attr-host")));
}
