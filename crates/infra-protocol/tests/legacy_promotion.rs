// crates/infra-protocol/tests/legacy_promotion.rs
// ============================================================================
// Module: Protocol Version Adapter Tests
// Description: Tests for protocol 1 to protocol 3 promotion.
// Purpose: Ensure promotion copies identity and dataset content unchanged.
// Dependencies: infra-protocol, serde_json
// ============================================================================
//! ## Overview
//! Validates that promotion wraps the single dataset with empty cluster and
//! service tags, and that flattened protocol 1 JSON decodes as expected.

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

use infra_protocol::EntityFields;
use infra_protocol::InventoryData;
use infra_protocol::MetricData;
use infra_protocol::PluginDataSet;
use infra_protocol::PluginDataSetV3;
use infra_protocol::PluginDataV1;
use infra_protocol::PluginDataV3;
use infra_protocol::PluginOutputIdentifier;
use serde_json::json;

fn sample_dataset() -> PluginDataSet {
    let metric: MetricData =
        [("event_type", json!("FooSample")), ("foo.count", json!(3))].into_iter().collect();
    let item: InventoryData = [("id", json!("foo")), ("version", json!("2.1"))].into_iter().collect();
    PluginDataSet {
        entity: EntityFields::new(json!({"name": "foo-1", "type": "foo"})),
        metrics: Some(vec![metric]),
        inventory: Some(BTreeMap::from([("config/foo".to_string(), item)])),
        events: None,
        add_hostname: true,
    }
}

#[test]
fn promotion_wraps_the_single_dataset() {
    let identifier = PluginOutputIdentifier {
        name: "nri-foo".to_string(),
        status: "ok".to_string(),
        ..PluginOutputIdentifier::default()
    };
    let dataset = sample_dataset();
    let legacy = PluginDataV1 {
        identifier: identifier.clone(),
        data_set: dataset.clone(),
    };

    let promoted = legacy.into_v3();

    assert_eq!(
        promoted,
        PluginDataV3 {
            identifier,
            data: vec![PluginDataSetV3 {
                data_set: dataset,
                cluster: String::new(),
                service: String::new(),
            }],
        }
    );
}

#[test]
fn promotion_performs_no_validation() {
    let promoted = PluginDataV3::from(PluginDataV1::default());
    assert_eq!(promoted.data.len(), 1);
    assert!(promoted.data[0].data_set.entity.is_absent());
    assert!(promoted.data[0].data_set.metrics.is_none());
    assert!(promoted.identifier.raw_protocol_version.is_absent());
}

#[test]
fn flattened_v1_json_promotes_with_identifier_unchanged() {
    let raw = json!({
        "name": "nri-foo",
        "protocol_version": "1",
        "integration_version": "0.3.0",
        "integration_status": "ok",
        "entity": {"name": "foo-1", "type": "foo"},
        "metrics": [{"event_type": "FooSample", "foo.count": 3}],
        "inventory": {"config/foo": {"id": "foo", "version": "2.1"}},
        "add_hostname": true
    });
    let legacy: PluginDataV1 = serde_json::from_value(raw).expect("v1 payload");
    assert_eq!(legacy.data_set, sample_dataset());

    let promoted = legacy.into_v3();
    assert_eq!(promoted.identifier.name, "nri-foo");
    assert_eq!(promoted.identifier.integration_version, "0.3.0");
    assert_eq!(promoted.identifier.status, "ok");
    assert_eq!(promoted.identifier.raw_protocol_version.as_value(), &json!("1"));
    assert_eq!(promoted.data[0].cluster, "");
    assert_eq!(promoted.data[0].service, "");

    let encoded = serde_json::to_value(&promoted).expect("serialize v3");
    assert_eq!(encoded["data"][0]["inventory"]["config/foo"]["id"], json!("foo"));
    assert_eq!(encoded["data"][0]["cluster"], json!(""));
}
