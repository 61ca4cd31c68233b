// crates/infra-protocol/tests/payload_decode.rs
// ============================================================================
// Module: Payload Decoding Tests
// Description: Tests for version-dispatched payload decoding.
// Purpose: Ensure versions are resolved and checked before datasets are trusted.
// Dependencies: infra-protocol, serde_json
// ============================================================================
//! ## Overview
//! Validates dispatch for every recognized protocol version, rejection of
//! absent, unrecognized and unaccepted versions, size limits, end-to-end
//! metric decoding from a protocol 4 envelope, and per-metric failure scope.
//!
//! Security posture: payloads are untrusted and must fail closed.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::float_cmp,
    reason = "Test-only panic-based assertions are permitted."
)]

use infra_protocol::DecodeOptions;
use infra_protocol::FixedClock;
use infra_protocol::MetricTime;
use infra_protocol::MetricType;
use infra_protocol::Payload;
use infra_protocol::PayloadError;
use infra_protocol::ProtocolVersion;
use infra_protocol::SummaryValue;
use infra_protocol::ValueError;
use infra_protocol::VersionError;
use infra_protocol::decode_payload;
use serde_json::json;
use time::OffsetDateTime;

const V4_PAYLOAD: &str = r#"{
  "protocol_version": "4",
  "integration": {"name": "nri-redis", "version": "1.9.0"},
  "data": [
    {
      "common": {"timestamp": 1700000000, "interval.ms": 10000, "attributes": {"env": "prod"}},
      "entity": {"name": "redis-1", "type": "RedisInstance"},
      "metrics": [
        {"name": "redis.connections", "type": "gauge", "value": 12, "attributes": {"env": "staging"}},
        {"name": "redis.commands", "type": "count", "timestamp": 1700000005000, "value": 340},
        {"name": "redis.latency", "type": "summary", "value": {"count": 2, "min": 1, "max": 3, "sum": 4}},
        {"name": "redis.buckets", "type": "prometheus-histogram", "value": {"buckets": [{"upper_bound": 5}, {"upper_bound": 1}]}}
      ],
      "inventory": {"config/maxmemory": {"id": "maxmemory", "value": "2gb"}}
    },
    {"entity": {"name": "redis-2", "type": "RedisInstance"}}
  ]
}"#;

fn decode(json: &str) -> Result<Payload, PayloadError> {
    decode_payload(json.as_bytes(), &DecodeOptions::default())
}

#[test]
fn protocol_4_payload_decodes_into_the_current_envelope() {
    let Payload::Current(envelope) = decode(V4_PAYLOAD).unwrap() else {
        panic!("expected current payload");
    };
    assert_eq!(envelope.integration.name, "nri-redis");
    assert_eq!(envelope.integration.version, "1.9.0");
    assert_eq!(envelope.data.len(), 2);

    let dataset = &envelope.data[0];
    let metrics = dataset.metrics();
    assert_eq!(metrics[0].numeric_value().unwrap(), 12.0);
    assert_eq!(metrics[1].metric_type, MetricType::Count);
    assert_eq!(metrics[1].numeric_value().unwrap(), 340.0);
    assert_eq!(
        metrics[2].summary_value().unwrap(),
        SummaryValue {
            count: 2.0,
            min: 1.0,
            max: 3.0,
            sum: 4.0,
        }
    );
    let buckets = metrics[3].prometheus_histogram_value().unwrap().buckets.unwrap();
    assert_eq!(buckets.len(), 2);

    let empty = &envelope.data[1];
    assert!(empty.metrics.is_none());
    assert!(empty.inventory.is_none());
    assert!(empty.events.is_none());
    assert!(empty.metrics().is_empty());
}

#[test]
fn common_block_fills_only_what_metrics_omit() {
    let Payload::Current(envelope) = decode(V4_PAYLOAD).unwrap() else {
        panic!("expected current payload");
    };
    let dataset = &envelope.data[0];
    let clock = FixedClock(OffsetDateTime::UNIX_EPOCH);

    let connections = dataset.common.apply_to(&dataset.metrics()[0]);
    assert_eq!(connections.time(&clock), MetricTime::from_unix_seconds(1_700_000_000));
    assert_eq!(connections.interval_ms, Some(10_000));
    assert_eq!(connections.attributes.unwrap()["env"], json!("staging"));

    let commands = dataset.common.apply_to(&dataset.metrics()[1]);
    assert_eq!(commands.time(&clock), MetricTime::from_unix_millis(1_700_000_005_000));
    assert_eq!(commands.attributes.unwrap()["env"], json!("prod"));

    assert!(dataset.metrics()[1].attributes.is_none());
}

#[test]
fn numeric_and_string_versions_are_equivalent() {
    let numeric = decode(r#"{"protocol_version": 4, "integration": {"name": "a"}, "data": []}"#);
    let float = decode(r#"{"protocol_version": 4.0, "integration": {"name": "a"}, "data": []}"#);
    let text = decode(r#"{"protocol_version": "4", "integration": {"name": "a"}, "data": []}"#);
    for payload in [numeric, float, text] {
        let payload = payload.unwrap();
        assert_eq!(payload.version(), ProtocolVersion::V4);
        assert_eq!(payload.integration_name(), "a");
    }
}

#[test]
fn protocol_1_payload_is_promoted() {
    let payload = decode(
        r#"{"name": "nri-foo", "protocol_version": "1", "integration_version": "1.0.0",
            "integration_status": "ok", "metrics": [{"event_type": "FooSample", "x": 1}]}"#,
    )
    .unwrap();
    let Payload::Legacy { version, data } = payload else {
        panic!("expected legacy payload");
    };
    assert_eq!(version, ProtocolVersion::V1);
    assert_eq!(data.identifier.name, "nri-foo");
    assert_eq!(data.data.len(), 1);
    assert_eq!(data.data[0].cluster, "");
    assert_eq!(data.data[0].service, "");
    assert_eq!(data.data[0].data_set.metrics.as_ref().unwrap().len(), 1);
}

#[test]
fn protocol_2_and_3_payloads_share_the_multi_dataset_shape() {
    let v2 = decode(r#"{"name": "nri-foo", "protocol_version": "2", "data": [{"metrics": []}, {}]}"#)
        .unwrap();
    let Payload::Legacy { version, data } = v2 else {
        panic!("expected legacy payload");
    };
    assert_eq!(version, ProtocolVersion::V2);
    assert_eq!(data.data.len(), 2);
    assert_eq!(data.data[1].cluster, "");

    let v3 = decode(
        r#"{"name": "nri-foo", "protocol_version": 3,
            "data": [{"cluster": "prod-eu", "service": "checkout", "events": [{"summary": "restart"}]}]}"#,
    )
    .unwrap();
    let Payload::Legacy { version, data } = v3 else {
        panic!("expected legacy payload");
    };
    assert_eq!(version, ProtocolVersion::V3);
    assert_eq!(data.data[0].cluster, "prod-eu");
    assert_eq!(data.data[0].service, "checkout");
    assert_eq!(data.data[0].data_set.events.as_ref().unwrap()[0].get("summary"), Some(&json!("restart")));
}

#[test]
fn unrecognized_version_is_rejected_before_datasets_are_parsed() {
    let err = decode(r#"{"protocol_version": "5", "data": "not-a-dataset-list"}"#).unwrap_err();
    assert!(
        matches!(err, PayloadError::Version(VersionError::Unrecognized(ref raw)) if raw == "5"),
        "unexpected error: {err}"
    );

    for raw in [r#"{"protocol_version": 0}"#, r#"{"protocol_version": 4.5}"#, r#"{"protocol_version": true}"#] {
        assert!(matches!(decode(raw), Err(PayloadError::Version(VersionError::Unrecognized(_)))));
    }
}

#[test]
fn missing_version_is_rejected() {
    assert!(matches!(
        decode(r#"{"integration": {"name": "a"}, "data": []}"#),
        Err(PayloadError::Version(VersionError::Missing))
    ));
    assert!(matches!(
        decode(r#"{"protocol_version": null}"#),
        Err(PayloadError::Version(VersionError::Missing))
    ));
}

#[test]
fn recognized_but_unaccepted_version_is_rejected() {
    let options = DecodeOptions {
        accepted_versions: vec![ProtocolVersion::V4],
        ..DecodeOptions::default()
    };
    let err = decode_payload(br#"{"name": "nri-foo", "protocol_version": "1"}"#, &options).unwrap_err();
    assert!(matches!(err, PayloadError::NotAccepted(ProtocolVersion::V1)));
}

#[test]
fn oversize_payloads_are_rejected_without_parsing() {
    let options = DecodeOptions {
        max_payload_bytes: 8,
        ..DecodeOptions::default()
    };
    let err = decode_payload(b"{\"protocol_version\": 4}", &options).unwrap_err();
    assert!(matches!(err, PayloadError::TooLarge { limit: 8, .. }));
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(decode("{not json"), Err(PayloadError::Json(_))));
    assert!(matches!(
        decode(r#"{"protocol_version": "4", "data": [{"metrics": "not-a-list"}]}"#),
        Err(PayloadError::Json(_))
    ));
}

#[test]
fn metric_without_name_or_type_fails_only_itself() {
    let Payload::Current(envelope) = decode(
        r#"{"protocol_version": "4", "data": [
            {"metrics": [
                {"type": "gauge", "value": 1},
                {"name": "untyped", "value": 2},
                {"name": null, "type": null, "value": 3},
                {"name": "good", "type": "gauge", "value": 4}
            ]},
            {"entity": {"name": "other"}, "metrics": [{"name": "other.good", "type": "count", "value": 5}]}
        ]}"#,
    )
    .unwrap() else {
        panic!("expected current payload");
    };
    assert_eq!(envelope.data.len(), 2);

    let metrics = envelope.data[0].metrics();
    assert_eq!(metrics.len(), 4);

    assert_eq!(metrics[0].name, "");
    assert!(matches!(metrics[0].validate(), Err(ValueError::EmptyName)));
    assert_eq!(metrics[0].numeric_value().unwrap(), 1.0);

    assert_eq!(metrics[1].metric_type, MetricType::Unknown(String::new()));
    assert!(matches!(metrics[1].numeric_value(), Err(ValueError::ShapeMismatch { .. })));
    assert!(matches!(metrics[1].summary_value(), Err(ValueError::ShapeMismatch { .. })));

    assert!(matches!(metrics[2].validate(), Err(ValueError::EmptyName)));
    assert!(metrics[2].metric_type.is_unknown());

    assert!(metrics[3].validate().is_ok());
    assert_eq!(metrics[3].numeric_value().unwrap(), 4.0);
    assert_eq!(envelope.data[1].metrics()[0].numeric_value().unwrap(), 5.0);
}

#[test]
fn null_containers_decode_as_absent() {
    let Payload::Current(envelope) =
        decode(r#"{"protocol_version": "4", "integration": null, "data": null}"#).unwrap()
    else {
        panic!("expected current payload");
    };
    assert_eq!(envelope.integration.name, "");
    assert!(envelope.data.is_empty());

    let Payload::Current(envelope) = decode(
        r#"{"protocol_version": 4, "integration": {"name": null, "version": null},
            "data": [{"common": null, "metrics": null, "inventory": null, "events": null}]}"#,
    )
    .unwrap() else {
        panic!("expected current payload");
    };
    assert_eq!(envelope.integration.name, "");
    assert_eq!(envelope.integration.version, "");
    let dataset = &envelope.data[0];
    assert_eq!(dataset.common.timestamp, None);
    assert!(dataset.metrics.is_none());
    assert!(dataset.inventory.is_none());
    assert!(dataset.events.is_none());
}

#[test]
fn null_legacy_fields_decode_as_empty() {
    let Payload::Legacy { data, .. } = decode(
        r#"{"name": null, "protocol_version": "3", "integration_version": null,
            "data": [{"cluster": null, "service": null}]}"#,
    )
    .unwrap() else {
        panic!("expected legacy payload");
    };
    assert_eq!(data.identifier.name, "");
    assert_eq!(data.identifier.integration_version, "");
    assert_eq!(data.data[0].cluster, "");
    assert_eq!(data.data[0].service, "");

    let Payload::Legacy { data, .. } = decode(r#"{"protocol_version": "2", "data": null}"#).unwrap()
    else {
        panic!("expected legacy payload");
    };
    assert!(data.data.is_empty());
}

#[test]
fn failing_metric_does_not_affect_siblings() {
    let Payload::Current(envelope) = decode(
        r#"{"protocol_version": "4", "data": [{"metrics": [
            {"name": "bad", "type": "gauge", "value": "NaN"},
            {"name": "good", "type": "gauge", "value": 0.25}
        ]}]}"#,
    )
    .unwrap() else {
        panic!("expected current payload");
    };
    let metrics = envelope.data[0].metrics();
    assert!(metrics[0].numeric_value().is_err());
    assert_eq!(metrics[1].numeric_value().unwrap(), 0.25);
}
