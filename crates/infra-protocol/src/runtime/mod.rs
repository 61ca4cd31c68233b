// crates/infra-protocol/src/runtime/mod.rs
// ============================================================================
// Module: Infra Protocol Runtime
// Description: Decoding, normalization, upgrade and event construction.
// Purpose: Turn raw payload bytes into trusted, typed telemetry views.
// Dependencies: crate::{core, interfaces}, serde_json, thiserror, time, tracing
// ============================================================================

//! ## Overview
//! The runtime is a decode-then-normalize-then-upgrade pipeline. Every
//! operation is a pure, single-attempt function over its inputs. Failures
//! are scoped to one metric, event or payload, and never abort sibling
//! records.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod adapter;
pub mod decoder;
pub mod event;
pub mod normalizer;
pub mod payload;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use decoder::ValueError;
pub use event::DEFAULT_EVENT_CATEGORY;
pub use event::DEFAULT_EVENT_TYPE;
pub use event::EventBuilder;
pub use event::EventError;
pub use event::EventMutation;
pub use payload::DEFAULT_MAX_PAYLOAD_BYTES;
pub use payload::DecodeOptions;
pub use payload::Payload;
pub use payload::PayloadError;
pub use payload::decode_payload;
