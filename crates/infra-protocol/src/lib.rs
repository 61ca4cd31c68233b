// crates/infra-protocol/src/lib.rs
// ============================================================================
// Module: Infra Protocol Library
// Description: Public API surface for the integration payload protocol.
// Purpose: Expose envelope types, clock/entity interfaces, and decode helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! `infra-protocol` models the JSON payload that monitoring integrations emit
//! to the host agent. Payloads are decoded into immutable value records,
//! legacy single-dataset shapes are promoted to the multi-dataset shape, and
//! metric values are decoded on demand by type tag.
//!
//! The crate performs no I/O and owns no shared state. Wall-clock access is
//! routed through the [`Clock`] interface.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::Clock;
pub use interfaces::EntityIdentity;
pub use interfaces::EntityRef;
pub use interfaces::FixedClock;
pub use interfaces::SystemClock;
pub use runtime::DEFAULT_EVENT_CATEGORY;
pub use runtime::DEFAULT_EVENT_TYPE;
pub use runtime::DEFAULT_MAX_PAYLOAD_BYTES;
pub use runtime::DecodeOptions;
pub use runtime::EventBuilder;
pub use runtime::EventError;
pub use runtime::EventMutation;
pub use runtime::Payload;
pub use runtime::PayloadError;
pub use runtime::ValueError;
pub use runtime::decode_payload;
