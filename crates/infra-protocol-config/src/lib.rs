// crates/infra-protocol-config/src/lib.rs
// ============================================================================
// Module: Infra Protocol Config Library
// Description: Canonical config model and validation for payload decoding.
// Purpose: Single source of truth for infra-protocol.toml semantics.
// Dependencies: infra-protocol, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! `infra-protocol-config` defines the configuration consumed by the payload
//! decode pipeline. Validation is strict and fails closed. A validated config
//! converts into [`infra_protocol::DecodeOptions`].
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
