// roster-bridge-config/src/lib.rs
// ============================================================================
// Module: Roster Bridge Config Library
// Description: Canonical config model and validation for Roster Bridge.
// Purpose: Single source of truth for roster-bridge.toml semantics.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! `roster-bridge-config` defines the canonical configuration model for
//! Roster Bridge: server binding, CORS origins, optional TLS material, the
//! shared signature secret, and credentials for the two external platforms.
//! Parsing is strict and fail-closed; invalid configuration never starts a
//! server.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
