// roster-bridge-server/src/lib.rs
// ============================================================================
// Module: Roster Bridge Server Library
// Description: HTTP surface for the storefront integration backend.
// Purpose: Expose the four integration operations behind signature checks.
// Dependencies: axum, roster-bridge-core, roster-bridge-clients
// ============================================================================

//! ## Overview
//! The server wires the core runtime to an axum router: purchase checks,
//! course and student lookups, and enrollment creation. All routes except
//! enrollment creation pass through the signature verifier when enabled.
//! Errors surface as `{"error": "<message>"}` bodies with no structured
//! codes; authentication outcomes are observable as JSON audit events.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod routes;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditEvent;
pub use audit::AuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use routes::ServerState;
pub use routes::router;
pub use server::RosterBridgeServer;
pub use server::ServerError;
