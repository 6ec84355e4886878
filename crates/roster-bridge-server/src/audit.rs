// roster-bridge-server/src/audit.rs
// ============================================================================
// Module: Request Audit Events
// Description: Structured audit events for request handling outcomes.
// Purpose: Make authentication and handler results observable as JSON lines.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events record the method, path, and outcome of each request along
//! with an optional detail message. Events never carry secrets or signature
//! values. The stderr sink emits one JSON line per event; the no-op sink is
//! for tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Audit Event
// ============================================================================

/// A single request-handling audit event.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    /// Request method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Outcome label (`allow`, `deny`, `ok`, or `error`).
    pub outcome: &'static str,
    /// Optional human-facing detail; never a secret or signature value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEvent {
    /// Builds an event for an accepted signature check.
    #[must_use]
    pub fn allowed(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            outcome: "allow",
            detail: None,
        }
    }

    /// Builds an event for a rejected signature check.
    #[must_use]
    pub fn denied(method: &str, path: &str, detail: impl Into<String>) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            outcome: "deny",
            detail: Some(detail.into()),
        }
    }

    /// Builds an event for a completed handler.
    #[must_use]
    pub fn completed(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            outcome: "ok",
            detail: None,
        }
    }

    /// Builds an event for a failed handler.
    #[must_use]
    pub fn failed(method: &str, path: &str, detail: impl Into<String>) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            outcome: "error",
            detail: Some(detail.into()),
        }
    }
}

// ============================================================================
// SECTION: Audit Sinks
// ============================================================================

/// Receives request audit events.
pub trait AuditSink: Send + Sync {
    /// Records a single audit event.
    fn record(&self, event: &AuditEvent);
}

/// Audit sink emitting JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    #[allow(clippy::print_stderr, reason = "Audit events are emitted as stderr JSON lines.")]
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            eprintln!("{payload}");
        }
    }
}

/// No-op audit sink for tests.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}
