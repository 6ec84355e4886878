// roster-bridge-core/src/lib.rs
// ============================================================================
// Module: Roster Bridge Core Library
// Description: Public API surface for the Roster Bridge core.
// Purpose: Expose domain types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Roster Bridge core provides request signature verification, record
//! aggregation, purchase checking, and enrollment creation for the storefront
//! integration backend. It is transport-agnostic and reaches the two external
//! platforms through explicit interfaces rather than embedding HTTP clients.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::RecordStore;
pub use interfaces::RecordStoreError;
pub use interfaces::SharedRecordStore;
pub use interfaces::SharedStorefront;
pub use interfaces::Storefront;
pub use interfaces::StorefrontError;
pub use runtime::AggregateError;
pub use runtime::EnrollmentWriter;
pub use runtime::InMemoryRecordStore;
pub use runtime::InMemoryStorefront;
pub use runtime::PurchaseChecker;
pub use runtime::RecordAggregator;
