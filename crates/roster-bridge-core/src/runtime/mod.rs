// roster-bridge-core/src/runtime/mod.rs
// ============================================================================
// Module: Roster Bridge Runtime
// Description: Operation handlers built on the platform interfaces.
// Purpose: Provide aggregation, purchase checking, and enrollment creation.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Runtime components implement the four integration operations over the
//! [`crate::interfaces`] trait seams: record aggregation with lesson
//! resolution, purchase checking against paid orders, enrollment record
//! creation, and (through the storefront trait directly) the onboarding
//! metafield flag.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod aggregator;
pub mod enrollment;
pub mod memory;
pub mod purchase;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use aggregator::AggregateError;
pub use aggregator::RecordAggregator;
pub use enrollment::ENROLLMENT_STATUS;
pub use enrollment::EnrollmentWriter;
pub use enrollment::enrollment_fields;
pub use memory::InMemoryRecordStore;
pub use memory::InMemoryStorefront;
pub use purchase::PurchaseChecker;
