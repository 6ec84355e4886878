// roster-bridge-core/src/core/mod.rs
// ============================================================================
// Module: Roster Bridge Core Types
// Description: Canonical domain types for the storefront integration backend.
// Purpose: Provide stable, serializable types shared across all crates.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the identifiers, record shapes, and signature envelope
//! used throughout Roster Bridge. These types are the canonical source of
//! truth for the HTTP surface and the external platform clients.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod records;
pub mod signature;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::CustomerId;
pub use identifiers::MetafieldId;
pub use identifiers::ProductId;
pub use identifiers::ProgramId;
pub use identifiers::RecordId;
pub use identifiers::StudentId;
pub use records::EnrollmentForm;
pub use records::FieldMap;
pub use records::LineItem;
pub use records::Metafield;
pub use records::Order;
pub use records::Record;
pub use records::RosterTable;
pub use signature::SignatureError;
pub use signature::SignatureVerifier;
pub use signature::sign_params;
