// roster-bridge-clients/src/lib.rs
// ============================================================================
// Module: Roster Bridge Clients Library
// Description: HTTP clients for the record store and storefront platforms.
// Purpose: Provide reqwest-backed implementations of the core interfaces.
// Dependencies: roster-bridge-core, reqwest
// ============================================================================

//! ## Overview
//! This crate implements [`roster_bridge_core::RecordStore`] against an
//! Airtable-style record store API and [`roster_bridge_core::Storefront`]
//! against a Shopify-style admin API. Both clients share transport defaults
//! (connect and request timeouts) and propagate failures unchanged; there is
//! no retry or caching layer.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod record_store;
pub mod storefront;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use record_store::AirtableRecordStore;
pub use storefront::ShopifyStorefront;
