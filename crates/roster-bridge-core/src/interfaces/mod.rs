// roster-bridge-core/src/interfaces/mod.rs
// ============================================================================
// Module: Roster Bridge Interfaces
// Description: Backend-agnostic interfaces for the two external platforms.
// Purpose: Define the contract surfaces used by the Roster Bridge runtime.
// Dependencies: async-trait, crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Roster Bridge reaches the record store and the
//! storefront platform without embedding transport details. Each trait
//! exposes exactly the operations the runtime uses, so tests substitute
//! in-memory fakes. External-call failures propagate unchanged; no retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::identifiers::CustomerId;
use crate::core::identifiers::RecordId;
use crate::core::records::FieldMap;
use crate::core::records::Metafield;
use crate::core::records::Order;
use crate::core::records::Record;
use crate::core::records::RosterTable;

// ============================================================================
// SECTION: Record Store
// ============================================================================

/// Record store client errors.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// Transport-level failure reaching the record store.
    #[error("record store request failed: {0}")]
    Transport(String),
    /// The record store rejected the request.
    #[error("record store error status {status}: {message}")]
    Status {
        /// HTTP status code returned by the store.
        status: u16,
        /// Response body or reason text.
        message: String,
    },
    /// The record store returned a payload this system cannot decode.
    #[error("record store response malformed: {0}")]
    Malformed(String),
}

/// Narrow interface over the external record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Retrieves every record in the table's configured view.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] when the store cannot be reached or
    /// rejects the query.
    async fn list_all(&self, table: RosterTable) -> Result<Vec<Record>, RecordStoreError>;

    /// Retrieves a single record by its internal record identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] when the record cannot be fetched.
    async fn find(&self, table: RosterTable, id: &RecordId) -> Result<Record, RecordStoreError>;

    /// Creates a single record with the given fields.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] when creation fails.
    async fn create(&self, table: RosterTable, fields: FieldMap)
    -> Result<Record, RecordStoreError>;
}

/// Shared handle to a record store implementation.
pub type SharedRecordStore = Arc<dyn RecordStore>;

// ============================================================================
// SECTION: Storefront
// ============================================================================

/// Storefront platform client errors.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Transport-level failure reaching the storefront.
    #[error("storefront request failed: {0}")]
    Transport(String),
    /// The storefront rejected the request.
    #[error("storefront error status {status}: {message}")]
    Status {
        /// HTTP status code returned by the storefront.
        status: u16,
        /// Response body or reason text.
        message: String,
    },
    /// The storefront returned a payload this system cannot decode.
    #[error("storefront response malformed: {0}")]
    Malformed(String),
}

/// Narrow interface over the storefront platform.
#[async_trait]
pub trait Storefront: Send + Sync {
    /// Returns the customer's paid orders.
    ///
    /// Only the first page of results is returned; large order histories are
    /// a known limitation of the purchase check.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError`] when the storefront cannot be reached or
    /// rejects the query.
    async fn paid_orders(&self, customer: &CustomerId) -> Result<Vec<Order>, StorefrontError>;

    /// Sets the customer's onboarding metafield flag to `true`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError`] when the update fails.
    async fn set_onboarding_flag(
        &self,
        customer: &CustomerId,
    ) -> Result<Metafield, StorefrontError>;
}

/// Shared handle to a storefront implementation.
pub type SharedStorefront = Arc<dyn Storefront>;
