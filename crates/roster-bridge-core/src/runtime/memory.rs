// roster-bridge-core/src/runtime/memory.rs
// ============================================================================
// Module: In-Memory Platform Fakes
// Description: Deterministic in-memory record store and storefront.
// Purpose: Substitute the external platforms in tests and local demos.
// Dependencies: async-trait, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides simple in-memory implementations of [`RecordStore`]
//! and [`Storefront`] for tests and local demos. Both support one-shot
//! failure injection so error propagation paths stay covered. Not intended
//! for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::identifiers::CustomerId;
use crate::core::identifiers::MetafieldId;
use crate::core::identifiers::RecordId;
use crate::core::records::FieldMap;
use crate::core::records::Metafield;
use crate::core::records::Order;
use crate::core::records::Record;
use crate::core::records::RosterTable;
use crate::interfaces::RecordStore;
use crate::interfaces::RecordStoreError;
use crate::interfaces::Storefront;
use crate::interfaces::StorefrontError;

// ============================================================================
// SECTION: In-Memory Record Store
// ============================================================================

/// Mutable state behind the in-memory record store.
#[derive(Debug, Default)]
struct RecordStoreState {
    /// Records per table.
    tables: HashMap<RosterTable, Vec<Record>>,
    /// Error message injected into the next call, when set.
    fail_next: Option<String>,
    /// Counter used to mint record identifiers on create.
    next_id: u64,
}

/// Deterministic in-memory [`RecordStore`].
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    /// Guarded store state.
    state: Mutex<RecordStoreState>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record into a table.
    pub fn insert(&self, table: RosterTable, record: Record) {
        if let Ok(mut state) = self.state.lock() {
            state.tables.entry(table).or_default().push(record);
        }
    }

    /// Injects a failure into the next store call.
    pub fn fail_next(&self, message: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_next = Some(message.into());
        }
    }

    /// Returns a snapshot of the records in a table.
    #[must_use]
    pub fn records(&self, table: RosterTable) -> Vec<Record> {
        self.state
            .lock()
            .map(|state| state.tables.get(&table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Takes the injected failure, if one is pending.
    fn take_failure(&self) -> Result<(), RecordStoreError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| RecordStoreError::Transport("record store mutex poisoned".to_string()))?;
        match state.fail_next.take() {
            Some(message) => Err(RecordStoreError::Transport(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_all(&self, table: RosterTable) -> Result<Vec<Record>, RecordStoreError> {
        self.take_failure()?;
        Ok(self.records(table))
    }

    async fn find(&self, table: RosterTable, id: &RecordId) -> Result<Record, RecordStoreError> {
        self.take_failure()?;
        self.records(table).into_iter().find(|record| &record.id == id).ok_or_else(|| {
            RecordStoreError::Status {
                status: 404,
                message: format!("record {id} not found"),
            }
        })
    }

    async fn create(
        &self,
        table: RosterTable,
        fields: FieldMap,
    ) -> Result<Record, RecordStoreError> {
        self.take_failure()?;
        let mut state = self
            .state
            .lock()
            .map_err(|_| RecordStoreError::Transport("record store mutex poisoned".to_string()))?;
        state.next_id += 1;
        let record = Record {
            id: RecordId::new(format!("rec{:017}", state.next_id)),
            created_time: None,
            fields,
        };
        state.tables.entry(table).or_default().push(record.clone());
        Ok(record)
    }
}

// ============================================================================
// SECTION: In-Memory Storefront
// ============================================================================

/// Mutable state behind the in-memory storefront.
#[derive(Debug, Default)]
struct StorefrontState {
    /// Paid orders keyed by customer id.
    orders: HashMap<String, Vec<Order>>,
    /// Customers whose onboarding flag has been set.
    flagged: Vec<String>,
    /// Error message injected into the next call, when set.
    fail_next: Option<String>,
}

/// Deterministic in-memory [`Storefront`].
#[derive(Debug, Default)]
pub struct InMemoryStorefront {
    /// Guarded storefront state.
    state: Mutex<StorefrontState>,
}

impl InMemoryStorefront {
    /// Creates an empty storefront.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers paid orders for a customer.
    pub fn insert_orders(&self, customer: &CustomerId, orders: Vec<Order>) {
        if let Ok(mut state) = self.state.lock() {
            state.orders.insert(customer.as_str().to_string(), orders);
        }
    }

    /// Injects a failure into the next storefront call.
    pub fn fail_next(&self, message: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_next = Some(message.into());
        }
    }

    /// Returns the customers whose onboarding flag has been set, in order.
    #[must_use]
    pub fn flagged_customers(&self) -> Vec<String> {
        self.state.lock().map(|state| state.flagged.clone()).unwrap_or_default()
    }

    /// Takes the injected failure, if one is pending.
    fn take_failure(&self) -> Result<(), StorefrontError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| StorefrontError::Transport("storefront mutex poisoned".to_string()))?;
        match state.fail_next.take() {
            Some(message) => Err(StorefrontError::Transport(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Storefront for InMemoryStorefront {
    async fn paid_orders(&self, customer: &CustomerId) -> Result<Vec<Order>, StorefrontError> {
        self.take_failure()?;
        let state = self
            .state
            .lock()
            .map_err(|_| StorefrontError::Transport("storefront mutex poisoned".to_string()))?;
        Ok(state.orders.get(customer.as_str()).cloned().unwrap_or_default())
    }

    async fn set_onboarding_flag(
        &self,
        customer: &CustomerId,
    ) -> Result<Metafield, StorefrontError> {
        self.take_failure()?;
        let mut state = self
            .state
            .lock()
            .map_err(|_| StorefrontError::Transport("storefront mutex poisoned".to_string()))?;
        state.flagged.push(customer.as_str().to_string());
        Ok(Metafield {
            id: MetafieldId::new("0"),
            namespace: None,
            key: None,
            value: "true".to_string(),
        })
    }
}
