// roster-bridge-core/src/runtime/aggregator.rs
// ============================================================================
// Module: Record Aggregator
// Description: Business-id lookup with inline lesson resolution.
// Purpose: Fetch one record from a view and resolve linked lesson records.
// Dependencies: futures, serde_json, crate::interfaces
// ============================================================================

//! ## Overview
//! The record store offers no server-side filter by business identifier, so
//! the aggregator fetches the whole view and filters in memory. When the
//! matched record links lesson sub-records, each is resolved by individual
//! lookup; the lookups run concurrently and are awaited jointly, so any
//! single failure fails the whole aggregation with no partial result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use futures::future::try_join_all;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::RecordId;
use crate::core::records::FieldMap;
use crate::core::records::RosterTable;
use crate::interfaces::RecordStoreError;
use crate::interfaces::SharedRecordStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Field holding linked lesson record references.
const LESSONS_FIELD: &str = "Lessons";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while aggregating a record.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// No record in the view carried the requested business identifier.
    #[error("{entity} not found")]
    NotFound {
        /// Human-facing entity label (`Program` or `Student`).
        entity: &'static str,
    },
    /// The requested table has no business identifier to filter on.
    #[error("table {0} has no business identifier")]
    UnsupportedTable(&'static str),
    /// The record store call failed.
    #[error(transparent)]
    Store(#[from] RecordStoreError),
}

// ============================================================================
// SECTION: Aggregator
// ============================================================================

/// Fetches records by business identifier and inlines linked lessons.
#[derive(Clone)]
pub struct RecordAggregator {
    /// Record store client.
    store: SharedRecordStore,
}

impl RecordAggregator {
    /// Creates an aggregator over the given record store.
    #[must_use]
    pub fn new(store: SharedRecordStore) -> Self {
        Self {
            store,
        }
    }

    /// Fetches the record whose business identifier equals `business_id`.
    ///
    /// The whole view is retrieved and filtered in memory. When multiple
    /// records share the business id, the first match wins; upstream enforces
    /// no uniqueness. The returned field map has the `Lessons` reference list
    /// replaced with the resolved lesson field maps in original order.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::NotFound`] when no record matches and
    /// [`AggregateError::Store`] when any record store call fails.
    pub async fn fetch_by_id(
        &self,
        table: RosterTable,
        business_id: &str,
    ) -> Result<FieldMap, AggregateError> {
        let id_field = table
            .business_id_field()
            .ok_or(AggregateError::UnsupportedTable(table.table_name()))?;
        let records = self.store.list_all(table).await?;
        let matched = records
            .into_iter()
            .find(|record| {
                record.fields.get(id_field).and_then(Value::as_str) == Some(business_id)
            })
            .ok_or(AggregateError::NotFound {
                entity: entity_label(table),
            })?;
        let mut fields = matched.fields;
        self.resolve_lessons(&mut fields).await?;
        Ok(fields)
    }

    /// Replaces a non-empty `Lessons` reference array with resolved records.
    async fn resolve_lessons(&self, fields: &mut FieldMap) -> Result<(), AggregateError> {
        let ids: Vec<RecordId> = match fields.get(LESSONS_FIELD) {
            Some(Value::Array(refs)) if !refs.is_empty() => {
                refs.iter().filter_map(Value::as_str).map(RecordId::from).collect()
            }
            _ => return Ok(()),
        };
        let lookups = ids.iter().map(|id| self.store.find(RosterTable::Lessons, id));
        let lessons = try_join_all(lookups).await?;
        let resolved: Vec<Value> =
            lessons.into_iter().map(|lesson| Value::Object(lesson.fields)).collect();
        fields.insert(LESSONS_FIELD.to_string(), Value::Array(resolved));
        Ok(())
    }
}

/// Returns the human-facing entity label for not-found messages.
const fn entity_label(table: RosterTable) -> &'static str {
    match table {
        RosterTable::Programs => "Program",
        RosterTable::Students => "Student",
        RosterTable::Lessons => "Lesson",
    }
}
