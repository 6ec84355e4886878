// roster-bridge-core/src/core/records.rs
// ============================================================================
// Module: Roster Bridge Record Types
// Description: Record store, storefront, and enrollment form data shapes.
// Purpose: Provide serializable shapes for the two external platforms.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The record store is schemaless from this system's perspective, so record
//! fields stay as JSON maps. Storefront orders and metafields carry only the
//! fields this system reads; unknown fields are ignored on deserialization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::MetafieldId;
use crate::core::identifiers::RecordId;

// ============================================================================
// SECTION: Record Store Shapes
// ============================================================================

/// Field mapping of a record store record.
///
/// Keys are the store's human-facing field names (for example `Program ID`);
/// values are arbitrary JSON.
pub type FieldMap = serde_json::Map<String, Value>;

/// A single record retrieved from or created in the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record store internal identifier.
    pub id: RecordId,
    /// Record creation timestamp as reported by the store, when present.
    #[serde(rename = "createdTime", skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    /// Named field mapping.
    pub fields: FieldMap,
}

/// Tables this system reads from or writes to in the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterTable {
    /// Course/program records, read through the `All Programs` view.
    Programs,
    /// Student records, read through the `Student Details` view and written
    /// by enrollment creation.
    Students,
    /// Lesson sub-records, resolved by record id only.
    Lessons,
}

impl RosterTable {
    /// Returns the record store table name.
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Programs => "Programs",
            Self::Students => "Students",
            Self::Lessons => "Lessons",
        }
    }

    /// Returns the view used for fetch-all queries, when the table has one.
    #[must_use]
    pub const fn view_name(self) -> Option<&'static str> {
        match self {
            Self::Programs => Some("All Programs"),
            Self::Students => Some("Student Details"),
            Self::Lessons => None,
        }
    }

    /// Returns the business-identifier field name used for in-memory
    /// filtering, when the table has one.
    #[must_use]
    pub const fn business_id_field(self) -> Option<&'static str> {
        match self {
            Self::Programs => Some("Program ID"),
            Self::Students => Some("Student ID"),
            Self::Lessons => None,
        }
    }
}

// ============================================================================
// SECTION: Storefront Shapes
// ============================================================================

/// A storefront order with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Storefront order identifier.
    pub id: i64,
    /// Ordered line items.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// A single line item within a storefront order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Referenced product identifier; absent for custom line items.
    #[serde(default)]
    pub product_id: Option<i64>,
}

/// A customer metafield on the storefront platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metafield {
    /// Metafield identifier.
    pub id: MetafieldId,
    /// Metafield namespace.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Metafield key.
    #[serde(default)]
    pub key: Option<String>,
    /// Metafield value in its wire string form.
    pub value: String,
}

// ============================================================================
// SECTION: Enrollment Form
// ============================================================================

/// Inbound enrollment form submission.
///
/// Field names follow the front-end's camelCase contract; the runtime maps
/// them onto the record store's field schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentForm {
    /// Student first name.
    pub first_name: String,
    /// Student last name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Student location.
    pub student_loc: String,
    /// Preferred start date.
    pub pref_start_date: String,
    /// Preferred instructor record references.
    #[serde(default)]
    pub pref_instructor: Vec<String>,
    /// Program record references.
    #[serde(default)]
    pub program: Vec<String>,
    /// Free-text goals.
    pub goals: String,
    /// Self-reported experience level.
    pub exp_level: String,
    /// Music preference tags.
    #[serde(default)]
    pub music_preferences: Vec<String>,
    /// Weekly hours available.
    pub hours_avail: String,
    /// Equipment access answer.
    pub equipment_access: String,
    /// Business student identifier; doubles as the storefront customer id.
    pub student_id: String,
}
