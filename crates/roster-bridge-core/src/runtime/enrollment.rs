// roster-bridge-core/src/runtime/enrollment.rs
// ============================================================================
// Module: Enrollment Writer
// Description: Maps enrollment form submissions onto the record store schema.
// Purpose: Create one student record per onboarding submission.
// Dependencies: serde_json, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The enrollment writer maps the front-end's camelCase form fields 1:1 onto
//! the record store's field names and creates a single student record with a
//! fixed `Status` of `Onboarding`. The field name mapping is a fixed contract
//! with the record store base; no validation happens here beyond what the
//! store itself enforces.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use crate::core::records::EnrollmentForm;
use crate::core::records::FieldMap;
use crate::core::records::Record;
use crate::core::records::RosterTable;
use crate::interfaces::RecordStoreError;
use crate::interfaces::SharedRecordStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed status assigned to every newly created enrollment record.
pub const ENROLLMENT_STATUS: &str = "Onboarding";

// ============================================================================
// SECTION: Field Mapping
// ============================================================================

/// Builds the record store field map for an enrollment form.
///
/// The mapping is a fixed contract: `firstName -> First Name`,
/// `lastName -> Last Name`, `email -> Email`, `phone -> Phone Number`,
/// `studentLoc -> Location`, `prefStartDate -> Start Date`,
/// `prefInstructor -> Instructor`, `program -> Program(s)`,
/// `goals -> Primary Goal`, `expLevel -> Experience`,
/// `musicPreferences -> Music Preference`, `hoursAvail -> Dedicated Time`,
/// `equipmentAccess -> Equipment`, `studentId -> Student ID`, plus the fixed
/// `Status`.
#[must_use]
pub fn enrollment_fields(form: &EnrollmentForm) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert("First Name".to_string(), Value::String(form.first_name.clone()));
    fields.insert("Last Name".to_string(), Value::String(form.last_name.clone()));
    fields.insert("Email".to_string(), Value::String(form.email.clone()));
    fields.insert("Phone Number".to_string(), Value::String(form.phone.clone()));
    fields.insert("Location".to_string(), Value::String(form.student_loc.clone()));
    fields.insert("Start Date".to_string(), Value::String(form.pref_start_date.clone()));
    fields.insert("Instructor".to_string(), json!(form.pref_instructor));
    fields.insert("Program(s)".to_string(), json!(form.program));
    fields.insert("Primary Goal".to_string(), Value::String(form.goals.clone()));
    fields.insert("Experience".to_string(), Value::String(form.exp_level.clone()));
    fields.insert("Music Preference".to_string(), json!(form.music_preferences));
    fields.insert("Dedicated Time".to_string(), Value::String(form.hours_avail.clone()));
    fields.insert("Equipment".to_string(), Value::String(form.equipment_access.clone()));
    fields.insert("Student ID".to_string(), Value::String(form.student_id.clone()));
    fields.insert("Status".to_string(), Value::String(ENROLLMENT_STATUS.to_string()));
    fields
}

// ============================================================================
// SECTION: Writer
// ============================================================================

/// Creates enrollment records in the record store.
#[derive(Clone)]
pub struct EnrollmentWriter {
    /// Record store client.
    store: SharedRecordStore,
}

impl EnrollmentWriter {
    /// Creates a writer over the given record store.
    #[must_use]
    pub fn new(store: SharedRecordStore) -> Self {
        Self {
            store,
        }
    }

    /// Creates one student record for the submitted form.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] when record creation fails.
    pub async fn create_enrollment(
        &self,
        form: &EnrollmentForm,
    ) -> Result<Record, RecordStoreError> {
        self.store.create(RosterTable::Students, enrollment_fields(form)).await
    }
}
