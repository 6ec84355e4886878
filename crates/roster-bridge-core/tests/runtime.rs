// roster-bridge-core/tests/runtime.rs
// ============================================================================
// Module: Runtime Tests
// Description: Aggregator, purchase checker, and enrollment writer tests.
// Purpose: Validate runtime semantics against the in-memory platform fakes.
// Dependencies: roster-bridge-core, serde_json, tokio
// ============================================================================

//! ## Overview
//! Tests the runtime components for:
//! - Aggregation: business-id filtering, lesson inlining in original order,
//!   not-found and store-failure propagation, first-match-wins duplicates
//! - Purchase check: paid line-item matching, empty histories, non-numeric
//!   product ids, first-page-only semantics
//! - Enrollment: fixed field mapping and the `Onboarding` status

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;

use roster_bridge_core::AggregateError;
use roster_bridge_core::CustomerId;
use roster_bridge_core::EnrollmentForm;
use roster_bridge_core::EnrollmentWriter;
use roster_bridge_core::FieldMap;
use roster_bridge_core::InMemoryRecordStore;
use roster_bridge_core::InMemoryStorefront;
use roster_bridge_core::LineItem;
use roster_bridge_core::Order;
use roster_bridge_core::ProductId;
use roster_bridge_core::PurchaseChecker;
use roster_bridge_core::Record;
use roster_bridge_core::RecordAggregator;
use roster_bridge_core::RecordId;
use roster_bridge_core::RosterTable;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Builds a record with the given id and JSON fields.
fn record(id: &str, fields: Value) -> Record {
    let Value::Object(fields) = fields else {
        panic!("record fields must be a json object");
    };
    Record {
        id: RecordId::new(id),
        created_time: None,
        fields,
    }
}

/// Builds a paid order holding the given product ids.
fn order(id: i64, product_ids: &[i64]) -> Order {
    Order {
        id,
        line_items: product_ids
            .iter()
            .map(|product_id| LineItem {
                product_id: Some(*product_id),
            })
            .collect(),
    }
}

/// Builds a complete enrollment form submission.
fn sample_form() -> EnrollmentForm {
    EnrollmentForm {
        first_name: "Andrea".to_string(),
        last_name: "Hernandez".to_string(),
        email: "andrea@example.com".to_string(),
        phone: "(404) 555-0101".to_string(),
        student_loc: "Suwanee, GA".to_string(),
        pref_start_date: "2026-09-01".to_string(),
        pref_instructor: vec!["recV97XJ3g9QBPJmV".to_string()],
        program: vec!["recAbIgaQEDjrTuh1".to_string()],
        goals: "Mix and transition between tracks".to_string(),
        exp_level: "Beginner".to_string(),
        music_preferences: vec!["Salsa".to_string(), "Bachata".to_string()],
        hours_avail: "3-5 hours".to_string(),
        equipment_access: "Yes".to_string(),
        student_id: "STU-77".to_string(),
    }
}

// ============================================================================
// SECTION: Aggregator
// ============================================================================

#[tokio::test]
async fn fetch_by_id_returns_matching_record_fields() {
    let store = Arc::new(InMemoryRecordStore::new());
    store.insert(
        RosterTable::Programs,
        record("recP1", json!({"Program ID": "PRG-1", "Title": "DJ Foundations"})),
    );
    store.insert(
        RosterTable::Programs,
        record("recP2", json!({"Program ID": "PRG-2", "Title": "Advanced Mixing"})),
    );
    let aggregator = RecordAggregator::new(store);

    let fields = aggregator.fetch_by_id(RosterTable::Programs, "PRG-2").await.unwrap();
    assert_eq!(fields.get("Title"), Some(&json!("Advanced Mixing")));
}

#[tokio::test]
async fn fetch_by_id_inlines_lessons_in_original_order() {
    let store = Arc::new(InMemoryRecordStore::new());
    store.insert(
        RosterTable::Programs,
        record("recP1", json!({"Program ID": "PRG-1", "Lessons": ["L2", "L1"]})),
    );
    store.insert(RosterTable::Lessons, record("L1", json!({"Name": "Beatmatching"})));
    store.insert(RosterTable::Lessons, record("L2", json!({"Name": "Phrasing"})));
    let aggregator = RecordAggregator::new(store);

    let fields = aggregator.fetch_by_id(RosterTable::Programs, "PRG-1").await.unwrap();
    assert_eq!(
        fields.get("Lessons"),
        Some(&json!([{"Name": "Phrasing"}, {"Name": "Beatmatching"}]))
    );
}

#[tokio::test]
async fn fetch_by_id_leaves_empty_lesson_list_untouched() {
    let store = Arc::new(InMemoryRecordStore::new());
    store.insert(
        RosterTable::Students,
        record("recS1", json!({"Student ID": "STU-1", "Lessons": []})),
    );
    let aggregator = RecordAggregator::new(store);

    let fields = aggregator.fetch_by_id(RosterTable::Students, "STU-1").await.unwrap();
    assert_eq!(fields.get("Lessons"), Some(&json!([])));
}

#[tokio::test]
async fn fetch_by_id_reports_not_found() {
    let store = Arc::new(InMemoryRecordStore::new());
    let aggregator = RecordAggregator::new(store);

    let err = aggregator.fetch_by_id(RosterTable::Programs, "PRG-404").await.unwrap_err();
    assert!(matches!(err, AggregateError::NotFound { entity: "Program" }));
    assert_eq!(err.to_string(), "Program not found");
}

#[tokio::test]
async fn fetch_by_id_takes_first_of_duplicate_business_ids() {
    // Upstream enforces no uniqueness; first found wins.
    let store = Arc::new(InMemoryRecordStore::new());
    store.insert(RosterTable::Students, record("recS1", json!({"Student ID": "STU-1", "Seq": 1})));
    store.insert(RosterTable::Students, record("recS2", json!({"Student ID": "STU-1", "Seq": 2})));
    let aggregator = RecordAggregator::new(store);

    let fields = aggregator.fetch_by_id(RosterTable::Students, "STU-1").await.unwrap();
    assert_eq!(fields.get("Seq"), Some(&json!(1)));
}

#[tokio::test]
async fn fetch_by_id_propagates_store_failure() {
    let store = Arc::new(InMemoryRecordStore::new());
    store.fail_next("connection refused");
    let aggregator = RecordAggregator::new(store);

    let err = aggregator.fetch_by_id(RosterTable::Programs, "PRG-1").await.unwrap_err();
    assert!(matches!(err, AggregateError::Store(_)));
}

#[tokio::test]
async fn fetch_by_id_fails_whole_aggregation_on_lesson_failure() {
    let store = Arc::new(InMemoryRecordStore::new());
    store.insert(
        RosterTable::Programs,
        record("recP1", json!({"Program ID": "PRG-1", "Lessons": ["L1", "L-missing"]})),
    );
    store.insert(RosterTable::Lessons, record("L1", json!({"Name": "Beatmatching"})));
    let aggregator = RecordAggregator::new(store);

    let err = aggregator.fetch_by_id(RosterTable::Programs, "PRG-1").await.unwrap_err();
    assert!(matches!(err, AggregateError::Store(_)));
}

// ============================================================================
// SECTION: Purchase Checker
// ============================================================================

#[tokio::test]
async fn has_purchased_finds_product_in_paid_order() {
    let storefront = Arc::new(InMemoryStorefront::new());
    let customer = CustomerId::new("C1");
    storefront.insert_orders(&customer, vec![order(1, &[111, 999])]);
    let checker = PurchaseChecker::new(storefront);

    assert!(checker.has_purchased(&customer, &ProductId::new("999")).await.unwrap());
}

#[tokio::test]
async fn has_purchased_misses_absent_product() {
    let storefront = Arc::new(InMemoryStorefront::new());
    let customer = CustomerId::new("C1");
    storefront.insert_orders(&customer, vec![order(1, &[999])]);
    let checker = PurchaseChecker::new(storefront);

    assert!(!checker.has_purchased(&customer, &ProductId::new("888")).await.unwrap());
}

#[tokio::test]
async fn has_purchased_is_false_for_empty_history() {
    let storefront = Arc::new(InMemoryStorefront::new());
    let checker = PurchaseChecker::new(storefront);

    let customer = CustomerId::new("C-empty");
    assert!(!checker.has_purchased(&customer, &ProductId::new("999")).await.unwrap());
}

#[tokio::test]
async fn has_purchased_ignores_non_numeric_product_ids() {
    let storefront = Arc::new(InMemoryStorefront::new());
    let customer = CustomerId::new("C1");
    storefront.insert_orders(&customer, vec![order(1, &[999])]);
    let checker = PurchaseChecker::new(storefront);

    assert!(!checker.has_purchased(&customer, &ProductId::new("gift-card")).await.unwrap());
}

#[tokio::test]
async fn has_purchased_skips_line_items_without_products() {
    let storefront = Arc::new(InMemoryStorefront::new());
    let customer = CustomerId::new("C1");
    storefront.insert_orders(
        &customer,
        vec![Order {
            id: 1,
            line_items: vec![
                LineItem {
                    product_id: None,
                },
                LineItem {
                    product_id: Some(999),
                },
            ],
        }],
    );
    let checker = PurchaseChecker::new(storefront);

    assert!(checker.has_purchased(&customer, &ProductId::new("999")).await.unwrap());
}

#[tokio::test]
async fn has_purchased_inspects_only_returned_page() {
    // The storefront trait returns a single page of orders; anything the
    // platform would paginate past is invisible to the check. This pins the
    // known first-page-only limitation rather than fixing it silently.
    let storefront = Arc::new(InMemoryStorefront::new());
    let customer = CustomerId::new("C1");
    storefront.insert_orders(&customer, vec![order(1, &[111])]);
    let checker = PurchaseChecker::new(storefront);

    assert!(!checker.has_purchased(&customer, &ProductId::new("999")).await.unwrap());
}

#[tokio::test]
async fn has_purchased_propagates_storefront_failure() {
    let storefront = Arc::new(InMemoryStorefront::new());
    storefront.fail_next("upstream 401");
    let checker = PurchaseChecker::new(storefront);

    let customer = CustomerId::new("C1");
    assert!(checker.has_purchased(&customer, &ProductId::new("999")).await.is_err());
}

// ============================================================================
// SECTION: Enrollment Writer
// ============================================================================

#[tokio::test]
async fn create_enrollment_applies_fixed_field_mapping() {
    let store = Arc::new(InMemoryRecordStore::new());
    let writer = EnrollmentWriter::new(store.clone());

    let created = writer.create_enrollment(&sample_form()).await.unwrap();

    let expected: FieldMap = match json!({
        "First Name": "Andrea",
        "Last Name": "Hernandez",
        "Email": "andrea@example.com",
        "Phone Number": "(404) 555-0101",
        "Location": "Suwanee, GA",
        "Start Date": "2026-09-01",
        "Instructor": ["recV97XJ3g9QBPJmV"],
        "Program(s)": ["recAbIgaQEDjrTuh1"],
        "Primary Goal": "Mix and transition between tracks",
        "Experience": "Beginner",
        "Music Preference": ["Salsa", "Bachata"],
        "Dedicated Time": "3-5 hours",
        "Equipment": "Yes",
        "Student ID": "STU-77",
        "Status": "Onboarding",
    }) {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    };
    assert_eq!(created.fields, expected);
    assert_eq!(store.records(RosterTable::Students).len(), 1);
}

#[tokio::test]
async fn create_enrollment_propagates_store_failure() {
    let store = Arc::new(InMemoryRecordStore::new());
    store.fail_next("create rejected");
    let writer = EnrollmentWriter::new(store);

    assert!(writer.create_enrollment(&sample_form()).await.is_err());
}
