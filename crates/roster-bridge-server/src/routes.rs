// roster-bridge-server/src/routes.rs
// ============================================================================
// Module: HTTP Routes
// Description: Router, handlers, and signature middleware.
// Purpose: Dispatch the four integration operations and enforce signatures.
// Dependencies: axum, roster-bridge-core, serde_json
// ============================================================================

//! ## Overview
//! Each route calls into exactly one runtime component and serializes the
//! result (or error) as JSON. Error bodies are `{"error": "<message>"}`;
//! external failures surface as 500 with the error's message text, missing
//! caller input as 400, and signature rejections as 403. The signature
//! middleware covers every route except enrollment creation and reads query
//! parameters regardless of method.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use roster_bridge_core::AggregateError;
use roster_bridge_core::CustomerId;
use roster_bridge_core::EnrollmentForm;
use roster_bridge_core::EnrollmentWriter;
use roster_bridge_core::FieldMap;
use roster_bridge_core::ProductId;
use roster_bridge_core::PurchaseChecker;
use roster_bridge_core::Record;
use roster_bridge_core::RecordAggregator;
use roster_bridge_core::RecordStoreError;
use roster_bridge_core::RosterTable;
use roster_bridge_core::SharedRecordStore;
use roster_bridge_core::SharedStorefront;
use roster_bridge_core::SignatureVerifier;
use roster_bridge_core::StorefrontError;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crate::audit::AuditEvent;
use crate::audit::AuditSink;

// ============================================================================
// SECTION: Server State
// ============================================================================

/// Shared, immutable per-process state handed to every handler.
pub struct ServerState {
    /// Signature verifier; absent when verification is disabled.
    verifier: Option<SignatureVerifier>,
    /// Record store client.
    record_store: SharedRecordStore,
    /// Storefront client.
    storefront: SharedStorefront,
    /// Audit event sink.
    audit: Arc<dyn AuditSink>,
}

impl ServerState {
    /// Creates server state from its components.
    #[must_use]
    pub fn new(
        verifier: Option<SignatureVerifier>,
        record_store: SharedRecordStore,
        storefront: SharedStorefront,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            verifier,
            record_store,
            storefront,
            audit,
        }
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Builds the application router over the given state.
///
/// All routes except `/student/onboarding` pass through the signature
/// middleware.
#[must_use]
pub fn router(state: Arc<ServerState>) -> Router {
    let protected = Router::new()
        .route("/check-purchase", post(check_purchase))
        .route("/course/{id}", get(get_course))
        .route("/student/{id}", get(get_student))
        .route_layer(middleware::from_fn_with_state(Arc::clone(&state), verify_signature));
    let open = Router::new().route("/student/onboarding", post(create_onboarding));
    protected.merge(open).with_state(state)
}

// ============================================================================
// SECTION: Error Mapping
// ============================================================================

/// HTTP-facing error with a plain message body.
struct ApiError {
    /// Response status code.
    status: StatusCode,
    /// Message placed in the `error` body field.
    message: String,
}

impl ApiError {
    /// Builds a 400 for incomplete caller input.
    fn missing_field(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Builds a 500 carrying the underlying error's message text.
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({"error": self.message}))).into_response()
    }
}

impl From<AggregateError> for ApiError {
    fn from(err: AggregateError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<RecordStoreError> for ApiError {
    fn from(err: RecordStoreError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        Self::internal(err.to_string())
    }
}

// ============================================================================
// SECTION: Signature Middleware
// ============================================================================

/// Verifies the query-parameter signature envelope when enabled.
async fn verify_signature(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(verifier) = &state.verifier else {
        return next.run(request).await;
    };
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let params: BTreeMap<String, String> = request
        .uri()
        .query()
        .map(|query| url::form_urlencoded::parse(query.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    match verifier.verify(&params) {
        Ok(()) => {
            state.audit.record(&AuditEvent::allowed(&method, &path));
            next.run(request).await
        }
        Err(err) => {
            state.audit.record(&AuditEvent::denied(&method, &path, err.to_string()));
            ApiError {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            }
            .into_response()
        }
    }
}

// ============================================================================
// SECTION: Purchase Handler
// ============================================================================

/// Purchase check request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckPurchaseRequest {
    /// Storefront customer identifier.
    #[serde(default)]
    customer_id: Option<String>,
    /// Storefront product identifier.
    #[serde(default)]
    product_id: Option<String>,
}

/// Purchase check response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckPurchaseResponse {
    /// Whether a paid order contained the product.
    has_purchased: bool,
}

/// Handles `POST /check-purchase`.
async fn check_purchase(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<CheckPurchaseRequest>,
) -> Result<Json<CheckPurchaseResponse>, ApiError> {
    let (Some(customer_id), Some(product_id)) = (body.customer_id, body.product_id) else {
        return Err(ApiError::missing_field("Missing customerId or productId"));
    };
    if customer_id.is_empty() || product_id.is_empty() {
        return Err(ApiError::missing_field("Missing customerId or productId"));
    }
    let checker = PurchaseChecker::new(Arc::clone(&state.storefront));
    let has_purchased = checker
        .has_purchased(&CustomerId::new(customer_id), &ProductId::new(product_id))
        .await
        .inspect_err(|err| {
            state.audit.record(&AuditEvent::failed("POST", "/check-purchase", err.to_string()));
        })?;
    state.audit.record(&AuditEvent::completed("POST", "/check-purchase"));
    Ok(Json(CheckPurchaseResponse {
        has_purchased,
    }))
}

// ============================================================================
// SECTION: Lookup Handlers
// ============================================================================

/// Handles `GET /course/{id}` where `id` is a business Program ID.
async fn get_course(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<FieldMap>, ApiError> {
    fetch_record(&state, RosterTable::Programs, &id).await
}

/// Handles `GET /student/{id}` where `id` is a business Student ID.
async fn get_student(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<FieldMap>, ApiError> {
    fetch_record(&state, RosterTable::Students, &id).await
}

/// Runs the aggregator for a lookup route and audits the outcome.
async fn fetch_record(
    state: &ServerState,
    table: RosterTable,
    id: &str,
) -> Result<Json<FieldMap>, ApiError> {
    let path = format!("/{}/{id}", route_segment(table));
    let aggregator = RecordAggregator::new(Arc::clone(&state.record_store));
    let fields = aggregator.fetch_by_id(table, id).await.inspect_err(|err| {
        state.audit.record(&AuditEvent::failed("GET", &path, err.to_string()));
    })?;
    state.audit.record(&AuditEvent::completed("GET", &path));
    Ok(Json(fields))
}

/// Returns the route segment serving lookups for a table.
const fn route_segment(table: RosterTable) -> &'static str {
    match table {
        RosterTable::Programs => "course",
        RosterTable::Students => "student",
        RosterTable::Lessons => "lesson",
    }
}

// ============================================================================
// SECTION: Onboarding Handler
// ============================================================================

/// Handles `POST /student/onboarding`.
///
/// Creates the enrollment record, then flags the storefront customer. There
/// is no compensating delete when the flag update fails after a successful
/// create; the enrollment record stays and the request reports 500.
async fn create_onboarding(
    State(state): State<Arc<ServerState>>,
    Json(form): Json<EnrollmentForm>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let writer = EnrollmentWriter::new(Arc::clone(&state.record_store));
    let record = writer.create_enrollment(&form).await.inspect_err(|err| {
        state.audit.record(&AuditEvent::failed("POST", "/student/onboarding", err.to_string()));
    })?;
    let customer = CustomerId::new(form.student_id.clone());
    state.storefront.set_onboarding_flag(&customer).await.inspect_err(|err| {
        state.audit.record(&AuditEvent::failed("POST", "/student/onboarding", err.to_string()));
    })?;
    state.audit.record(&AuditEvent::completed("POST", "/student/onboarding"));
    Ok((StatusCode::CREATED, Json(record)))
}
