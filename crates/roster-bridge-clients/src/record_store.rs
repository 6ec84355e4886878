// roster-bridge-clients/src/record_store.rs
// ============================================================================
// Module: Record Store Client
// Description: Airtable-style record store client with view pagination.
// Purpose: Implement list, find, and create against the record store API.
// Dependencies: reqwest, roster-bridge-core, url
// ============================================================================

//! ## Overview
//! The record store exposes tables under `{api_base}/{base_id}/{table}` with
//! bearer-token auth. List responses page through an `offset` token; the
//! client follows it until absent, so `list_all` returns the whole view.
//! Find and create address single records. All failures map onto
//! [`RecordStoreError`] without retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Response;
use roster_bridge_config::RecordStoreConfig;
use roster_bridge_core::FieldMap;
use roster_bridge_core::Record;
use roster_bridge_core::RecordId;
use roster_bridge_core::RecordStore;
use roster_bridge_core::RecordStoreError;
use roster_bridge_core::RosterTable;
use serde::Deserialize;
use serde::Serialize;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Connect timeout for record store requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Total request timeout for record store requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// List response page.
#[derive(Debug, Deserialize)]
struct ListResponse {
    /// Records in this page.
    records: Vec<Record>,
    /// Continuation token; absent on the final page.
    #[serde(default)]
    offset: Option<String>,
}

/// Create request body.
#[derive(Debug, Serialize)]
struct CreateRequest {
    /// Records to create; this client always sends exactly one.
    records: Vec<CreateRecord>,
}

/// A single record payload within a create request.
#[derive(Debug, Serialize)]
struct CreateRecord {
    /// Field mapping for the new record.
    fields: FieldMap,
}

/// Create response body.
#[derive(Debug, Deserialize)]
struct CreateResponse {
    /// Created records; the first element is the one this client sent.
    records: Vec<Record>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Reqwest-backed record store client.
#[derive(Debug, Clone)]
pub struct AirtableRecordStore {
    /// Shared HTTP client.
    client: Client,
    /// API base URL including the version segment.
    api_base: Url,
    /// Base identifier holding the roster tables.
    base_id: String,
    /// Bearer token for the record store API.
    api_key: String,
}

impl AirtableRecordStore {
    /// Builds a client from record store configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] when the API base does not parse or the
    /// HTTP client cannot be constructed.
    pub fn from_config(config: &RecordStoreConfig) -> Result<Self, RecordStoreError> {
        let api_base = Url::parse(&config.api_base)
            .map_err(|err| RecordStoreError::Transport(format!("invalid api base: {err}")))?;
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| RecordStoreError::Transport(format!("client build failed: {err}")))?;
        Ok(Self {
            client,
            api_base,
            base_id: config.base_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Builds the endpoint URL for a table, with an optional record segment.
    fn endpoint(
        &self,
        table: RosterTable,
        record: Option<&RecordId>,
    ) -> Result<Url, RecordStoreError> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                RecordStoreError::Transport("api base cannot carry path segments".to_string())
            })?;
            segments.push(&self.base_id);
            segments.push(table.table_name());
            if let Some(id) = record {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    /// Checks the response status and decodes the JSON body.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, RecordStoreError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RecordStoreError::Status {
                status: status.as_u16(),
                message,
            });
        }
        response.json::<T>().await.map_err(|err| RecordStoreError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl RecordStore for AirtableRecordStore {
    async fn list_all(&self, table: RosterTable) -> Result<Vec<Record>, RecordStoreError> {
        let endpoint = self.endpoint(table, None)?;
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let mut url = endpoint.clone();
            if let Some(view) = table.view_name() {
                url.query_pairs_mut().append_pair("view", view);
            }
            if let Some(token) = &offset {
                url.query_pairs_mut().append_pair("offset", token);
            }
            let response = self
                .client
                .get(url)
                .bearer_auth(&self.api_key)
                .send()
                .await
                .map_err(|err| RecordStoreError::Transport(err.to_string()))?;
            let mut page: ListResponse = Self::decode(response).await?;
            records.append(&mut page.records);
            match page.offset {
                Some(token) => offset = Some(token),
                None => break,
            }
        }
        Ok(records)
    }

    async fn find(&self, table: RosterTable, id: &RecordId) -> Result<Record, RecordStoreError> {
        let url = self.endpoint(table, Some(id))?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|err| RecordStoreError::Transport(err.to_string()))?;
        Self::decode(response).await
    }

    async fn create(
        &self,
        table: RosterTable,
        fields: FieldMap,
    ) -> Result<Record, RecordStoreError> {
        let url = self.endpoint(table, None)?;
        let body = CreateRequest {
            records: vec![CreateRecord {
                fields,
            }],
        };
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| RecordStoreError::Transport(err.to_string()))?;
        let created: CreateResponse = Self::decode(response).await?;
        created
            .records
            .into_iter()
            .next()
            .ok_or_else(|| RecordStoreError::Malformed("create returned no records".to_string()))
    }
}
