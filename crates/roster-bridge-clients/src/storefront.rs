// roster-bridge-clients/src/storefront.rs
// ============================================================================
// Module: Storefront Client
// Description: Shopify-style admin API client for orders and metafields.
// Purpose: Implement paid-order queries and the onboarding metafield update.
// Dependencies: reqwest, roster-bridge-core, url
// ============================================================================

//! ## Overview
//! The storefront admin API lives under
//! `https://{shop_domain}/admin/api/{api_version}/` with token-header auth.
//! Orders are queried filtered to a customer and `paid` financial status;
//! only the first page the platform returns is inspected. The onboarding
//! flag is a fixed metafield updated to the boolean wire value `"true"`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Response;
use roster_bridge_config::StorefrontConfig;
use roster_bridge_core::CustomerId;
use roster_bridge_core::Metafield;
use roster_bridge_core::Order;
use roster_bridge_core::Storefront;
use roster_bridge_core::StorefrontError;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying the admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";
/// Connect timeout for storefront requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Total request timeout for storefront requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// Orders query response.
#[derive(Debug, Deserialize)]
struct OrdersResponse {
    /// Orders in the returned page.
    #[serde(default)]
    orders: Vec<Order>,
}

/// Metafield update response.
#[derive(Debug, Deserialize)]
struct MetafieldResponse {
    /// The updated metafield.
    metafield: Metafield,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Reqwest-backed storefront client.
#[derive(Debug, Clone)]
pub struct ShopifyStorefront {
    /// Shared HTTP client.
    client: Client,
    /// Admin API base: `{scheme}://{shop_domain}/admin/api/{api_version}/`.
    api_base: Url,
    /// Admin API access token.
    access_token: String,
    /// Fixed metafield id carrying the onboarding flag.
    onboarding_metafield_id: String,
}

impl ShopifyStorefront {
    /// Builds a client from storefront configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError`] when the shop domain does not form a valid
    /// URL or the HTTP client cannot be constructed.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, StorefrontError> {
        let api_base = admin_api_base(&config.shop_domain, &config.api_version)?;
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| StorefrontError::Transport(format!("client build failed: {err}")))?;
        Ok(Self {
            client,
            api_base,
            access_token: config.access_token.clone(),
            onboarding_metafield_id: config.onboarding_metafield_id.clone(),
        })
    }

    /// Joins a resource path onto the admin API base.
    fn endpoint(&self, resource: &str) -> Result<Url, StorefrontError> {
        self.api_base
            .join(resource)
            .map_err(|err| StorefrontError::Transport(format!("invalid endpoint: {err}")))
    }

    /// Checks the response status and decodes the JSON body.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, StorefrontError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorefrontError::Status {
                status: status.as_u16(),
                message,
            });
        }
        response.json::<T>().await.map_err(|err| StorefrontError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl Storefront for ShopifyStorefront {
    async fn paid_orders(&self, customer: &CustomerId) -> Result<Vec<Order>, StorefrontError> {
        let mut url = self.endpoint("orders.json")?;
        url.query_pairs_mut()
            .append_pair("customer_id", customer.as_str())
            .append_pair("financial_status", "paid");
        let response = self
            .client
            .get(url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .send()
            .await
            .map_err(|err| StorefrontError::Transport(err.to_string()))?;
        let orders: OrdersResponse = Self::decode(response).await?;
        Ok(orders.orders)
    }

    async fn set_onboarding_flag(
        &self,
        customer: &CustomerId,
    ) -> Result<Metafield, StorefrontError> {
        let resource = format!(
            "customers/{}/metafields/{}.json",
            customer.as_str(),
            self.onboarding_metafield_id
        );
        let url = self.endpoint(&resource)?;
        let body = json!({
            "metafield": {
                "id": metafield_id_value(&self.onboarding_metafield_id),
                "value": "true",
                "type": "boolean",
            }
        });
        let response = self
            .client
            .put(url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|err| StorefrontError::Transport(err.to_string()))?;
        let updated: MetafieldResponse = Self::decode(response).await?;
        Ok(updated.metafield)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the admin API base URL for a shop domain.
///
/// A plain domain gets the `https` scheme; an explicit `http://` prefix is
/// honored so tests can target local stubs.
fn admin_api_base(shop_domain: &str, api_version: &str) -> Result<Url, StorefrontError> {
    let root = if shop_domain.contains("://") {
        shop_domain.to_string()
    } else {
        format!("https://{shop_domain}")
    };
    let base = format!("{}/admin/api/{}/", root.trim_end_matches('/'), api_version);
    Url::parse(&base).map_err(|err| StorefrontError::Transport(format!("invalid shop domain: {err}")))
}

/// Renders the metafield id as its numeric wire form when possible.
fn metafield_id_value(id: &str) -> Value {
    id.parse::<i64>().map_or_else(|_| Value::String(id.to_string()), Value::from)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::admin_api_base;
    use super::metafield_id_value;
    use serde_json::json;

    #[test]
    fn admin_api_base_defaults_to_https() {
        let base = admin_api_base("example.myshopify.com", "2023-01").unwrap();
        assert_eq!(base.as_str(), "https://example.myshopify.com/admin/api/2023-01/");
    }

    #[test]
    fn admin_api_base_honors_explicit_scheme() {
        let base = admin_api_base("http://127.0.0.1:9000", "2023-01").unwrap();
        assert_eq!(base.as_str(), "http://127.0.0.1:9000/admin/api/2023-01/");
    }

    #[test]
    fn metafield_id_prefers_numeric_form() {
        assert_eq!(metafield_id_value("123456789"), json!(123_456_789));
        assert_eq!(metafield_id_value("gid-abc"), json!("gid-abc"));
    }
}
