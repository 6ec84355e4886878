// roster-bridge-server/src/server.rs
// ============================================================================
// Module: Server Assembly
// Description: Server construction, CORS, TLS, and listener binding.
// Purpose: Turn validated configuration into a running HTTP server.
// Dependencies: axum, axum-server, tower-http, roster-bridge-clients
// ============================================================================

//! ## Overview
//! [`RosterBridgeServer::from_config`] validates configuration, builds the
//! two platform clients, and assembles the router with CORS and a body-size
//! limit. With TLS material configured the listener binds rustls; otherwise
//! it serves plain TCP. The server owns no state of its own; everything
//! lives on the external platforms.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::header;
use axum_server::tls_rustls::RustlsConfig;
use roster_bridge_clients::AirtableRecordStore;
use roster_bridge_clients::ShopifyStorefront;
use roster_bridge_config::RosterBridgeConfig;
use roster_bridge_config::ServerConfig;
use roster_bridge_core::SignatureVerifier;
use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::audit::StderrAuditSink;
use crate::routes::ServerState;
use crate::routes::router;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while assembling or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration failed validation.
    #[error("config error: {0}")]
    Config(String),
    /// A client or TLS component could not be initialized.
    #[error("init error: {0}")]
    Init(String),
    /// The listener failed to bind or the server failed while running.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Roster Bridge HTTP server instance.
pub struct RosterBridgeServer {
    /// Validated configuration.
    config: RosterBridgeConfig,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl RosterBridgeServer {
    /// Builds a server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when validation or client construction fails.
    pub fn from_config(config: RosterBridgeConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let record_store = AirtableRecordStore::from_config(&config.record_store)
            .map_err(|err| ServerError::Init(err.to_string()))?;
        let storefront = ShopifyStorefront::from_config(&config.storefront)
            .map_err(|err| ServerError::Init(err.to_string()))?;
        let verifier = config
            .signature
            .enabled
            .then(|| SignatureVerifier::new(config.signature.secret.clone()));
        let state = Arc::new(ServerState::new(
            verifier,
            Arc::new(record_store),
            Arc::new(storefront),
            Arc::new(StderrAuditSink),
        ));
        Ok(Self {
            config,
            state,
        })
    }

    /// Builds the application router with CORS and body limits applied.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when an allowed origin does not parse.
    pub fn app(&self) -> Result<Router, ServerError> {
        let cors = cors_layer(&self.config.server)?;
        Ok(router(Arc::clone(&self.state))
            .layer(cors)
            .layer(DefaultBodyLimit::max(self.config.server.max_body_bytes)))
    }

    /// Serves requests until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .config
            .server
            .bind
            .parse()
            .map_err(|_| ServerError::Config("invalid bind address".to_string()))?;
        let app = self.app()?;
        if let (Some(cert), Some(key)) =
            (&self.config.server.tls_cert_path, &self.config.server.tls_key_path)
        {
            let tls = RustlsConfig::from_pem_file(cert, key)
                .await
                .map_err(|err| ServerError::Init(format!("tls material rejected: {err}")))?;
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await
                .map_err(|err| ServerError::Transport(err.to_string()))
        } else {
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|err| ServerError::Transport(format!("bind failed: {err}")))?;
            axum::serve(listener, app)
                .await
                .map_err(|err| ServerError::Transport(err.to_string()))
        }
    }
}

// ============================================================================
// SECTION: CORS
// ============================================================================

/// Builds the CORS layer from configured origins.
fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ServerError> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ServerError::Config(format!("invalid allowed origin: {origin}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}
