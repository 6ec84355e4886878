// roster-bridge-config/src/config.rs
// ============================================================================
// Module: Roster Bridge Configuration
// Description: Configuration loading and validation for Roster Bridge.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file resolved from an explicit path or
//! the `ROSTER_BRIDGE_CONFIG` environment variable, with a hard size limit.
//! Every section validates independently; missing or inconsistent settings
//! fail closed before any listener binds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "roster-bridge.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "ROSTER_BRIDGE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default server bind address.
const DEFAULT_BIND: &str = "0.0.0.0:3000";
/// Default maximum request body size in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
/// Default storefront admin API version.
const DEFAULT_API_VERSION: &str = "2023-01";
/// Default record store API base.
const DEFAULT_RECORD_STORE_API_BASE: &str = "https://api.airtable.com/v0";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem error while reading the config file.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parse failure.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Configuration is structurally valid but semantically invalid.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Root Configuration
// ============================================================================

/// Root Roster Bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterBridgeConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Request signature verification settings.
    pub signature: SignatureConfig,
    /// Storefront platform credentials and endpoints.
    pub storefront: StorefrontConfig,
    /// Record store credentials and endpoints.
    pub record_store: RecordStoreConfig,
}

impl RosterBridgeConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.signature.validate()?;
        self.storefront.validate()?;
        self.record_store.validate()?;
        Ok(())
    }
}

/// Resolves the config path from the argument, environment, or default name.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    path.map_or_else(
        || {
            env::var(CONFIG_ENV_VAR)
                .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from)
        },
        Path::to_path_buf,
    )
}

// ============================================================================
// SECTION: Server Configuration
// ============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address in `host:port` form.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Origins allowed by the CORS layer.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// TLS certificate path (PEM); requires `tls_key_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_cert_path: Option<PathBuf>,
    /// TLS private key path (PEM); requires `tls_cert_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_key_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origins: Vec::new(),
            max_body_bytes: default_max_body_bytes(),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl ServerConfig {
    /// Validates server settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bind address or TLS pairing is
    /// invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid("server.bind must be a socket address".to_string()))?;
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid("server.max_body_bytes must be nonzero".to_string()));
        }
        if self.tls_cert_path.is_some() != self.tls_key_path.is_some() {
            return Err(ConfigError::Invalid(
                "server.tls_cert_path and server.tls_key_path must be set together".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns whether TLS material is configured.
    #[must_use]
    pub const fn tls_enabled(&self) -> bool {
        self.tls_cert_path.is_some() && self.tls_key_path.is_some()
    }
}

/// Default server bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default maximum request body size.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

// ============================================================================
// SECTION: Signature Configuration
// ============================================================================

/// Request signature verification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureConfig {
    /// Whether inbound requests must carry a valid signature.
    #[serde(default = "default_signature_enabled")]
    pub enabled: bool,
    /// Shared secret held by the storefront platform.
    #[serde(default)]
    pub secret: String,
}

impl SignatureConfig {
    /// Validates signature settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when verification is enabled without a secret.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.secret.is_empty() {
            return Err(ConfigError::Invalid(
                "signature.secret is required when signature.enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Signature verification defaults to enabled.
const fn default_signature_enabled() -> bool {
    true
}

// ============================================================================
// SECTION: Storefront Configuration
// ============================================================================

/// Storefront platform credentials and endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorefrontConfig {
    /// Shop admin domain (for example `mystore.myshopify.com`).
    pub shop_domain: String,
    /// Admin API access token.
    pub access_token: String,
    /// Admin API version segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Fixed metafield id carrying the onboarding flag.
    pub onboarding_metafield_id: String,
}

impl StorefrontConfig {
    /// Validates storefront settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shop_domain.is_empty() {
            return Err(ConfigError::Invalid("storefront.shop_domain is required".to_string()));
        }
        if self.access_token.is_empty() {
            return Err(ConfigError::Invalid("storefront.access_token is required".to_string()));
        }
        if self.api_version.is_empty() {
            return Err(ConfigError::Invalid("storefront.api_version must be nonempty".to_string()));
        }
        if self.onboarding_metafield_id.is_empty() {
            return Err(ConfigError::Invalid(
                "storefront.onboarding_metafield_id is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default storefront admin API version.
fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

// ============================================================================
// SECTION: Record Store Configuration
// ============================================================================

/// Record store credentials and endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordStoreConfig {
    /// API key presented as a bearer token.
    pub api_key: String,
    /// Base identifier holding the roster tables.
    pub base_id: String,
    /// API base URL; overridable for tests.
    #[serde(default = "default_record_store_api_base")]
    pub api_base: String,
}

impl RecordStoreConfig {
    /// Validates record store settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::Invalid("record_store.api_key is required".to_string()));
        }
        if self.base_id.is_empty() {
            return Err(ConfigError::Invalid("record_store.base_id is required".to_string()));
        }
        if self.api_base.is_empty() {
            return Err(ConfigError::Invalid("record_store.api_base must be nonempty".to_string()));
        }
        Ok(())
    }
}

/// Default record store API base.
fn default_record_store_api_base() -> String {
    DEFAULT_RECORD_STORE_API_BASE.to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
