// roster-bridge-config/tests/config_loading.rs
// ============================================================================
// Module: Config Loading Tests
// Description: File-based configuration loading and validation tests.
// Purpose: Validate TOML parsing, defaults, and fail-closed validation.
// Dependencies: roster-bridge-config, tempfile
// ============================================================================

//! ## Overview
//! Tests configuration loading for:
//! - Happy path: full config round-trips with section values applied
//! - Defaults: bind address, body limit, API version, and API base
//! - Fail closed: unknown keys, missing sections, oversized files

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

use std::fs;
use std::path::PathBuf;

use roster_bridge_config::ConfigError;
use roster_bridge_config::RosterBridgeConfig;
use tempfile::TempDir;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Writes `content` into a temp config file and returns dir and path.
fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster-bridge.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

/// Minimal valid configuration text.
const MINIMAL: &str = r#"
[signature]
secret = "shared-secret"

[storefront]
shop_domain = "example.myshopify.com"
access_token = "token"
onboarding_metafield_id = "123456789"

[record_store]
api_key = "key"
base_id = "appBase"
"#;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn minimal_config_applies_defaults() {
    let (_dir, path) = write_config(MINIMAL);
    let config = RosterBridgeConfig::load(Some(&path)).unwrap();
    assert_eq!(config.server.bind, "0.0.0.0:3000");
    assert_eq!(config.server.max_body_bytes, 64 * 1024);
    assert!(config.server.allowed_origins.is_empty());
    assert!(config.signature.enabled);
    assert_eq!(config.storefront.api_version, "2023-01");
    assert_eq!(config.record_store.api_base, "https://api.airtable.com/v0");
    assert!(!config.server.tls_enabled());
}

#[test]
fn full_config_round_trips() {
    let (_dir, path) = write_config(
        r#"
[server]
bind = "127.0.0.1:8443"
allowed_origins = ["https://latinmixacademy.com"]
max_body_bytes = 32768

[signature]
enabled = false

[storefront]
shop_domain = "example.myshopify.com"
access_token = "token"
api_version = "2024-04"
onboarding_metafield_id = "42"

[record_store]
api_key = "key"
base_id = "appBase"
api_base = "http://127.0.0.1:9000/v0"
"#,
    );
    let config = RosterBridgeConfig::load(Some(&path)).unwrap();
    assert_eq!(config.server.bind, "127.0.0.1:8443");
    assert_eq!(config.server.allowed_origins, vec!["https://latinmixacademy.com".to_string()]);
    assert_eq!(config.server.max_body_bytes, 32_768);
    assert!(!config.signature.enabled);
    assert_eq!(config.storefront.api_version, "2024-04");
    assert_eq!(config.record_store.api_base, "http://127.0.0.1:9000/v0");
}

#[test]
fn missing_file_reports_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(RosterBridgeConfig::load(Some(&path)), Err(ConfigError::Io(_))));
}

#[test]
fn unknown_keys_are_rejected() {
    let (_dir, path) = write_config(&format!("{MINIMAL}\n[surprise]\nvalue = 1\n"));
    assert!(matches!(RosterBridgeConfig::load(Some(&path)), Err(ConfigError::Parse(_))));
}

#[test]
fn missing_section_is_rejected() {
    let (_dir, path) = write_config(
        r#"
[signature]
secret = "shared-secret"
"#,
    );
    assert!(matches!(RosterBridgeConfig::load(Some(&path)), Err(ConfigError::Parse(_))));
}

#[test]
fn oversized_file_is_rejected() {
    let padding = format!("{MINIMAL}\n# {}\n", "x".repeat(1024 * 1024));
    let (_dir, path) = write_config(&padding);
    assert!(matches!(RosterBridgeConfig::load(Some(&path)), Err(ConfigError::Invalid(_))));
}

#[test]
fn invalid_bind_fails_validation() {
    let (_dir, path) = write_config(&format!("[server]\nbind = \"nope\"\n{MINIMAL}"));
    assert!(matches!(RosterBridgeConfig::load(Some(&path)), Err(ConfigError::Invalid(_))));
}
