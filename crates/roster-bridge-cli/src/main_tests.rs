// roster-bridge-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for config loading and summary rendering.
// Purpose: Ensure check-config reports validated settings faithfully.
// Dependencies: roster-bridge-cli main helpers
// ============================================================================

//! ## Overview
//! Validates the `check-config` summary line and the error path for a
//! missing config file.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use tempfile::TempDir;

use crate::config_summary;
use crate::run_check_config;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn check_config_rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(run_check_config(Some(&path)).is_err());
}

#[test]
fn check_config_accepts_valid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster-bridge.toml");
    fs::write(
        &path,
        r#"
[signature]
secret = "shared-secret"

[storefront]
shop_domain = "example.myshopify.com"
access_token = "token"
onboarding_metafield_id = "123456789"

[record_store]
api_key = "key"
base_id = "appBase"
"#,
    )
    .unwrap();
    assert!(run_check_config(Some(&path)).is_ok());
}

#[test]
fn config_summary_reports_key_settings() {
    let config = roster_bridge_config::RosterBridgeConfig {
        server: roster_bridge_config::ServerConfig::default(),
        signature: roster_bridge_config::SignatureConfig {
            enabled: true,
            secret: "shared-secret".to_string(),
        },
        storefront: roster_bridge_config::StorefrontConfig {
            shop_domain: "example.myshopify.com".to_string(),
            access_token: "token".to_string(),
            api_version: "2023-01".to_string(),
            onboarding_metafield_id: "123".to_string(),
        },
        record_store: roster_bridge_config::RecordStoreConfig {
            api_key: "key".to_string(),
            base_id: "appBase".to_string(),
            api_base: "https://api.airtable.com/v0".to_string(),
        },
    };
    let summary = config_summary(&config);
    assert!(summary.contains("bind=0.0.0.0:3000"));
    assert!(summary.contains("signature=enabled"));
    assert!(summary.contains("record_store_base=appBase"));
}
