// roster-bridge-core/src/core/signature.rs
// ============================================================================
// Module: Roster Bridge Request Signatures
// Description: HMAC-SHA256 verification of signed query parameters.
// Purpose: Reject requests that were not signed by the storefront platform.
// Dependencies: hmac, sha2, hex, subtle
// ============================================================================

//! ## Overview
//! Inbound requests carry a detached `signature` query parameter computed by
//! the storefront platform over the remaining parameters: keys sorted
//! lexicographically, concatenated as `key=value` pairs with no separator,
//! then HMAC-SHA256 under the shared secret, hex-encoded lowercase.
//! Comparison is constant time to avoid timing side-channels; a length
//! mismatch is an ordinary `InvalidSignature`, never a panic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Query parameter carrying the detached signature.
pub const SIGNATURE_PARAM: &str = "signature";

/// HMAC-SHA256 keyed hash.
type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when verifying a signature envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The `signature` parameter was absent.
    #[error("Missing signature")]
    MissingSignature,
    /// The supplied signature did not match the computed digest.
    #[error("Invalid signature")]
    InvalidSignature,
}

// ============================================================================
// SECTION: Signing
// ============================================================================

/// Computes the hex-encoded HMAC-SHA256 signature for a parameter mapping.
///
/// Any `signature` entry in `params` is ignored. The digest covers the
/// canonical form: keys sorted lexicographically, concatenated as `key=value`
/// with no separator between pairs.
#[must_use]
pub fn sign_params(params: &BTreeMap<String, String>, secret: &str) -> String {
    let canonical = canonical_string(params);
    // HMAC accepts keys of any length, so the error arm never fires; an empty
    // digest fails closed at the comparison if it somehow does.
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Builds the canonical `key=value` concatenation, excluding `signature`.
fn canonical_string(params: &BTreeMap<String, String>) -> String {
    let mut canonical = String::new();
    for (key, value) in params {
        if key == SIGNATURE_PARAM {
            continue;
        }
        canonical.push_str(key);
        canonical.push('=');
        canonical.push_str(value);
    }
    canonical
}

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// Verifies signature envelopes against a shared secret.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    /// Shared secret held by the trusted signer.
    secret: String,
}

impl SignatureVerifier {
    /// Creates a verifier holding the shared secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies that `params` carries a valid detached signature.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::MissingSignature`] when no `signature`
    /// parameter is present and [`SignatureError::InvalidSignature`] when the
    /// supplied value does not match the computed digest.
    pub fn verify(&self, params: &BTreeMap<String, String>) -> Result<(), SignatureError> {
        let supplied = params.get(SIGNATURE_PARAM).ok_or(SignatureError::MissingSignature)?;
        let computed = sign_params(params, &self.secret);
        let matches: bool = computed.as_bytes().ct_eq(supplied.as_bytes()).into();
        if matches {
            Ok(())
        } else {
            Err(SignatureError::InvalidSignature)
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
