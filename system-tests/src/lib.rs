// system-tests/src/lib.rs
// ============================================================================
// Module: Roster Bridge System Tests Library
// Description: Shared fixtures for end-to-end server tests.
// Purpose: Spin up the server and stubbed external platforms on local ports.
// Dependencies: rcgen, roster-bridge-server, tempfile, tiny_http, tokio
// ============================================================================

//! ## Overview
//! System tests run the full HTTP server against stubbed record store and
//! storefront backends on ephemeral local ports. The harness here owns the
//! stub dispatch loop and ephemeral TLS material; the tests under `tests/`
//! drive real HTTP requests through `reqwest`. Gate with
//! `--features system-tests`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;
use std::thread;

use rcgen::BasicConstraints;
use rcgen::CertificateParams;
use rcgen::DistinguishedName;
use rcgen::DnType;
use rcgen::IsCa;
use rcgen::Issuer;
use rcgen::KeyPair;
use tempfile::TempDir;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Stub Backend
// ============================================================================

/// Routes a stubbed backend request to a JSON response.
pub type StubHandler = dyn Fn(&str, &str) -> (u16, String) + Send + 'static;

/// A stubbed external platform listening on an ephemeral local port.
pub struct StubBackend {
    /// Base URL of the stub (for example `http://127.0.0.1:49152`).
    base_url: String,
}

impl StubBackend {
    /// Spawns a stub that answers every request through `handler`.
    ///
    /// The handler receives the request method and URL (with query string)
    /// and returns a status code plus JSON body. The dispatch thread runs
    /// until the process exits; tests do not join it.
    ///
    /// # Panics
    ///
    /// Panics when no local port can be bound; acceptable in test fixtures.
    #[must_use]
    #[allow(clippy::unwrap_used, reason = "Test fixture; binding an ephemeral port must succeed.")]
    pub fn spawn(handler: Box<StubHandler>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let base_url = format!("http://{addr}");
        thread::spawn(move || {
            for request in server.incoming_requests() {
                let method = request.method().to_string();
                let url = request.url().to_string();
                let (status, body) = handler(&method, &url);
                let response = Response::from_string(body).with_status_code(status).with_header(
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .unwrap(),
                );
                let _ = request.respond(response);
            }
        });
        Self {
            base_url,
        }
    }

    /// Returns the stub's base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// ============================================================================
// SECTION: TLS Fixtures
// ============================================================================

/// Ephemeral TLS material generated for a single test.
///
/// Private keys never touch the repository; everything lives in a temp
/// directory that is removed when the fixture drops.
pub struct GeneratedTls {
    /// Owning temp directory; dropped with the fixture.
    _tempdir: TempDir,
    /// CA certificate in PEM form, for client trust roots.
    pub ca_pem: PathBuf,
    /// Server certificate path (PEM).
    pub server_cert: PathBuf,
    /// Server private key path (PEM).
    pub server_key: PathBuf,
}

/// Generates a throwaway CA plus a server certificate for localhost.
///
/// # Errors
///
/// Returns an error when certificate generation or file writes fail.
pub fn generate_tls_fixtures() -> Result<GeneratedTls, Box<dyn std::error::Error>> {
    let tempdir = tempfile::Builder::new().prefix("rb-tls").tempdir()?;

    let ca_key = KeyPair::generate()?;
    let mut ca_params = CertificateParams::default();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    ca_params.distinguished_name = distinguished_name("Roster Bridge Test CA");
    let ca_cert = ca_params.self_signed(&ca_key)?;
    let issuer = Issuer::new(ca_params, ca_key);

    let server_key = KeyPair::generate()?;
    let mut server_params =
        CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])?;
    server_params.distinguished_name = distinguished_name("Roster Bridge Test Server");
    server_params.is_ca = IsCa::NoCa;
    let server_cert = server_params.signed_by(&server_key, &issuer)?;

    let ca_pem = tempdir.path().join("ca.pem");
    let cert_path = tempdir.path().join("server.pem");
    let key_path = tempdir.path().join("server.key");
    fs::write(&ca_pem, ca_cert.pem())?;
    fs::write(&cert_path, server_cert.pem())?;
    fs::write(&key_path, server_key.serialize_pem())?;

    Ok(GeneratedTls {
        _tempdir: tempdir,
        ca_pem,
        server_cert: cert_path,
        server_key: key_path,
    })
}

/// Builds a distinguished name with the given common name.
fn distinguished_name(common_name: &str) -> DistinguishedName {
    let mut name = DistinguishedName::new();
    name.push(DnType::CommonName, common_name);
    name
}
