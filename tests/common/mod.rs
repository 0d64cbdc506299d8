//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use url::Url;
use wiremock::MockServer;

use tdameritrade_rs::{AuthenticatedSession, ClientConfig, CredentialSet, CredentialStore, TdClient};

pub const CLIENT_ID: &str = "CLIENT";

static INIT: Once = Once::new();

/// Initialize logging for tests
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Credential set holding access token `A1` and refresh token `R1`.
pub fn initial_credentials() -> CredentialSet {
    CredentialSet {
        access_token: "A1".into(),
        refresh_token: "R1".into(),
        token_type: "Bearer".into(),
        expires_in: 1800,
        scope: "PlaceTrades AccountAccess MoveMoney".into(),
        refresh_token_expires_in: 7_776_000,
    }
}

/// Write `credentials` into a fresh temp dir and return the file path.
pub fn write_credentials(credentials: &CredentialSet) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tdapi_credentials.json");
    CredentialStore::new(&path).save(credentials).unwrap();
    (dir, path)
}

pub fn token_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/v1/oauth2/token", server.uri())).unwrap()
}

/// Session against `server` backed by a credential file at `path`.
pub fn session(server: &MockServer, path: &PathBuf) -> AuthenticatedSession {
    init_logging();
    AuthenticatedSession::new(
        reqwest::Client::new(),
        CredentialStore::new(path),
        CLIENT_ID,
        token_url(server),
    )
    .unwrap()
}

/// Client against `server` with account `123456789`.
pub fn client(server: &MockServer, path: &PathBuf) -> TdClient {
    init_logging();
    TdClient::new(
        ClientConfig::default()
            .with_base_url(server.uri())
            .with_consumer_key(CLIENT_ID)
            .with_account_id("123456789")
            .with_credentials_path(path),
    )
    .unwrap()
}
