//! Self-refreshing authenticated HTTP session.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use url::Url;

use super::credentials::{CredentialSet, CredentialUpdate};
use super::exchange::TokenRequest;
use super::store::CredentialStore;
use crate::{Error, Result};

/// Authenticated session for the TD Ameritrade API.
///
/// The session owns the current [`CredentialSet`], attaches it as a bearer
/// header to every request, and when the server answers `401 Unauthorized`
/// it exchanges the refresh token for a new access token, persists the
/// merged set and resends the original request once.
///
/// # Thread Safety
///
/// `AuthenticatedSession` is `Send + Sync`. Refreshes are serialized behind
/// an internal mutex, so concurrent callers that hit a 401 together trigger
/// a single token exchange.
pub struct AuthenticatedSession {
    http: reqwest::Client,
    store: CredentialStore,
    client_id: String,
    token_url: Url,
    state: RwLock<SessionState>,
    refresh_lock: Mutex<()>,
}

struct SessionState {
    credentials: CredentialSet,
    bearer: SecretString,
    // Bumped on every installed credential set.
    generation: u64,
}

impl SessionState {
    fn install(&mut self, credentials: CredentialSet) {
        self.bearer = SecretString::from(credentials.access_token.clone());
        self.credentials = credentials;
        self.generation += 1;
    }
}

/// Per-request options for [`AuthenticatedSession::send`].
///
/// Options are kept by value so that the resend after a refresh is the
/// original request exactly.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<RequestBody>,
}

#[derive(Debug, Clone)]
enum RequestBody {
    Json(Value),
    Form(Vec<(String, String)>),
}

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append query parameters from any serializable value.
    ///
    /// `None` fields are dropped when the value skips them during
    /// serialization.
    pub fn query_from<Q: Serialize>(mut self, query: &Q) -> Result<Self> {
        let value = serde_json::to_value(query)?;
        let Value::Object(map) = value else {
            return Err(Error::InvalidInput(
                "query parameters must serialize to an object".to_string(),
            ));
        };
        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::String(s) => self.query.push((key, s)),
                other => self.query.push((key, other.to_string())),
            }
        }
        Ok(self)
    }

    /// Set a request header.
    ///
    /// Supplying `Authorization` overrides the session's bearer token for
    /// this request.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Send `body` as JSON.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Send `pairs` as a form-encoded body.
    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(pairs));
        self
    }

    /// Query parameters collected so far.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    fn overrides_authorization(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }
}

impl AuthenticatedSession {
    /// Create a session from the credential set persisted in `store`.
    ///
    /// No network call is made. The stored access token is installed as the
    /// bearer header immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialsNotFound`] when the credential file does
    /// not exist. The first token pair has to be obtained out of band.
    pub fn new(
        http: reqwest::Client,
        store: CredentialStore,
        client_id: impl Into<String>,
        token_url: Url,
    ) -> Result<Self> {
        let credentials = match store.load()? {
            Some(credentials) => credentials,
            None => {
                tracing::error!(path = %store.path().display(), "credential file not found");
                return Err(Error::CredentialsNotFound {
                    path: store.path().to_path_buf(),
                });
            }
        };

        Ok(Self {
            http,
            store,
            client_id: client_id.into(),
            token_url,
            state: RwLock::new(SessionState {
                bearer: SecretString::from(credentials.access_token.clone()),
                credentials,
                generation: 0,
            }),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Send a request, refreshing the access token once on `401`.
    ///
    /// The response of the resend is returned whatever its status; there is
    /// no further retry. Transport failures are not retried. When `options`
    /// carries its own `Authorization` header the session token is neither
    /// attached nor refreshed.
    pub async fn send(&self, method: Method, url: &str, options: &RequestOptions) -> Result<Response> {
        let (response, generation) = self.attempt(&method, url, options).await?;

        if response.status() != StatusCode::UNAUTHORIZED || options.overrides_authorization() {
            return Ok(response);
        }

        debug!(%method, url, "received unauthorized status, reauthenticating");
        self.refresh_after(generation).await?;

        let (response, _) = self.attempt(&method, url, options).await?;
        Ok(response)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// On success the returned fields are merged into the current set, the
    /// bearer header is replaced and the set is persisted before returning.
    ///
    /// # Errors
    ///
    /// - [`Error::CredentialsNotFound`] if neither memory nor storage holds a
    ///   refresh token
    /// - [`Error::AuthExchangeFailed`] if the endpoint answers anything but 200
    /// - [`Error::Persist`] if the merged set could not be written; the
    ///   session keeps using the new token
    pub async fn refresh(&self) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;
        self.exchange_locked().await
    }

    /// A copy of the current credential set.
    pub async fn credentials(&self) -> CredentialSet {
        self.state.read().await.credentials.clone()
    }

    /// The backing credential store.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// The client identifier sent with refresh exchanges.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The token endpoint URL.
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    async fn refresh_after(&self, seen_generation: u64) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;

        if self.state.read().await.generation != seen_generation {
            debug!("access token already refreshed by a concurrent request");
            return Ok(());
        }

        self.exchange_locked().await
    }

    // Caller must hold `refresh_lock`.
    async fn exchange_locked(&self) -> Result<()> {
        debug!("authenticating session");

        let refresh_token = self.usable_refresh_token().await?;
        let request = TokenRequest::refresh(refresh_token, self.client_id.as_str());

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&request)
            .send()
            .await
            .map_err(|e| Error::transport(&Method::POST, self.token_url.as_str(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(&Method::POST, self.token_url.as_str(), e))?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "token exchange rejected");
            return Err(Error::AuthExchangeFailed {
                status: status.as_u16(),
                body,
            });
        }

        let update: CredentialUpdate = serde_json::from_str(&body).map_err(|e| {
            Error::decode(&Method::POST, self.token_url.as_str(), status.as_u16(), body, e)
        })?;

        let merged = {
            let mut state = self.state.write().await;
            let merged = state.credentials.merged(update);
            state.install(merged.clone());
            merged
        };

        if let Err(e) = self.store.save(&merged) {
            warn!(
                path = %self.store.path().display(),
                error = %e,
                "refreshed credentials could not be persisted"
            );
            return Err(e);
        }

        info!(expires_in = merged.expires_in, "access token refreshed");
        Ok(())
    }

    async fn usable_refresh_token(&self) -> Result<String> {
        {
            let state = self.state.read().await;
            if state.credentials.can_refresh() {
                return Ok(state.credentials.refresh_token.clone());
            }
        }

        debug!(path = %self.store.path().display(), "no refresh token in memory, reloading");
        let stored = self
            .store
            .load()?
            .filter(CredentialSet::can_refresh)
            .ok_or_else(|| Error::CredentialsNotFound {
                path: self.store.path().to_path_buf(),
            })?;

        let refresh_token = stored.refresh_token.clone();
        self.state.write().await.install(stored);
        Ok(refresh_token)
    }

    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        options: &RequestOptions,
    ) -> Result<(Response, u64)> {
        let mut builder = self.http.request(method.clone(), url);

        let generation = if options.overrides_authorization() {
            self.state.read().await.generation
        } else {
            let state = self.state.read().await;
            let mut value =
                HeaderValue::from_str(&format!("Bearer {}", state.bearer.expose_secret()))
                    .map_err(|_| {
                        Error::InvalidInput("access token is not a valid header value".to_string())
                    })?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
            state.generation
        };

        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        builder = builder.headers(options.headers.clone());
        builder = match &options.body {
            Some(RequestBody::Json(body)) => builder.json(body),
            Some(RequestBody::Form(pairs)) => builder.form(pairs),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(method, url, e))?;
        Ok((response, generation))
    }
}

impl std::fmt::Debug for AuthenticatedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedSession")
            .field("store", &self.store)
            .field("client_id", &self.client_id)
            .field("token_url", &self.token_url.as_str())
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(credentials: &CredentialSet) -> (tempfile::TempDir, AuthenticatedSession) {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("creds.json"));
        store.save(credentials).unwrap();

        let session = AuthenticatedSession::new(
            reqwest::Client::new(),
            store,
            "CLIENT",
            Url::parse("http://127.0.0.1:1/v1/oauth2/token").unwrap(),
        )
        .unwrap();
        (dir, session)
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let (_dir, session) = session_with(&CredentialSet {
            access_token: "super-secret-token".into(),
            refresh_token: "R1".into(),
            ..Default::default()
        });

        let debug_str = format!("{:?}", session);
        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }

    #[tokio::test]
    async fn test_loaded_credentials_are_installed() {
        let (_dir, session) = session_with(&CredentialSet {
            access_token: "A1".into(),
            refresh_token: "R1".into(),
            token_type: "Bearer".into(),
            ..Default::default()
        });

        let state = session.state.read().await;
        assert_eq!(state.bearer.expose_secret(), "A1");
        assert_eq!(state.credentials.refresh_token, "R1");
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn test_request_options_query_from_skips_nulls() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query {
            period_type: &'static str,
            period: Option<u32>,
            need_extended_hours_data: bool,
        }

        let options = RequestOptions::new()
            .query_from(&Query {
                period_type: "day",
                period: None,
                need_extended_hours_data: false,
            })
            .unwrap();

        let mut pairs = options.query_pairs().to_vec();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("needExtendedHoursData".to_string(), "false".to_string()),
                ("periodType".to_string(), "day".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_options_rejects_non_object_query() {
        let err = RequestOptions::new().query_from(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
