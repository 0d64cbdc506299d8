//! HTTP client implementation for the TD Ameritrade API.

use std::sync::Arc;

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::{
    AccountsService, MarketHoursService, OptionChainsService, PriceHistoryService, QuotesService,
};
use crate::auth::{AuthenticatedSession, CredentialStore, RequestOptions};
use crate::error::ResponseBody;
use crate::{Error, Result};

use super::config::{endpoint_url, ClientConfig, UserConfig};

/// The main client for interacting with the TD Ameritrade API.
///
/// The client is cheap to clone; clones share one [`AuthenticatedSession`],
/// so a token refreshed through one clone is used by all of them.
///
/// # Example
///
/// ```no_run
/// use tdameritrade_rs::{TdClient, ClientConfig};
///
/// # async fn example() -> tdameritrade_rs::Result<()> {
/// let client = TdClient::new(
///     ClientConfig::default()
///         .with_consumer_key("MYAPPKEY")
///         .with_credentials_path("td_credentials.json"),
/// )?;
///
/// let quotes = client.quotes().get_many(&["GME", "AAPL"]).await?;
/// # Ok(())
/// # }
/// ```
pub struct TdClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) session: AuthenticatedSession,
    pub(crate) config: ClientConfig,
    pub(crate) base_url: Url,
}

impl TdClient {
    /// Create a client from `config`, loading the persisted credential set.
    ///
    /// No network call is made.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no consumer key is configured
    /// - [`Error::CredentialsNotFound`] if the credential file does not exist
    pub fn new(config: ClientConfig) -> Result<Self> {
        let consumer_key = config
            .consumer_key
            .clone()
            .ok_or_else(|| Error::Config("consumer key is required".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        let session = AuthenticatedSession::new(
            http,
            CredentialStore::new(&config.credentials_path),
            consumer_key,
            config.token_url()?,
        )?;

        Self::with_session(session, config)
    }

    /// Create a client from `TDAPI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_user_config(UserConfig::from_env()?))
    }

    /// Create a client around an existing session.
    pub fn with_session(session: AuthenticatedSession, config: ClientConfig) -> Result<Self> {
        let base_url = config.parsed_base_url()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                session,
                config,
                base_url,
            }),
        })
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the quotes service.
    pub fn quotes(&self) -> QuotesService {
        QuotesService::new(self.inner.clone())
    }

    /// Get the price history service.
    pub fn price_history(&self) -> PriceHistoryService {
        PriceHistoryService::new(self.inner.clone())
    }

    /// Get the option chains service.
    pub fn option_chains(&self) -> OptionChainsService {
        OptionChainsService::new(self.inner.clone())
    }

    /// Get the market hours service.
    pub fn market_hours(&self) -> MarketHoursService {
        MarketHoursService::new(self.inner.clone())
    }

    /// Send an authenticated request to `path` (relative to the base URL).
    ///
    /// The raw response is returned without status validation, for
    /// endpoints that have no service wrapper.
    pub async fn send(&self, method: Method, path: &str, options: &RequestOptions) -> Result<Response> {
        let url = self.inner.url(path)?;
        self.inner.session.send(method, url.as_str(), options).await
    }

    /// Manually refresh the access token.
    pub async fn refresh_session(&self) -> Result<()> {
        self.inner.session.refresh().await
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &AuthenticatedSession {
        &self.inner.session
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// Resolve an API path against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        endpoint_url(&self.base_url, path)
    }

    /// Make a GET request and decode a 2xx JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        let url = self.url(path)?;
        debug!(url = %url, "GET");

        let response = self.session.send(Method::GET, url.as_str(), options).await?;
        self.handle_response(Method::GET, url.as_str(), response).await
    }

    /// Handle an API response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(&method, url, e))?;

        if status.is_success() {
            serde_json::from_str(&text)
                .map_err(|e| Error::decode(&method, url, status.as_u16(), text, e))
        } else {
            Err(Error::UnexpectedStatus {
                method,
                url: url.to_string(),
                status: status.as_u16(),
                body: ResponseBody::from_text(text),
            })
        }
    }
}

impl Clone for TdClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for TdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TdClient")
            .field("config", &self.inner.config)
            .field("session", &self.inner.session)
            .finish()
    }
}
