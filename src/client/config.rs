//! Client configuration options.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::models::{AccountId, DEFAULT_BASE_URL};
use crate::{Error, Result};

/// Default credential file, relative to the working directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = "tdapi_credentials.json";

/// Environment variable holding the account id.
pub const ENV_ACCOUNT_ID: &str = "TDAPI_ACCOUNT_ID";
/// Environment variable holding the consumer key (OAuth client id).
pub const ENV_CONSUMER_KEY: &str = "TDAPI_CONSUMER_KEY";
/// Environment variable holding the registered redirect URI.
pub const ENV_REDIRECT_URI: &str = "TDAPI_REDIRECT_URI";
/// Environment variable overriding the credential file location.
pub const ENV_CREDENTIALS_PATH: &str = "TDAPI_CREDENTIALS_PATH";

/// Configuration for the TD Ameritrade client.
///
/// # Example
///
/// ```
/// use tdameritrade_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_consumer_key("MYAPPKEY")
///     .with_credentials_path("/var/lib/myapp/td.json");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// REST API base URL
    pub base_url: String,
    /// Location of the persisted credential set
    pub credentials_path: PathBuf,
    /// OAuth client id used for refresh exchanges
    pub consumer_key: Option<String>,
    /// Account used by account-scoped services
    pub account_id: Option<AccountId>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("tdameritrade-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            consumer_key: None,
            account_id: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from environment-derived user settings.
    pub fn from_user_config(user: UserConfig) -> Self {
        let mut config = Self::default()
            .with_consumer_key(user.consumer_key)
            .with_account_id(user.account_id);
        if let Some(path) = user.credentials_path {
            config = config.with_credentials_path(path);
        }
        config
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the credential file location.
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }

    /// Set the OAuth client id.
    pub fn with_consumer_key(mut self, consumer_key: impl Into<String>) -> Self {
        self.consumer_key = Some(consumer_key.into());
        self
    }

    /// Set the default account.
    pub fn with_account_id(mut self, account_id: impl Into<AccountId>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Parse the configured base URL.
    ///
    /// The returned URL always ends in `/`, so a path prefix such as
    /// `http://proxy/td` is kept when endpoints are joined onto it.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// URL of the OAuth2 token endpoint.
    pub fn token_url(&self) -> Result<Url> {
        endpoint_url(&self.parsed_base_url()?, "/v1/oauth2/token")
    }
}

/// Resolve an API path (`/v1/...`) under `base`, keeping any path prefix.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    Ok(base.join(path.trim_start_matches('/'))?)
}

/// Static client identity, normally loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserConfig {
    /// Brokerage account id
    pub account_id: AccountId,
    /// OAuth client id
    pub consumer_key: String,
    /// Redirect URI registered for the app. Only the out-of-band
    /// authorization-code flow needs it; refreshes do not send it.
    pub redirect_uri: Option<String>,
    /// Optional credential file override
    pub credentials_path: Option<PathBuf>,
}

impl UserConfig {
    /// Load from environment variables, honoring a `.env` file in the
    /// working directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing required variable
    /// (`TDAPI_ACCOUNT_ID`, `TDAPI_CONSUMER_KEY`).
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{} environment variable not found", key)))
        };

        Ok(Self {
            account_id: AccountId::new(required(ENV_ACCOUNT_ID)?),
            consumer_key: required(ENV_CONSUMER_KEY)?,
            redirect_uri: lookup(ENV_REDIRECT_URI).filter(|v| !v.trim().is_empty()),
            credentials_path: lookup(ENV_CREDENTIALS_PATH).map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.base_url, "https://api.tdameritrade.com");
        assert_eq!(config.credentials_path, PathBuf::from("tdapi_credentials.json"));
        assert!(config.consumer_key.is_none());
    }

    #[test]
    fn test_token_url() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080");
        assert_eq!(
            config.token_url().unwrap().as_str(),
            "http://127.0.0.1:8080/v1/oauth2/token"
        );

        let config = ClientConfig::default().with_base_url("http://proxy.local/td");
        assert_eq!(
            config.token_url().unwrap().as_str(),
            "http://proxy.local/td/v1/oauth2/token"
        );

        let config = ClientConfig::default().with_base_url("not a url");
        assert!(matches!(config.token_url(), Err(Error::UrlParse(_))));
    }

    #[test]
    fn test_user_config_from_lookup() {
        let user = UserConfig::from_lookup(lookup(&[
            (ENV_ACCOUNT_ID, "123456789"),
            (ENV_CONSUMER_KEY, "APPKEY"),
            (ENV_REDIRECT_URI, "https://localhost"),
        ]))
        .unwrap();

        assert_eq!(user.account_id.as_str(), "123456789");
        assert!(user.credentials_path.is_none());

        let config = ClientConfig::from_user_config(user);
        assert_eq!(config.consumer_key.as_deref(), Some("APPKEY"));
        assert_eq!(config.account_id, Some(AccountId::new("123456789")));
    }

    #[test]
    fn test_user_config_missing_variable() {
        let err = UserConfig::from_lookup(lookup(&[
            (ENV_ACCOUNT_ID, "123456789"),
            (ENV_REDIRECT_URI, "https://localhost"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains(ENV_CONSUMER_KEY));
    }

    #[test]
    fn test_user_config_redirect_uri_is_optional() {
        let user = UserConfig::from_lookup(lookup(&[
            (ENV_ACCOUNT_ID, "123456789"),
            (ENV_CONSUMER_KEY, "APPKEY"),
        ]))
        .unwrap();
        assert!(user.redirect_uri.is_none());

        let user = UserConfig::from_lookup(lookup(&[
            (ENV_ACCOUNT_ID, "123456789"),
            (ENV_CONSUMER_KEY, "APPKEY"),
            (ENV_REDIRECT_URI, "https://localhost"),
        ]))
        .unwrap();
        assert_eq!(user.redirect_uri.as_deref(), Some("https://localhost"));
    }
}
