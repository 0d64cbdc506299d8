//! Error types for the TD Ameritrade API client.
//!
//! Every failure path in this crate ends up in [`Error`]. Variants carry the
//! context needed to diagnose a failure without re-running the request: the
//! attempted method and URL, the HTTP status, the response body, or the
//! credential file path.

use std::fmt;
use std::path::PathBuf;

use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for TD Ameritrade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all TD Ameritrade API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No credential file exists at the configured path, or the stored set
    /// has no refresh token. Requires out-of-band re-authorization.
    #[error("credentials not found at {}", path.display())]
    CredentialsNotFound {
        /// Path that was searched
        path: PathBuf,
    },

    /// The credential file exists but is not a valid credential record.
    #[error("credential file {} is not valid JSON: {source}", path.display())]
    CredentialsCorrupt {
        /// Path of the credential file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Reading the credential file failed for a reason other than absence.
    #[error("failed to read credentials from {}: {source}", path.display())]
    CredentialStorage {
        /// Path of the credential file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Connection error, timeout or body read failure.
    #[error("transport error during {method} {url}: {source}")]
    Transport {
        /// HTTP method of the failed request
        method: Method,
        /// URL of the failed request
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The token endpoint rejected the refresh exchange.
    #[error("token exchange failed with status {status}: {body}")]
    AuthExchangeFailed {
        /// HTTP status code returned by the token endpoint
        status: u16,
        /// Raw response body
        body: String,
    },

    /// A refreshed credential set could not be written to storage.
    ///
    /// The in-memory session already uses the new token; a restart would
    /// lose it.
    #[error("failed to persist credentials to {}: {source}", path.display())]
    Persist {
        /// Path of the credential file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A non-auth endpoint answered with a non-2xx status.
    #[error("unexpected status {status} from {method} {url}: {body}")]
    UnexpectedStatus {
        /// HTTP method of the request
        method: Method,
        /// URL of the request
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body, parsed when possible
        body: ResponseBody,
    },

    /// A 2xx response body did not match the expected model.
    #[error("failed to decode response from {method} {url} (status {status}): {source}; body: {body}")]
    Decode {
        /// HTTP method of the request
        method: Method,
        /// URL of the request
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body, parsed when possible
        body: ResponseBody,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Serializing an outgoing payload failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Body of an unexpected response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The body parsed as JSON.
    Json(Value),
    /// The body was not JSON; kept verbatim.
    Text(String),
}

impl ResponseBody {
    /// Classify raw response text.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }

    /// The vendor error message, if the body carries one.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(value) => value.get("error").and_then(|e| e.as_str()),
            ResponseBody::Text(_) => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{}", value),
            ResponseBody::Text(text) => write!(f, "{}", text),
        }
    }
}

impl Error {
    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Returns `true` if recovering from this error requires a new
    /// out-of-band authorization.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::CredentialsNotFound { .. } | Error::AuthExchangeFailed { .. }
        )
    }

    /// The HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::AuthExchangeFailed { status, .. }
            | Error::UnexpectedStatus { status, .. }
            | Error::Decode { status, .. } => Some(*status),
            Error::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn decode(
        method: &Method,
        url: &str,
        status: u16,
        text: String,
        source: serde_json::Error,
    ) -> Self {
        Error::Decode {
            method: method.clone(),
            url: url.to_string(),
            status,
            body: ResponseBody::from_text(text),
            source,
        }
    }

    pub(crate) fn transport(method: &Method, url: &str, source: reqwest::Error) -> Self {
        Error::Transport {
            method: method.clone(),
            url: url.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_body_classification() {
        let body = ResponseBody::from_text(r#"{"error":"Symbol not found"}"#.to_string());
        assert_eq!(body.error_message(), Some("Symbol not found"));

        let body = ResponseBody::from_text("<html>Bad Gateway</html>".to_string());
        assert_eq!(body, ResponseBody::Text("<html>Bad Gateway</html>".to_string()));
        assert_eq!(body.error_message(), None);
    }

    #[test]
    fn test_error_auth() {
        assert!(Error::CredentialsNotFound {
            path: PathBuf::from("creds.json")
        }
        .is_auth_error());
        assert!(Error::AuthExchangeFailed {
            status: 400,
            body: "invalid_grant".into()
        }
        .is_auth_error());
        assert!(!Error::InvalidInput("bad".into()).is_auth_error());
    }

    #[test]
    fn test_unexpected_status_display() {
        let err = Error::UnexpectedStatus {
            method: Method::GET,
            url: "https://api.tdameritrade.com/v1/marketdata/quotes".into(),
            status: 400,
            body: ResponseBody::Text("bad request".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("GET https://api.tdameritrade.com/v1/marketdata/quotes"));
        assert!(msg.contains("bad request"));
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_decode_error_keeps_request_context() {
        let source = serde_json::from_str::<Value>("<html>maintenance</html>").unwrap_err();
        let err = Error::decode(
            &Method::POST,
            "https://api.tdameritrade.com/v1/oauth2/token",
            200,
            "<html>maintenance</html>".into(),
            source,
        );

        let msg = err.to_string();
        assert!(msg.contains("POST https://api.tdameritrade.com/v1/oauth2/token"));
        assert!(msg.contains("<html>maintenance</html>"));
        assert_eq!(err.status(), Some(200));
        assert!(std::error::Error::source(&err).is_some());
    }
}
