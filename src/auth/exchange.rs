//! Token endpoint payloads.

use serde::Serialize;

/// OAuth2 grant type sent to the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Mint a new access token from a refresh token
    RefreshToken,
}

/// Form payload for `POST /v1/oauth2/token`.
///
/// Fields that are `None` are dropped from the encoded body entirely. The
/// endpoint treats a present-but-empty field differently from an absent one.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    /// Grant type
    pub grant_type: GrantType,
    /// Refresh token, for [`GrantType::RefreshToken`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// `offline` to also receive a new refresh token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_type: Option<String>,
    /// Authorization code; unused by refresh grants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Client (consumer) identifier
    pub client_id: String,
    /// Redirect URI registered for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

impl TokenRequest {
    /// A refresh-token grant with every optional field omitted.
    pub fn refresh(refresh_token: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            grant_type: GrantType::RefreshToken,
            refresh_token: Some(refresh_token.into()),
            access_type: None,
            code: None,
            client_id: client_id.into(),
            redirect_uri: None,
        }
    }
}
