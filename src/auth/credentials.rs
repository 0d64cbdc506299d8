//! The persisted OAuth2 credential record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The refreshable authentication state persisted between process runs.
///
/// All fields default to empty/zero so that a partially written record still
/// loads. `expires_in` and `refresh_token_expires_in` are advisory only: the
/// session refreshes when the server rejects a token, not on a timer.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialSet {
    /// Short-lived bearer token
    pub access_token: String,
    /// Long-lived token used to mint new access tokens
    pub refresh_token: String,
    /// Token type, normally `Bearer`
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    /// Granted scope
    pub scope: String,
    /// Refresh token lifetime in seconds
    pub refresh_token_expires_in: i64,
}

/// Fields returned by the token endpoint.
///
/// Any field the endpoint leaves out is `None` and does not touch the
/// corresponding field of the existing [`CredentialSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialUpdate {
    /// New access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Rotated refresh token, if issued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Token type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Access token lifetime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    /// Granted scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Refresh token lifetime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_in: Option<i64>,
}

impl CredentialSet {
    /// Merge `update` onto this set. Present fields overwrite, absent ones
    /// keep their previous value.
    pub fn merge(&mut self, update: CredentialUpdate) {
        if let Some(v) = update.access_token {
            self.access_token = v;
        }
        if let Some(v) = update.refresh_token {
            self.refresh_token = v;
        }
        if let Some(v) = update.token_type {
            self.token_type = v;
        }
        if let Some(v) = update.expires_in {
            self.expires_in = v;
        }
        if let Some(v) = update.scope {
            self.scope = v;
        }
        if let Some(v) = update.refresh_token_expires_in {
            self.refresh_token_expires_in = v;
        }
    }

    /// Returns a copy of this set with `update` merged on top.
    pub fn merged(&self, update: CredentialUpdate) -> Self {
        let mut next = self.clone();
        next.merge(update);
        next
    }

    /// Whether a refresh exchange can be attempted with this set.
    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(token: &str) -> &'static str {
            if token.is_empty() {
                ""
            } else {
                "[REDACTED]"
            }
        }

        f.debug_struct("CredentialSet")
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("refresh_token_expires_in", &self.refresh_token_expires_in)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stored() -> CredentialSet {
        CredentialSet {
            access_token: "A1".into(),
            refresh_token: "R1".into(),
            token_type: "Bearer".into(),
            expires_in: 1800,
            scope: "PlaceTrades AccountAccess MoveMoney".into(),
            refresh_token_expires_in: 7_776_000,
        }
    }

    #[test]
    fn test_default_is_empty() {
        let set = CredentialSet::default();
        assert!(set.access_token.is_empty());
        assert_eq!(set.expires_in, 0);
        assert!(!set.can_refresh());
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let update: CredentialUpdate =
            serde_json::from_str(r#"{"access_token": "A2", "token_type": "Bearer"}"#).unwrap();

        let merged = stored().merged(update);

        assert_eq!(merged.access_token, "A2");
        assert_eq!(merged.refresh_token, "R1");
        assert_eq!(merged.token_type, "Bearer");
        assert_eq!(merged.expires_in, 1800);
        assert_eq!(merged.scope, "PlaceTrades AccountAccess MoveMoney");
    }

    #[test]
    fn test_merge_overwrites_present_fields() {
        let update = CredentialUpdate {
            access_token: Some("A2".into()),
            refresh_token: Some("R2".into()),
            expires_in: Some(60),
            ..Default::default()
        };

        let merged = stored().merged(update);
        assert_eq!(merged.refresh_token, "R2");
        assert_eq!(merged.expires_in, 60);
        assert_eq!(merged.refresh_token_expires_in, 7_776_000);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let update = CredentialUpdate {
            access_token: Some("A2".into()),
            scope: Some("AccountAccess".into()),
            ..Default::default()
        };

        let once = stored().merged(update.clone());
        let twice = once.merged(update);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_partial_record_loads_with_defaults() {
        let set: CredentialSet = serde_json::from_str(r#"{"refresh_token": "R1"}"#).unwrap();
        assert_eq!(set.refresh_token, "R1");
        assert_eq!(set.access_token, "");
        assert_eq!(set.refresh_token_expires_in, 0);
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let debug_str = format!("{:?}", stored());
        assert!(!debug_str.contains("A1"));
        assert!(!debug_str.contains("R1"));
        assert!(debug_str.contains("REDACTED"));
    }
}
