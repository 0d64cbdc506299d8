//! Accounts service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{AccountField, AccountId, AccountResponse, SecuritiesAccount};
use crate::{auth::RequestOptions, Error, Result};

/// Service for account-related operations.
///
/// # Example
///
/// ```no_run
/// use tdameritrade_rs::models::AccountField;
///
/// # async fn example(client: tdameritrade_rs::TdClient) -> tdameritrade_rs::Result<()> {
/// let account = client.accounts().get(&[AccountField::Positions]).await?;
/// for position in &account.positions {
///     println!("{}: {}", position.instrument.symbol, position.net_quantity());
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the configured account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no account id is configured.
    pub async fn get(&self, fields: &[AccountField]) -> Result<SecuritiesAccount> {
        let account_id = self
            .inner
            .config
            .account_id
            .clone()
            .ok_or_else(|| Error::Config("account id is required".to_string()))?;
        self.get_account(&account_id, fields).await
    }

    /// Get a specific account.
    ///
    /// # Arguments
    ///
    /// * `account_id` - The account to retrieve
    /// * `fields` - Optional sections to include (positions, orders)
    pub async fn get_account(
        &self,
        account_id: &AccountId,
        fields: &[AccountField],
    ) -> Result<SecuritiesAccount> {
        let mut options = RequestOptions::new();
        if !fields.is_empty() {
            let fields: Vec<_> = fields.iter().map(|f| f.as_str()).collect();
            options = options.query("fields", fields.join(","));
        }

        let path = format!("/v1/accounts/{}", urlencoding::encode(account_id.as_str()));
        let response: AccountResponse = self.inner.get(&path, &options).await?;
        Ok(response.securities_account)
    }
}
