//! Option chains service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::auth::RequestOptions;
use crate::client::ClientInner;
use crate::models::{ContractType, OptionChain, OptionTypeFilter, Strategy, StrikeRange};
use crate::{Error, Result};

/// Query parameters for the option chain endpoint.
///
/// Build with [`OptionChainQuery::new`] and the `with_*`/field setters;
/// unset fields are left out of the request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChainQuery {
    /// Underlying symbol
    pub symbol: String,
    /// Calls, puts or both
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,
    /// Number of strikes above and below the at-the-money price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_count: Option<u32>,
    /// Include underlying quote
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_quotes: Option<bool>,
    /// Chain strategy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    /// Strike interval for spread strategies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
    /// Only this strike
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike: Option<f64>,
    /// Moneyness filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<StrikeRange>,
    /// Earliest expiration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    /// Latest expiration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    /// Volatility for analytical pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    /// Underlying price for analytical pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_price: Option<f64>,
    /// Interest rate for analytical pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    /// Days to expiration for analytical pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_expiration: Option<u32>,
    /// Expiration month (`JAN` ... `DEC`, or `ALL`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<String>,
    /// Standard/non-standard filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_type: Option<OptionTypeFilter>,
}

impl OptionChainQuery {
    /// Query for every contract of `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Limit to calls or puts.
    pub fn with_contract_type(mut self, contract_type: ContractType) -> Self {
        self.contract_type = Some(contract_type);
        self
    }

    /// Limit the number of strikes around the money.
    pub fn with_strike_count(mut self, strike_count: u32) -> Self {
        self.strike_count = Some(strike_count);
        self
    }

    /// Limit expirations to `from..=to`.
    pub fn with_expiration_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from_date = Some(from);
        self.to_date = Some(to);
        self
    }

    /// Set the chain strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the moneyness filter.
    pub fn with_range(mut self, range: StrikeRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Request the underlying quote.
    pub fn with_quotes(mut self, include: bool) -> Self {
        self.include_quotes = Some(include);
        self
    }
}

/// Service for option chain lookups.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use tdameritrade_rs::api::OptionChainQuery;
///
/// # async fn example(client: tdameritrade_rs::TdClient) -> tdameritrade_rs::Result<()> {
/// let expiry = NaiveDate::from_ymd_opt(2021, 7, 16).unwrap();
/// let chain = client
///     .option_chains()
///     .get(&OptionChainQuery::new("GME").with_strike_count(1).with_expiration_range(expiry, expiry))
///     .await?;
/// for contract in chain.contracts() {
///     println!("{} mark={:?}", contract.symbol, contract.mark_price);
/// }
/// # Ok(())
/// # }
/// ```
pub struct OptionChainsService {
    inner: Arc<ClientInner>,
}

impl OptionChainsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get an option chain.
    pub async fn get(&self, query: &OptionChainQuery) -> Result<OptionChain> {
        if query.symbol.is_empty() {
            return Err(Error::InvalidInput("Symbol is required".to_string()));
        }
        if let (Some(from), Some(to)) = (query.from_date, query.to_date) {
            if from > to {
                return Err(Error::InvalidInput(format!(
                    "fromDate {} is after toDate {}",
                    from, to
                )));
            }
        }

        let options = RequestOptions::new().query_from(query)?;
        self.inner.get("/v1/marketdata/chains", &options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_serializes_only_set_fields() {
        let day = NaiveDate::from_ymd_opt(2021, 7, 16).unwrap();
        let query = OptionChainQuery::new("GME")
            .with_strike_count(1)
            .with_expiration_range(day, day)
            .with_contract_type(ContractType::Call);

        let options = RequestOptions::new().query_from(&query).unwrap();
        let mut pairs = options.query_pairs().to_vec();
        pairs.sort();

        assert_eq!(
            pairs,
            vec![
                ("contractType".to_string(), "CALL".to_string()),
                ("fromDate".to_string(), "2021-07-16".to_string()),
                ("strikeCount".to_string(), "1".to_string()),
                ("symbol".to_string(), "GME".to_string()),
                ("toDate".to_string(), "2021-07-16".to_string()),
            ]
        );
    }
}
