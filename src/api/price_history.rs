//! Price history service for historical candles.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::RequestOptions;
use crate::client::ClientInner;
use crate::models::{Candle, FrequencyType, PeriodType, PriceHistory};
use crate::util::{parse_frequency, DateArg};
use crate::{Error, Result};

/// Raw query parameters for the price history endpoint.
///
/// Unset fields are left out of the request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryQuery {
    /// Period unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_type: Option<PeriodType>,
    /// Number of periods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    /// Candle unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_type: Option<FrequencyType>,
    /// Candle count per unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,
    /// End of range in epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
    /// Start of range in epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    /// Include pre/post-market candles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_extended_hours_data: Option<bool>,
}

impl PriceHistoryQuery {
    /// Query for `frequency` candles between `start` and `end`.
    ///
    /// Minute candles are requested with a `day` period type; every other
    /// frequency with a one-`year` period.
    pub fn for_range(
        frequency: &str,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
        include_extended_hours: bool,
    ) -> Result<Self> {
        let (count, frequency_type) = parse_frequency(frequency)?;
        let start_date = start.into().to_millis()?;
        let end_date = end.into().to_millis()?;
        if start_date > end_date {
            return Err(Error::InvalidInput(format!(
                "Start date {} is after end date {}",
                start_date, end_date
            )));
        }

        let (period_type, period) = match frequency_type {
            FrequencyType::Minute => (PeriodType::Day, None),
            _ => (PeriodType::Year, Some(1)),
        };

        Ok(Self {
            period_type: Some(period_type),
            period,
            frequency_type: Some(frequency_type),
            frequency: Some(count),
            end_date: Some(end_date),
            start_date: Some(start_date),
            need_extended_hours_data: Some(include_extended_hours),
        })
    }
}

/// Service for historical price data.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tdameritrade_rs::TdClient) -> tdameritrade_rs::Result<()> {
/// let candles = client
///     .price_history()
///     .candles("GME", "1minute", "2021-06-07", "2021-06-08", false)
///     .await?;
/// println!("{} candles", candles.len());
/// # Ok(())
/// # }
/// ```
pub struct PriceHistoryService {
    inner: Arc<ClientInner>,
}

impl PriceHistoryService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get price history with explicit query parameters.
    pub async fn query(&self, symbol: &str, query: &PriceHistoryQuery) -> Result<PriceHistory> {
        if symbol.is_empty() {
            return Err(Error::InvalidInput("Symbol is required".to_string()));
        }

        let options = RequestOptions::new().query_from(query)?;
        let path = format!("/v1/marketdata/{}/pricehistory", urlencoding::encode(symbol));
        self.inner.get(&path, &options).await
    }

    /// Get candles for `symbol` at `frequency` (`"5minute"`, `"daily"`, ...)
    /// between `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an unknown frequency unit or an
    /// unparseable date.
    pub async fn candles(
        &self,
        symbol: &str,
        frequency: &str,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
        include_extended_hours: bool,
    ) -> Result<Vec<Candle>> {
        let query = PriceHistoryQuery::for_range(frequency, start, end, include_extended_hours)?;
        Ok(self.query(symbol, &query).await?.candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_range_uses_day_period() {
        let query = PriceHistoryQuery::for_range("1minute", "2021-06-07", "2021-06-08", true).unwrap();

        assert_eq!(query.period_type, Some(PeriodType::Day));
        assert_eq!(query.period, None);
        assert_eq!(query.frequency, Some(1));
        assert_eq!(query.start_date, Some(1_623_024_000_000));
        assert_eq!(query.end_date, Some(1_623_110_400_000));

        let value = serde_json::to_value(&query).unwrap();
        assert!(value.get("period").is_none());
        assert_eq!(value["needExtendedHoursData"], true);
    }

    #[test]
    fn test_daily_range_uses_one_year_period() {
        let query = PriceHistoryQuery::for_range("daily", "2021-01-04", "2021-06-08", false).unwrap();

        assert_eq!(query.period_type, Some(PeriodType::Year));
        assert_eq!(query.period, Some(1));
        assert_eq!(query.frequency_type, Some(FrequencyType::Daily));
    }

    #[test]
    fn test_invalid_range_rejected() {
        assert!(PriceHistoryQuery::for_range("1hour", "2021-06-07", "2021-06-08", false).is_err());
        assert!(PriceHistoryQuery::for_range("daily", "2021-06-08", "2021-06-07", false).is_err());
    }
}
