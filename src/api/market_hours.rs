//! Market hours service.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::auth::RequestOptions;
use crate::client::ClientInner;
use crate::models::{Market, MarketHours};
use crate::util::naive_to_short_date;
use crate::Result;

/// Service for market hours lookups.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use tdameritrade_rs::models::Market;
///
/// # async fn example(client: tdameritrade_rs::TdClient) -> tdameritrade_rs::Result<()> {
/// let date = NaiveDate::from_ymd_opt(2021, 6, 7).unwrap();
/// let hours = client.market_hours().get(Market::Equity, date).await?;
/// if let Some(eq) = hours.product("EQ") {
///     println!("Equity market open: {}", eq.is_open);
/// }
/// # Ok(())
/// # }
/// ```
pub struct MarketHoursService {
    inner: Arc<ClientInner>,
}

impl MarketHoursService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the trading hours of `market` on `date`.
    pub async fn get(&self, market: Market, date: NaiveDate) -> Result<MarketHours> {
        let options = RequestOptions::new().query("date", naive_to_short_date(date));
        let path = format!("/v1/marketdata/{}/hours", market.as_str());
        self.inner.get(&path, &options).await
    }
}
