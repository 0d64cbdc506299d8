//! Quote models.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::ExchangeName;

/// Snapshot quote for a single symbol.
///
/// The quote endpoint returns different fields per asset type; the common
/// ones are typed and the remainder is kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Trading symbol
    pub symbol: String,
    /// Asset type (`EQUITY`, `ETF`, `OPTION`, `INDEX`, ...)
    #[serde(default)]
    pub asset_type: Option<String>,
    /// Instrument description
    #[serde(default)]
    pub description: Option<String>,
    /// Best bid price
    #[serde(default)]
    pub bid_price: Option<Decimal>,
    /// Best bid size
    #[serde(default)]
    pub bid_size: Option<i64>,
    /// Best ask price
    #[serde(default)]
    pub ask_price: Option<Decimal>,
    /// Best ask size
    #[serde(default)]
    pub ask_size: Option<i64>,
    /// Last trade price
    #[serde(default)]
    pub last_price: Option<Decimal>,
    /// Last trade size
    #[serde(default)]
    pub last_size: Option<i64>,
    /// Session open
    #[serde(default)]
    pub open_price: Option<Decimal>,
    /// Session high
    #[serde(default)]
    pub high_price: Option<Decimal>,
    /// Session low
    #[serde(default)]
    pub low_price: Option<Decimal>,
    /// Previous close
    #[serde(default)]
    pub close_price: Option<Decimal>,
    /// Net change from previous close
    #[serde(default)]
    pub net_change: Option<Decimal>,
    /// Mark price
    #[serde(default)]
    pub mark: Option<Decimal>,
    /// Volume for the session
    #[serde(default)]
    pub total_volume: Option<i64>,
    /// Quote time in epoch milliseconds
    #[serde(default)]
    pub quote_time_in_long: Option<i64>,
    /// Trade time in epoch milliseconds
    #[serde(default)]
    pub trade_time_in_long: Option<i64>,
    /// Listing exchange
    #[serde(default)]
    pub exchange_name: Option<ExchangeName>,
    /// 52-week high
    #[serde(default, rename = "52WkHigh")]
    pub week_52_high: Option<Decimal>,
    /// 52-week low
    #[serde(default, rename = "52WkLow")]
    pub week_52_low: Option<Decimal>,
    /// Whether the quote is delayed
    #[serde(default)]
    pub delayed: bool,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Quote {
    /// Midpoint of bid and ask, if both are present.
    pub fn mid(&self) -> Option<Decimal> {
        match (self.bid_price, self.ask_price) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }
}
