//! Price history models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single OHLCV candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open price
    pub open: Decimal,
    /// High price
    pub high: Decimal,
    /// Low price
    pub low: Decimal,
    /// Close price
    pub close: Decimal,
    /// Volume
    pub volume: i64,
    /// Candle start time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub datetime: DateTime<Utc>,
}

/// Response of the price history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Candles in chronological order
    #[serde(default)]
    pub candles: Vec<Candle>,
    /// Requested symbol
    #[serde(default)]
    pub symbol: String,
    /// `true` when no candles matched the request
    #[serde(default)]
    pub empty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_history_deserializes() {
        let history: PriceHistory = serde_json::from_str(
            r#"{
                "candles": [
                    {"open": 250.0, "high": 251.5, "low": 249.25, "close": 251.0,
                     "volume": 1200, "datetime": 1623070800000}
                ],
                "symbol": "GME",
                "empty": false
            }"#,
        )
        .unwrap();

        assert_eq!(history.symbol, "GME");
        let candle = &history.candles[0];
        assert_eq!(candle.low, dec!(249.25));
        assert_eq!(
            candle.datetime,
            Utc.with_ymd_and_hms(2021, 6, 7, 13, 0, 0).unwrap()
        );
    }
}
