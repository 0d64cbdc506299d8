//! Account models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope of the account endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccountResponse {
    pub securities_account: SecuritiesAccount,
}

/// A brokerage account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritiesAccount {
    /// Account type (`CASH` or `MARGIN`)
    #[serde(rename = "type")]
    pub account_type: String,
    /// Account id
    pub account_id: String,
    /// Number of day-trade round trips
    #[serde(default)]
    pub round_trips: i64,
    /// Pattern day trader flag
    #[serde(default)]
    pub is_day_trader: bool,
    /// Closing-only restriction flag
    #[serde(default)]
    pub is_closing_only_restricted: bool,
    /// Positions, when requested with `AccountField::Positions`
    #[serde(default)]
    pub positions: Vec<Position>,
    /// Orders, when requested with `AccountField::Orders`
    #[serde(default)]
    pub order_strategies: Vec<Value>,
    /// Balances at the start of the day
    #[serde(default)]
    pub initial_balances: Option<Value>,
    /// Current balances
    #[serde(default)]
    pub current_balances: Option<Value>,
    /// Projected balances
    #[serde(default)]
    pub projected_balances: Option<Value>,
}

/// A held position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Instrument held
    pub instrument: PositionInstrument,
    /// Long quantity
    #[serde(default)]
    pub long_quantity: Decimal,
    /// Short quantity
    #[serde(default)]
    pub short_quantity: Decimal,
    /// Average cost
    #[serde(default)]
    pub average_price: Option<Decimal>,
    /// Current market value
    #[serde(default)]
    pub market_value: Option<Decimal>,
    /// Today's profit/loss
    #[serde(default)]
    pub current_day_profit_loss: Option<Decimal>,
}

impl Position {
    /// Long minus short quantity.
    pub fn net_quantity(&self) -> Decimal {
        self.long_quantity - self.short_quantity
    }
}

/// Instrument of a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionInstrument {
    /// Asset type
    pub asset_type: String,
    /// Symbol
    pub symbol: String,
    /// CUSIP
    #[serde(default)]
    pub cusip: Option<String>,
    /// Put or call, for options
    #[serde(default)]
    pub put_call: Option<super::enums::PutCall>,
    /// Underlying symbol, for options
    #[serde(default)]
    pub underlying_symbol: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_with_positions_deserializes() {
        let response: AccountResponse = serde_json::from_value(serde_json::json!({
            "securitiesAccount": {
                "type": "MARGIN",
                "accountId": "123456789",
                "roundTrips": 0,
                "isDayTrader": false,
                "isClosingOnlyRestricted": false,
                "positions": [{
                    "shortQuantity": 0.0,
                    "averagePrice": 180.25,
                    "longQuantity": 10.0,
                    "instrument": {"assetType": "EQUITY", "cusip": "36467W109", "symbol": "GME"},
                    "marketValue": 2015.0
                }],
                "currentBalances": {"liquidationValue": 10000.0}
            }
        }))
        .unwrap();

        let account = response.securities_account;
        assert_eq!(account.account_type, "MARGIN");
        assert_eq!(account.positions[0].instrument.symbol, "GME");
        assert_eq!(account.positions[0].net_quantity(), dec!(10));
        assert!(account.order_strategies.is_empty());
    }
}
