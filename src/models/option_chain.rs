//! Option chain models.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::enums::{ExchangeName, PutCall, Strategy};

/// Helper to deserialize numbers that the API sometimes sends as `"NaN"`.
fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberValue {
        Float(f64),
        String(String),
        Null,
    }

    match NumberValue::deserialize(deserializer)? {
        NumberValue::Float(f) if f.is_finite() => Ok(Some(f)),
        NumberValue::Float(_) | NumberValue::Null => Ok(None),
        NumberValue::String(s) if s.eq_ignore_ascii_case("nan") => Ok(None),
        NumberValue::String(s) => s.parse::<f64>().map(Some).map_err(D::Error::custom),
    }
}

/// Expiration key (`"2021-07-16:3"`) to strike key (`"150.0"`) to contracts.
pub type ExpDateMap = BTreeMap<String, BTreeMap<String, Vec<OptionContract>>>;

/// An option chain for one underlying.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChain {
    /// Underlying symbol
    pub symbol: String,
    /// `SUCCESS` or `FAILED`
    pub status: String,
    /// Underlying quote, present when quotes were requested
    #[serde(default)]
    pub underlying: Option<Underlying>,
    /// Strategy the chain was built for
    #[serde(default)]
    pub strategy: Strategy,
    /// Strike interval for spread strategies
    #[serde(default)]
    pub interval: Option<f64>,
    /// Whether quotes are delayed
    #[serde(default)]
    pub is_delayed: bool,
    /// Whether the underlying is an index
    #[serde(default)]
    pub is_index: bool,
    /// Days to expiration used for analytical pricing
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub days_to_expiration: Option<f64>,
    /// Interest rate used for analytical pricing
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub interest_rate: Option<f64>,
    /// Underlying price
    #[serde(default)]
    pub underlying_price: Option<Decimal>,
    /// Volatility used for analytical pricing
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub volatility: Option<f64>,
    /// Call contracts by expiration and strike
    #[serde(default)]
    pub call_exp_date_map: ExpDateMap,
    /// Put contracts by expiration and strike
    #[serde(default)]
    pub put_exp_date_map: ExpDateMap,
}

impl OptionChain {
    /// Returns `true` if the API reported a successful lookup.
    pub fn is_success(&self) -> bool {
        self.status == "SUCCESS"
    }

    /// Iterate over every call and put contract in the chain.
    pub fn contracts(&self) -> impl Iterator<Item = &OptionContract> {
        self.call_exp_date_map
            .values()
            .chain(self.put_exp_date_map.values())
            .flat_map(|strikes| strikes.values())
            .flatten()
    }
}

/// Quote of the underlying instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Underlying {
    /// Symbol
    pub symbol: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Exchange
    #[serde(default)]
    pub exchange_name: Option<ExchangeName>,
    /// Best ask
    #[serde(default)]
    pub ask: Option<Decimal>,
    /// Ask size
    #[serde(default)]
    pub ask_size: Option<i64>,
    /// Best bid
    #[serde(default)]
    pub bid: Option<Decimal>,
    /// Bid size
    #[serde(default)]
    pub bid_size: Option<i64>,
    /// Last trade
    #[serde(default)]
    pub last: Option<Decimal>,
    /// Mark
    #[serde(default)]
    pub mark: Option<Decimal>,
    /// Net change
    #[serde(default)]
    pub change: Option<Decimal>,
    /// Percent change
    #[serde(default)]
    pub percent_change: Option<Decimal>,
    /// Mark change
    #[serde(default)]
    pub mark_change: Option<Decimal>,
    /// Mark percent change
    #[serde(default)]
    pub mark_percent_change: Option<Decimal>,
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
    pub close: Option<Decimal>,
    /// 52-week high
    #[serde(default)]
    pub fifty_two_week_high: Option<Decimal>,
    /// 52-week low
    #[serde(default)]
    pub fifty_two_week_low: Option<Decimal>,
    /// Session volume
    #[serde(default)]
    pub total_volume: Option<i64>,
    /// Quote time in epoch milliseconds
    #[serde(default)]
    pub quote_time: Option<i64>,
    /// Trade time in epoch milliseconds
    #[serde(default)]
    pub trade_time: Option<i64>,
    /// Whether the quote is delayed
    #[serde(default)]
    pub delayed: bool,
}

/// Deliverable of a non-standard contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDeliverable {
    /// Deliverable symbol
    pub symbol: String,
    /// Asset type
    pub asset_type: String,
    /// Units delivered per contract
    pub deliverable_units: String,
    /// Currency
    pub currency_type: String,
}

/// A single option contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    /// Put or call
    pub put_call: PutCall,
    /// Option symbol, e.g. `GME_071621C150`
    pub symbol: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Exchange
    #[serde(default)]
    pub exchange_name: String,
    /// Best bid
    #[serde(default, alias = "bid")]
    pub bid_price: Option<Decimal>,
    /// Best ask
    #[serde(default, alias = "ask")]
    pub ask_price: Option<Decimal>,
    /// Last trade
    #[serde(default, alias = "last")]
    pub last_price: Option<Decimal>,
    /// Mark
    #[serde(default, alias = "mark")]
    pub mark_price: Option<Decimal>,
    /// Bid size
    #[serde(default)]
    pub bid_size: Option<i64>,
    /// Ask size
    #[serde(default)]
    pub ask_size: Option<i64>,
    /// Last size
    #[serde(default)]
    pub last_size: Option<i64>,
    /// Session high
    #[serde(default)]
    pub high_price: Option<Decimal>,
    /// Session low
    #[serde(default)]
    pub low_price: Option<Decimal>,
    /// Session open
    #[serde(default)]
    pub open_price: Option<Decimal>,
    /// Previous close
    #[serde(default)]
    pub close_price: Option<Decimal>,
    /// Session volume
    #[serde(default)]
    pub total_volume: Option<i64>,
    /// Quote time in epoch milliseconds
    #[serde(default)]
    pub quote_time_in_long: Option<i64>,
    /// Trade time in epoch milliseconds
    #[serde(default)]
    pub trade_time_in_long: Option<i64>,
    /// Net change
    #[serde(default)]
    pub net_change: Option<Decimal>,
    /// Implied volatility
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub volatility: Option<f64>,
    /// Delta
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub delta: Option<f64>,
    /// Gamma
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub gamma: Option<f64>,
    /// Theta
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub theta: Option<f64>,
    /// Vega
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub vega: Option<f64>,
    /// Rho
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub rho: Option<f64>,
    /// Time value
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub time_value: Option<f64>,
    /// Open interest
    #[serde(default)]
    pub open_interest: Option<i64>,
    /// Whether the contract is in the money
    #[serde(default, alias = "inTheMoney")]
    pub is_in_the_money: Option<bool>,
    /// Theoretical value
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub theoretical_option_value: Option<f64>,
    /// Theoretical volatility
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub theoretical_volatility: Option<f64>,
    /// Mini contract
    #[serde(default, alias = "mini")]
    pub is_mini: Option<bool>,
    /// Non-standard contract
    #[serde(default, alias = "nonStandard")]
    pub is_non_standard: Option<bool>,
    /// Deliverables for non-standard contracts
    #[serde(default)]
    pub option_deliverables_list: Option<Vec<OptionDeliverable>>,
    /// Strike price
    pub strike_price: Decimal,
    /// Expiration in epoch milliseconds
    pub expiration_date: i64,
    /// Days to expiration
    #[serde(default)]
    pub days_to_expiration: Option<i64>,
    /// Expiration type (`R` regular, `S` quarterly, ...)
    #[serde(default)]
    pub expiration_type: Option<String>,
    /// Contract multiplier
    #[serde(default)]
    pub multiplier: Option<Decimal>,
    /// Settlement type
    #[serde(default)]
    pub settlement_type: Option<String>,
    /// Deliverable note
    #[serde(default)]
    pub deliverable_note: Option<String>,
    /// Whether the underlying is an index
    #[serde(default)]
    pub is_index_option: Option<bool>,
    /// Percent change
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub percent_change: Option<f64>,
    /// Mark change
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub mark_change: Option<f64>,
    /// Mark percent change
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub mark_percent_change: Option<f64>,
}
