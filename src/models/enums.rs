//! Enumeration types for the TD Ameritrade API.
//!
//! Query parameter constants for option chains, price history and market
//! hours, plus the enums that appear in response bodies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Contract type filter for option chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractType {
    /// Calls only
    Call,
    /// Puts only
    Put,
    /// Calls and puts
    #[default]
    All,
}

/// Option chain strategy.
///
/// Anything other than `Single` returns strategy chains instead of single
/// contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strategy {
    /// Single contracts
    #[default]
    Single,
    /// Single contracts priced with caller-supplied model inputs
    Analytical,
    /// Covered spreads
    Covered,
    /// Vertical spreads
    Vertical,
    /// Calendar spreads
    Calendar,
    /// Strangle spreads
    Strangle,
    /// Straddle spreads
    Straddle,
    /// Butterfly spreads
    Butterfly,
    /// Condor spreads
    Condor,
    /// Diagonal spreads
    Diagonal,
    /// Collar spreads
    Collar,
    /// Roll spreads
    Roll,
}

/// Moneyness filter for option chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrikeRange {
    /// In the money
    Itm,
    /// Near the money
    Ntm,
    /// Out of the money
    Otm,
    /// Strikes above market
    Sak,
    /// Strikes below market
    Sbk,
    /// Strikes near market
    Snk,
    /// All strikes
    #[default]
    All,
}

/// Standard/non-standard contract filter for option chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OptionTypeFilter {
    /// Standard contracts
    #[serde(rename = "S")]
    Standard,
    /// Non-standard contracts
    #[serde(rename = "NS")]
    NonStandard,
    /// All contracts
    #[serde(rename = "ALL")]
    #[default]
    All,
}

/// Put or call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PutCall {
    /// Put option
    Put,
    /// Call option
    Call,
}

/// Exchange code reported for quotes and underlyings.
///
/// Codes this crate does not know are kept verbatim in `Other`, so a value
/// serializes back to the code it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExchangeName {
    /// Index
    Ind,
    /// NYSE American
    Ase,
    /// NYSE
    Nys,
    /// Nasdaq
    Nas,
    /// Nasdaq Capital Market
    Nap,
    /// NYSE Arca
    Pac,
    /// OPRA
    Opr,
    /// Cboe BZX
    Bats,
    /// Exchange not known to this crate, with its raw code
    Other(String),
}

impl ExchangeName {
    /// Wire code of the exchange.
    pub fn as_str(&self) -> &str {
        match self {
            ExchangeName::Ind => "IND",
            ExchangeName::Ase => "ASE",
            ExchangeName::Nys => "NYS",
            ExchangeName::Nas => "NAS",
            ExchangeName::Nap => "NAP",
            ExchangeName::Pac => "PAC",
            ExchangeName::Opr => "OPR",
            ExchangeName::Bats => "BATS",
            ExchangeName::Other(code) => code,
        }
    }
}

impl From<String> for ExchangeName {
    fn from(code: String) -> Self {
        match code.as_str() {
            "IND" => ExchangeName::Ind,
            "ASE" => ExchangeName::Ase,
            "NYS" => ExchangeName::Nys,
            "NAS" => ExchangeName::Nas,
            "NAP" => ExchangeName::Nap,
            "PAC" => ExchangeName::Pac,
            "OPR" => ExchangeName::Opr,
            "BATS" => ExchangeName::Bats,
            _ => ExchangeName::Other(code),
        }
    }
}

impl From<ExchangeName> for String {
    fn from(exchange: ExchangeName) -> Self {
        match exchange {
            ExchangeName::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ExchangeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candle frequency unit for price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyType {
    /// Minute candles
    Minute,
    /// Daily candles
    Daily,
    /// Weekly candles
    Weekly,
    /// Monthly candles
    Monthly,
}

impl FrequencyType {
    /// All valid frequency types.
    pub const ALL: [FrequencyType; 4] = [
        FrequencyType::Minute,
        FrequencyType::Daily,
        FrequencyType::Weekly,
        FrequencyType::Monthly,
    ];

    /// Wire name of the frequency type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyType::Minute => "minute",
            FrequencyType::Daily => "daily",
            FrequencyType::Weekly => "weekly",
            FrequencyType::Monthly => "monthly",
        }
    }
}

impl fmt::Display for FrequencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrequencyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrequencyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = FrequencyType::ALL.iter().map(|t| t.as_str()).collect();
                Error::InvalidInput(format!(
                    "Frequency type: {} not valid. Must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Period unit for price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Days
    Day,
    /// Months
    Month,
    /// Years
    Year,
    /// Year to date
    Ytd,
}

/// Market for market hours lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    /// Equities
    Equity,
    /// Options
    Option,
    /// Futures
    Future,
    /// Bonds
    Bond,
    /// Foreign exchange
    Forex,
}

impl Market {
    /// Path segment used by the market hours endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Equity => "EQUITY",
            Market::Option => "OPTION",
            Market::Future => "FUTURE",
            Market::Bond => "BOND",
            Market::Forex => "FOREX",
        }
    }
}

/// Optional sections of an account response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountField {
    /// Include positions
    Positions,
    /// Include working and filled orders
    Orders,
}

impl AccountField {
    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountField::Positions => "positions",
            AccountField::Orders => "orders",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_constants_serialize_to_wire_names() {
        assert_eq!(serde_json::to_value(ContractType::Call).unwrap(), "CALL");
        assert_eq!(serde_json::to_value(Strategy::Butterfly).unwrap(), "BUTTERFLY");
        assert_eq!(serde_json::to_value(StrikeRange::Ntm).unwrap(), "NTM");
        assert_eq!(serde_json::to_value(OptionTypeFilter::NonStandard).unwrap(), "NS");
        assert_eq!(serde_json::to_value(PeriodType::Ytd).unwrap(), "ytd");
    }

    #[test]
    fn test_unknown_exchange_keeps_code() {
        let exchange: ExchangeName = serde_json::from_str("\"NYS\"").unwrap();
        assert_eq!(exchange, ExchangeName::Nys);

        let exchange: ExchangeName = serde_json::from_str("\"CBO\"").unwrap();
        assert_eq!(exchange, ExchangeName::Other("CBO".to_string()));
    }

    #[test]
    fn test_exchange_serializes_to_code_it_was_read_from() {
        for code in ["\"NAS\"", "\"CBO\""] {
            let exchange: ExchangeName = serde_json::from_str(code).unwrap();
            assert_eq!(serde_json::to_string(&exchange).unwrap(), code);
        }
    }

    #[test]
    fn test_frequency_type_from_str() {
        assert_eq!("weekly".parse::<FrequencyType>().unwrap(), FrequencyType::Weekly);

        let err = "hourly".parse::<FrequencyType>().unwrap_err();
        assert!(err
            .to_string()
            .contains("Must be one of: minute, daily, weekly, monthly"));
    }
}
