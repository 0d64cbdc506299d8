//! Market hours models.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Market hours keyed by market (`equity`, `option`, ...) and product code
/// (`EQ`, `EQO`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketHours(pub BTreeMap<String, BTreeMap<String, ProductHours>>);

impl MarketHours {
    /// Iterate over every product in the response.
    pub fn products(&self) -> impl Iterator<Item = &ProductHours> {
        self.0.values().flat_map(|products| products.values())
    }

    /// Look up a product by its code.
    pub fn product(&self, code: &str) -> Option<&ProductHours> {
        self.0.values().find_map(|products| products.get(code))
    }
}

/// Trading hours of one product on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductHours {
    /// Trading date
    pub date: NaiveDate,
    /// Market type
    pub market_type: String,
    /// Exchange code, `NULL` when not applicable
    #[serde(default)]
    pub exchange: Option<String>,
    /// Category, `NULL` when not applicable
    #[serde(default)]
    pub category: Option<String>,
    /// Product code
    pub product: String,
    /// Product display name
    #[serde(default)]
    pub product_name: Option<String>,
    /// Whether the market is open on `date`
    pub is_open: bool,
    /// Session windows; absent on closed days
    #[serde(default)]
    pub session_hours: Option<SessionHours>,
}

/// Session windows for a trading day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHours {
    /// Pre-market sessions
    #[serde(default)]
    pub pre_market: Vec<SessionWindow>,
    /// Regular sessions
    #[serde(default)]
    pub regular_market: Vec<SessionWindow>,
    /// Post-market sessions
    #[serde(default)]
    pub post_market: Vec<SessionWindow>,
}

/// A single open/close window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    /// Window start
    pub start: DateTime<FixedOffset>,
    /// Window end
    pub end: DateTime<FixedOffset>,
}
