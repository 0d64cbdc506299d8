//! Data models for the TD Ameritrade API.
//!
//! - [`primitives`] - Core types like `AccountId`
//! - [`enums`] - Query parameter constants and response enums
//! - [`account`] - Account and position models
//! - [`market_data`] - Quote models
//! - [`price_history`] - Candle models
//! - [`option_chain`] - Option chain models
//! - [`market_hours`] - Trading session models

pub mod account;
pub mod enums;
pub mod market_data;
pub mod market_hours;
pub mod option_chain;
pub mod price_history;
pub mod primitives;

pub(crate) use account::AccountResponse;
pub use account::{Position, PositionInstrument, SecuritiesAccount};
pub use enums::*;
pub use market_data::Quote;
pub use market_hours::{MarketHours, ProductHours, SessionHours, SessionWindow};
pub use option_chain::{ExpDateMap, OptionChain, OptionContract, OptionDeliverable, Underlying};
pub use price_history::{Candle, PriceHistory};
pub use primitives::*;
