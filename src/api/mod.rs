//! API service modules for TD Ameritrade endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the TD Ameritrade API.

mod accounts;
mod market_hours;
mod option_chains;
mod price_history;
mod quotes;

pub use accounts::AccountsService;
pub use market_hours::MarketHoursService;
pub use option_chains::{OptionChainQuery, OptionChainsService};
pub use price_history::{PriceHistoryQuery, PriceHistoryService};
pub use quotes::QuotesService;
