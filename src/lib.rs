//! # tdameritrade-rs
//!
//! A Rust client for the TD Ameritrade REST API.
//!
//! The heart of the crate is [`AuthenticatedSession`], an HTTP session that
//! keeps its own OAuth2 access token fresh: a `401 Unauthorized` triggers a
//! refresh-token exchange, the new credential set is written back to disk,
//! and the original request is sent once more. Service wrappers on
//! [`TdClient`] build on it for the common market data endpoints.
//!
//! ## Features
//!
//! - **Self-refreshing sessions**: transparent token refresh with persistence
//! - **Accounts**: account details, positions and orders
//! - **Market Data**: quotes, price history, option chains and market hours
//! - **Type Safety**: strongly-typed models with `Decimal` prices
//! - **Async-first**: built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! The first token pair is obtained out of band through the browser
//! authorization-code flow and saved as a JSON credential file:
//!
//! ```json
//! {
//!   "access_token": "...",
//!   "refresh_token": "...",
//!   "scope": "PlaceTrades AccountAccess MoveMoney",
//!   "expires_in": 1800,
//!   "refresh_token_expires_in": 7776000,
//!   "token_type": "Bearer"
//! }
//! ```
//!
//! ```rust,no_run
//! use tdameritrade_rs::{TdClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> tdameritrade_rs::Result<()> {
//!     let client = TdClient::new(
//!         ClientConfig::default()
//!             .with_consumer_key("MYAPPKEY")
//!             .with_credentials_path("tdapi_credentials.json"),
//!     )?;
//!
//!     let quote = client.quotes().get("GME").await?;
//!     println!("GME last: {:?}", quote.last_price);
//!
//!     let candles = client
//!         .price_history()
//!         .candles("GME", "5minute", "2021-06-07", "2021-06-08", false)
//!         .await?;
//!     println!("{} candles", candles.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! [`TdClient::from_env`] reads `TDAPI_ACCOUNT_ID` and `TDAPI_CONSUMER_KEY`,
//! plus the optional `TDAPI_REDIRECT_URI` and `TDAPI_CREDENTIALS_PATH`,
//! honoring a `.env` file in the working directory.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-export primary types at crate root for convenience
pub use auth::{AuthenticatedSession, CredentialSet, CredentialStore, RequestOptions};
pub use client::{ClientConfig, TdClient, UserConfig};
pub use error::{Error, ResponseBody, Result};
pub use models::AccountId;

/// Prelude module for convenient imports.
///
/// ```rust
/// use tdameritrade_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{OptionChainQuery, PriceHistoryQuery};
    pub use crate::auth::{AuthenticatedSession, CredentialSet, CredentialStore, RequestOptions};
    pub use crate::client::{ClientConfig, TdClient, UserConfig};
    pub use crate::error::{Error, ResponseBody, Result};
    pub use crate::models::{
        // Primitives
        AccountId,
        // Enums
        AccountField, ContractType, FrequencyType, Market, PeriodType, PutCall, Strategy,
        StrikeRange,
        // Models
        Candle, MarketHours, OptionChain, OptionContract, Position, PriceHistory, Quote,
        SecuritiesAccount,
    };
}
