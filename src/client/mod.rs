//! HTTP client and service layer for the TD Ameritrade API.
//!
//! This module provides the main entry point [`TdClient`].
//!
//! # Example
//!
//! ```no_run
//! use tdameritrade_rs::TdClient;
//!
//! # async fn example() -> tdameritrade_rs::Result<()> {
//! let client = TdClient::from_env()?;
//! let account = client.accounts().get(&[]).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::{
    ClientConfig, UserConfig, DEFAULT_CREDENTIALS_FILE, ENV_ACCOUNT_ID, ENV_CONSUMER_KEY,
    ENV_CREDENTIALS_PATH, ENV_REDIRECT_URI,
};
pub use http::TdClient;
pub(crate) use http::ClientInner;
