//! Quotes service for snapshot quotes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::RequestOptions;
use crate::client::ClientInner;
use crate::models::Quote;
use crate::{Error, Result};

/// Service for quote operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tdameritrade_rs::TdClient) -> tdameritrade_rs::Result<()> {
/// let quote = client.quotes().get("GME").await?;
/// println!("GME: bid={:?}, ask={:?}", quote.bid_price, quote.ask_price);
///
/// let quotes = client.quotes().get_many(&["AAPL", "TSLA"]).await?;
/// # Ok(())
/// # }
/// ```
pub struct QuotesService {
    inner: Arc<ClientInner>,
}

impl QuotesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the quote for a single symbol.
    pub async fn get(&self, symbol: &str) -> Result<Quote> {
        let mut quotes = self.get_many(&[symbol]).await?;
        quotes
            .remove(symbol)
            .ok_or_else(|| Error::InvalidInput(format!("No quote data returned for symbol: {}", symbol)))
    }

    /// Get quotes for multiple symbols, keyed by symbol.
    pub async fn get_many(&self, symbols: &[&str]) -> Result<HashMap<String, Quote>> {
        if symbols.is_empty() {
            return Err(Error::InvalidInput(
                "At least one symbol is required".to_string(),
            ));
        }
        if symbols.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidInput(
                "All symbols must be non-empty".to_string(),
            ));
        }

        let options = RequestOptions::new().query("symbol", symbols.join(","));
        self.inner.get("/v1/marketdata/quotes", &options).await
    }
}
