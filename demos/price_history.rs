//! Price history example.
//!
//! Fetches a quote and a day of 5-minute candles for a symbol.
//!
//! Run with: cargo run --example price_history -- GME

use chrono::{Duration, Utc};
use tdameritrade_rs::TdClient;

#[tokio::main]
async fn main() -> tdameritrade_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "GME".to_string());
    let client = TdClient::from_env()?;

    let quote = client.quotes().get(&symbol).await?;
    println!(
        "{}: bid={:?} ask={:?} last={:?}",
        quote.symbol, quote.bid_price, quote.ask_price, quote.last_price
    );

    let end = Utc::now();
    let start = end - Duration::days(1);
    let candles = client
        .price_history()
        .candles(&symbol, "5minute", start, end, false)
        .await?;

    println!("\n{} candles:", candles.len());
    for candle in candles.iter().take(12) {
        println!(
            "  {} o={} h={} l={} c={} v={}",
            candle.datetime.format("%Y-%m-%d %H:%M"),
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume
        );
    }

    Ok(())
}
