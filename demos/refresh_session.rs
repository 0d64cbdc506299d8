//! Session refresh example.
//!
//! Loads the persisted credential set, forces a token refresh and prints
//! the configured account with its positions.
//!
//! Requires `TDAPI_ACCOUNT_ID` and `TDAPI_CONSUMER_KEY` (a `.env` file works
//! too) and an existing credential file.
//!
//! Run with: cargo run --example refresh_session

use tdameritrade_rs::models::AccountField;
use tdameritrade_rs::TdClient;

#[tokio::main]
async fn main() -> tdameritrade_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let client = TdClient::from_env()?;
    println!(
        "Loaded credentials from {}",
        client.session().store().path().display()
    );

    client.refresh_session().await?;
    let credentials = client.session().credentials().await;
    println!(
        "Access token refreshed, valid for {} seconds",
        credentials.expires_in
    );

    let account = client.accounts().get(&[AccountField::Positions]).await?;
    println!("\nAccount {} ({})", account.account_id, account.account_type);

    for position in &account.positions {
        println!(
            "  {:<12} qty={:<8} avg={:?}",
            position.instrument.symbol,
            position.net_quantity(),
            position.average_price
        );
    }

    Ok(())
}
