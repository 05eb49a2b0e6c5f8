//! Payout request to a bank account

use nextpay::{CheckoutParams, NextPayClient, NextPayConfig};
use std::time::Duration;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let wid: i64 = std::env::var("NEXTPAY_WID")?.parse()?;
    let auth = std::env::var("NEXTPAY_WID_AUTH")?;

    let config = NextPayConfig::from_env()?.with_timeout(Duration::from_secs(30));
    let client = NextPayClient::with_config(config)?;

    let params = CheckoutParams::new(wid, auth, 500_000, "120170000000123456789012", "Sara Ahmadi");
    match client.checkout(params).await {
        Ok(response) => println!("Payout registered: {}", response.message),
        Err(err) if err.is_gateway() => println!("Payout refused: {}", err),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
