//! Token, redirect and verify against the NextPay gateway
//!
//! Run with `NEXTPAY_API_KEY=... cargo run --example payment_flow -- <trans_id>`
//! to verify a transaction, or without an argument to issue a new token.

use nextpay::{NextPayClient, NextPayConfig, NextPayError, TokenParams};

const AMOUNT: i64 = 10_000;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = NextPayConfig::from_env()?.with_logging(true);
    let client = NextPayClient::with_config(config)?;

    match std::env::args().nth(1) {
        None => {
            let params = TokenParams::new("order-1001", AMOUNT, "https://shop.example/nextpay/callback")
                .with_customer_phone("09121234567");

            match client.request_token(params).await {
                Ok(token) => {
                    println!("Token issued: {}", token.trans_id);
                    println!("Redirect the payer to {}", client.payment_url(&token.trans_id));
                }
                Err(err) => report(err),
            }
        }
        Some(trans_id) => match client.verify_payment(&trans_id, AMOUNT).await {
            Ok(verified) => {
                println!("Payment confirmed for order {}", verified.order_id);
                println!("Shaparak reference: {}", verified.shaparak_ref_id);
            }
            Err(err) => report(err),
        },
    }

    Ok(())
}

fn report(err: NextPayError) {
    match err.gateway_failure() {
        Some(failure) => println!("Gateway refused ({}): {}", failure.code, failure.message),
        None => println!("Could not reach the gateway: {}", err),
    }
}
