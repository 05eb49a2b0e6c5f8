//! # nextpay - NextPay payment gateway client
//!
//! Issue payment tokens, verify and refund transactions, and request payouts
//! against the NextPay HTTP API. Each call is one JSON request/response; the
//! response `code` decides success per operation and failing codes come back
//! as [`NextPayError::Gateway`] with a message from the [`codes`] table.
//!
//! ```no_run
//! use nextpay::{NextPayClient, TokenParams};
//!
//! # async fn run() -> nextpay::Result<()> {
//! let client = NextPayClient::new("your-api-key")?;
//! let token = client
//!     .request_token(TokenParams::new("order-1", 10_000, "https://shop.example/callback"))
//!     .await?;
//! println!("redirect the payer to {}", client.payment_url(&token.trans_id));
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod codes;
pub mod config;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use classify::{classify, GatewayResponse, Operation};
pub use client::NextPayClient;
pub use codes::PaymentStatus;
pub use config::NextPayConfig;
pub use error::{GatewayFailure, NextPayError, Result};
pub use request::{CheckoutParams, TokenParams};
pub use transport::{HttpTransport, Transport};
pub use types::*;

/// Current version of the nextpay library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
