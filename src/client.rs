//! Gateway client
//!
//! Every operation follows the same path: build the body, post it, classify
//! the response code, then decode the typed response. A failing code becomes
//! [`NextPayError::Gateway`]; anything that stops a response from being read
//! is a transport error. Nothing is retried.

use crate::classify::{classify, Operation};
use crate::codes;
use crate::config::NextPayConfig;
use crate::request::{self, CheckoutParams, TokenParams};
use crate::transport::{HttpTransport, Transport};
use crate::types::*;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Client for the NextPay gateway
///
/// Cheap to clone; clones share the transport. Holds no mutable state, so
/// operations may run concurrently.
#[derive(Clone)]
pub struct NextPayClient {
    api_key: Credential,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for NextPayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NextPayClient")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("transport", &"<transport>")
            .finish()
    }
}

impl NextPayClient {
    /// Create a client for the production gateway with logging off
    pub fn new(api_key: impl Into<Credential>) -> Result<Self> {
        Self::with_config(NextPayConfig::new(api_key))
    }

    /// Create a client from a config, using the reqwest transport
    pub fn with_config(config: NextPayConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout, config.enable_logging)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends through a custom transport
    pub fn with_transport(config: NextPayConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            api_key: config.api_key,
            base_url: config.base_url,
            transport,
        })
    }

    /// Issue a payment token.
    ///
    /// On success redirect the payer to [`Self::payment_url`] and persist
    /// `trans_id` with the amount and order id.
    pub async fn request_token(&self, params: TokenParams) -> Result<TokenResponse> {
        let body = request::token_request(&self.api_key, params);
        self.call(Operation::RequestToken, &body).await
    }

    /// Confirm a paid transaction.
    ///
    /// The gateway refunds payments that are not verified within its
    /// confirmation window; this client does not track it.
    pub async fn verify_payment(&self, trans_id: &str, amount: i64) -> Result<VerifyResponse> {
        let body = request::verify_request(&self.api_key, trans_id, amount);
        self.call(Operation::VerifyPayment, &body).await
    }

    /// Refund a confirmed transaction
    pub async fn reject_payment(&self, trans_id: &str, amount: i64) -> Result<VerifyResponse> {
        let body = request::reject_request(&self.api_key, trans_id, amount);
        self.call(Operation::RejectPayment, &body).await
    }

    /// Request a payout to a bank account
    pub async fn checkout(&self, params: CheckoutParams) -> Result<CheckoutResponse> {
        let body = request::checkout_request(params);
        self.call(Operation::Checkout, &body).await
    }

    /// Payment page for a transaction on the configured host
    pub fn payment_url(&self, trans_id: &str) -> String {
        endpoints::payment_url(&self.base_url, trans_id)
    }

    /// Message for a gateway code
    pub fn code_message(&self, code: i32) -> &'static str {
        codes::lookup(code)
    }

    /// Get the configured host
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<B, R>(&self, operation: Operation, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = endpoints::join_url(&self.base_url, endpoints::for_operation(operation));
        let payload = serde_json::to_value(body)?;
        let text = self.transport.post_json(&url, &payload).await?;

        let envelope: ResponseCode = serde_json::from_str(&text)?;
        classify(operation, envelope)?;

        Ok(serde_json::from_str(&text)?)
    }
}
