//! Success/failure classification of gateway responses
//!
//! The gateway reports every outcome in a `code` field of the response body.
//! Which code means success depends on the operation; the mapping lives in
//! [`Operation::success_code`] and is consumed by the one generic [`classify`].

use crate::codes;
use crate::error::GatewayFailure;
use std::fmt;

/// Gateway operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Issue a payment token
    RequestToken,
    /// Confirm a paid transaction
    VerifyPayment,
    /// Refund a confirmed transaction
    RejectPayment,
    /// Request a payout to a bank account
    Checkout,
}

impl Operation {
    /// All operations
    pub const ALL: [Operation; 4] = [
        Operation::RequestToken,
        Operation::VerifyPayment,
        Operation::RejectPayment,
        Operation::Checkout,
    ];

    /// The code the gateway returns when this operation succeeds
    pub fn success_code(&self) -> i32 {
        match self {
            Operation::RequestToken => -1,
            Operation::VerifyPayment => 0,
            Operation::RejectPayment => -90,
            Operation::Checkout => 200,
        }
    }

    /// Whether `code` means success for this operation
    pub fn is_success(&self, code: i32) -> bool {
        self.success_code() == code
    }

    /// Snake-case name used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::RequestToken => "request_token",
            Operation::VerifyPayment => "verify_payment",
            Operation::RejectPayment => "reject_payment",
            Operation::Checkout => "checkout",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything carrying a gateway status code
pub trait GatewayResponse {
    /// The gateway status code
    fn code(&self) -> i32;

    /// Free-text message sent by the gateway alongside the code, if any
    fn detail(&self) -> Option<&str> {
        None
    }
}

/// Classify a response by its code alone.
///
/// Returns the response unchanged on success. On failure the message is
/// resolved from the code table, falling back to [`codes::DEFAULT_MESSAGE`].
pub fn classify<R: GatewayResponse>(
    operation: Operation,
    response: R,
) -> Result<R, GatewayFailure> {
    let code = response.code();
    if operation.is_success(code) {
        return Ok(response);
    }

    Err(GatewayFailure {
        operation,
        code,
        message: codes::lookup(code).to_string(),
        detail: response.detail().map(str::to_string),
    })
}
