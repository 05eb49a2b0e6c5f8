//! Gateway status codes and their messages

use std::collections::HashMap;
use std::sync::OnceLock;

/// Message returned for codes the gateway does not document
pub const DEFAULT_MESSAGE: &str = "an error occurred";

/// Documented gateway codes, in the order the gateway publishes them.
///
/// Append-only: codes are never renumbered by the gateway.
pub const CODES: &[(i32, &str)] = &[
    (0, "payment completed successfully"),
    (-1, "waiting for the transaction to be sent and the payment to continue"),
    (-2, "payment was rejected by the user or the bank"),
    (-3, "payment is waiting for the bank's response"),
    (-4, "payment was cancelled"),
    (-20, "api_key was not sent"),
    (-21, "trans_id was not sent"),
    (-22, "amount was not sent"),
    (-23, "callback link was not sent"),
    (-24, "amount is not valid"),
    (-25, "transaction was already completed and cannot be sent again"),
    (-26, "token was not sent"),
    (-27, "order id is not valid"),
    (-28, "custom field is not valid json"),
    (-29, "refund code is not valid"),
    (-30, "amount is below the minimum payment"),
    (-31, "user fund does not exist"),
    (-32, "callback path is not valid"),
    (-33, "api key is not valid"),
    (-34, "transaction id is not valid"),
    (-35, "api key format is not valid"),
    (-36, "order id was not sent"),
    (-37, "transaction not found"),
    (-38, "token does not exist"),
    (-39, "api key does not exist"),
    (-40, "api key is blocked"),
    (-41, "bank validation id is missing from the received parameters"),
    (-42, "payment system has a problem"),
    (-43, "no payment gateway found for the request"),
    (-44, "response received from the bank is not valid"),
    (-45, "payment system is disabled"),
    (-46, "invalid request"),
    (-47, "api key not found"),
    (-48, "commission rate is not set"),
    (-49, "duplicate transaction"),
    (-50, "user account for the fund not found"),
    (-51, "user id not found"),
    (-52, "user account is not verified"),
    (-60, "email is not valid"),
    (-61, "national code is not valid"),
    (-62, "postal code is not valid"),
    (-63, "postal address is not valid or longer than 150 characters"),
    (-64, "description is not valid or longer than 150 characters"),
    (-65, "full name is not valid or longer than 35 characters"),
    (-66, "phone number is not valid"),
    (-67, "username is not valid or longer than 30 characters"),
    (-68, "product name is not valid or longer than 30 characters"),
    (-69, "success callback address is not valid or longer than 100 characters"),
    (-70, "failure callback address is not valid or longer than 100 characters"),
    (-71, "mobile number is not valid"),
    (-72, "the bank did not respond, contact NextPay"),
    (-73, "callback path is invalid or too long"),
    (-90, "refund completed successfully"),
    (-91, "refund failed"),
    (-92, "an error occurred during the refund"),
    (-93, "fund balance is not enough for the refund"),
    (-94, "refund key not found"),
];

fn table() -> &'static HashMap<i32, &'static str> {
    static TABLE: OnceLock<HashMap<i32, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| CODES.iter().copied().collect())
}

/// Message for a documented code, `None` for anything else
pub fn message(code: i32) -> Option<&'static str> {
    table().get(&code).copied()
}

/// Message for any code, falling back to [`DEFAULT_MESSAGE`]
pub fn lookup(code: i32) -> &'static str {
    message(code).unwrap_or(DEFAULT_MESSAGE)
}

/// Whether the gateway documents this code
pub fn is_known(code: i32) -> bool {
    table().contains_key(&code)
}

/// Transaction status as reported by a verify or reject response code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Paid and confirmed (0)
    Confirmed,
    /// Token issued, payment not yet completed (-1)
    Pending,
    /// Rejected by the payer or the bank (-2)
    Rejected,
    /// Waiting for the bank (-3)
    AwaitingBank,
    /// Cancelled (-4)
    Cancelled,
    /// Refunded (-90)
    Reverted,
    /// Any other code; see the code table for its meaning
    Other(i32),
}

impl PaymentStatus {
    /// Map a gateway code to a status
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Confirmed,
            -1 => Self::Pending,
            -2 => Self::Rejected,
            -3 => Self::AwaitingBank,
            -4 => Self::Cancelled,
            -90 => Self::Reverted,
            other => Self::Other(other),
        }
    }

    /// Whether no further verify or reject call can change this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Confirmed | Self::Rejected | Self::Cancelled | Self::Reverted
        )
    }
}
