//! Wire models for the NextPay gateway

use crate::classify::{GatewayResponse, Operation};
use crate::codes::PaymentStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default gateway host
pub const DEFAULT_BASE_URL: &str = "https://nextpay.org";

/// Sentinel the gateway expects in `refund_request` to turn a verify into a refund
pub const REFUND_SENTINEL: &str = "yes_money_back";

/// Gateway endpoint paths
pub mod endpoints {
    use crate::classify::Operation;

    /// Token issuance
    pub const TOKEN: &str = "/nx/gateway/token";
    /// Browser redirect target, followed by `/{trans_id}`
    pub const PAYMENT: &str = "/nx/gateway/payment";
    /// Verify and reject
    pub const VERIFY: &str = "/nx/gateway/verify";
    /// Payout
    pub const CHECKOUT: &str = "/nx/gateway/checkout";

    /// API endpoint an operation posts to
    pub fn for_operation(operation: Operation) -> &'static str {
        match operation {
            Operation::RequestToken => TOKEN,
            Operation::VerifyPayment | Operation::RejectPayment => VERIFY,
            Operation::Checkout => CHECKOUT,
        }
    }

    /// Join a base URL and a path with exactly one slash between them
    pub fn join_url(base: &str, path: &str) -> String {
        let base = base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Payment page a payer is redirected to for a transaction
    pub fn payment_url(base: &str, trans_id: &str) -> String {
        format!("{}/{}", join_url(base, PAYMENT), trans_id)
    }
}

/// Deserialize a string field the gateway sometimes sends as a bare number
pub mod lenient_string {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    impl From<StringOrNumber> for String {
        fn from(value: StringOrNumber) -> Self {
            match value {
                StringOrNumber::String(text) => text,
                StringOrNumber::Number(number) => number.to_string(),
            }
        }
    }

    /// Deserialize a [`String`] from a JSON string or number.
    pub fn deserialize<'a, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'a>,
    {
        StringOrNumber::deserialize(deserializer).map(String::from)
    }

    /// Same as the parent module, for [`Option<String>`] fields.
    pub mod option {
        use super::*;

        /// Deserialize an [`Option<String>`] from a JSON string, number or null.
        pub fn deserialize<'a, D>(deserializer: D) -> Result<Option<String>, D::Error>
        where
            D: Deserializer<'a>,
        {
            Option::<StringOrNumber>::deserialize(deserializer)
                .map(|value| value.map(String::from))
        }
    }
}

/// Secret string attached to outgoing requests
///
/// Serializes as the plain string; `Debug` never prints it.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The secret itself
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

/// Currency an amount is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    /// Toman
    #[default]
    IRT,
    /// Rial
    IRR,
}

impl Currency {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::IRT => "IRT",
            Currency::IRR => "IRR",
        }
    }
}

/// Body of a token request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRequest {
    pub api_key: Credential,
    pub order_id: String,
    pub amount: i64,
    pub callback_uri: String,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// Caller-defined JSON, passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_json_fields: Option<String>,
    pub auto_verify: bool,
    /// Only this 16-digit card may complete the payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_card: Option<String>,
}

/// Token issued for a new transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub code: i32,
    /// Handle for every later call on this transaction. Store it with the
    /// amount and order id for reconciliation.
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub trans_id: String,
}

impl TokenResponse {
    /// Whether the gateway issued the token
    pub fn token_generated(&self) -> bool {
        Operation::RequestToken.is_success(self.code)
    }

    /// Payment page on the default host
    pub fn payment_url(&self) -> String {
        endpoints::payment_url(DEFAULT_BASE_URL, &self.trans_id)
    }
}

impl GatewayResponse for TokenResponse {
    fn code(&self) -> i32 {
        self.code
    }
}

/// Body of a verify request; with `refund_request` set it is a reject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyRequest {
    pub api_key: Credential,
    pub amount: i64,
    pub trans_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_request: Option<String>,
}

impl VerifyRequest {
    /// Whether this request asks for a refund
    pub fn is_refund(&self) -> bool {
        self.refund_request.is_some()
    }
}

/// Result of a verify or reject call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub code: i32,
    pub amount: i64,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub order_id: String,
    /// Masked card number of the payer
    #[serde(
        default,
        deserialize_with = "lenient_string::option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_holder: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string::option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_phone: Option<String>,
    #[serde(rename = "custom", default, skip_serializing_if = "Option::is_none")]
    pub custom_json_fields: Option<String>,
    /// Shaparak tracking reference. The gateway capitalizes this one key.
    #[serde(rename = "Shaparak_Ref_Id", deserialize_with = "lenient_string::deserialize")]
    pub shaparak_ref_id: String,
}

impl VerifyResponse {
    /// The transaction is paid and confirmed
    pub fn verified(&self) -> bool {
        Operation::VerifyPayment.is_success(self.code)
    }

    /// The transaction was refunded
    pub fn rejected(&self) -> bool {
        Operation::RejectPayment.is_success(self.code)
    }

    /// Status view of the response code
    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::from_code(self.code)
    }
}

impl GatewayResponse for VerifyResponse {
    fn code(&self) -> i32 {
        self.code
    }
}

/// Body of a payout request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutRequest {
    /// Webservice id
    pub wid: i64,
    /// Webservice secret
    pub auth: Credential,
    pub amount: i64,
    /// Account number without the `IR` prefix
    pub sheba: String,
    /// Account holder
    pub name: String,
}

/// Result of a payout request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub code: i32,
    pub message: String,
}

impl CheckoutResponse {
    /// The payout request was registered
    pub fn ok(&self) -> bool {
        Operation::Checkout.is_success(self.code)
    }
}

impl GatewayResponse for CheckoutResponse {
    fn code(&self) -> i32 {
        self.code
    }

    fn detail(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// The part of every response needed to classify it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseCode {
    pub code: i32,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl GatewayResponse for ResponseCode {
    fn code(&self) -> i32 {
        self.code
    }

    fn detail(&self) -> Option<&str> {
        self.message.as_ref().and_then(|message| message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_response_round_trip() {
        let response: TokenResponse =
            serde_json::from_value(json!({"code": -1, "trans_id": "abc123"})).unwrap();

        assert!(response.token_generated());
        assert_eq!(response.trans_id, "abc123");
        assert_eq!(
            response.payment_url(),
            "https://nextpay.org/nx/gateway/payment/abc123"
        );
    }

    #[test]
    fn test_token_not_generated() {
        let response: TokenResponse =
            serde_json::from_value(json!({"code": -33, "trans_id": ""})).unwrap();
        assert!(!response.token_generated());
    }

    #[test]
    fn test_verify_response_parses_irregular_key() {
        let response: VerifyResponse = serde_json::from_value(json!({
            "code": 0,
            "amount": 10000,
            "order_id": "ord-1",
            "card_holder": "5022-29**-****-0000",
            "custom": "{\"sku\":7}",
            "Shaparak_Ref_Id": "SRI1"
        }))
        .unwrap();

        assert!(response.verified());
        assert!(!response.rejected());
        assert_eq!(response.status(), PaymentStatus::Confirmed);
        assert_eq!(response.shaparak_ref_id, "SRI1");
        assert_eq!(response.custom_json_fields.as_deref(), Some("{\"sku\":7}"));
        assert_eq!(response.customer_phone, None);
    }

    #[test]
    fn test_verify_response_rejects_snake_case_ref_id() {
        let parsed = serde_json::from_value::<VerifyResponse>(json!({
            "code": 0,
            "amount": 10000,
            "order_id": "ord-1",
            "shaparak_ref_id": "SRI1"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_numeric_string_fields_are_accepted() {
        let response: VerifyResponse = serde_json::from_value(json!({
            "code": 0,
            "amount": 10000,
            "order_id": 1001,
            "customer_phone": 9121234567u64,
            "card_holder": null,
            "Shaparak_Ref_Id": 191919
        }))
        .unwrap();

        assert_eq!(response.order_id, "1001");
        assert_eq!(response.customer_phone.as_deref(), Some("9121234567"));
        assert_eq!(response.card_holder, None);
        assert_eq!(response.shaparak_ref_id, "191919");

        let token: TokenResponse =
            serde_json::from_value(json!({"code": -1, "trans_id": 778899})).unwrap();
        assert_eq!(token.trans_id, "778899");
    }

    #[test]
    fn test_lenient_string_still_rejects_other_types() {
        let parsed = serde_json::from_value::<TokenResponse>(json!({
            "code": -1,
            "trans_id": {"id": "T1"}
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_checkout_response_ok() {
        let ok = CheckoutResponse {
            code: 200,
            message: "registered".to_string(),
        };
        let failed = CheckoutResponse {
            code: -24,
            message: "bad amount".to_string(),
        };
        assert!(ok.ok());
        assert!(!failed.ok());
        assert_eq!(failed.detail(), Some("bad amount"));
    }

    #[test]
    fn test_response_code_ignores_other_fields() {
        let envelope: ResponseCode =
            serde_json::from_value(json!({"code": 500, "message": "err", "x": [1, 2]})).unwrap();
        assert_eq!(envelope.code, 500);
        assert_eq!(envelope.detail(), Some("err"));

        let envelope: ResponseCode =
            serde_json::from_value(json!({"code": -2, "message": {"fa": "..."}})).unwrap();
        assert_eq!(envelope.detail(), None);
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("b11ee9c3-d23d-414e-8b6e-f2370baac97b");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("b11ee9c3"));
        assert_eq!(
            serde_json::to_value(&credential).unwrap(),
            json!("b11ee9c3-d23d-414e-8b6e-f2370baac97b")
        );
    }

    #[test]
    fn test_currency() {
        assert_eq!(Currency::default(), Currency::IRT);
        assert_eq!(serde_json::to_value(Currency::IRR).unwrap(), json!("IRR"));
        assert_eq!(Currency::IRT.as_str(), "IRT");
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            endpoints::join_url("https://nextpay.org/", endpoints::TOKEN),
            "https://nextpay.org/nx/gateway/token"
        );
        assert_eq!(
            endpoints::for_operation(Operation::RejectPayment),
            endpoints::VERIFY
        );
        assert_eq!(
            endpoints::payment_url("http://localhost:1234", "T1"),
            "http://localhost:1234/nx/gateway/payment/T1"
        );
    }
}
