//! Request construction
//!
//! Pure functions from caller parameters to wire bodies. Nothing is validated
//! here: a bad amount or phone number comes back as a gateway code.
//!
//! Unset optional fields are omitted from every body, never sent as `null`,
//! an empty string or zero.

use crate::types::{
    CheckoutRequest, Credential, Currency, TokenRequest, VerifyRequest, REFUND_SENTINEL,
};

/// Caller parameters for issuing a payment token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParams {
    /// Caller-assigned, unique per payment attempt
    pub order_id: String,
    pub amount: i64,
    pub callback_uri: String,
    pub currency: Currency,
    pub customer_phone: Option<String>,
    pub custom_json_fields: Option<String>,
    /// Let the gateway confirm the payment without a verify call
    pub auto_verify: bool,
    pub allowed_card: Option<String>,
}

impl TokenParams {
    /// Create token parameters with IRT and no auto-verify
    pub fn new(
        order_id: impl Into<String>,
        amount: i64,
        callback_uri: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            amount,
            callback_uri: callback_uri.into(),
            currency: Currency::default(),
            customer_phone: None,
            custom_json_fields: None,
            auto_verify: false,
            allowed_card: None,
        }
    }

    /// Set the currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the payer's mobile number; the bank page can then offer saved cards
    pub fn with_customer_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer_phone = Some(phone.into());
        self
    }

    /// Attach caller-defined JSON, returned untouched by verify
    pub fn with_custom_json_fields(mut self, json: impl Into<String>) -> Self {
        self.custom_json_fields = Some(json.into());
        self
    }

    /// Enable or disable auto-verify
    pub fn with_auto_verify(mut self, auto_verify: bool) -> Self {
        self.auto_verify = auto_verify;
        self
    }

    /// Restrict payment to one 16-digit card number
    pub fn with_allowed_card(mut self, card: impl Into<String>) -> Self {
        self.allowed_card = Some(card.into());
        self
    }
}

/// Caller parameters for a payout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutParams {
    pub wid: i64,
    pub auth: Credential,
    pub amount: i64,
    pub sheba: String,
    pub name: String,
}

impl CheckoutParams {
    /// Create payout parameters
    pub fn new(
        wid: i64,
        auth: impl Into<Credential>,
        amount: i64,
        sheba: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            wid,
            auth: auth.into(),
            amount,
            sheba: sheba.into(),
            name: name.into(),
        }
    }
}

/// Build the token request body
pub fn token_request(api_key: &Credential, params: TokenParams) -> TokenRequest {
    TokenRequest {
        api_key: api_key.clone(),
        order_id: params.order_id,
        amount: params.amount,
        callback_uri: params.callback_uri,
        currency: params.currency,
        customer_phone: params.customer_phone,
        custom_json_fields: params.custom_json_fields,
        auto_verify: params.auto_verify,
        allowed_card: params.allowed_card,
    }
}

/// Build the verify request body
pub fn verify_request(
    api_key: &Credential,
    trans_id: impl Into<String>,
    amount: i64,
) -> VerifyRequest {
    VerifyRequest {
        api_key: api_key.clone(),
        amount,
        trans_id: trans_id.into(),
        refund_request: None,
    }
}

/// Build the reject request body: a verify body carrying the refund marker
pub fn reject_request(
    api_key: &Credential,
    trans_id: impl Into<String>,
    amount: i64,
) -> VerifyRequest {
    VerifyRequest {
        refund_request: Some(REFUND_SENTINEL.to_string()),
        ..verify_request(api_key, trans_id, amount)
    }
}

/// Build the payout request body
pub fn checkout_request(params: CheckoutParams) -> CheckoutRequest {
    CheckoutRequest {
        wid: params.wid,
        auth: params.auth,
        amount: params.amount,
        sheba: params.sheba,
        name: params.name,
    }
}
