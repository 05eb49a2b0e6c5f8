//! Error types for the NextPay client

use crate::classify::Operation;
use thiserror::Error;

/// Result type alias for NextPay operations
pub type Result<T> = std::result::Result<T, NextPayError>;

/// Main error type for NextPay operations
///
/// Transport-level faults (`Http`, `Json`, `Transport`) never overlap with
/// `Gateway`, which is only produced from a well-formed gateway response.
#[derive(Error, Debug)]
pub enum NextPayError {
    /// Network, connection or timeout failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request encoding or response body decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a custom transport
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The gateway answered with a code that means failure for the operation
    #[error(transparent)]
    Gateway(#[from] GatewayFailure),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// A gateway response whose status code is not the operation's success code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Gateway rejected {operation}: code {code}: {message}")]
pub struct GatewayFailure {
    /// Operation that was attempted
    pub operation: Operation,
    /// Status code returned by the gateway
    pub code: i32,
    /// Message resolved from the code table
    pub message: String,
    /// The gateway's own `message` field, when the response carried one
    pub detail: Option<String>,
}

impl NextPayError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True when the request never produced a usable gateway response
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Json(_) | Self::Transport { .. }
        )
    }

    /// True when the gateway answered with a failing status code
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway(_))
    }

    /// The gateway failure, if this is one
    pub fn gateway_failure(&self) -> Option<&GatewayFailure> {
        match self {
            Self::Gateway(failure) => Some(failure),
            _ => None,
        }
    }

    /// The gateway status code, if this is a gateway failure
    pub fn code(&self) -> Option<i32> {
        self.gateway_failure().map(|failure| failure.code)
    }
}
