//! Error types for the Binance client library.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for all Binance client operations.
#[derive(Error, Debug)]
pub enum BinanceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// WebSocket protocol error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// WebSocket communication error (with message)
    #[error("WebSocket error: {0}")]
    WebSocketMsg(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Binance API returned an error
    #[error("Binance API error: {0}")]
    Api(ApiError),

    /// Request weight or order rate limit exceeded (HTTP 429 / 418)
    #[error("Rate limit exceeded, retry after {retry_after_secs:?}s")]
    RateLimitExceeded {
        /// Value of the `Retry-After` header, if the server sent one
        retry_after_secs: Option<u64>,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// WebSocket connection closed by the remote end or the transport
    #[error("WebSocket connection closed: {reason}")]
    ConnectionClosed {
        /// Reason for the closure
        reason: String,
    },

    /// A stream session was run before it was connected
    #[error("WebSocket session is not connected")]
    NotConnected,

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for this endpoint")]
    MissingCredentials,
}

/// Binance API error payload.
///
/// Non-2xx responses carry a body like `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    /// Binance error code (negative for request errors)
    pub code: i64,
    /// Human-readable error message
    pub msg: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.msg)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self.code, error_codes::TOO_MANY_REQUESTS | error_codes::TOO_MANY_ORDERS)
    }

    /// Check if the request timestamp fell outside the receive window.
    pub fn is_invalid_timestamp(&self) -> bool {
        self.code == error_codes::INVALID_TIMESTAMP
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == error_codes::INVALID_SIGNATURE
    }

    /// Check if the API key was rejected.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self.code, error_codes::BAD_API_KEY_FMT | error_codes::REJECTED_MBX_KEY)
    }

    /// Check if the symbol was not recognised.
    pub fn is_invalid_symbol(&self) -> bool {
        self.code == error_codes::BAD_SYMBOL
    }
}

/// Known Binance error codes for pattern matching.
pub mod error_codes {
    /// Unknown error while processing the request
    pub const UNKNOWN: i64 = -1000;
    /// Internal error; unable to process the request
    pub const DISCONNECTED: i64 = -1001;
    /// Too much request weight used
    pub const TOO_MANY_REQUESTS: i64 = -1003;
    /// Too many new orders
    pub const TOO_MANY_ORDERS: i64 = -1015;
    /// Timestamp outside of the receive window
    pub const INVALID_TIMESTAMP: i64 = -1021;
    /// Signature for this request is not valid
    pub const INVALID_SIGNATURE: i64 = -1022;
    /// Invalid symbol
    pub const BAD_SYMBOL: i64 = -1121;
    /// API key format invalid
    pub const BAD_API_KEY_FMT: i64 = -2014;
    /// Invalid API key, IP, or permissions for action
    pub const REJECTED_MBX_KEY: i64 = -2015;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_body() {
        let error: ApiError =
            serde_json::from_str(r#"{"code":-1121,"msg":"Invalid symbol."}"#).unwrap();
        assert_eq!(error.code, -1121);
        assert_eq!(error.msg, "Invalid symbol.");
        assert!(error.is_invalid_symbol());
        assert!(!error.is_rate_limit());
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new(-1022, "Signature for this request is not valid.");
        assert_eq!(error.to_string(), "-1022: Signature for this request is not valid.");
        assert!(error.is_invalid_signature());
    }

    #[test]
    fn test_key_errors() {
        assert!(ApiError::new(error_codes::REJECTED_MBX_KEY, "rejected").is_invalid_key());
        assert!(ApiError::new(error_codes::TOO_MANY_ORDERS, "slow down").is_rate_limit());
    }
}
