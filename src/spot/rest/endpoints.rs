//! Binance Spot REST API endpoint constants.

/// Base URL for the Binance Spot REST API.
pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Public endpoints (no authentication required).
pub mod public {
    /// Test connectivity.
    pub const PING: &str = "/api/v3/ping";
    /// Get server time.
    pub const TIME: &str = "/api/v3/time";
    /// Get exchange trading rules and symbol information.
    pub const EXCHANGE_INFO: &str = "/api/v3/exchangeInfo";
    /// Get system maintenance status.
    pub const SYSTEM_STATUS: &str = "/sapi/v1/system/status";
}

/// Private endpoints (API key or signature required).
pub mod private {
    /// Get account information (signed).
    pub const ACCOUNT: &str = "/api/v3/account";
    /// Start, keep alive or close a user data stream (API key).
    pub const USER_DATA_STREAM: &str = "/api/v3/userDataStream";
}
