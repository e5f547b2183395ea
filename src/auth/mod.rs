//! Authentication for Binance API requests.
//!
//! - Credential management with redacted secrets
//! - Request timestamps for signed endpoints
//! - HMAC-SHA256 query signing

mod credentials;
mod signature;
mod timestamp;

pub use credentials::{
    API_KEY_ENV, API_SECRET_ENV, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use signature::sign_query;
pub use timestamp::{FixedTimestamp, SystemClock, TimestampProvider};
