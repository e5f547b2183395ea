//! HMAC-SHA256 signature generation for Binance API authentication.
//!
//! Signed endpoints (`SIGNED` security type) require a signature computed as:
//! ```text
//! hex(HMAC-SHA256(total_params, api_secret))
//! ```
//!
//! where `total_params` is the URL-encoded query string (including
//! `timestamp`). The signature is appended as the `signature` parameter.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::BinanceError;

type HmacSha256 = Hmac<Sha256>;

/// Sign a query string for Binance's signed endpoints.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `total_params` - The URL-encoded parameters, `timestamp` included
///
/// # Returns
///
/// Lowercase hex-encoded HMAC-SHA256 signature.
///
/// # Example
///
/// ```rust
/// use binance_api_client::auth::{Credentials, sign_query};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "api_secret");
/// let signature = sign_query(&credentials, "symbol=BTCUSDT&timestamp=1499827319559")?;
/// assert_eq!(signature.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn sign_query(credentials: &Credentials, total_params: &str) -> Result<String, BinanceError> {
    let mut hmac = HmacSha256::new_from_slice(credentials.expose_secret().as_bytes())
        .map_err(|e| BinanceError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(total_params.as_bytes());
    Ok(hex::encode(hmac.finalize().into_bytes()))
}
