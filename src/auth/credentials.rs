//! Credential management for Binance API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Default environment variable holding the API key.
pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
/// Default environment variable holding the API secret.
pub const API_SECRET_ENV: &str = "BINANCE_API_SECRET";

/// An API key and its secret.
///
/// The key travels in clear text in the `X-MBX-APIKEY` header; the secret
/// never leaves the process and is only used to sign query strings.
#[derive(Clone)]
pub struct Credentials {
    /// The API key sent with `USER_STREAM` and `SIGNED` requests
    pub api_key: String,
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Source of API credentials for the REST client.
///
/// Implement this to pull keys from a secrets manager or rotate them at
/// runtime.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Credentials held directly in memory.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
        }
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials read once from environment variables.
///
/// Defaults to `BINANCE_API_KEY` and `BINANCE_API_SECRET`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Read credentials from the default environment variables.
    ///
    /// Returns `None` if either variable is unset.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(API_KEY_ENV, API_SECRET_ENV)
    }

    /// Read credentials from custom environment variable names.
    ///
    /// Returns `None` if either variable is unset.
    pub fn try_from_env_vars(key_var: &str, secret_var: &str) -> Option<Self> {
        let api_key = std::env::var(key_var).ok()?;
        let api_secret = std::env::var(secret_var).ok()?;

        Some(Self {
            credentials: Credentials::new(api_key, api_secret),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
