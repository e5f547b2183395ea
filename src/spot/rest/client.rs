//! Binance Spot REST API client implementation.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT};
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;

use crate::auth::{CredentialsProvider, SystemClock, TimestampProvider, sign_query};
use crate::error::{ApiError, BinanceError};
use crate::spot::rest::endpoints::BINANCE_BASE_URL;

/// Header carrying the API key on `USER_STREAM` and `SIGNED` requests.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Security level of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityType {
    /// Public endpoint.
    None,
    /// Requires the API key header only.
    ApiKey,
    /// Requires the API key header plus `timestamp` and `signature` parameters.
    Signed,
}

/// Per-request options for signed endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Milliseconds the request stays valid after its timestamp.
    pub recv_window: Option<u64>,
}

impl RequestOptions {
    /// Set the receive window for this request.
    pub fn recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }
}

/// Parameters for endpoints that take none.
#[derive(Debug, Serialize)]
pub(crate) struct NoParams {}

/// The Binance Spot REST API client.
///
/// Handles request building, API key headers, query signing and mapping of
/// Binance error payloads.
///
/// # Example
///
/// ```rust,no_run
/// use binance_api_client::spot::rest::BinanceRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = BinanceRestClient::new();
///     client.ping().await?;
///     let status = client.get_system_status().await?;
///     println!("System status: {}", status.msg);
///     Ok(())
/// }
/// ```
///
/// For account endpoints, provide credentials:
///
/// ```rust,no_run
/// use binance_api_client::spot::rest::BinanceRestClient;
/// use binance_api_client::auth::StaticCredentials;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = BinanceRestClient::builder()
///         .credentials(credentials)
///         .build();
///
///     let account = client.get_account(None).await?;
///     println!("Balances: {:?}", account.balances);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BinanceRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    timestamp_provider: Arc<dyn TimestampProvider>,
    recv_window: Option<u64>,
}

impl BinanceRestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`BinanceRestClient::builder()`] to configure credentials.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> BinanceRestClientBuilder {
        BinanceRestClientBuilder::new()
    }

    /// Get the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a public GET request.
    pub(crate) async fn public_get<T>(&self, endpoint: &str) -> Result<T, BinanceError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.call_api(Method::GET, endpoint, SecurityType::None, &NoParams {}, None)
            .await
    }

    /// Make a public GET request with query parameters.
    pub(crate) async fn public_get_with_params<T, Q>(
        &self,
        endpoint: &str,
        params: &Q,
    ) -> Result<T, BinanceError>
    where
        T: serde::de::DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.call_api(Method::GET, endpoint, SecurityType::None, params, None)
            .await
    }

    /// Send a request at the given security level.
    ///
    /// Parameters always travel in the query string; Binance accepts them
    /// there for every method.
    pub(crate) async fn call_api<T, Q>(
        &self,
        method: Method,
        endpoint: &str,
        security: SecurityType,
        params: &Q,
        options: Option<&RequestOptions>,
    ) -> Result<T, BinanceError>
    where
        T: serde::de::DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut query = serde_urlencoded::to_string(params)
            .map_err(|e| BinanceError::InvalidResponse(e.to_string()))?;

        let mut api_key = None;
        if security != SecurityType::None {
            let credentials = self
                .credentials
                .as_ref()
                .ok_or(BinanceError::MissingCredentials)?
                .get_credentials();
            api_key = Some(credentials.api_key.clone());

            if security == SecurityType::Signed {
                let recv_window = options.and_then(|o| o.recv_window).or(self.recv_window);
                if let Some(recv_window) = recv_window {
                    push_param(&mut query, "recvWindow", &recv_window.to_string());
                }
                let timestamp = self.timestamp_provider.timestamp_millis();
                push_param(&mut query, "timestamp", &timestamp.to_string());

                let signature = sign_query(credentials, &query)?;
                push_param(&mut query, "signature", &signature);
            }
        }

        let url = if query.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query)
        };
        tracing::debug!(%method, endpoint, ?security, "Sending Binance request");

        let mut request = self.http_client.request(method, &url);
        if let Some(api_key) = api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }
        let response = request.send().await?;

        self.parse_response(response).await
    }

    /// Parse a response from the Binance API.
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<T, BinanceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok());
        let body = response.text().await?;

        // 418 means the IP was banned for ignoring earlier 429s.
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::IM_A_TEAPOT {
            return Err(BinanceError::RateLimitExceeded { retry_after_secs });
        }

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiError>(&body) {
                Ok(api_error) if api_error.is_rate_limit() => {
                    BinanceError::RateLimitExceeded { retry_after_secs }
                }
                Ok(api_error) => BinanceError::Api(api_error),
                Err(_) => BinanceError::InvalidResponse(format!("HTTP {}: {}", status, body)),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            BinanceError::InvalidResponse(format!("Failed to parse response: {}. Body: {}", e, body))
        })
    }
}

fn push_param(query: &mut String, key: &str, value: &str) {
    if !query.is_empty() {
        query.push('&');
    }
    query.push_str(key);
    query.push('=');
    query.push_str(value);
}

impl Default for BinanceRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BinanceRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

/// Builder for [`BinanceRestClient`].
pub struct BinanceRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    timestamp_provider: Option<Arc<dyn TimestampProvider>>,
    user_agent: Option<String>,
    recv_window: Option<u64>,
    max_retries: u32,
}

impl BinanceRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BINANCE_BASE_URL.to_string(),
            credentials: None,
            timestamp_provider: None,
            user_agent: None,
            recv_window: None,
            max_retries: 0,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom timestamp provider for signed requests.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamp_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the default receive window (milliseconds) for signed requests.
    pub fn recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    /// Set the maximum number of retries for transient failures.
    ///
    /// Defaults to zero: each call is a single request/response pair.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the client.
    pub fn build(self) -> BinanceRestClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("binance-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("binance-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let mut client = ClientBuilder::new(reqwest_client).with(TracingMiddleware::default());
        if self.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
            client = client.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        let timestamp_provider = self
            .timestamp_provider
            .unwrap_or_else(|| Arc::new(SystemClock::new()));

        BinanceRestClient {
            http_client: client.build(),
            base_url: self.base_url.trim_end_matches('/').to_string(),
            credentials: self.credentials,
            timestamp_provider,
            recv_window: self.recv_window,
        }
    }
}

impl Default for BinanceRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
