//! WebSocket client: builds stream sessions for Binance endpoints.

use serde::de::DeserializeOwned;

use crate::spot::ws::events::{
    WsAggTradeEvent, WsDiffDepthEvent, WsEvent, WsKlineEvent, WsPartialDepthEvent, WsTickerEvent,
};
use crate::spot::ws::session::WsSession;
use crate::spot::ws::streams::{EventKind, MarketStream, decode_or_drop, typed_handler};
use crate::types::{DepthLevels, KlineInterval};

/// WebSocket endpoint URLs.
pub mod endpoints {
    /// Raw stream base URL.
    pub const WS_BASE: &str = "wss://stream.binance.com:9443/ws";
}

/// Configuration for WebSocket stream sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsConfig {
    /// Base URL every stream name is appended to.
    pub base_url: String,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            base_url: endpoints::WS_BASE.to_string(),
        }
    }
}

impl WsConfig {
    /// Create a new configuration builder.
    pub fn builder() -> WsConfigBuilder {
        WsConfigBuilder::new()
    }

    /// Full URL for `stream`.
    pub fn endpoint(&self, stream: &MarketStream) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), stream.name())
    }
}

/// Builder for [`WsConfig`].
#[derive(Debug, Clone, Default)]
pub struct WsConfigBuilder {
    config: WsConfig,
}

impl WsConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: WsConfig::default(),
        }
    }

    /// Set the stream base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> WsConfig {
        self.config
    }
}

/// Binance WebSocket stream client.
///
/// Each method returns an unconnected [`WsSession`] for one stream. Typed
/// methods decode every frame before calling the handler; frames that fail
/// to decode are dropped.
///
/// # Example
///
/// ```rust,ignore
/// use binance_api_client::spot::ws::BinanceWsClient;
/// use binance_api_client::types::KlineInterval;
///
/// let client = BinanceWsClient::new();
/// let session = client
///     .kline("BTCUSDT", KlineInterval::Min1, |event| {
///         println!("{} close {}", event.symbol, event.kline.close);
///     })
///     .with_error_handler(|err| eprintln!("read error: {err}"));
///
/// let handle = session.handle();
/// tokio::spawn(session.serve());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinanceWsClient {
    config: WsConfig,
}

impl BinanceWsClient {
    /// Create a new WebSocket client with default settings.
    pub fn new() -> Self {
        Self::with_config(WsConfig::default())
    }

    /// Create a new WebSocket client with custom configuration.
    pub fn with_config(config: WsConfig) -> Self {
        Self { config }
    }

    /// Create a client with a custom base URL (useful for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_config(WsConfig::builder().base_url(base_url).build())
    }

    /// Get the configuration.
    pub fn config(&self) -> &WsConfig {
        &self.config
    }

    /// Full URL for `stream`.
    pub fn endpoint(&self, stream: &MarketStream) -> String {
        self.config.endpoint(stream)
    }

    /// Session for `stream` that passes raw frame payloads to `handler`.
    pub fn raw<F>(&self, stream: &MarketStream, handler: F) -> WsSession
    where
        F: FnMut(&[u8]) + Send + 'static,
    {
        WsSession::new(self.endpoint(stream)).with_handler(handler)
    }

    /// Session for `stream` that decodes frames into [`WsEvent`].
    pub fn stream<F>(&self, stream: &MarketStream, handler: F) -> WsSession
    where
        F: FnMut(WsEvent) + Send + 'static,
    {
        let kind = stream.kind();
        WsSession::new(self.endpoint(stream))
            .with_handler(decode_or_drop(kind, move |payload| kind.decode(payload), handler))
    }

    /// Order book diffs for `symbol`.
    pub fn diff_depth<F>(&self, symbol: &str, handler: F) -> WsSession
    where
        F: FnMut(WsDiffDepthEvent) + Send + 'static,
    {
        self.typed(&MarketStream::diff_depth(symbol), handler)
    }

    /// Top `levels` bids and asks for `symbol`.
    pub fn partial_book_depth<F>(&self, symbol: &str, levels: DepthLevels, handler: F) -> WsSession
    where
        F: FnMut(WsPartialDepthEvent) + Send + 'static,
    {
        self.typed(&MarketStream::partial_depth(symbol, levels), handler)
    }

    /// Kline updates for `symbol`.
    pub fn kline<F>(&self, symbol: &str, interval: KlineInterval, handler: F) -> WsSession
    where
        F: FnMut(WsKlineEvent) + Send + 'static,
    {
        self.typed(&MarketStream::kline(symbol, interval), handler)
    }

    /// Aggregate trades for `symbol`.
    pub fn agg_trade<F>(&self, symbol: &str, handler: F) -> WsSession
    where
        F: FnMut(WsAggTradeEvent) + Send + 'static,
    {
        self.typed(&MarketStream::agg_trade(symbol), handler)
    }

    /// 24h tickers for every symbol that changed.
    pub fn all_market_tickers<F>(&self, handler: F) -> WsSession
    where
        F: FnMut(Vec<WsTickerEvent>) + Send + 'static,
    {
        self.typed(&MarketStream::AllMarketTickers, handler)
    }

    /// User data stream for `listen_key`.
    ///
    /// Payloads are passed through undecoded. Obtain the key with
    /// [`start_user_data_stream`](crate::spot::rest::BinanceRestClient::start_user_data_stream).
    pub fn user_data<F>(&self, listen_key: &str, handler: F) -> WsSession
    where
        F: FnMut(&[u8]) + Send + 'static,
    {
        self.raw(&MarketStream::user_data(listen_key), handler)
    }

    fn typed<T, F>(&self, stream: &MarketStream, handler: F) -> WsSession
    where
        T: DeserializeOwned + 'static,
        F: FnMut(T) + Send + 'static,
    {
        let kind: EventKind = stream.kind();
        WsSession::new(self.endpoint(stream)).with_handler(typed_handler(kind, handler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let client = BinanceWsClient::new();
        assert_eq!(client.config().base_url, "wss://stream.binance.com:9443/ws");
        assert_eq!(client.config(), &WsConfig::default());
    }

    #[test]
    fn test_session_endpoints() {
        let client = BinanceWsClient::new();
        assert_eq!(
            client
                .partial_book_depth("BTCUSDT", DepthLevels::Ten, |_| {})
                .endpoint(),
            "wss://stream.binance.com:9443/ws/btcusdt@depth10"
        );
        assert_eq!(
            client
                .kline("ethusdt", KlineInterval::Min1, |_| {})
                .endpoint(),
            "wss://stream.binance.com:9443/ws/ethusdt@kline_1m"
        );
        assert_eq!(
            client.diff_depth("BNBBTC", |_| {}).endpoint(),
            "wss://stream.binance.com:9443/ws/bnbbtc@depth"
        );
        assert_eq!(
            client.agg_trade("BNBBTC", |_| {}).endpoint(),
            "wss://stream.binance.com:9443/ws/bnbbtc@aggTrade"
        );
        assert_eq!(
            client.all_market_tickers(|_| {}).endpoint(),
            "wss://stream.binance.com:9443/ws/!ticker@arr"
        );
        assert_eq!(
            client.user_data("someListenKey", |_| {}).endpoint(),
            "wss://stream.binance.com:9443/ws/someListenKey"
        );
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let client = BinanceWsClient::with_base_url("ws://127.0.0.1:9000/ws/");
        assert_eq!(
            client.endpoint(&MarketStream::agg_trade("BTCUSDT")),
            "ws://127.0.0.1:9000/ws/btcusdt@aggTrade"
        );
        assert_eq!(
            client.stream(&MarketStream::AllMarketTickers, |_| {}).endpoint(),
            "ws://127.0.0.1:9000/ws/!ticker@arr"
        );
    }
}
