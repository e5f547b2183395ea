//! Stream names and payload decoding.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::spot::ws::events::WsEvent;
use crate::spot::ws::session::WsHandler;
use crate::types::{DepthLevels, KlineInterval};

/// A Binance stream a session can subscribe to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarketStream {
    /// `<symbol>@depth`
    DiffDepth {
        /// Trading symbol, any case.
        symbol: String,
    },
    /// `<symbol>@depth<levels>`
    PartialDepth {
        /// Trading symbol, any case.
        symbol: String,
        /// Number of levels per side.
        levels: DepthLevels,
    },
    /// `<symbol>@kline_<interval>`
    Kline {
        /// Trading symbol, any case.
        symbol: String,
        /// Kline interval.
        interval: KlineInterval,
    },
    /// `<symbol>@aggTrade`
    AggTrade {
        /// Trading symbol, any case.
        symbol: String,
    },
    /// `!ticker@arr`
    AllMarketTickers,
    /// `<listenKey>`
    UserData {
        /// Listen key from [`start_user_data_stream`](crate::spot::rest::BinanceRestClient::start_user_data_stream).
        listen_key: String,
    },
}

impl MarketStream {
    /// Diff depth stream for `symbol`.
    pub fn diff_depth(symbol: impl Into<String>) -> Self {
        MarketStream::DiffDepth {
            symbol: symbol.into(),
        }
    }

    /// Partial book depth stream for `symbol`.
    pub fn partial_depth(symbol: impl Into<String>, levels: DepthLevels) -> Self {
        MarketStream::PartialDepth {
            symbol: symbol.into(),
            levels,
        }
    }

    /// Kline stream for `symbol`.
    pub fn kline(symbol: impl Into<String>, interval: KlineInterval) -> Self {
        MarketStream::Kline {
            symbol: symbol.into(),
            interval,
        }
    }

    /// Aggregate trade stream for `symbol`.
    pub fn agg_trade(symbol: impl Into<String>) -> Self {
        MarketStream::AggTrade {
            symbol: symbol.into(),
        }
    }

    /// User data stream for `listen_key`.
    pub fn user_data(listen_key: impl Into<String>) -> Self {
        MarketStream::UserData {
            listen_key: listen_key.into(),
        }
    }

    /// Stream name as it appears after the base URL.
    ///
    /// Symbols are lowercased; listen keys are used verbatim.
    pub fn name(&self) -> String {
        match self {
            MarketStream::DiffDepth { symbol } => format!("{}@depth", symbol.to_lowercase()),
            MarketStream::PartialDepth { symbol, levels } => {
                format!("{}@depth{}", symbol.to_lowercase(), levels)
            }
            MarketStream::Kline { symbol, interval } => {
                format!("{}@kline_{}", symbol.to_lowercase(), interval)
            }
            MarketStream::AggTrade { symbol } => format!("{}@aggTrade", symbol.to_lowercase()),
            MarketStream::AllMarketTickers => "!ticker@arr".to_string(),
            MarketStream::UserData { listen_key } => listen_key.clone(),
        }
    }

    /// The kind of event this stream carries.
    pub fn kind(&self) -> EventKind {
        match self {
            MarketStream::DiffDepth { .. } => EventKind::DiffDepth,
            MarketStream::PartialDepth { .. } => EventKind::PartialDepth,
            MarketStream::Kline { .. } => EventKind::Kline,
            MarketStream::AggTrade { .. } => EventKind::AggTrade,
            MarketStream::AllMarketTickers => EventKind::AllMarketTickers,
            MarketStream::UserData { .. } => EventKind::UserData,
        }
    }
}

impl fmt::Display for MarketStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Payload type carried by a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`WsEvent::DiffDepth`]
    DiffDepth,
    /// [`WsEvent::PartialDepth`]
    PartialDepth,
    /// [`WsEvent::Kline`]
    Kline,
    /// [`WsEvent::AggTrade`]
    AggTrade,
    /// [`WsEvent::AllMarketTickers`]
    AllMarketTickers,
    /// [`WsEvent::UserData`]
    UserData,
}

impl EventKind {
    /// Resolve the kind from a market stream suffix.
    ///
    /// The suffix is the part after `@` (`depth`, `depth10`, `kline_1m`,
    /// `aggTrade`), or the whole `!ticker@arr`. Returns `None` for anything
    /// else; user data streams have no suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "depth" => Some(EventKind::DiffDepth),
            "aggTrade" => Some(EventKind::AggTrade),
            "!ticker@arr" => Some(EventKind::AllMarketTickers),
            _ => {
                if let Some(levels) = suffix.strip_prefix("depth") {
                    return levels
                        .parse::<DepthLevels>()
                        .ok()
                        .map(|_| EventKind::PartialDepth);
                }
                suffix
                    .strip_prefix("kline_")
                    .and_then(|interval| interval.parse::<KlineInterval>().ok())
                    .map(|_| EventKind::Kline)
            }
        }
    }

    /// Resolve the kind from a full stream name such as `btcusdt@kline_1m`.
    pub fn from_stream_name(name: &str) -> Option<Self> {
        if name == "!ticker@arr" {
            return Some(EventKind::AllMarketTickers);
        }
        name.split_once('@')
            .and_then(|(_, suffix)| EventKind::from_suffix(suffix))
    }

    /// Decode a frame payload as this kind of event.
    pub fn decode(self, payload: &[u8]) -> Result<WsEvent, serde_json::Error> {
        Ok(match self {
            EventKind::DiffDepth => WsEvent::DiffDepth(serde_json::from_slice(payload)?),
            EventKind::PartialDepth => WsEvent::PartialDepth(serde_json::from_slice(payload)?),
            EventKind::Kline => WsEvent::Kline(serde_json::from_slice(payload)?),
            EventKind::AggTrade => WsEvent::AggTrade(serde_json::from_slice(payload)?),
            EventKind::AllMarketTickers => {
                WsEvent::AllMarketTickers(serde_json::from_slice(payload)?)
            }
            EventKind::UserData => WsEvent::UserData(serde_json::from_slice(payload)?),
        })
    }

    /// Short name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::DiffDepth => "diffDepth",
            EventKind::PartialDepth => "partialDepth",
            EventKind::Kline => "kline",
            EventKind::AggTrade => "aggTrade",
            EventKind::AllMarketTickers => "allMarketTickers",
            EventKind::UserData => "userData",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap a typed callback in a raw frame handler.
///
/// Frames that fail to decode are logged at debug level and dropped; the
/// callback only ever sees well-formed events.
pub(crate) fn decode_or_drop<T, D, F>(kind: EventKind, decode: D, mut handler: F) -> WsHandler
where
    T: 'static,
    D: Fn(&[u8]) -> Result<T, serde_json::Error> + Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    Box::new(move |payload: &[u8]| match decode(payload) {
        Ok(event) => handler(event),
        Err(e) => {
            tracing::debug!(
                "Dropping undecodable {} frame ({} bytes): {}",
                kind,
                payload.len(),
                e
            );
        }
    })
}

/// [`decode_or_drop`] for a single event type.
pub(crate) fn typed_handler<T, F>(kind: EventKind, handler: F) -> WsHandler
where
    T: DeserializeOwned + 'static,
    F: FnMut(T) + Send + 'static,
{
    decode_or_drop(kind, |payload| serde_json::from_slice::<T>(payload), handler)
}
