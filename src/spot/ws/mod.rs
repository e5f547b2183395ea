//! Binance Spot WebSocket streams.
//!
//! A [`WsSession`] owns one connection to one stream endpoint. It passes
//! every text or binary frame to a handler, reports read errors to an error
//! handler, and runs until [`SessionHandle::shutdown`] is called.
//! [`BinanceWsClient`] builds sessions for the market and user data streams
//! and optionally decodes their payloads.
//!
//! # Example
//!
//! ```rust,ignore
//! use binance_api_client::spot::ws::BinanceWsClient;
//! use binance_api_client::types::DepthLevels;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BinanceWsClient::new();
//!     let session = client
//!         .partial_book_depth("BTCUSDT", DepthLevels::Five, |depth| {
//!             if let (Some(bid), Some(ask)) = (depth.bids.first(), depth.asks.first()) {
//!                 println!("{} / {}", bid.price, ask.price);
//!             }
//!         })
//!         .with_error_handler(|err| eprintln!("read error: {err}"));
//!
//!     let handle = session.handle();
//!     tokio::spawn(async move {
//!         tokio::signal::ctrl_c().await.ok();
//!         handle.shutdown();
//!     });
//!
//!     session.serve().await?;
//!     Ok(())
//! }
//! ```

mod client;
pub mod events;
mod session;
mod streams;

pub use client::{BinanceWsClient, WsConfig, WsConfigBuilder, endpoints};
pub use events::{
    WsAggTradeEvent, WsDiffDepthEvent, WsEvent, WsKline, WsKlineEvent, WsPartialDepthEvent,
    WsTickerEvent,
};
pub use session::{SessionHandle, SessionState, WsErrorHandler, WsHandler, WsSession};
pub use streams::{EventKind, MarketStream};
