//! # Binance Client
//!
//! An async Rust client library for the Binance Spot REST API and WebSocket
//! market streams.
//!
//! ## Features
//!
//! - REST endpoints for market metadata, system status, account data and
//!   user data stream listen keys
//! - HMAC-SHA256 request signing
//! - WebSocket stream sessions with cooperative shutdown
//! - Typed decoding of depth, kline, aggregate trade and ticker events
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use binance_api_client::spot::rest::BinanceRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BinanceRestClient::new();
//!     let time = client.get_server_time().await?;
//!     println!("Server time: {:?}", time);
//!     Ok(())
//! }
//! ```
//!
//! Streaming partial depth until the first update arrives:
//!
//! ```rust,no_run
//! use binance_api_client::spot::ws::BinanceWsClient;
//! use binance_api_client::types::DepthLevels;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BinanceWsClient::new();
//!     let session = client.partial_book_depth("BTCUSDT", DepthLevels::Ten, |event| {
//!         println!("best bid: {:?}", event.bids.first());
//!     });
//!     let handle = session.handle();
//!     tokio::spawn(async move {
//!         tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!         handle.shutdown();
//!     });
//!     session.serve().await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod spot;
pub mod types;

// Re-export commonly used types at crate root
pub use error::BinanceError;
pub use types::common::{DepthLevels, KlineInterval, PriceLevel};

/// Result type alias using BinanceError
pub type Result<T> = std::result::Result<T, BinanceError>;
