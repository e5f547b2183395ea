//! Binance Spot API clients.
//!
//! This module provides:
//! - [`rest`] - REST API client for HTTP-based requests
//! - [`ws`] - WebSocket stream sessions for real-time market and user data

pub mod rest;
pub mod ws;

pub use rest::BinanceRestClient;
pub use ws::BinanceWsClient;
