//! Binance Spot REST API client.
//!
//! Implements the request/response plumbing behind every REST call:
//! security levels, query signing and error mapping, plus the market
//! metadata, account and user data stream endpoints.
//!
//! # Trait-based API
//!
//! The [`BinanceClient`] trait abstracts the REST operations for mocking and
//! decoration.

mod client;
mod endpoints;
pub mod private;
pub mod public;
mod traits;

pub use client::{
    API_KEY_HEADER, BinanceRestClient, BinanceRestClientBuilder, RequestOptions, SecurityType,
};
pub use endpoints::*;
pub use traits::BinanceClient;
