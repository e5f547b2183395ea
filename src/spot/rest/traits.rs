//! Trait definition for the Binance REST API client.
//!
//! [`BinanceClient`] abstracts the REST operations so callers can swap in a
//! mock or wrap the client with a decorator.
//!
//! # Example
//!
//! ```rust,ignore
//! use binance_api_client::spot::rest::{BinanceClient, BinanceRestClient};
//!
//! async fn check_status<C: BinanceClient>(client: &C) -> Result<(), binance_api_client::BinanceError> {
//!     let status = client.get_system_status().await?;
//!     println!("System status: {}", status.msg);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::BinanceError;
use crate::spot::rest::BinanceRestClient;
use crate::spot::rest::client::RequestOptions;
use crate::spot::rest::private::{AccountInfo, ListenKey};
use crate::spot::rest::public::{ExchangeInfo, ExchangeInfoRequest, ServerTime, SystemStatus};

/// Trait defining the Binance REST API operations.
pub trait BinanceClient: Send + Sync {
    /// Test connectivity.
    fn ping(&self) -> impl Future<Output = Result<(), BinanceError>> + Send;

    /// Get the server time.
    fn get_server_time(&self) -> impl Future<Output = Result<ServerTime, BinanceError>> + Send;

    /// Get exchange trading rules and symbol information.
    fn get_exchange_info(
        &self,
        request: Option<&ExchangeInfoRequest>,
    ) -> impl Future<Output = Result<ExchangeInfo, BinanceError>> + Send;

    /// Get the system maintenance status.
    fn get_system_status(&self)
    -> impl Future<Output = Result<SystemStatus, BinanceError>> + Send;

    /// Get account information.
    fn get_account(
        &self,
        options: Option<&RequestOptions>,
    ) -> impl Future<Output = Result<AccountInfo, BinanceError>> + Send;

    /// Start a user data stream.
    fn start_user_data_stream(&self)
    -> impl Future<Output = Result<ListenKey, BinanceError>> + Send;

    /// Keep a user data stream alive.
    fn keepalive_user_data_stream(
        &self,
        listen_key: &str,
    ) -> impl Future<Output = Result<(), BinanceError>> + Send;

    /// Close a user data stream.
    fn close_user_data_stream(
        &self,
        listen_key: &str,
    ) -> impl Future<Output = Result<(), BinanceError>> + Send;
}

impl BinanceClient for BinanceRestClient {
    async fn ping(&self) -> Result<(), BinanceError> {
        BinanceRestClient::ping(self).await
    }

    async fn get_server_time(&self) -> Result<ServerTime, BinanceError> {
        BinanceRestClient::get_server_time(self).await
    }

    async fn get_exchange_info(
        &self,
        request: Option<&ExchangeInfoRequest>,
    ) -> Result<ExchangeInfo, BinanceError> {
        BinanceRestClient::get_exchange_info(self, request).await
    }

    async fn get_system_status(&self) -> Result<SystemStatus, BinanceError> {
        BinanceRestClient::get_system_status(self).await
    }

    async fn get_account(
        &self,
        options: Option<&RequestOptions>,
    ) -> Result<AccountInfo, BinanceError> {
        BinanceRestClient::get_account(self, options).await
    }

    async fn start_user_data_stream(&self) -> Result<ListenKey, BinanceError> {
        BinanceRestClient::start_user_data_stream(self).await
    }

    async fn keepalive_user_data_stream(&self, listen_key: &str) -> Result<(), BinanceError> {
        BinanceRestClient::keepalive_user_data_stream(self, listen_key).await
    }

    async fn close_user_data_stream(&self, listen_key: &str) -> Result<(), BinanceError> {
        BinanceRestClient::close_user_data_stream(self, listen_key).await
    }
}
