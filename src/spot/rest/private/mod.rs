//! Private REST API endpoints (API key or signature required).

mod types;

pub use types::{AccountInfo, Balance, ListenKey};

use reqwest::Method;
use serde::de::IgnoredAny;

use crate::error::BinanceError;
use crate::spot::rest::BinanceRestClient;
use crate::spot::rest::client::{NoParams, RequestOptions, SecurityType};
use crate::spot::rest::endpoints::private;
use types::ListenKeyParams;

impl BinanceRestClient {
    /// Get current account information.
    ///
    /// Signed endpoint.
    ///
    /// # Arguments
    ///
    /// * `options` - Optional per-request receive window.
    pub async fn get_account(
        &self,
        options: Option<&RequestOptions>,
    ) -> Result<AccountInfo, BinanceError> {
        self.call_api(
            Method::GET,
            private::ACCOUNT,
            SecurityType::Signed,
            &NoParams {},
            options,
        )
        .await
    }

    /// Start a new user data stream.
    ///
    /// The returned listen key stays valid for 60 minutes unless kept alive.
    /// Pass it to [`BinanceWsClient::user_data`](crate::spot::ws::BinanceWsClient::user_data).
    pub async fn start_user_data_stream(&self) -> Result<ListenKey, BinanceError> {
        self.call_api(
            Method::POST,
            private::USER_DATA_STREAM,
            SecurityType::ApiKey,
            &NoParams {},
            None,
        )
        .await
    }

    /// Extend a user data stream's validity by 60 minutes.
    ///
    /// Binance recommends calling this about every 30 minutes.
    pub async fn keepalive_user_data_stream(&self, listen_key: &str) -> Result<(), BinanceError> {
        let _: IgnoredAny = self
            .call_api(
                Method::PUT,
                private::USER_DATA_STREAM,
                SecurityType::ApiKey,
                &ListenKeyParams { listen_key },
                None,
            )
            .await?;
        Ok(())
    }

    /// Close a user data stream.
    pub async fn close_user_data_stream(&self, listen_key: &str) -> Result<(), BinanceError> {
        let _: IgnoredAny = self
            .call_api(
                Method::DELETE,
                private::USER_DATA_STREAM,
                SecurityType::ApiKey,
                &ListenKeyParams { listen_key },
                None,
            )
            .await?;
        Ok(())
    }
}
