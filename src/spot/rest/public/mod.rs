//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use serde::de::IgnoredAny;

use crate::error::BinanceError;
use crate::spot::rest::BinanceRestClient;
use crate::spot::rest::endpoints::public;

impl BinanceRestClient {
    /// Test connectivity to the REST API.
    pub async fn ping(&self) -> Result<(), BinanceError> {
        let _: IgnoredAny = self.public_get(public::PING).await?;
        Ok(())
    }

    /// Get the server time.
    ///
    /// Useful for checking clock drift before sending signed requests.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use binance_api_client::spot::rest::BinanceRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = BinanceRestClient::new();
    ///     let time = client.get_server_time().await?;
    ///     println!("Server time: {}", time.server_time);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_server_time(&self) -> Result<ServerTime, BinanceError> {
        self.public_get(public::TIME).await
    }

    /// Get exchange trading rules and symbol information.
    ///
    /// # Arguments
    ///
    /// * `request` - Optional filter on one or more symbols.
    pub async fn get_exchange_info(
        &self,
        request: Option<&ExchangeInfoRequest>,
    ) -> Result<ExchangeInfo, BinanceError> {
        match request {
            Some(req) => self.public_get_with_params(public::EXCHANGE_INFO, req).await,
            None => self.public_get(public::EXCHANGE_INFO).await,
        }
    }

    /// Get the system maintenance status.
    pub async fn get_system_status(&self) -> Result<SystemStatus, BinanceError> {
        self.public_get(public::SYSTEM_STATUS).await
    }
}
