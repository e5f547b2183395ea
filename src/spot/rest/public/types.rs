//! Types for public REST API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use serde_with::{TimestampMilliSeconds, serde_as};
use time::OffsetDateTime;

/// Server time response.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Current server time.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub server_time: OffsetDateTime,
}

/// System maintenance status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemStatus {
    /// `0` for normal operation, `1` for system maintenance.
    pub status: u8,
    /// `"normal"` or `"system_maintenance"`.
    pub msg: String,
}

impl SystemStatus {
    /// Whether the system is operating normally.
    pub fn is_normal(&self) -> bool {
        self.status == 0
    }
}

/// Request parameters for exchange info.
///
/// Leave both fields empty to get every symbol.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExchangeInfoRequest {
    /// A single symbol to get info for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Several symbols, sent as a JSON array.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "symbols_as_json"
    )]
    pub symbols: Option<Vec<String>>,
}

impl ExchangeInfoRequest {
    /// Create a request for a single symbol.
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into().to_uppercase()),
            symbols: None,
        }
    }

    /// Create a request for several symbols.
    pub fn for_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbol: None,
            symbols: Some(symbols.into_iter().map(|s| s.into().to_uppercase()).collect()),
        }
    }
}

fn symbols_as_json<S>(symbols: &Option<Vec<String>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let json = serde_json::to_string(symbols).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&json)
}

/// Exchange trading rules and symbol information.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    /// Server timezone (always `"UTC"`).
    pub timezone: String,
    /// Server time at the moment of the response.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub server_time: OffsetDateTime,
    /// Rate limits applied to the API.
    #[serde(default)]
    pub rate_limits: Vec<RateLimit>,
    /// Trading symbols.
    #[serde(default)]
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    /// Look up a symbol, ignoring case.
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.symbols
            .iter()
            .find(|info| info.symbol.eq_ignore_ascii_case(symbol))
    }
}

/// Kind of rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateLimitType {
    /// Request weight budget
    RequestWeight,
    /// Order placement budget
    Orders,
    /// Raw request count budget
    RawRequests,
}

/// Unit of a rate limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RateLimitInterval {
    /// Seconds
    Second,
    /// Minutes
    Minute,
    /// Days
    Day,
}

/// A rate limit applied by the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    /// What the limit counts.
    pub rate_limit_type: RateLimitType,
    /// Window unit.
    pub interval: RateLimitInterval,
    /// Number of units in the window.
    #[serde(default = "default_interval_num")]
    pub interval_num: u32,
    /// Maximum allowed within the window.
    pub limit: u32,
}

fn default_interval_num() -> u32 {
    1
}

/// Trading rules for one symbol.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    /// Symbol name (e.g. `"BTCUSDT"`).
    pub symbol: String,
    /// Trading status (e.g. `"TRADING"`, `"BREAK"`).
    pub status: String,
    /// Base asset.
    pub base_asset: String,
    /// Precision of the base asset.
    pub base_asset_precision: u32,
    /// Quote asset.
    pub quote_asset: String,
    /// Precision of the quote asset.
    pub quote_asset_precision: u32,
    /// Allowed order types.
    #[serde(default)]
    pub order_types: Vec<String>,
    /// Whether iceberg orders are allowed.
    #[serde(default)]
    pub iceberg_allowed: bool,
    /// Whether spot trading is allowed.
    #[serde(default)]
    pub is_spot_trading_allowed: bool,
    /// Trading filters.
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
}

impl SymbolInfo {
    /// The `PRICE_FILTER` rule, if present.
    pub fn price_filter(&self) -> Option<&PriceFilter> {
        self.filters.iter().find_map(|filter| match filter {
            SymbolFilter::PriceFilter(f) => Some(f),
            _ => None,
        })
    }

    /// The `LOT_SIZE` rule, if present.
    pub fn lot_size(&self) -> Option<&LotSize> {
        self.filters.iter().find_map(|filter| match filter {
            SymbolFilter::LotSize(f) => Some(f),
            _ => None,
        })
    }
}

/// A symbol trading filter.
///
/// Filters this crate does not model decode as [`SymbolFilter::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "filterType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolFilter {
    /// Price bounds and tick size.
    PriceFilter(PriceFilter),
    /// Quantity bounds and step size.
    LotSize(LotSize),
    /// Quantity bounds and step size for market orders.
    MarketLotSize(LotSize),
    /// Minimum notional value (legacy).
    MinNotional(MinNotional),
    /// Notional value bounds.
    Notional(Notional),
    /// Any other filter type.
    #[serde(other)]
    Other,
}

/// `PRICE_FILTER` rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilter {
    /// Minimum price.
    pub min_price: Decimal,
    /// Maximum price.
    pub max_price: Decimal,
    /// Price increment.
    pub tick_size: Decimal,
}

/// `LOT_SIZE` / `MARKET_LOT_SIZE` rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotSize {
    /// Minimum quantity.
    pub min_qty: Decimal,
    /// Maximum quantity.
    pub max_qty: Decimal,
    /// Quantity increment.
    pub step_size: Decimal,
}

/// `MIN_NOTIONAL` rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinNotional {
    /// Minimum `price * quantity`.
    pub min_notional: Decimal,
    /// Whether the rule also applies to market orders.
    #[serde(default)]
    pub apply_to_market: bool,
}

/// `NOTIONAL` rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notional {
    /// Minimum `price * quantity`.
    pub min_notional: Decimal,
    /// Maximum `price * quantity`.
    pub max_notional: Decimal,
}
