//! Typed events delivered by Binance market data streams.
//!
//! Field names follow the wire format's single-letter keys; see each field
//! for the key it maps from.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_with::{TimestampMilliSeconds, serde_as};
use time::OffsetDateTime;

use crate::types::{Ask, Bid, KlineInterval};

/// Top `<levels>` bids and asks (`<symbol>@depth<levels>`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsPartialDepthEvent {
    /// Last update ID included in the snapshot.
    pub last_update_id: u64,
    /// Bid levels, best first.
    pub bids: Vec<Bid>,
    /// Ask levels, best first.
    pub asks: Vec<Ask>,
}

/// Order book diff (`<symbol>@depth`).
///
/// Used to maintain a local order book on top of a REST snapshot.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WsDiffDepthEvent {
    /// `e`: always `"depthUpdate"`.
    #[serde(rename = "e")]
    pub event_type: String,
    /// `E`: event time.
    #[serde(rename = "E")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub event_time: OffsetDateTime,
    /// `s`: symbol.
    #[serde(rename = "s")]
    pub symbol: String,
    /// `U`: first update ID in the event.
    #[serde(rename = "U", default)]
    pub first_update_id: u64,
    /// `u`: final update ID in the event.
    #[serde(rename = "u")]
    pub final_update_id: u64,
    /// `b`: bids to update; a zero quantity removes the level.
    #[serde(rename = "b")]
    pub bids: Vec<Bid>,
    /// `a`: asks to update; a zero quantity removes the level.
    #[serde(rename = "a")]
    pub asks: Vec<Ask>,
}

/// Kline update (`<symbol>@kline_<interval>`).
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WsKlineEvent {
    /// `e`: always `"kline"`.
    #[serde(rename = "e")]
    pub event_type: String,
    /// `E`: event time.
    #[serde(rename = "E")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub event_time: OffsetDateTime,
    /// `s`: symbol.
    #[serde(rename = "s")]
    pub symbol: String,
    /// `k`: the kline itself.
    #[serde(rename = "k")]
    pub kline: WsKline,
}

/// A single kline as carried in [`WsKlineEvent`].
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WsKline {
    /// `t`: kline start time.
    #[serde(rename = "t")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub start_time: OffsetDateTime,
    /// `T`: kline close time.
    #[serde(rename = "T")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub end_time: OffsetDateTime,
    /// `s`: symbol.
    #[serde(rename = "s")]
    pub symbol: String,
    /// `i`: interval.
    #[serde(rename = "i")]
    pub interval: KlineInterval,
    /// `f`: first trade ID.
    #[serde(rename = "f")]
    pub first_trade_id: i64,
    /// `L`: last trade ID.
    #[serde(rename = "L")]
    pub last_trade_id: i64,
    /// `o`: open price.
    #[serde(rename = "o")]
    pub open: Decimal,
    /// `c`: close price.
    #[serde(rename = "c")]
    pub close: Decimal,
    /// `h`: high price.
    #[serde(rename = "h")]
    pub high: Decimal,
    /// `l`: low price.
    #[serde(rename = "l")]
    pub low: Decimal,
    /// `v`: base asset volume.
    #[serde(rename = "v")]
    pub volume: Decimal,
    /// `n`: number of trades.
    #[serde(rename = "n")]
    pub trade_count: u64,
    /// `x`: whether this kline is closed.
    #[serde(rename = "x")]
    pub is_final: bool,
    /// `q`: quote asset volume.
    #[serde(rename = "q")]
    pub quote_volume: Decimal,
    /// `V`: taker buy base asset volume.
    #[serde(rename = "V")]
    pub taker_buy_volume: Decimal,
    /// `Q`: taker buy quote asset volume.
    #[serde(rename = "Q")]
    pub taker_buy_quote_volume: Decimal,
}

/// Aggregate trade (`<symbol>@aggTrade`).
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WsAggTradeEvent {
    /// `e`: always `"aggTrade"`.
    #[serde(rename = "e")]
    pub event_type: String,
    /// `E`: event time.
    #[serde(rename = "E")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub event_time: OffsetDateTime,
    /// `s`: symbol.
    #[serde(rename = "s")]
    pub symbol: String,
    /// `a`: aggregate trade ID.
    #[serde(rename = "a")]
    pub agg_trade_id: u64,
    /// `p`: price.
    #[serde(rename = "p")]
    pub price: Decimal,
    /// `q`: quantity.
    #[serde(rename = "q")]
    pub quantity: Decimal,
    /// `f`: first trade ID.
    #[serde(rename = "f")]
    pub first_trade_id: u64,
    /// `l`: last trade ID.
    #[serde(rename = "l")]
    pub last_trade_id: u64,
    /// `T`: trade time.
    #[serde(rename = "T")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub trade_time: OffsetDateTime,
    /// `m`: whether the buyer was the maker.
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
}

/// Rolling 24h ticker for one symbol, as found in `!ticker@arr`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WsTickerEvent {
    /// `e`: always `"24hrTicker"`.
    #[serde(rename = "e")]
    pub event_type: String,
    /// `E`: event time.
    #[serde(rename = "E")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub event_time: OffsetDateTime,
    /// `s`: symbol.
    #[serde(rename = "s")]
    pub symbol: String,
    /// `p`: price change.
    #[serde(rename = "p")]
    pub price_change: Decimal,
    /// `P`: price change percent.
    #[serde(rename = "P")]
    pub price_change_percent: Decimal,
    /// `w`: weighted average price.
    #[serde(rename = "w")]
    pub weighted_avg_price: Decimal,
    /// `x`: last price before the 24h window.
    #[serde(rename = "x")]
    pub prev_close_price: Decimal,
    /// `c`: last price.
    #[serde(rename = "c")]
    pub last_price: Decimal,
    /// `Q`: last quantity.
    #[serde(rename = "Q")]
    pub last_quantity: Decimal,
    /// `b`: best bid price.
    #[serde(rename = "b")]
    pub bid_price: Decimal,
    /// `B`: best bid quantity.
    #[serde(rename = "B")]
    pub bid_quantity: Decimal,
    /// `a`: best ask price.
    #[serde(rename = "a")]
    pub ask_price: Decimal,
    /// `A`: best ask quantity.
    #[serde(rename = "A")]
    pub ask_quantity: Decimal,
    /// `o`: open price.
    #[serde(rename = "o")]
    pub open_price: Decimal,
    /// `h`: high price.
    #[serde(rename = "h")]
    pub high_price: Decimal,
    /// `l`: low price.
    #[serde(rename = "l")]
    pub low_price: Decimal,
    /// `v`: base asset volume.
    #[serde(rename = "v")]
    pub volume: Decimal,
    /// `q`: quote asset volume.
    #[serde(rename = "q")]
    pub quote_volume: Decimal,
    /// `O`: statistics open time.
    #[serde(rename = "O")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub open_time: OffsetDateTime,
    /// `C`: statistics close time.
    #[serde(rename = "C")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub close_time: OffsetDateTime,
    /// `F`: first trade ID.
    #[serde(rename = "F")]
    pub first_trade_id: i64,
    /// `L`: last trade ID.
    #[serde(rename = "L")]
    pub last_trade_id: i64,
    /// `n`: number of trades.
    #[serde(rename = "n")]
    pub trade_count: u64,
}

/// Any event a stream session can decode.
#[derive(Debug, Clone, PartialEq)]
pub enum WsEvent {
    /// Partial book depth snapshot.
    PartialDepth(WsPartialDepthEvent),
    /// Order book diff.
    DiffDepth(WsDiffDepthEvent),
    /// Kline update.
    Kline(WsKlineEvent),
    /// Aggregate trade.
    AggTrade(WsAggTradeEvent),
    /// All-market 24h tickers.
    AllMarketTickers(Vec<WsTickerEvent>),
    /// User data payload, left as JSON.
    UserData(serde_json::Value),
}
