//! Common domain types for the Binance API.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of price levels in a partial book depth stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DepthLevels {
    /// Top 5 levels
    Five,
    /// Top 10 levels
    Ten,
    /// Top 20 levels
    Twenty,
}

impl From<DepthLevels> for u8 {
    fn from(levels: DepthLevels) -> u8 {
        match levels {
            DepthLevels::Five => 5,
            DepthLevels::Ten => 10,
            DepthLevels::Twenty => 20,
        }
    }
}

impl TryFrom<u8> for DepthLevels {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(DepthLevels::Five),
            10 => Ok(DepthLevels::Ten),
            20 => Ok(DepthLevels::Twenty),
            _ => Err(format!("Invalid depth levels: {} (expected 5, 10 or 20)", value)),
        }
    }
}

impl FromStr for DepthLevels {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .parse()
            .map_err(|_| format!("Invalid depth levels: {}", s))?;
        Self::try_from(value)
    }
}

impl fmt::Display for DepthLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Kline/candlestick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KlineInterval {
    /// 1 second
    #[serde(rename = "1s")]
    Sec1,
    /// 1 minute
    #[serde(rename = "1m")]
    Min1,
    /// 3 minutes
    #[serde(rename = "3m")]
    Min3,
    /// 5 minutes
    #[serde(rename = "5m")]
    Min5,
    /// 15 minutes
    #[serde(rename = "15m")]
    Min15,
    /// 30 minutes
    #[serde(rename = "30m")]
    Min30,
    /// 1 hour
    #[serde(rename = "1h")]
    Hour1,
    /// 2 hours
    #[serde(rename = "2h")]
    Hour2,
    /// 4 hours
    #[serde(rename = "4h")]
    Hour4,
    /// 6 hours
    #[serde(rename = "6h")]
    Hour6,
    /// 8 hours
    #[serde(rename = "8h")]
    Hour8,
    /// 12 hours
    #[serde(rename = "12h")]
    Hour12,
    /// 1 day
    #[serde(rename = "1d")]
    Day1,
    /// 3 days
    #[serde(rename = "3d")]
    Day3,
    /// 1 week
    #[serde(rename = "1w")]
    Week1,
    /// 1 month
    #[serde(rename = "1M")]
    Month1,
}

impl KlineInterval {
    /// Every supported interval, shortest first.
    pub const ALL: [KlineInterval; 16] = [
        KlineInterval::Sec1,
        KlineInterval::Min1,
        KlineInterval::Min3,
        KlineInterval::Min5,
        KlineInterval::Min15,
        KlineInterval::Min30,
        KlineInterval::Hour1,
        KlineInterval::Hour2,
        KlineInterval::Hour4,
        KlineInterval::Hour6,
        KlineInterval::Hour8,
        KlineInterval::Hour12,
        KlineInterval::Day1,
        KlineInterval::Day3,
        KlineInterval::Week1,
        KlineInterval::Month1,
    ];

    /// The wire representation used in stream names and REST parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            KlineInterval::Sec1 => "1s",
            KlineInterval::Min1 => "1m",
            KlineInterval::Min3 => "3m",
            KlineInterval::Min5 => "5m",
            KlineInterval::Min15 => "15m",
            KlineInterval::Min30 => "30m",
            KlineInterval::Hour1 => "1h",
            KlineInterval::Hour2 => "2h",
            KlineInterval::Hour4 => "4h",
            KlineInterval::Hour6 => "6h",
            KlineInterval::Hour8 => "8h",
            KlineInterval::Hour12 => "12h",
            KlineInterval::Day1 => "1d",
            KlineInterval::Day3 => "3d",
            KlineInterval::Week1 => "1w",
            KlineInterval::Month1 => "1M",
        }
    }
}

impl fmt::Display for KlineInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KlineInterval {
    type Err = String;

    // Case-sensitive: "1m" is a minute, "1M" is a month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| format!("Invalid kline interval: {}", s))
    }
}

/// One price level of an order book: `[price, quantity]`.
///
/// Binance encodes levels as JSON arrays of decimal strings. Any trailing
/// elements after the quantity are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price of the level
    pub price: Decimal,
    /// Quantity resting at the level
    pub quantity: Decimal,
}

/// A bid level.
pub type Bid = PriceLevel;
/// An ask level.
pub type Ask = PriceLevel;

impl<'de> Deserialize<'de> for PriceLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PriceLevelVisitor;

        impl<'de> Visitor<'de> for PriceLevelVisitor {
            type Value = PriceLevel;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of [price, quantity]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<PriceLevel, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let price = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let quantity = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(PriceLevel { price, quantity })
            }
        }

        deserializer.deserialize_seq(PriceLevelVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_levels_conversion() {
        assert_eq!(u8::from(DepthLevels::Ten), 10);
        assert_eq!(DepthLevels::try_from(20).unwrap(), DepthLevels::Twenty);
        assert_eq!("5".parse::<DepthLevels>().unwrap(), DepthLevels::Five);
        assert!(DepthLevels::try_from(15).is_err());
        assert!("ten".parse::<DepthLevels>().is_err());
        assert_eq!(DepthLevels::Ten.to_string(), "10");
    }

    #[test]
    fn test_kline_interval_parse_is_case_sensitive() {
        assert_eq!("1m".parse::<KlineInterval>().unwrap(), KlineInterval::Min1);
        assert_eq!("1M".parse::<KlineInterval>().unwrap(), KlineInterval::Month1);
        assert!("2m".parse::<KlineInterval>().is_err());
    }

    #[test]
    fn test_kline_interval_serde_matches_display() {
        for interval in KlineInterval::ALL {
            let json = serde_json::to_string(&interval).unwrap();
            assert_eq!(json, format!("\"{}\"", interval));
        }
        assert_eq!(
            serde_json::from_str::<KlineInterval>(r#""4h""#).unwrap(),
            KlineInterval::Hour4
        );
    }

    #[test]
    fn test_price_level_from_pair() {
        let level: PriceLevel = serde_json::from_str(r#"["0.0024","10"]"#).unwrap();
        assert_eq!(level.price, Decimal::from_str("0.0024").unwrap());
        assert_eq!(level.quantity, Decimal::from(10));
    }

    #[test]
    fn test_price_level_ignores_trailing_elements() {
        let level: PriceLevel = serde_json::from_str(r#"["0.0024","14.7",[]]"#).unwrap();
        assert_eq!(level.quantity, Decimal::from_str("14.7").unwrap());
    }

    #[test]
    fn test_price_level_rejects_short_array() {
        assert!(serde_json::from_str::<PriceLevel>(r#"["0.0024"]"#).is_err());
    }
}
