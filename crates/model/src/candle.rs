//! Candle (OHLCV) row and kline interval.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One interval's open/high/low/close prices and traded volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Interval open time in milliseconds since epoch.
    pub open_time_ms: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Base-asset volume traded during the interval.
    pub volume: Decimal,
    /// Interval close time in milliseconds since epoch.
    pub close_time_ms: i64,
}

/// Kline interval supported by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandleInterval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl CandleInterval {
    /// Exchange query-string form (e.g. "15m").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
        }
    }
}

impl fmt::Display for CandleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandleInterval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Self::OneMinute),
            "5m" => Ok(Self::FiveMinutes),
            "15m" => Ok(Self::FifteenMinutes),
            "30m" => Ok(Self::ThirtyMinutes),
            "1h" => Ok(Self::OneHour),
            "4h" => Ok(Self::FourHours),
            "1d" => Ok(Self::OneDay),
            _ => Err(ParseIntervalError(s.to_string())),
        }
    }
}

/// Error parsing a kline interval string.
#[derive(Debug, Clone)]
pub struct ParseIntervalError(String);

impl fmt::Display for ParseIntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported candle interval '{}'", self.0)
    }
}

impl std::error::Error for ParseIntervalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_roundtrip() {
        for s in ["1m", "5m", "15m", "30m", "1h", "4h", "1d"] {
            let interval: CandleInterval = s.parse().unwrap();
            assert_eq!(interval.as_str(), s);
        }
        assert!("7m".parse::<CandleInterval>().is_err());
    }

    #[test]
    fn test_interval_serde_uses_exchange_form() {
        let json = serde_json::to_string(&CandleInterval::FifteenMinutes).unwrap();
        assert_eq!(json, "\"15m\"");

        let parsed: CandleInterval = serde_json::from_str("\"1h\"").unwrap();
        assert_eq!(parsed, CandleInterval::OneHour);
    }
}
