//! Wire types for the Binance spot REST API.

use crate::error::ExchangeError;
use model::{Candle, OrderSide, OrderStatus, OrderType, TimeInForce};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Deserialize a `Decimal` sent as a JSON string.
fn decimal_from_str<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    s.parse::<Decimal>().map_err(serde::de::Error::custom)
}

/// Response from GET /api/v3/time.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    #[serde(rename = "serverTime")]
    pub server_time: i64,
}

/// One asset row of the account snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetBalance {
    pub asset: String,
    #[serde(deserialize_with = "decimal_from_str")]
    pub free: Decimal,
    #[serde(deserialize_with = "decimal_from_str")]
    pub locked: Decimal,
}

impl AssetBalance {
    /// Everything in the wallet for this asset, free plus locked.
    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }

    /// An all-zero balance for an asset the account does not hold.
    pub fn zero(asset: &str) -> Self {
        Self {
            asset: asset.to_string(),
            free: Decimal::ZERO,
            locked: Decimal::ZERO,
        }
    }
}

/// Response from GET /api/v3/account (fields the bot consumes).
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub balances: Vec<AssetBalance>,
}

impl AccountInfo {
    /// Balance row for an asset, zero when the account does not hold it.
    pub fn balance(&self, asset: &str) -> AssetBalance {
        self.balances
            .iter()
            .find(|b| b.asset == asset)
            .cloned()
            .unwrap_or_else(|| AssetBalance::zero(asset))
    }
}

/// One open order from GET /api/v3/openOrders.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrder {
    #[serde(rename = "orderId")]
    pub order_id: u64,
    pub side: OrderSide,
    pub status: OrderStatus,
    #[serde(deserialize_with = "decimal_from_str")]
    pub price: Decimal,
    #[serde(rename = "origQty", deserialize_with = "decimal_from_str")]
    pub orig_qty: Decimal,
    #[serde(rename = "executedQty", deserialize_with = "decimal_from_str")]
    pub executed_qty: Decimal,
}

/// One historical order from GET /api/v3/allOrders.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "orderId")]
    pub order_id: u64,
    pub side: OrderSide,
    pub status: OrderStatus,
    /// Order creation time in milliseconds.
    pub time: i64,
    #[serde(deserialize_with = "decimal_from_str")]
    pub price: Decimal,
    #[serde(rename = "origQty", deserialize_with = "decimal_from_str")]
    pub orig_qty: Decimal,
    #[serde(rename = "executedQty", deserialize_with = "decimal_from_str")]
    pub executed_qty: Decimal,
    #[serde(rename = "cummulativeQuoteQty", deserialize_with = "decimal_from_str")]
    pub cummulative_quote_qty: Decimal,
}

impl OrderRecord {
    /// Average executed price, when anything executed.
    pub fn executed_price(&self) -> Option<Decimal> {
        if self.executed_qty > Decimal::ZERO {
            Some(self.cummulative_quote_qty / self.executed_qty)
        } else {
            None
        }
    }
}

/// One fill of an order response with `newOrderRespType=FULL`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderFill {
    #[serde(deserialize_with = "decimal_from_str")]
    pub price: Decimal,
    #[serde(deserialize_with = "decimal_from_str")]
    pub qty: Decimal,
    #[serde(deserialize_with = "decimal_from_str")]
    pub commission: Decimal,
    #[serde(rename = "commissionAsset")]
    pub commission_asset: String,
}

/// Response from POST /api/v3/order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderReceipt {
    pub symbol: String,
    #[serde(rename = "orderId")]
    pub order_id: u64,
    #[serde(rename = "transactTime")]
    pub transact_time: i64,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    #[serde(deserialize_with = "decimal_from_str")]
    pub price: Decimal,
    #[serde(rename = "origQty", deserialize_with = "decimal_from_str")]
    pub orig_qty: Decimal,
    #[serde(rename = "executedQty", deserialize_with = "decimal_from_str")]
    pub executed_qty: Decimal,
    #[serde(rename = "cummulativeQuoteQty", deserialize_with = "decimal_from_str")]
    pub cummulative_quote_qty: Decimal,
    #[serde(default)]
    pub fills: Vec<OrderFill>,
}

impl OrderReceipt {
    /// Whether the exchange reports the order fully filled.
    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }

    /// Price of the first fill, when fills were reported.
    pub fn first_fill_price(&self) -> Option<Decimal> {
        self.fills.first().map(|f| f.price)
    }
}

/// Response from DELETE /api/v3/order.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelReceipt {
    #[serde(rename = "orderId")]
    pub order_id: u64,
    pub status: OrderStatus,
}

/// One kline row: Binance sends a heterogeneous JSON array per candle.
#[derive(Debug, Clone, Deserialize)]
pub struct KlineRow(
    pub i64,    // open time
    pub String, // open
    pub String, // high
    pub String, // low
    pub String, // close
    pub String, // volume
    pub i64,    // close time
    pub String, // quote asset volume
    pub u64,    // number of trades
    pub String, // taker buy base volume
    pub String, // taker buy quote volume
    pub String, // unused
);

impl TryFrom<KlineRow> for Candle {
    type Error = ExchangeError;

    fn try_from(row: KlineRow) -> Result<Self, Self::Error> {
        let parse = |s: &str| {
            s.parse::<Decimal>()
                .map_err(|e| ExchangeError::Parse(format!("kline field '{}': {}", s, e)))
        };

        Ok(Candle {
            open_time_ms: row.0,
            open: parse(&row.1)?,
            high: parse(&row.2)?,
            low: parse(&row.3)?,
            close: parse(&row.4)?,
            volume: parse(&row.5)?,
            close_time_ms: row.6,
        })
    }
}

/// Raw symbol filter entry from GET /api/v3/exchangeInfo.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFilter {
    #[serde(rename = "filterType")]
    pub filter_type: String,
    #[serde(rename = "tickSize")]
    pub tick_size: Option<String>,
    #[serde(rename = "stepSize")]
    pub step_size: Option<String>,
}

/// Per-symbol section of exchangeInfo.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolInfo {
    pub symbol: String,
    pub filters: Vec<RawFilter>,
}

/// Response from GET /api/v3/exchangeInfo.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

/// Exchange precision constraints for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolFilters {
    /// Minimum price increment (PRICE_FILTER.tickSize).
    pub tick_size: Decimal,
    /// Minimum quantity increment (LOT_SIZE.stepSize).
    pub step_size: Decimal,
}

impl TryFrom<&SymbolInfo> for SymbolFilters {
    type Error = ExchangeError;

    fn try_from(info: &SymbolInfo) -> Result<Self, Self::Error> {
        let find = |filter_type: &str, value: fn(&RawFilter) -> Option<&String>| {
            info.filters
                .iter()
                .find(|f| f.filter_type == filter_type)
                .and_then(value)
        };

        let tick = find("PRICE_FILTER", |f| f.tick_size.as_ref())
            .ok_or(ExchangeError::MissingFilter("PRICE_FILTER.tickSize"))?;
        let step = find("LOT_SIZE", |f| f.step_size.as_ref())
            .ok_or(ExchangeError::MissingFilter("LOT_SIZE.stepSize"))?;

        let parse = |s: &String| {
            s.parse::<Decimal>()
                .map_err(|e| ExchangeError::Parse(format!("symbol filter '{}': {}", s, e)))
        };

        Ok(SymbolFilters {
            tick_size: parse(tick)?,
            step_size: parse(step)?,
        })
    }
}
