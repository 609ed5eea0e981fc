//! Core domain types for the trading bot.
//!
//! - **Market data**: `Candle`, `CandleInterval`, `PriceSeries`
//! - **Orders**: `OrderSide`, `OrderType`, `OrderStatus`, `TimeInForce`

mod candle;
mod order;
mod series;

pub use candle::{Candle, CandleInterval, ParseIntervalError};
pub use order::{OrderSide, OrderStatus, OrderType, TimeInForce};
pub use series::PriceSeries;
