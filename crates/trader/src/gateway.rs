//! Exchange gateway seam.
//!
//! The engine depends on this trait rather than the concrete REST client so
//! the whole cycle state machine can run against a scripted gateway in
//! tests.

use async_trait::async_trait;
use binance_spot::{
    AssetBalance, BinanceSpotClient, ExchangeError, OpenOrder, OrderReceipt, OrderRecord,
    SymbolFilters,
};
use model::{Candle, CandleInterval, OrderSide, OrderType, TimeInForce};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Exchange operations the trading cycle consumes.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Most recent `limit` candles, ascending time order.
    async fn candles(
        &self,
        symbol: &str,
        interval: CandleInterval,
        limit: u32,
    ) -> Result<Vec<Candle>, ExchangeError>;

    /// Wallet balance for an asset (zero when not held).
    async fn asset_balance(&self, asset: &str) -> Result<AssetBalance, ExchangeError>;

    /// Open orders for a symbol.
    async fn open_orders(&self, symbol: &str) -> Result<Vec<OpenOrder>, ExchangeError>;

    /// Most recent `limit` orders for a symbol, any status.
    async fn order_history(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<OrderRecord>, ExchangeError>;

    /// Place an order. Quantities and prices must already be quantized.
    async fn place_order(
        &self,
        symbol: &str,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
        price: Option<Decimal>,
        time_in_force: Option<TimeInForce>,
    ) -> Result<OrderReceipt, ExchangeError>;

    /// Cancel an order by exchange order ID.
    async fn cancel_order(&self, symbol: &str, order_id: u64) -> Result<(), ExchangeError>;

    /// Precision filters for a symbol.
    async fn symbol_filters(&self, symbol: &str) -> Result<SymbolFilters, ExchangeError>;
}

#[async_trait]
impl ExchangeGateway for BinanceSpotClient {
    async fn candles(
        &self,
        symbol: &str,
        interval: CandleInterval,
        limit: u32,
    ) -> Result<Vec<Candle>, ExchangeError> {
        self.klines(symbol, interval, limit).await
    }

    async fn asset_balance(&self, asset: &str) -> Result<AssetBalance, ExchangeError> {
        BinanceSpotClient::asset_balance(self, asset).await
    }

    async fn open_orders(&self, symbol: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        BinanceSpotClient::open_orders(self, symbol).await
    }

    async fn order_history(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<OrderRecord>, ExchangeError> {
        self.all_orders(symbol, limit).await
    }

    async fn place_order(
        &self,
        symbol: &str,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
        price: Option<Decimal>,
        time_in_force: Option<TimeInForce>,
    ) -> Result<OrderReceipt, ExchangeError> {
        BinanceSpotClient::place_order(self, symbol, side, order_type, quantity, price, time_in_force)
            .await
    }

    async fn cancel_order(&self, symbol: &str, order_id: u64) -> Result<(), ExchangeError> {
        BinanceSpotClient::cancel_order(self, symbol, order_id).await
    }

    async fn symbol_filters(&self, symbol: &str) -> Result<SymbolFilters, ExchangeError> {
        BinanceSpotClient::symbol_filters(self, symbol).await
    }
}

/// Forwarding impl so one client can be shared across asset loops.
#[async_trait]
impl<G: ExchangeGateway> ExchangeGateway for Arc<G> {
    async fn candles(
        &self,
        symbol: &str,
        interval: CandleInterval,
        limit: u32,
    ) -> Result<Vec<Candle>, ExchangeError> {
        (**self).candles(symbol, interval, limit).await
    }

    async fn asset_balance(&self, asset: &str) -> Result<AssetBalance, ExchangeError> {
        (**self).asset_balance(asset).await
    }

    async fn open_orders(&self, symbol: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        (**self).open_orders(symbol).await
    }

    async fn order_history(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<OrderRecord>, ExchangeError> {
        (**self).order_history(symbol, limit).await
    }

    async fn place_order(
        &self,
        symbol: &str,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
        price: Option<Decimal>,
        time_in_force: Option<TimeInForce>,
    ) -> Result<OrderReceipt, ExchangeError> {
        (**self)
            .place_order(symbol, side, order_type, quantity, price, time_in_force)
            .await
    }

    async fn cancel_order(&self, symbol: &str, order_id: u64) -> Result<(), ExchangeError> {
        (**self).cancel_order(symbol, order_id).await
    }

    async fn symbol_filters(&self, symbol: &str) -> Result<SymbolFilters, ExchangeError> {
        (**self).symbol_filters(symbol).await
    }
}
