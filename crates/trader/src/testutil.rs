//! Scripted gateway and fixtures shared by the engine tests.

use crate::config::{AssetConfig, TakeProfitTier};
use crate::engine::AssetTrader;
use crate::gateway::ExchangeGateway;
use async_trait::async_trait;
use binance_spot::{
    AssetBalance, ExchangeError, OpenOrder, OrderReceipt, OrderRecord, SymbolFilters,
};
use model::{Candle, CandleInterval, OrderSide, OrderStatus, OrderType, TimeInForce};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use strategy::{StrategyKind, StrategyVoter};

/// An order the mock accepted, as the engine submitted it.
#[derive(Debug, Clone)]
pub(crate) struct PlacedOrder {
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub time_in_force: Option<TimeInForce>,
}

/// In-memory exchange with scripted responses.
pub(crate) struct MockGateway {
    balance: Mutex<Decimal>,
    candles: Mutex<Vec<Candle>>,
    open_orders: Mutex<Vec<OpenOrder>>,
    history: Mutex<Vec<OrderRecord>>,
    fill_statuses: Mutex<VecDeque<OrderStatus>>,
    placed: Mutex<Vec<PlacedOrder>>,
    canceled: Mutex<Vec<u64>>,
    refresh_fails: AtomicBool,
    next_order_fails: AtomicBool,
    next_order_id: AtomicU64,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            balance: Mutex::new(Decimal::ZERO),
            candles: Mutex::new(Vec::new()),
            open_orders: Mutex::new(Vec::new()),
            history: Mutex::new(Vec::new()),
            fill_statuses: Mutex::new(VecDeque::new()),
            placed: Mutex::new(Vec::new()),
            canceled: Mutex::new(Vec::new()),
            refresh_fails: AtomicBool::new(false),
            next_order_fails: AtomicBool::new(false),
            next_order_id: AtomicU64::new(1),
        }
    }

    pub fn set_balance(&self, balance: Decimal) {
        *self.balance.lock().unwrap() = balance;
    }

    pub fn set_candles(&self, candles: Vec<Candle>) {
        *self.candles.lock().unwrap() = candles;
    }

    pub fn set_open_orders(&self, orders: Vec<OpenOrder>) {
        *self.open_orders.lock().unwrap() = orders;
    }

    pub fn set_history(&self, history: Vec<OrderRecord>) {
        *self.history.lock().unwrap() = history;
    }

    /// Status for the next placed orders; defaults to `Filled` when empty.
    pub fn push_fill_status(&self, status: OrderStatus) {
        self.fill_statuses.lock().unwrap().push_back(status);
    }

    /// Make every refresh-path fetch fail.
    pub fn fail_refresh(&self) {
        self.refresh_fails.store(true, Ordering::SeqCst);
    }

    /// Make the next placed order fail.
    pub fn fail_next_order(&self) {
        self.next_order_fails.store(true, Ordering::SeqCst);
    }

    pub fn placed(&self) -> Vec<PlacedOrder> {
        self.placed.lock().unwrap().clone()
    }

    pub fn canceled(&self) -> Vec<u64> {
        self.canceled.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExchangeGateway for MockGateway {
    async fn candles(
        &self,
        _symbol: &str,
        _interval: CandleInterval,
        _limit: u32,
    ) -> Result<Vec<Candle>, ExchangeError> {
        if self.refresh_fails.load(Ordering::SeqCst) {
            return Err(ExchangeError::Timeout);
        }
        Ok(self.candles.lock().unwrap().clone())
    }

    async fn asset_balance(&self, asset: &str) -> Result<AssetBalance, ExchangeError> {
        if self.refresh_fails.load(Ordering::SeqCst) {
            return Err(ExchangeError::Timeout);
        }
        let mut balance = AssetBalance::zero(asset);
        balance.free = *self.balance.lock().unwrap();
        Ok(balance)
    }

    async fn open_orders(&self, _symbol: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        Ok(self.open_orders.lock().unwrap().clone())
    }

    async fn order_history(
        &self,
        _symbol: &str,
        _limit: u32,
    ) -> Result<Vec<OrderRecord>, ExchangeError> {
        if self.refresh_fails.load(Ordering::SeqCst) {
            return Err(ExchangeError::Timeout);
        }
        Ok(self.history.lock().unwrap().clone())
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
        if self.next_order_fails.swap(false, Ordering::SeqCst) {
            return Err(ExchangeError::InsufficientBalance);
        }

        self.placed.lock().unwrap().push(PlacedOrder {
            side,
            order_type,
            quantity,
            price,
            time_in_force,
        });

        let status = self
            .fill_statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(OrderStatus::Filled);
        let executed_qty = if status == OrderStatus::Filled {
            quantity
        } else {
            Decimal::ZERO
        };
        let price_value = price.unwrap_or(Decimal::ZERO);

        Ok(OrderReceipt {
            symbol: symbol.to_string(),
            order_id: self.next_order_id.fetch_add(1, Ordering::SeqCst),
            transact_time: 1_700_000_000_000,
            side,
            order_type,
            status,
            price: price_value,
            orig_qty: quantity,
            executed_qty,
            cummulative_quote_qty: executed_qty * price_value,
            fills: Vec::new(),
        })
    }

    async fn cancel_order(&self, _symbol: &str, order_id: u64) -> Result<(), ExchangeError> {
        self.canceled.lock().unwrap().push(order_id);
        self.open_orders
            .lock()
            .unwrap()
            .retain(|o| o.order_id != order_id);
        Ok(())
    }

    async fn symbol_filters(&self, _symbol: &str) -> Result<SymbolFilters, ExchangeError> {
        Ok(test_filters())
    }
}

/// Tick 0.01 / step 0.1, matching the fixtures.
pub(crate) fn test_filters() -> SymbolFilters {
    SymbolFilters {
        tick_size: dec!(0.01),
        step_size: dec!(0.1),
    }
}

/// Configuration the engine tests share: 100 units per order, 3.5% stop,
/// 5% acceptable loss, tiers (2%, 50%) (4%, 50%) (8%, 100%), MA(5, 20).
pub(crate) fn test_config() -> AssetConfig {
    AssetConfig {
        asset: "ADA".into(),
        symbol: "ADAUSDT".into(),
        interval: CandleInterval::FifteenMinutes,
        traded_quantity: dec!(100),
        acceptable_loss_pct: dec!(5),
        stop_loss_pct: dec!(3.5),
        take_profit_tiers: vec![
            TakeProfitTier::new(dec!(2), dec!(50)),
            TakeProfitTier::new(dec!(4), dec!(50)),
            TakeProfitTier::new(dec!(8), dec!(100)),
        ],
        poll_interval: Duration::from_secs(300),
        post_order_delay: Duration::from_secs(3600),
        voter: StrategyVoter::new(
            StrategyKind::MovingAverage {
                fast_window: 5,
                slow_window: 20,
            },
            None,
            true,
        ),
    }
}

pub(crate) fn test_trader(gateway: MockGateway) -> AssetTrader<MockGateway> {
    // Seed the price series from the gateway's scripted candles so direct
    // method calls (which skip the refresh path) see the same window the
    // engine would after pull_state.
    let candles = gateway.candles.lock().unwrap().clone();
    let mut trader = AssetTrader::with_filters(test_config(), gateway, test_filters());
    trader.state.series.replace(candles);
    trader
}

pub(crate) fn rising_closes(start: i64, len: usize) -> Vec<Decimal> {
    (0..len as i64).map(|i| Decimal::from(start + i)).collect()
}

pub(crate) fn falling_closes(start: i64, len: usize) -> Vec<Decimal> {
    (0..len as i64).map(|i| Decimal::from(start - i)).collect()
}

/// Candles with the given closes, a half-unit range and constant volume.
pub(crate) fn candles_from_closes(closes: &[Decimal]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| Candle {
            open_time_ms: i as i64 * 60_000,
            open: *close,
            high: *close + dec!(0.5),
            low: *close - dec!(0.5),
            close: *close,
            volume: dec!(100),
            close_time_ms: (i as i64 + 1) * 60_000 - 1,
        })
        .collect()
}

pub(crate) fn open_order(
    order_id: u64,
    side: OrderSide,
    price: Decimal,
    orig_qty: Decimal,
    executed_qty: Decimal,
) -> OpenOrder {
    OpenOrder {
        order_id,
        side,
        status: if executed_qty > Decimal::ZERO {
            OrderStatus::PartiallyFilled
        } else {
            OrderStatus::New
        },
        price,
        orig_qty,
        executed_qty,
    }
}

pub(crate) fn order_record(
    order_id: u64,
    side: OrderSide,
    status: OrderStatus,
    time: i64,
    price: Decimal,
    qty: Decimal,
) -> OrderRecord {
    OrderRecord {
        order_id,
        side,
        status,
        time,
        price,
        orig_qty: qty,
        executed_qty: qty,
        cummulative_quote_qty: price * qty,
    }
}
