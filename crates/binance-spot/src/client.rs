//! Binance spot REST client.

use crate::credentials::ApiCredentials;
use crate::error::ExchangeError;
use crate::http::HttpClient;
use crate::responses::{
    AccountInfo, AssetBalance, CancelReceipt, ExchangeInfo, KlineRow, OpenOrder, OrderReceipt,
    OrderRecord, ServerTime, SymbolFilters,
};
use crate::signer::signed_query;
use common::BinanceEnvironment;
use model::{Candle, CandleInterval, OrderSide, OrderType, TimeInForce};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, info};

/// Authenticated, clock-synchronized Binance spot client.
pub struct BinanceSpotClient {
    http: HttpClient,
    credentials: ApiCredentials,
    environment: BinanceEnvironment,
    /// Local clock minus server clock, in milliseconds.
    time_offset_ms: AtomicI64,
}

impl BinanceSpotClient {
    /// Create a client for the given environment.
    pub fn new(
        credentials: ApiCredentials,
        environment: BinanceEnvironment,
    ) -> Result<Self, ExchangeError> {
        let http = HttpClient::new(environment.rest_base_url())?;

        Ok(Self {
            http,
            credentials,
            environment,
            time_offset_ms: AtomicI64::new(0),
        })
    }

    /// The environment this client talks to.
    pub fn environment(&self) -> BinanceEnvironment {
        self.environment
    }

    /// Estimated current server time, from the local clock and the measured
    /// offset.
    pub fn server_timestamp_ms(&self) -> i64 {
        local_millis() - self.time_offset_ms.load(Ordering::Relaxed)
    }

    /// Measure the offset between the local clock and the server clock.
    ///
    /// Call at startup; signed requests stamp the adjusted timestamp so the
    /// exchange does not reject them for clock skew.
    pub async fn sync_time(&self) -> Result<(), ExchangeError> {
        let before = std::time::Instant::now();
        let response: ServerTime = self.http.get("/api/v3/time", None, None).await?;
        let rtt_ms = before.elapsed().as_millis() as i64;

        // Estimate the server clock at the midpoint of the round trip.
        let estimated_server = response.server_time + rtt_ms / 2;
        let offset = local_millis() - estimated_server;
        self.time_offset_ms.store(offset, Ordering::Relaxed);

        info!(
            server_time = response.server_time,
            offset_ms = offset,
            rtt_ms = rtt_ms,
            "time synchronized with exchange"
        );
        Ok(())
    }

    /// Most recent `limit` klines for a symbol, ascending time order.
    ///
    /// GET /api/v3/klines
    pub async fn klines(
        &self,
        symbol: &str,
        interval: CandleInterval,
        limit: u32,
    ) -> Result<Vec<Candle>, ExchangeError> {
        let query = format!("symbol={}&interval={}&limit={}", symbol, interval, limit);
        let rows: Vec<KlineRow> = self.http.get("/api/v3/klines", Some(&query), None).await?;

        debug!(symbol = %symbol, interval = %interval, rows = rows.len(), "klines fetched");
        rows.into_iter().map(Candle::try_from).collect()
    }

    /// Account snapshot with balances.
    ///
    /// GET /api/v3/account (signed)
    pub async fn account(&self) -> Result<AccountInfo, ExchangeError> {
        let query = self.sign(&[]);
        self.http
            .get("/api/v3/account", Some(&query), Some(self.credentials.api_key()))
            .await
    }

    /// Wallet balance for one asset; zero when the account does not hold it.
    pub async fn asset_balance(&self, asset: &str) -> Result<AssetBalance, ExchangeError> {
        Ok(self.account().await?.balance(asset))
    }

    /// Open orders for a symbol.
    ///
    /// GET /api/v3/openOrders (signed)
    pub async fn open_orders(&self, symbol: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        let query = self.sign(&[("symbol", symbol.to_string())]);
        self.http
            .get("/api/v3/openOrders", Some(&query), Some(self.credentials.api_key()))
            .await
    }

    /// Most recent `limit` orders for a symbol, any status.
    ///
    /// GET /api/v3/allOrders (signed)
    pub async fn all_orders(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<OrderRecord>, ExchangeError> {
        let query = self.sign(&[
            ("symbol", symbol.to_string()),
            ("limit", limit.to_string()),
        ]);
        self.http
            .get("/api/v3/allOrders", Some(&query), Some(self.credentials.api_key()))
            .await
    }

    /// Place an order.
    ///
    /// POST /api/v3/order (signed). Quantities and prices must already be
    /// quantized to the symbol's step/tick size.
    pub async fn place_order(
        &self,
        symbol: &str,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
        price: Option<Decimal>,
        time_in_force: Option<TimeInForce>,
    ) -> Result<OrderReceipt, ExchangeError> {
        let mut params: Vec<(&str, String)> = vec![
            ("symbol", symbol.to_string()),
            ("side", side.as_str().to_string()),
            ("type", order_type.as_str().to_string()),
            ("quantity", quantity.to_string()),
            ("newOrderRespType", "FULL".to_string()),
        ];
        if let Some(p) = price {
            params.push(("price", p.to_string()));
        }
        if let Some(tif) = time_in_force {
            params.push(("timeInForce", tif.as_str().to_string()));
        }

        info!(
            symbol = %symbol,
            side = %side,
            order_type = %order_type,
            quantity = %quantity,
            price = ?price,
            "placing order"
        );

        let query = self.sign(&params);
        let receipt: OrderReceipt = self
            .http
            .post("/api/v3/order", Some(&query), Some(self.credentials.api_key()))
            .await?;

        info!(
            order_id = receipt.order_id,
            status = %receipt.status,
            executed_qty = %receipt.executed_qty,
            "order accepted"
        );
        Ok(receipt)
    }

    /// Cancel an order by exchange order ID.
    ///
    /// DELETE /api/v3/order (signed)
    pub async fn cancel_order(&self, symbol: &str, order_id: u64) -> Result<(), ExchangeError> {
        let query = self.sign(&[
            ("symbol", symbol.to_string()),
            ("orderId", order_id.to_string()),
        ]);
        let receipt: CancelReceipt = self
            .http
            .delete("/api/v3/order", Some(&query), Some(self.credentials.api_key()))
            .await?;

        info!(order_id = receipt.order_id, status = %receipt.status, "order canceled");
        Ok(())
    }

    /// Precision filters (tick size, step size) for a symbol.
    ///
    /// GET /api/v3/exchangeInfo
    pub async fn symbol_filters(&self, symbol: &str) -> Result<SymbolFilters, ExchangeError> {
        let query = format!("symbol={}", symbol);
        let info: ExchangeInfo = self
            .http
            .get("/api/v3/exchangeInfo", Some(&query), None)
            .await?;

        let entry = info
            .symbols
            .iter()
            .find(|s| s.symbol == symbol)
            .ok_or_else(|| ExchangeError::Parse(format!("symbol {} not in exchangeInfo", symbol)))?;

        SymbolFilters::try_from(entry)
    }

    fn sign(&self, params: &[(&str, String)]) -> String {
        signed_query(&self.credentials, params, self.server_timestamp_ms())
    }
}

impl std::fmt::Debug for BinanceSpotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceSpotClient")
            .field("environment", &self.environment)
            .field("base_url", &self.http.base_url())
            .field("time_offset_ms", &self.time_offset_ms.load(Ordering::Relaxed))
            .finish()
    }
}

fn local_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis() as i64
}
