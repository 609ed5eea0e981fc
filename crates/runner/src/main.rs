//! Bot entry point: one polling loop per configured asset.

mod settings;

use binance_spot::{ApiCredentials, BinanceSpotClient};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{error, info, warn};
use trader::AssetTrader;

#[tokio::main]
async fn main() {
    common::init_logging();

    let settings = match settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let credentials = match ApiCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "failed to load API credentials");
            std::process::exit(1);
        }
    };

    let client = match BinanceSpotClient::new(credentials, settings.environment) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "failed to build exchange client");
            std::process::exit(1);
        }
    };

    info!(environment = %settings.environment, assets = settings.assets.len(), "starting");

    if let Err(e) = client.sync_time().await {
        warn!(error = %e, "time sync failed, continuing with the local clock");
    }

    // One global lock serializes cycles across assets when configured;
    // without it the loops run fully independently.
    let cycle_lock = settings
        .serialize_cycles
        .then(|| Arc::new(Mutex::new(())));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, finishing in-flight cycles");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut handles = Vec::new();
    for asset in settings.assets {
        let config = match asset.into_config() {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "invalid asset configuration, skipping");
                continue;
            }
        };

        let client = Arc::clone(&client);
        let cycle_lock = cycle_lock.clone();
        let shutdown_rx = shutdown_rx.clone();

        handles.push(tokio::spawn(trade_loop(config, client, cycle_lock, shutdown_rx)));
    }

    if handles.is_empty() {
        error!("no tradable assets configured");
        std::process::exit(1);
    }

    for handle in handles {
        let _ = handle.await;
    }
    info!("shutdown complete");
}

/// One asset's polling loop: cycle, then sleep the engine's chosen wait,
/// until shutdown or a fatal error.
async fn trade_loop(
    config: trader::AssetConfig,
    client: Arc<BinanceSpotClient>,
    cycle_lock: Option<Arc<Mutex<()>>>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut trader = match AssetTrader::connect(config, client).await {
        Ok(trader) => trader,
        Err(e) => {
            error!(error = %e, "failed to start trader");
            return;
        }
    };

    info!(symbol = %trader.symbol(), "trader started");
    let mut cycles: u64 = 0;

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        let result = match &cycle_lock {
            Some(lock) => {
                let _guard = lock.lock().await;
                trader.run_cycle().await
            }
            None => trader.run_cycle().await,
        };
        cycles += 1;

        match result {
            Ok(outcome) => {
                info!(
                    symbol = %trader.symbol(),
                    cycle = cycles,
                    outcome = ?outcome,
                    next_sleep_secs = trader.next_sleep().as_secs(),
                    "cycle complete"
                );
            }
            Err(e) => {
                error!(
                    symbol = %trader.symbol(),
                    error = %e,
                    "fatal trader error, stopping this asset"
                );
                break;
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(trader.next_sleep()) => {}
            _ = shutdown_rx.changed() => {}
        }
    }

    info!(symbol = %trader.symbol(), "trader stopped");
}
