//! Order Engine Binary
//!
//! Submits a batch of order rows to Upstox and runs the stop-loss monitor
//! until shutdown.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-engine
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `UPSTOX_ACCESS_TOKEN`: trading session token
//!
//! ## Optional
//! - `INSTRUMENTS_PATH`: instrument table file (default: NSE.json)
//! - `ORDER_BATCH_PATH`: JSON array of order rows to submit on startup
//! - `POLL_INTERVAL_SECS`: monitor polling interval (default: 5)
//! - `RUST_LOG`: log level (default: info)

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use order_engine::application::use_cases::{ExecutionEngine, MonitorConfig, StopLossMonitor};
use order_engine::config::EngineConfig;
use order_engine::domain::order_lifecycle::{OrderLedger, OrderRequest};
use order_engine::infrastructure::broker::{UpstoxBrokerAdapter, UpstoxConfig};
use order_engine::infrastructure::instruments::JsonInstrumentTable;
use order_engine::infrastructure::persistence::InMemoryLedger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    tracing::info!("starting order engine");

    let config = EngineConfig::from_env().context("configuration")?;
    tracing::info!(
        instruments_path = %config.instruments_path.display(),
        batch_path = ?config.batch_path,
        poll_interval_secs = config.poll_interval.as_secs(),
        "configuration loaded"
    );

    let resolver = Arc::new(
        JsonInstrumentTable::load(&config.instruments_path).context("instrument table")?,
    );
    let broker = Arc::new(
        UpstoxBrokerAdapter::new(&UpstoxConfig::new(config.access_token.clone()))
            .context("broker adapter")?,
    );
    let ledger = Arc::new(InMemoryLedger::new());
    let engine = Arc::new(ExecutionEngine::new(
        Arc::clone(&broker),
        resolver,
        Arc::clone(&ledger),
    ));

    if let Some(batch_path) = &config.batch_path {
        let rows = read_batch(batch_path)?;
        tracing::info!(rows = rows.len(), path = %batch_path.display(), "submitting order batch");
        let outcomes = engine.submit_batch(rows).await;
        let accepted = outcomes.iter().filter(|o| o.is_ok()).count();
        tracing::info!(
            accepted,
            skipped = outcomes.len() - accepted,
            "batch submission complete"
        );
    }

    let shutdown = CancellationToken::new();
    let monitor = StopLossMonitor::with_config(
        Arc::clone(&engine),
        broker,
        MonitorConfig {
            poll_interval: config.poll_interval,
        },
        shutdown.clone(),
    );
    let monitor_handle = tokio::spawn(async move { monitor.run().await });

    signal::ctrl_c().await.context("shutdown signal")?;
    tracing::info!("shutdown signal received");
    shutdown.cancel();
    monitor_handle.await.context("monitor task")?;

    log_ledger_summary(&ledger).await;
    Ok(())
}

/// Load `.env` from the working directory when present.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Initialize the tracing subscriber with an env-filter.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

/// Read a JSON array of order rows.
fn read_batch(path: &Path) -> anyhow::Result<Vec<OrderRequest>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading order batch {}", path.display()))?;
    let rows: Vec<OrderRequest> = serde_json::from_str(&text)
        .with_context(|| format!("parsing order batch {}", path.display()))?;
    Ok(rows)
}

/// Log the final state of every order in the run.
async fn log_ledger_summary(ledger: &Arc<InMemoryLedger>) {
    match ledger.list().await {
        Ok(records) => {
            for record in records {
                tracing::info!(
                    order_id = %record.id(),
                    instrument_token = record.instrument().value(),
                    transaction_type = %record.request().transaction_type,
                    quantity = %record.request().quantity,
                    state = %record.state(),
                    events = record.history().len(),
                    "final order state"
                );
            }
        }
        Err(error) => tracing::error!(error = %error, "could not read ledger for summary"),
    }
}
