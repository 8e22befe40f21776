//! Stop-Loss Monitor Use Case
//!
//! Recurring control loop that confirms fills, polls last traded prices for
//! every monitored position, and liquidates breached positions through the
//! execution engine.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{BrokerPort, InstrumentResolver};
use crate::application::use_cases::execution_engine::{ExecutionEngine, SubmitError};
use crate::domain::order_lifecycle::OrderLedger;
use crate::domain::shared::InstrumentToken;
use crate::domain::stop_loss::{MonitoredPosition, breaches_stop};

/// Configuration for the stop-loss monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Time between polling cycles.
    pub poll_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// What one monitor cycle did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Orders whose fill was confirmed this cycle.
    pub fills_confirmed: usize,
    /// Positions evaluated against a fresh quote.
    pub positions_evaluated: usize,
    /// Stop-loss exits executed.
    pub stops_triggered: usize,
    /// Instruments whose quote could not be fetched this cycle.
    pub quote_failures: usize,
}

/// Stop-loss monitoring loop.
///
/// The loop is interval-driven and cooperative: cancellation is checked at
/// the top of every cycle, and each cycle is a bounded function so tests can
/// drive it directly without the timer.
pub struct StopLossMonitor<B, R, L> {
    engine: Arc<ExecutionEngine<B, R, L>>,
    broker: Arc<B>,
    config: MonitorConfig,
    shutdown: CancellationToken,
}

impl<B, R, L> StopLossMonitor<B, R, L>
where
    B: BrokerPort,
    R: InstrumentResolver,
    L: OrderLedger,
{
    /// Create a monitor with the default configuration.
    #[must_use]
    pub fn new(
        engine: Arc<ExecutionEngine<B, R, L>>,
        broker: Arc<B>,
        shutdown: CancellationToken,
    ) -> Self {
        Self::with_config(engine, broker, MonitorConfig::default(), shutdown)
    }

    /// Create a monitor with a custom configuration.
    #[must_use]
    pub fn with_config(
        engine: Arc<ExecutionEngine<B, R, L>>,
        broker: Arc<B>,
        config: MonitorConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            engine,
            broker,
            config,
            shutdown,
        }
    }

    /// Run the polling loop until the shutdown token is cancelled.
    ///
    /// Per-position and per-quote failures are cycle-local; only a ledger
    /// failure stops the loop.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        tracing::info!(
            poll_interval = ?self.config.poll_interval,
            "stop-loss monitor started"
        );

        loop {
            tokio::select! {
                () = self.shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    match self.run_cycle().await {
                        Ok(report) => {
                            if report.fills_confirmed > 0 || report.stops_triggered > 0 {
                                tracing::info!(
                                    fills_confirmed = report.fills_confirmed,
                                    positions_evaluated = report.positions_evaluated,
                                    stops_triggered = report.stops_triggered,
                                    quote_failures = report.quote_failures,
                                    "monitor cycle complete"
                                );
                            }
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "internal failure, stopping monitor");
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!("stop-loss monitor stopped");
    }

    /// Execute one bounded monitor cycle.
    ///
    /// Quotes are fetched once per instrument token, not once per position;
    /// a quote failure skips only the positions on that token.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the ledger fails.
    pub async fn run_cycle(&self) -> Result<CycleReport, SubmitError> {
        let mut report = CycleReport {
            fills_confirmed: self.engine.confirm_fills().await?,
            ..CycleReport::default()
        };

        let positions = self.engine.registry().snapshot();
        if positions.is_empty() {
            return Ok(report);
        }

        let mut by_token: HashMap<InstrumentToken, Vec<MonitoredPosition>> = HashMap::new();
        for position in positions {
            by_token.entry(position.instrument()).or_default().push(position);
        }

        for (token, group) in by_token {
            let ltp = match self.broker.last_traded_price(&token).await {
                Ok(price) => price,
                Err(error) => {
                    tracing::warn!(
                        instrument_token = token.value(),
                        error = %error,
                        "quote unavailable, skipping instrument this cycle"
                    );
                    report.quote_failures += 1;
                    continue;
                }
            };

            for position in group {
                // A position may have been deregistered earlier in this cycle.
                if !self.engine.registry().contains(position.order_id()) {
                    continue;
                }
                report.positions_evaluated += 1;

                if breaches_stop(ltp, position.stop_loss_price()) {
                    tracing::info!(
                        order_id = %position.order_id(),
                        ltp = %ltp,
                        stop = %position.stop_loss_price(),
                        "stop-loss breached"
                    );
                    self.engine.execute_stop(&position, ltp).await?;
                    report.stops_triggered += 1;
                }
            }
        }

        Ok(report)
    }
}
