//! Execution Engine Use Case
//!
//! Turns validated order requests into tracked broker orders: validation,
//! instrument resolution, single-shot placement, fill confirmation, and
//! stop-loss exit execution. Broker-side failures never escape as errors;
//! they land in the record's history and callers read them from the ledger.

use std::sync::Arc;

use thiserror::Error;

use crate::application::ports::{
    BrokerError, BrokerOrderStatus, BrokerPort, InstrumentResolver, PlaceOrder,
};
use crate::application::services::PositionRegistry;
use crate::domain::order_lifecycle::{OrderLedger, OrderRecord, OrderRequest, OrderState};
use crate::domain::shared::{DomainError, InstrumentToken, OrderId, Price};
use crate::domain::stop_loss::MonitoredPosition;

/// Synchronous failures of `submit`.
///
/// Only local validation and resolution failures surface here; anything the
/// broker says is recorded in the ledger instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The request violated a local invariant and never reached the broker.
    #[error("invalid order request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request.
        reason: String,
    },

    /// The symbol is not in the instrument table; no API call was made.
    #[error("unknown instrument symbol: {symbol}")]
    UnknownInstrument {
        /// The unresolvable symbol.
        symbol: String,
    },

    /// Ledger failure. Internal state is suspect; callers should stop.
    #[error("ledger failure: {0}")]
    Internal(#[from] DomainError),
}

/// The order execution engine.
///
/// Owns the ledger and the monitored-position registry; both the batch
/// submission path and the stop-loss monitor go through this type, so
/// independent runs (and tests) get fully independent state.
pub struct ExecutionEngine<B, R, L> {
    broker: Arc<B>,
    resolver: Arc<R>,
    ledger: Arc<L>,
    registry: Arc<PositionRegistry>,
}

impl<B, R, L> ExecutionEngine<B, R, L>
where
    B: BrokerPort,
    R: InstrumentResolver,
    L: OrderLedger,
{
    /// Create a new engine.
    #[must_use]
    pub fn new(broker: Arc<B>, resolver: Arc<R>, ledger: Arc<L>) -> Self {
        Self {
            broker,
            resolver,
            ledger,
            registry: Arc::new(PositionRegistry::new()),
        }
    }

    /// Get the monitored-position registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<PositionRegistry> {
        &self.registry
    }

    /// Get the order ledger.
    #[must_use]
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Submit one order request.
    ///
    /// The placement call is issued exactly once. On broker rejection the
    /// returned record is FAILED; on a transport failure the outcome is
    /// unknown and the record stays SUBMITTED with an annotated history,
    /// pending reconciliation. Neither case is an `Err`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` or `UnknownInstrument` before any broker
    /// call, or `Internal` if the ledger itself fails.
    pub async fn submit(&self, request: OrderRequest) -> Result<OrderRecord, SubmitError> {
        request
            .validate()
            .map_err(|e| SubmitError::InvalidRequest {
                reason: e.to_string(),
            })?;

        let instrument = self.resolve_instrument(&request)?;
        let record = OrderRecord::new(request, instrument);
        let id = record.id().clone();
        let order = PlaceOrder::from_request(record.request(), instrument);

        self.ledger.record(record).await?;

        tracing::info!(
            order_id = %id,
            instrument_token = instrument.value(),
            transaction_type = %order.transaction_type,
            quantity = %order.quantity,
            order_type = %order.order_type,
            "submitting order to broker"
        );

        let updated = match self.broker.place_order(&order).await {
            Ok(broker_order_id) => {
                tracing::info!(
                    order_id = %id,
                    broker_order_id = %broker_order_id,
                    "order placed"
                );
                self.ledger
                    .update(&id, &mut |r| r.placed(broker_order_id.clone()))
                    .await?
            }
            Err(BrokerError::Rejected { reason }) => {
                tracing::warn!(order_id = %id, reason = %reason, "order rejected by broker");
                self.ledger
                    .update(&id, &mut |r| r.failed(reason.clone()))
                    .await?
            }
            Err(err) => {
                // Outcome unknown: keep the last confirmed state and let a
                // status check reconcile before anything is re-sent.
                tracing::warn!(
                    order_id = %id,
                    error = %err,
                    "placement outcome unknown, leaving record SUBMITTED"
                );
                self.ledger
                    .update(&id, &mut |r| {
                        r.annotate(format!("placement outcome unknown: {err}"));
                        Ok(())
                    })
                    .await?
            }
        };

        Ok(updated)
    }

    /// Submit a batch of requests with per-row failure isolation.
    ///
    /// A row that fails validation or resolution is logged and skipped;
    /// the remaining rows still execute, in order.
    pub async fn submit_batch(
        &self,
        requests: Vec<OrderRequest>,
    ) -> Vec<Result<OrderRecord, SubmitError>> {
        let mut outcomes = Vec::with_capacity(requests.len());
        for (index, request) in requests.into_iter().enumerate() {
            match self.submit(request).await {
                Ok(record) => outcomes.push(Ok(record)),
                Err(error) => {
                    tracing::warn!(row = index + 1, error = %error, "skipping batch row");
                    outcomes.push(Err(error));
                }
            }
        }
        outcomes
    }

    /// Reconcile PLACED records against the broker.
    ///
    /// Fills move to FILLED, then either ACTIVE (BUY with stop-loss, which
    /// also registers a monitored position) or CLOSED. Rejections move to
    /// FAILED. A status-check failure for one record is logged and the
    /// record is retried on the next cycle.
    ///
    /// Returns the number of records that reached FILLED.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the ledger itself fails.
    pub async fn confirm_fills(&self) -> Result<usize, SubmitError> {
        let placed = self.ledger.find_by_state(OrderState::Placed).await?;
        let mut confirmed = 0;

        for record in placed {
            let Some(broker_order_id) = record.broker_order_id().cloned() else {
                continue;
            };

            match self.broker.order_status(&broker_order_id).await {
                Ok(BrokerOrderStatus::Filled { average_price }) => {
                    confirmed += 1;
                    if record.wants_stop_monitoring() {
                        let updated = self
                            .ledger
                            .update(record.id(), &mut |r| {
                                r.filled()?;
                                r.activated()
                            })
                            .await?;
                        if let Some(position) = MonitoredPosition::from_record(&updated)
                            && self.registry.register(position)
                        {
                            tracing::info!(
                                order_id = %record.id(),
                                average_price = ?average_price,
                                "fill confirmed, stop-loss monitoring registered"
                            );
                        }
                    } else {
                        self.ledger
                            .update(record.id(), &mut |r| {
                                r.filled()?;
                                r.closed()
                            })
                            .await?;
                        tracing::info!(order_id = %record.id(), "fill confirmed, order closed");
                    }
                }
                Ok(BrokerOrderStatus::Rejected { reason }) => {
                    tracing::warn!(order_id = %record.id(), reason = %reason, "order rejected after placement");
                    self.ledger
                        .update(record.id(), &mut |r| r.failed(reason.clone()))
                        .await?;
                }
                Ok(BrokerOrderStatus::Open | BrokerOrderStatus::Cancelled) => {}
                Err(error) => {
                    tracing::warn!(
                        order_id = %record.id(),
                        error = %error,
                        "status check failed, retrying next cycle"
                    );
                }
            }
        }

        Ok(confirmed)
    }

    /// Liquidate a breached position with a synthesized market SELL.
    ///
    /// The originating record moves ACTIVE -> STOP_TRIGGERED -> CLOSED and
    /// the position is deregistered only after the SELL is confirmed placed;
    /// if placement fails or is ambiguous, the position stays registered and
    /// is retried on the next cycle.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the ledger itself fails.
    pub async fn execute_stop(
        &self,
        position: &MonitoredPosition,
        ltp: Price,
    ) -> Result<(), SubmitError> {
        let exit = self.submit(position.exit_request()).await?;

        if exit.state() == OrderState::Placed {
            self.ledger
                .update(position.order_id(), &mut |r| {
                    r.stop_triggered(ltp)?;
                    r.closed()
                })
                .await?;
            self.registry.deregister(position.order_id());
            tracing::info!(
                order_id = %position.order_id(),
                exit_order_id = %exit.id(),
                ltp = %ltp,
                stop = %position.stop_loss_price(),
                "stop-loss executed"
            );
        } else {
            tracing::warn!(
                order_id = %position.order_id(),
                exit_order_id = %exit.id(),
                exit_state = %exit.state(),
                "stop-loss SELL not confirmed placed, keeping position registered"
            );
        }

        Ok(())
    }

    fn resolve_instrument(&self, request: &OrderRequest) -> Result<InstrumentToken, SubmitError> {
        if let Some(token) = request.instrument_token {
            return Ok(token);
        }

        // validate() guarantees at least one identifier is present
        let Some(symbol) = request.symbol.as_ref() else {
            return Err(SubmitError::InvalidRequest {
                reason: "no instrument identifier".to_string(),
            });
        };

        self.resolver
            .resolve(symbol)
            .ok_or_else(|| SubmitError::UnknownInstrument {
                symbol: symbol.to_string(),
            })
    }

    /// Look up a record by id, for status reporting.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the ledger fails.
    pub async fn get(&self, id: &OrderId) -> Result<Option<OrderRecord>, SubmitError> {
        Ok(self.ledger.get(id).await?)
    }
}
