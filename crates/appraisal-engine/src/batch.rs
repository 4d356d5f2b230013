//! Bounded concurrent valuation of many items
//!
//! Each item runs in its own task behind a semaphore permit, under its own
//! timeout, and can be cancelled through a shared token. One item's failure
//! never affects the others.

use crate::error::EngineError;
use crate::metrics::BatchMetrics;
use crate::orchestrator::{Valuation, ValuationOrchestrator, ValuationRequest};
use appraisal_domain::{NarrativeGenerator, PriceExtractor, SoldPriceSource, TextSearchSource};
use futures::future::join_all;
use std::fmt::Display;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Per-item results in input order, plus outcome counts
#[derive(Debug)]
pub struct BatchReport {
    /// One result per input item, same order
    pub results: Vec<Result<Valuation, EngineError>>,

    /// Outcome counts
    pub metrics: BatchMetrics,
}

/// Value one batch item once a permit is free, unless cancelled first
async fn value_item<S, T, N, X>(
    orchestrator: Arc<ValuationOrchestrator<S, T, N, X>>,
    request: ValuationRequest,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
    item_timeout: Duration,
) -> Result<Valuation, EngineError>
where
    S: SoldPriceSource + Send + Sync + 'static,
    S::Error: Display + Send + 'static,
    T: TextSearchSource + Send + Sync + 'static,
    T::Error: Display + Send + 'static,
    N: NarrativeGenerator + Send + Sync + 'static,
    N::Error: Display + Send + 'static,
    X: PriceExtractor + Send + Sync + 'static,
{
    let _permit = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(EngineError::Cancelled),
        permit = semaphore.acquire_owned() => permit
            .map_err(|e| EngineError::Task(format!("Worker pool closed: {}", e)))?,
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(EngineError::Cancelled),
        outcome = timeout(item_timeout, orchestrator.valuate(&request)) => {
            outcome.map_err(|_| EngineError::Timeout(item_timeout.as_secs()))?
        }
    }
}

/// Values items through a bounded pool
pub struct BatchValuator<S, T, N, X> {
    orchestrator: Arc<ValuationOrchestrator<S, T, N, X>>,
    max_concurrent: usize,
    item_timeout: Duration,
    cancel: CancellationToken,
}

impl<S, T, N, X> BatchValuator<S, T, N, X>
where
    S: SoldPriceSource + Send + Sync + 'static,
    S::Error: Display + Send + 'static,
    T: TextSearchSource + Send + Sync + 'static,
    T::Error: Display + Send + 'static,
    N: NarrativeGenerator + Send + Sync + 'static,
    N::Error: Display + Send + 'static,
    X: PriceExtractor + Send + Sync + 'static,
{
    /// Create a batch valuator using the orchestrator's configuration
    pub fn new(orchestrator: ValuationOrchestrator<S, T, N, X>) -> Self {
        let config = orchestrator.config();
        let max_concurrent = config.max_concurrent_items;
        let item_timeout = config.item_timeout();

        Self {
            orchestrator: Arc::new(orchestrator),
            max_concurrent,
            item_timeout,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that cancels every item still pending or running
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Value every item
    ///
    /// Results come back in input order regardless of completion order.
    pub async fn run(&self, items: Vec<ValuationRequest>) -> BatchReport {
        let started = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        info!(
            items = items.len(),
            concurrency = self.max_concurrent,
            "Starting batch valuation"
        );

        let handles: Vec<_> = items
            .into_iter()
            .map(|request| {
                let orchestrator = Arc::clone(&self.orchestrator);
                let semaphore = Arc::clone(&semaphore);
                let cancel = self.cancel.child_token();
                let item_timeout = self.item_timeout;

                tokio::spawn(value_item(orchestrator, request, semaphore, cancel, item_timeout))
            })
            .collect();

        let mut metrics = BatchMetrics::new();
        let results: Vec<Result<Valuation, EngineError>> = join_all(handles)
            .await
            .into_iter()
            .enumerate()
            .map(|(idx, joined)| {
                let outcome = joined
                    .unwrap_or_else(|e| Err(EngineError::Task(format!("Task join error: {}", e))));
                if let Err(e) = &outcome {
                    warn!(item = idx, error = %e, "Batch item failed");
                }
                metrics.record(&outcome);
                outcome
            })
            .collect();

        metrics.elapsed = started.elapsed();
        info!("Batch finished: {}", metrics.summary());

        BatchReport { results, metrics }
    }
}
