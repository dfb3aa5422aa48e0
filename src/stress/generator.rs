use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep, timeout};
use tracing::debug;

use crate::error::AppResult;
use crate::http::{HttpExecutor, RequestSpec};

use super::aggregator::spawn_aggregator;
use super::budget::RequestBudget;
use super::types::{Outcome, StressResult, StressSpec};

/// Grace period past the configured duration before outstanding workers are
/// force-terminated.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
/// Outcome queue slots per worker.
const OUTCOME_QUEUE_FACTOR: usize = 10;

/// Issues one attempt and reports it as data, never as an error. Implemented
/// by [`HttpExecutor`]; unit tests substitute scripted doubles.
#[async_trait]
pub trait RequestSender: Send + Sync {
    async fn attempt(&self, spec: &RequestSpec) -> Outcome;
}

#[async_trait]
impl RequestSender for HttpExecutor {
    async fn attempt(&self, spec: &RequestSpec) -> Outcome {
        let start = Instant::now();
        match self.send(spec).await {
            Ok(exchange) => Outcome::Response {
                status: exchange.status.as_u16(),
                latency: exchange.latency,
            },
            Err(err) => Outcome::Failure {
                message: err.to_string(),
                latency: start.elapsed(),
            },
        }
    }
}

/// A finished run: the finalized aggregate plus the measured wall-clock
/// time, which count-boxed throughput is derived from.
#[derive(Debug)]
pub struct StressRun {
    pub result: StressResult,
    pub elapsed: Duration,
}

/// Runs `concurrency` workers against the target until the stop condition
/// fires, then joins them, closes the outcome queue, and hands back the
/// finalized aggregate.
///
/// Duration-boxed runs stop via a one-shot signal set by a timer task.
/// Count-boxed runs stop when the shared request budget is exhausted; the
/// budget check is atomic, so the cap is never exceeded. Either way a hard
/// deadline of duration plus a fixed grace bounds the whole run, aborting
/// workers that are still stuck past their own per-attempt timeout.
///
/// # Errors
///
/// Returns an error when the aggregator task cannot be joined.
pub async fn run_stress(spec: &StressSpec, sender: Arc<dyn RequestSender>) -> AppResult<StressRun> {
    let start = Instant::now();
    let hard_deadline = spec.duration.saturating_add(SHUTDOWN_GRACE);
    let concurrency = spec.concurrency.get();
    let queue_capacity = concurrency.saturating_mul(OUTCOME_QUEUE_FACTOR).max(1);

    let (stop_tx, _) = broadcast::channel::<()>(1);
    let (outcome_tx, outcome_rx) = mpsc::channel::<Outcome>(queue_capacity);
    let aggregator = spawn_aggregator(outcome_rx);

    let budget = spec.max_requests.map(|cap| Arc::new(RequestBudget::new(cap)));
    let request = Arc::new(spec.request_spec());

    let mut workers = Vec::with_capacity(concurrency);
    for _ in 0..concurrency {
        let mut stop_rx = stop_tx.subscribe();
        let outcome_tx = outcome_tx.clone();
        let sender = Arc::clone(&sender);
        let request = Arc::clone(&request);
        let budget = budget.clone();
        workers.push(tokio::spawn(async move {
            loop {
                if stop_fired(&mut stop_rx) {
                    break;
                }
                if start.elapsed() >= hard_deadline {
                    break;
                }
                if let Some(budget) = budget.as_deref() {
                    if !budget.try_claim() {
                        break;
                    }
                }
                let outcome = sender.attempt(&request).await;
                if outcome_tx.send(outcome).await.is_err() {
                    break;
                }
            }
        }));
    }
    drop(outcome_tx);

    // Every worker already holds its receiver; a broadcast send with no
    // subscribers is lost.
    let timer = {
        let stop_tx = stop_tx.clone();
        let duration = spec.duration;
        tokio::spawn(async move {
            sleep(duration).await;
            drop(stop_tx.send(()));
        })
    };

    let abort_handles: Vec<_> = workers.iter().map(JoinHandle::abort_handle).collect();
    let supervisor = tokio::spawn(async move {
        for worker in workers {
            drop(worker.await);
        }
    });

    let remaining = hard_deadline.saturating_sub(start.elapsed());
    if timeout(remaining, supervisor).await.is_err() {
        debug!("Hard deadline reached; aborting outstanding workers");
        for handle in abort_handles {
            handle.abort();
        }
    }
    timer.abort();

    let result = aggregator.await?;
    let elapsed = start.elapsed();
    Ok(StressRun { result, elapsed })
}

fn stop_fired(stop_rx: &mut broadcast::Receiver<()>) -> bool {
    match stop_rx.try_recv() {
        Ok(()) => true,
        Err(broadcast::error::TryRecvError::Empty) => false,
        Err(
            broadcast::error::TryRecvError::Closed | broadcast::error::TryRecvError::Lagged(_),
        ) => true,
    }
}
