use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::types::{Outcome, StressResult};

/// Max transport error descriptions kept for the report.
pub(crate) const ERROR_SAMPLE_LIMIT: usize = 5;

/// Spawns the single consumer draining the outcome queue. The task finishes
/// when every producer handle has been dropped and the queue is empty.
pub(crate) fn spawn_aggregator(
    mut outcome_rx: mpsc::Receiver<Outcome>,
) -> JoinHandle<StressResult> {
    tokio::spawn(async move {
        let mut result = StressResult::default();
        while let Some(outcome) = outcome_rx.recv().await {
            record(&mut result, outcome);
        }
        result
    })
}

/// Classifies one outcome into the running aggregate. Arrival order across
/// workers carries no relation to dispatch order.
pub(crate) fn record(result: &mut StressResult, outcome: Outcome) {
    result.total_requests = result.total_requests.saturating_add(1);
    match outcome {
        Outcome::Response { status, latency } if is_success_status(status) => {
            result.successes = result.successes.saturating_add(1);
            result.latencies.push(latency);
        }
        Outcome::Response { .. } => {
            result.failures = result.failures.saturating_add(1);
        }
        Outcome::Failure { message, latency: _ } => {
            result.failures = result.failures.saturating_add(1);
            if result.error_sample.len() < ERROR_SAMPLE_LIMIT {
                result.error_sample.push(message);
            }
        }
    }
}

/// 2xx and 3xx responses count as success.
pub(crate) const fn is_success_status(status: u16) -> bool {
    status >= 200 && status < 400
}
