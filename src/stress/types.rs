use std::time::Duration;

use crate::args::{HttpMethod, PositiveUsize};
use crate::http::RequestSpec;

/// Immutable description of one stress run, constructed after validation
/// and read-only thereafter.
#[derive(Debug, Clone)]
pub struct StressSpec {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub auth: String,
    pub concurrency: PositiveUsize,
    /// Wall-clock bound. When `max_requests` is set this is a safety net
    /// only; the cap is the binding stop condition.
    pub duration: Duration,
    pub max_requests: Option<u64>,
    /// Per-attempt timeout.
    pub timeout: Duration,
}

impl StressSpec {
    /// The request template every worker attempt is built from.
    #[must_use]
    pub fn request_spec(&self) -> RequestSpec {
        RequestSpec {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            auth: self.auth.clone(),
            timeout: self.timeout,
        }
    }
}

/// Result of a single attempt: latency plus either a status code or a
/// transport error description, never both. Produced by one worker,
/// consumed once by the aggregator.
#[derive(Debug, Clone)]
pub enum Outcome {
    Response { status: u16, latency: Duration },
    Failure { message: String, latency: Duration },
}

/// Totals accumulated by the aggregator, finalized once the outcome queue
/// closes. `total_requests == successes + failures` and
/// `latencies.len() == successes` hold for every finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StressResult {
    pub total_requests: u64,
    pub successes: u64,
    pub failures: u64,
    /// Latencies of successful attempts, in arrival order.
    pub latencies: Vec<Duration>,
    /// Up to the first five transport error descriptions, verbatim.
    pub error_sample: Vec<String>,
}
