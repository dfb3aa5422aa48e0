use std::time::Duration;

use super::types::{StressResult, StressSpec};

/// Splits ×100 fixed-point rates into whole and fractional parts.
const PERCENT_DIVISOR: u64 = 100;
/// Fixed-point scale for rates rendered without float math.
const RATE_SCALE: u64 = 100;
/// Milliseconds per second.
const MS_PER_SEC: u64 = 1_000;

/// Latency figures over the sorted success latencies, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    pub min_ms: u64,
    pub max_ms: u64,
    pub mean_ms: u64,
    pub p50_ms: u64,
    pub p95_ms: u64,
    pub p99_ms: u64,
}

/// Derived statistics for a finished run. A pure function of the finalized
/// aggregate and the measured elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressStats {
    /// Requests per second, scaled by 100.
    pub rps_x100: u64,
    /// Absent when no attempt succeeded.
    pub latency: Option<LatencyStats>,
}

/// Index of the p-th percentile in an ascending sequence of `count` values:
/// `ceil(count * p / 100) - 1`, clamped into the sequence.
#[must_use]
pub fn percentile_index(count: usize, percentile: u64) -> usize {
    if count == 0 {
        return 0;
    }
    let scaled = u64::try_from(count)
        .unwrap_or(u64::MAX)
        .saturating_mul(percentile);
    let index = scaled.div_ceil(100).saturating_sub(1);
    let last = count.saturating_sub(1);
    usize::try_from(index).map_or(last, |idx| idx.min(last))
}

/// Sorts the latency sequence and computes throughput and percentiles.
#[must_use]
pub fn compute_stats(result: &StressResult, elapsed: Duration) -> StressStats {
    let elapsed_ms = u64::try_from(elapsed.as_millis())
        .unwrap_or(u64::MAX)
        .max(1);
    let rps_x100 = result
        .total_requests
        .saturating_mul(RATE_SCALE)
        .saturating_mul(MS_PER_SEC)
        .checked_div(elapsed_ms)
        .unwrap_or(0);

    let mut sorted = result.latencies.clone();
    sorted.sort_unstable();

    StressStats {
        rps_x100,
        latency: latency_stats(&sorted),
    }
}

fn latency_stats(sorted: &[Duration]) -> Option<LatencyStats> {
    let first = sorted.first()?;
    let last = sorted.last()?;
    let count = sorted.len();

    let sum_ms: u128 = sorted.iter().map(Duration::as_millis).sum();
    let mean_ms = u128::try_from(count)
        .ok()
        .and_then(|divisor| sum_ms.checked_div(divisor))
        .and_then(|mean| u64::try_from(mean).ok())
        .unwrap_or(u64::MAX);

    Some(LatencyStats {
        min_ms: duration_ms(*first),
        max_ms: duration_ms(*last),
        mean_ms,
        p50_ms: percentile_ms(sorted, 50),
        p95_ms: percentile_ms(sorted, 95),
        p99_ms: percentile_ms(sorted, 99),
    })
}

fn percentile_ms(sorted: &[Duration], percentile: u64) -> u64 {
    sorted
        .get(percentile_index(sorted.len(), percentile))
        .copied()
        .map_or(0, duration_ms)
}

fn duration_ms(value: Duration) -> u64 {
    u64::try_from(value.as_millis()).unwrap_or(u64::MAX)
}

/// Renders the run report. Duration-boxed runs show the configured
/// duration; count-boxed runs show the measured time until the cap was
/// reached. The latency section is omitted when nothing succeeded.
#[must_use]
pub fn report_lines(spec: &StressSpec, result: &StressResult, elapsed: Duration) -> Vec<String> {
    let stats = compute_stats(result, elapsed);
    let mut lines = Vec::new();

    lines.push(format!("Target: {} {}", spec.method.as_str(), spec.url));
    lines.push(format!("Concurrency: {}", spec.concurrency.get()));
    match spec.max_requests {
        Some(cap) => {
            lines.push(format!("Request Cap: {}", cap));
            lines.push(format!("Duration: {}", format_duration(elapsed)));
        }
        None => {
            lines.push(format!("Duration: {}", format_duration(spec.duration)));
        }
    }
    lines.push(format!("Total Requests: {}", result.total_requests));
    lines.push(format!("Successful: {}", result.successes));
    lines.push(format!("Failed: {}", result.failures));
    lines.push(format!(
        "Avg RPS: {}.{:02}",
        stats.rps_x100 / PERCENT_DIVISOR,
        stats.rps_x100 % PERCENT_DIVISOR
    ));

    if let Some(latency) = stats.latency {
        lines.push(format!(
            "Latency Min/Max: {}ms / {}ms",
            latency.min_ms, latency.max_ms
        ));
        lines.push(format!("Latency Avg: {}ms", latency.mean_ms));
        lines.push(format!(
            "Latency P50/P95/P99: {}ms / {}ms / {}ms",
            latency.p50_ms, latency.p95_ms, latency.p99_ms
        ));
    }

    if !result.error_sample.is_empty() {
        lines.push("Sample Errors:".to_owned());
        for message in &result.error_sample {
            lines.push(format!("  - {}", message));
        }
    }

    lines
}

fn format_duration(value: Duration) -> String {
    let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
    if ms >= MS_PER_SEC && ms % MS_PER_SEC == 0 {
        format!("{}s", ms / MS_PER_SEC)
    } else {
        format!("{}ms", ms)
    }
}
