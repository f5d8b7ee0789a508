//! Prometheus metrics for the request layer and the valuation pipeline.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Request latency metric name (includes all retry attempts).
pub const METRIC_REQUEST_LATENCY: &str = "request_latency_ms";
/// Requests issued counter metric name.
pub const METRIC_REQUESTS: &str = "requests_total";
/// Retried attempts counter metric name.
pub const METRIC_REQUEST_RETRIES: &str = "request_retries_total";
/// Retries-exhausted counter metric name.
pub const METRIC_REQUESTS_EXHAUSTED: &str = "requests_exhausted_total";
/// Players valuated counter metric name.
pub const METRIC_PLAYERS_VALUATED: &str = "players_valuated_total";
/// Players skipped (absence) counter metric name.
pub const METRIC_PLAYERS_SKIPPED: &str = "players_skipped_total";
/// Players skipped (request failure) counter metric name.
pub const METRIC_PLAYERS_FAILED: &str = "players_failed_total";
/// Genome decode failures counter metric name.
pub const METRIC_DECODE_FAILURES: &str = "decode_failures_total";
/// Missing-twin counter metric name.
pub const METRIC_TWINS_MISSING: &str = "twins_missing_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_REQUEST_LATENCY,
        "Upstream call latency in milliseconds, retries included"
    );

    describe_counter!(METRIC_REQUESTS, "Total upstream calls issued");
    describe_counter!(METRIC_REQUEST_RETRIES, "Total retried attempts");
    describe_counter!(
        METRIC_REQUESTS_EXHAUSTED,
        "Total calls that spent their whole retry budget"
    );
    describe_counter!(METRIC_PLAYERS_VALUATED, "Total players with a priced team");
    describe_counter!(
        METRIC_PLAYERS_SKIPPED,
        "Total players skipped for absence reasons"
    );
    describe_counter!(
        METRIC_PLAYERS_FAILED,
        "Total players skipped on request failure"
    );
    describe_counter!(METRIC_DECODE_FAILURES, "Total genome decode failures");
    describe_counter!(
        METRIC_TWINS_MISSING,
        "Total creatures with no twin currently listed"
    );

    debug!("Metrics initialized");
}

/// Record total latency of an upstream call.
pub fn record_request_latency(start: Instant, label: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_REQUEST_LATENCY, "call" => label.to_string()).record(latency_ms);
}

/// Increment the issued-calls counter.
pub fn inc_requests(label: &str) {
    counter!(METRIC_REQUESTS, "call" => label.to_string()).increment(1);
}

/// Increment the retried-attempts counter.
pub fn inc_request_retries() {
    counter!(METRIC_REQUEST_RETRIES).increment(1);
}

/// Increment the retries-exhausted counter.
pub fn inc_requests_exhausted() {
    counter!(METRIC_REQUESTS_EXHAUSTED).increment(1);
}

/// Increment the players-valuated counter.
pub fn inc_players_valuated() {
    counter!(METRIC_PLAYERS_VALUATED).increment(1);
}

/// Increment the players-skipped counter.
pub fn inc_players_skipped() {
    counter!(METRIC_PLAYERS_SKIPPED).increment(1);
}

/// Increment the players-failed counter.
pub fn inc_players_failed() {
    counter!(METRIC_PLAYERS_FAILED).increment(1);
}

/// Increment the decode-failures counter.
pub fn inc_decode_failures() {
    counter!(METRIC_DECODE_FAILURES).increment(1);
}

/// Increment the missing-twin counter.
pub fn inc_twins_missing() {
    counter!(METRIC_TWINS_MISSING).increment(1);
}
