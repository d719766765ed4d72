//! Metrics and observability utilities
//!
//! Provides Prometheus metric descriptions with SLO-aligned histograms
//! and standardized naming conventions.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};

/// Metrics prefix for all Friendly Search metrics
pub const METRICS_PREFIX: &str = "friendly_search";

/// SLO-aligned histogram buckets for ranking and request latency (in seconds)
/// Targets: P50 < 5ms, P99 < 50ms
pub const LATENCY_BUCKETS: &[f64] = &[
    0.0005, // 0.5ms
    0.001,  // 1ms
    0.0025, // 2.5ms
    0.005,  // 5ms - P50 target
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms - P99 target
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_rankings_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of ranking invocations"
    );

    describe_histogram!(
        format!("{}_ranking_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Band expansion plus ranking latency in seconds"
    );

    describe_counter!(
        format!("{}_ranked_items_total", METRICS_PREFIX),
        Unit::Count,
        "Ranked items, labelled liked or unliked"
    );

    describe_gauge!(
        format!("{}_social_reach", METRICS_PREFIX),
        Unit::Count,
        "People within range of the last ranked user"
    );

    describe_counter!(
        format!("{}_search_queries_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of provider search queries"
    );

    describe_counter!(
        format!("{}_ranking_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Rankings that failed, labelled by error code"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record a completed ranking
pub fn record_ranking(duration_secs: f64, liked: usize, unliked: usize, reach: usize) {
    counter!(format!("{}_rankings_total", METRICS_PREFIX)).increment(1);

    histogram!(format!("{}_ranking_duration_seconds", METRICS_PREFIX)).record(duration_secs);

    counter!(
        format!("{}_ranked_items_total", METRICS_PREFIX),
        "group" => "liked"
    )
    .increment(liked as u64);

    counter!(
        format!("{}_ranked_items_total", METRICS_PREFIX),
        "group" => "unliked"
    )
    .increment(unliked as u64);

    gauge!(format!("{}_social_reach", METRICS_PREFIX)).set(reach as f64);
}

/// Helper to record a provider search
pub fn record_search(provider: &str, candidate_count: usize) {
    counter!(
        format!("{}_search_queries_total", METRICS_PREFIX),
        "provider" => provider.to_string(),
        "empty" => (candidate_count == 0).to_string()
    )
    .increment(1);
}

/// Helper to record a failed ranking
pub fn record_ranking_error(code: &str) {
    counter!(
        format!("{}_ranking_errors_total", METRICS_PREFIX),
        "code" => code.to_string()
    )
    .increment(1);
}
