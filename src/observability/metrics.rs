//! # Metrics
//!
//! Prometheus metrics for the remote calls the managers issue.
//!
//! ## Metrics Exposed
//!
//! - `elasticache_provisioner_remote_requests_total` - Remote requests by service and operation
//! - `elasticache_provisioner_remote_request_errors_total` - Failed remote requests by service and operation
//! - `elasticache_provisioner_remote_request_duration_seconds` - Remote request duration by service
//! - `elasticache_provisioner_engine_defaults_cache_hits_total` - Engine default lookups served from memory
//! - `elasticache_provisioner_engine_defaults_cache_misses_total` - Engine default lookups that fetched remotely

use anyhow::{Context, Result};
use prometheus::{Encoder, HistogramVec, IntCounter, IntCounterVec, Registry, TextEncoder};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static REMOTE_REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "elasticache_provisioner_remote_requests_total",
            "Total number of remote requests by service and operation",
        ),
        &["service", "operation"],
    )
    .expect("Failed to create REMOTE_REQUESTS_TOTAL metric - this should never happen")
});

static REMOTE_REQUEST_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "elasticache_provisioner_remote_request_errors_total",
            "Total number of failed remote requests by service and operation",
        ),
        &["service", "operation"],
    )
    .expect("Failed to create REMOTE_REQUEST_ERRORS_TOTAL metric - this should never happen")
});

static REMOTE_REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "elasticache_provisioner_remote_request_duration_seconds",
            "Duration of remote requests in seconds by service",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0]),
        &["service"],
    )
    .expect("Failed to create REMOTE_REQUEST_DURATION metric - this should never happen")
});

static ENGINE_DEFAULTS_CACHE_HITS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "elasticache_provisioner_engine_defaults_cache_hits_total",
        "Total number of engine default parameter lookups served from the cache",
    )
    .expect("Failed to create ENGINE_DEFAULTS_CACHE_HITS_TOTAL metric - this should never happen")
});

static ENGINE_DEFAULTS_CACHE_MISSES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "elasticache_provisioner_engine_defaults_cache_misses_total",
        "Total number of engine default parameter lookups that fetched from the provider",
    )
    .expect(
        "Failed to create ENGINE_DEFAULTS_CACHE_MISSES_TOTAL metric - this should never happen",
    )
});

/// Register all metrics with the crate registry.
///
/// # Errors
///
/// Fails when a metric is already registered (calling this twice).
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(REMOTE_REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REMOTE_REQUEST_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REMOTE_REQUEST_DURATION.clone()))?;
    REGISTRY.register(Box::new(ENGINE_DEFAULTS_CACHE_HITS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(ENGINE_DEFAULTS_CACHE_MISSES_TOTAL.clone()))?;
    Ok(())
}

/// Render the registry in the Prometheus text exposition format.
///
/// # Errors
///
/// Fails if encoding fails or produces invalid UTF-8.
pub fn gather_metrics() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&REGISTRY.gather(), &mut buffer)
        .context("Failed to encode metrics")?;
    String::from_utf8(buffer).context("Metrics output is not valid UTF-8")
}

pub fn record_remote_request(service: &str, operation: &str, duration: f64) {
    REMOTE_REQUESTS_TOTAL
        .with_label_values(&[service, operation])
        .inc();
    REMOTE_REQUEST_DURATION
        .with_label_values(&[service])
        .observe(duration);
}

pub fn increment_remote_request_errors(service: &str, operation: &str) {
    REMOTE_REQUEST_ERRORS_TOTAL
        .with_label_values(&[service, operation])
        .inc();
}

pub fn increment_engine_defaults_cache_hits() {
    ENGINE_DEFAULTS_CACHE_HITS_TOTAL.inc();
}

pub fn increment_engine_defaults_cache_misses() {
    ENGINE_DEFAULTS_CACHE_MISSES_TOTAL.inc();
}
