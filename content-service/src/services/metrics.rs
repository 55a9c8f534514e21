//! Prometheus metrics for content-service.

use crate::models::Platform;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;
use std::time::Duration;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// Completion metrics
pub static COMPLETION_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static COMPLETION_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

// Generation metrics
pub static GENERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

// Database metrics
pub static DB_OPERATION_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static DB_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    match build_registry() {
        Ok(()) => tracing::info!("Prometheus metrics initialized"),
        Err(e) => tracing::error!(error = %e, "Failed to initialize Prometheus metrics"),
    }
}

fn build_registry() -> Result<(), prometheus::Error> {
    let registry = Registry::new();

    // Completion counter (outcome: ok, or the provider error kind)
    let completion_requests = IntCounterVec::new(
        Opts::new(
            "completion_requests_total",
            "Total chat completion requests",
        ),
        &["provider", "model", "outcome"],
    )?;

    let completion_latency = HistogramVec::new(
        HistogramOpts::new(
            "completion_latency_seconds",
            "Chat completion API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    )?;

    let generations = IntCounterVec::new(
        Opts::new("generations_total", "Total generate_content calls"),
        &["platform", "persisted"],
    )?;

    let db_duration = HistogramVec::new(
        HistogramOpts::new(
            "db_operation_duration_seconds",
            "Database operation duration in seconds",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
        &["operation"],
    )?;

    let db_errors = IntCounterVec::new(
        Opts::new("db_errors_total", "Total database errors"),
        &["operation"],
    )?;

    registry.register(Box::new(completion_requests.clone()))?;
    registry.register(Box::new(completion_latency.clone()))?;
    registry.register(Box::new(generations.clone()))?;
    registry.register(Box::new(db_duration.clone()))?;
    registry.register(Box::new(db_errors.clone()))?;

    // Initialize globals
    let _ = REGISTRY.set(registry);
    let _ = COMPLETION_REQUESTS_TOTAL.set(completion_requests);
    let _ = COMPLETION_LATENCY_SECONDS.set(completion_latency);
    let _ = GENERATIONS_TOTAL.set(generations);
    let _ = DB_OPERATION_DURATION_SECONDS.set(db_duration);
    let _ = DB_ERRORS_TOTAL.set(db_errors);

    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Error encoding metrics: {}\n", e);
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Metrics output is not valid UTF-8");
        String::new()
    })
}

// Recording helpers; all are no-ops until `init_metrics` has run.

pub fn record_completion(provider: &str, model: &str, outcome: &str, elapsed: Duration) {
    if let Some(counter) = COMPLETION_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[provider, model, outcome]).inc();
    }
    if let Some(histogram) = COMPLETION_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(elapsed.as_secs_f64());
    }
}

pub fn record_generation(platform: &Platform, persisted: bool) {
    if let Some(counter) = GENERATIONS_TOTAL.get() {
        let persisted = if persisted { "true" } else { "false" };
        counter
            .with_label_values(&[platform.metric_label(), persisted])
            .inc();
    }
}

pub fn record_db_operation(operation: &str, elapsed: Duration) {
    if let Some(histogram) = DB_OPERATION_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[operation])
            .observe(elapsed.as_secs_f64());
    }
}

pub fn record_db_error(operation: &str) {
    if let Some(counter) = DB_ERRORS_TOTAL.get() {
        counter.with_label_values(&[operation]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_metrics_show_up_in_exposition() {
        init_metrics();
        record_completion("mock", "test-model", "ok", Duration::from_millis(20));
        record_db_error("insert");

        let output = get_metrics();
        assert!(output.contains("completion_requests_total"));
        assert!(output.contains("db_errors_total"));
    }

    #[test]
    fn free_form_platforms_share_one_generation_series() {
        init_metrics();
        let counter = GENERATIONS_TOTAL.get().unwrap();
        let before = counter.with_label_values(&["other", "false"]).get();

        for i in 0..50 {
            record_generation(&Platform::from(format!("client-platform-{}", i)), false);
        }

        let after = counter.with_label_values(&["other", "false"]).get();
        assert!(after - before >= 50);
        assert!(!get_metrics().contains("client-platform-"));
    }
}
