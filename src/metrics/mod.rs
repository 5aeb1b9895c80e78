// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::time::Duration;

use crate::domain::customer::CustomerError;

// Re-export for public API
pub use server::configure;

// ============================================================================
// Metrics Module - Prometheus metrics for the customer endpoints
// ============================================================================
//
// Per operation (create, get_by_cpf, list):
// - outcome counter (success / rejected / failed)
// - failure counter by error kind
// - latency histogram
//
// Scraped via GET /metrics
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub operations_total: IntCounterVec,
    pub operation_failures: IntCounterVec,
    pub operation_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let operations_total = IntCounterVec::new(
            Opts::new("customer_operations_total", "Total customer operations by outcome"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(operations_total.clone()))?;

        let operation_failures = IntCounterVec::new(
            Opts::new("customer_operation_failures_total", "Customer operation failures by error kind"),
            &["operation", "kind"],
        )?;
        registry.register(Box::new(operation_failures.clone()))?;

        let operation_duration = HistogramVec::new(
            HistogramOpts::new("customer_operation_duration_seconds", "Customer operation duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        Ok(Self {
            registry,
            operations_total,
            operation_failures,
            operation_duration,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record one finished operation. Expected domain failures count as
    /// `rejected`, anything else as `failed`.
    pub fn record_operation(&self, operation: &str, elapsed: Duration, error: Option<&CustomerError>) {
        let outcome = match error {
            None => "success",
            Some(err) if err.is_expected() => "rejected",
            Some(_) => "failed",
        };

        self.operations_total.with_label_values(&[operation, outcome]).inc();
        if let Some(err) = error {
            self.operation_failures
                .with_label_values(&[operation, err.kind().as_str()])
                .inc();
        }
        self.operation_duration
            .with_label_values(&[operation])
            .observe(elapsed.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::NO_CUSTOMERS_FOUND;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        metrics.record_operation("create", Duration::from_millis(3), None);
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_record_success() {
        let metrics = Metrics::new().unwrap();
        metrics.record_operation("create", Duration::from_millis(3), None);
        metrics.record_operation("create", Duration::from_millis(4), None);

        let gathered = metrics.registry.gather();
        let total = gathered.iter().find(|m| m.name() == "customer_operations_total").unwrap();
        assert_eq!(total.metric[0].counter.value, Some(2.0));
        assert!(gathered.iter().all(|m| m.name() != "customer_operation_failures_total"));
    }

    #[test]
    fn test_record_failures_by_kind() {
        let metrics = Metrics::new().unwrap();
        metrics.record_operation("create", Duration::from_millis(1), Some(&CustomerError::Conflict));
        metrics.record_operation(
            "list",
            Duration::from_millis(1),
            Some(&CustomerError::NotFound(NO_CUSTOMERS_FOUND)),
        );
        metrics.record_operation(
            "list",
            Duration::from_millis(1),
            Some(&CustomerError::Repository(anyhow::anyhow!("down"))),
        );

        let gathered = metrics.registry.gather();
        let failures = gathered
            .iter()
            .find(|m| m.name() == "customer_operation_failures_total")
            .unwrap();
        assert_eq!(failures.metric.len(), 3); // conflict, not_found, unclassified

        let totals = gathered.iter().find(|m| m.name() == "customer_operations_total").unwrap();
        assert_eq!(totals.metric.len(), 3); // create/rejected, list/rejected, list/failed
    }
}
