//! Product operation metrics.

use metrics::{counter, histogram};

/// Recorder for the product service's operations
pub struct ProductMetrics;

impl ProductMetrics {
    /// Count one operation and record its latency.
    ///
    /// `outcome` is `ok`, `not_found`, `invalid` or `error`.
    pub fn record_operation(operation: &'static str, outcome: &'static str, duration_secs: f64) {
        counter!(
            "product_operations_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);

        histogram!(
            "product_operation_duration_seconds",
            "operation" => operation
        )
        .record(duration_secs);
    }

    pub fn record_search_page(returned: usize) {
        histogram!("product_search_results").record(returned as f64);
    }
}
