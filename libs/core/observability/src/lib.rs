//! Prometheus metrics for the product service.
//!
//! - [`init_metrics`] installs the global recorder once at startup
//! - [`metrics_handler`] renders the exposition format for `/metrics`
//! - [`middleware::metrics_middleware`] records per-route HTTP metrics
//! - [`ProductMetrics`] records domain operation outcomes
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, ProductMetrics};
//!
//! init_metrics()?;
//! ProductMetrics::record_operation("create", "ok", 0.004);
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod products;

pub use middleware::metrics_middleware;
pub use products::ProductMetrics;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder. Later calls return the first handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();
        Ok(handle)
    })
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for `/metrics`
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    describe_counter!(
        "product_operations_total",
        "Product operations by type and outcome"
    );
    describe_histogram!(
        "product_operation_duration_seconds",
        "Product operation duration in seconds"
    );
    describe_histogram!(
        "product_search_results",
        "Number of products returned per search page"
    );
}
