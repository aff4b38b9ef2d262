use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

/// Installs the global Prometheus recorder. The handle renders the text
/// exposition served at `/metrics`.
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            info!("[metrics] Prometheus recorder installed");
            Some(handle)
        }
        Err(e) => {
            warn!("[metrics] Prometheus recorder install failed (possibly already installed): {}", e);
            None
        }
    }
}
