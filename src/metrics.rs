use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{ImportError, Result};

/// Installs the global Prometheus recorder.
///
/// Until this runs, the counters and histograms recorded by the pipeline are
/// no-ops. Rendering is in-process; no HTTP listener is started.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ImportError::Config(format!("Failed to install metrics recorder: {}", e)))?;
    info!("Prometheus recorder installed");
    Ok(handle)
}

/// Writes the current metrics in Prometheus text format, e.g. for a
/// node_exporter textfile collector.
pub fn write_snapshot(handle: &PrometheusHandle, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, handle.render())?;
    info!("Wrote metrics snapshot to {}", path.display());
    Ok(())
}
