use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "ufc_events=info";

/// Initializes the logging system with both console and file output.
///
/// The returned guard flushes the file writer when dropped, so callers keep it
/// alive for the lifetime of the process. Without a usable log directory only
/// the console layer is installed.
pub fn init_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let dir_error = fs::create_dir_all(log_dir).err();

    // Daily rotation, JSON lines in the file
    let (file_layer, guard) = match dir_error {
        None => {
            let file_appender = tracing_appender::rolling::daily(log_dir, "ufc_events.log");
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().json().with_writer(non_blocking_writer)), Some(guard))
        }
        Some(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    if let Some(e) = dir_error {
        tracing::warn!("Could not create log directory {}: {}", log_dir.display(), e);
    }
    guard
}
