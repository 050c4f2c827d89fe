use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes tracing with a formatted console layer and a JSON file layer
/// under `logs/`, rotated daily. The returned guard flushes the file writer
/// on drop; main holds it for the lifetime of the process.
pub fn init_logging() -> WorkerGuard {
    let _ = fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "enricher.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("metrics_enricher=info".parse().unwrap()))
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    guard
}
