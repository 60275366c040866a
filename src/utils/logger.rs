//! Logging Infrastructure
//!
//! Structured logging setup backed by `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Initialize the logger with the default "info" level
pub fn init_logger() {
    init_logger_with_level("info");
}

/// Initialize the logger with an explicit level
///
/// `RUST_LOG` 环境变量优先于传入的 level。
pub fn init_logger_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init();
}
