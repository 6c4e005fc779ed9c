//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! - `error`: a table could not be exported by any strategy
//! - `warn`: skipped datasets/columns, failed strategies, leftover raw values
//! - `info`: per-table progress and the final counts
//! - `debug`: individual cleaning steps
//!
//! The filter is fixed: this crate at the configured level, everything else at `warn`.

use std::io;

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level for this crate (error, warn, info, debug, trace).
    pub level: Level,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            with_target: false,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Initialize the global subscriber, writing to stderr.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) {
    init_logging_with_writer(config, io::stderr);
}

/// Initialize logging with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .compact()
        .without_time()
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target);

    tracing_subscriber::registry()
        .with(build_filter(config.level))
        .with(layer)
        .init();
}

/// Filter from a fixed default; the environment is never consulted.
fn build_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();
    EnvFilter::new(format!("warn,tabclean={}", level_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_info() {
        assert_eq!(LogConfig::default().level, Level::INFO);
        assert!(!LogConfig::default().with_ansi(false).with_ansi);
    }

    #[test]
    fn test_filter_ignores_environment() {
        std::env::set_var("RUST_LOG", "trace");
        let filter = build_filter(Level::DEBUG).to_string();
        std::env::remove_var("RUST_LOG");

        assert!(filter.contains("tabclean=debug"));
        assert!(!filter.contains("trace"));
    }
}
