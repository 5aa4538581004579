//! Logging setup for the `colsense` binary, on `tracing` and
//! `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: catalog or input failures
//! - `warn`: fallbacks, such as using the built-in catalog
//! - `info`: catalog loads, exports, per-table profile results
//! - `debug`: per-column classification details
//! - `trace`: sampled cell values (redacted unless `--log-data` is passed)
//!
//! # Usage
//!
//! ```ignore
//! use colsense_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_verbosity(1);
//! init_logging(&config).expect("init logging");
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Crates whose events follow the configured level; everything else stays
/// at `warn`.
const WORKSPACE_TARGETS: &[&str] = &[
    "colsense",
    "colsense_cli",
    "colsense_catalog",
    "colsense_classify",
    "colsense_model",
];

/// Placeholder logged instead of sampled values.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Returns true if sampled values may be logged.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when data logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    /// Include the module path in each line.
    pub with_target: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Write to this file (appending) instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Whether sampled cell values may be logged.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from a verbosity count.
    ///
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level_filter = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level_filter,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    /// The filter directive used when `RUST_LOG` does not apply.
    pub fn default_directive(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        let mut directive = String::from("warn");
        for target in WORKSPACE_TARGETS {
            directive.push_str(&format!(",{target}={level}"));
        }
        directive
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, Mutex::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Initialize logging with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    build_subscriber(config, writer).init();
}

/// The format layer on the registry, filtered by the workspace directive.
fn build_subscriber<W>(config: &LogConfig, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(format_layer(config, writer))
        .with(build_env_filter(config))
}

fn format_layer<W>(config: &LogConfig, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer.json().boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(config.default_directive())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level_filter, LevelFilter::WARN);
        assert_eq!(LogConfig::from_verbosity(2).level_filter, LevelFilter::DEBUG);
        assert_eq!(LogConfig::from_verbosity(9).level_filter, LevelFilter::TRACE);
    }

    #[test]
    fn default_directive_covers_workspace_crates() {
        let directive = LogConfig::default()
            .with_level(LevelFilter::DEBUG)
            .default_directive();
        assert!(directive.starts_with("warn,"));
        assert!(directive.contains("colsense_catalog=debug"));
        assert!(directive.contains("colsense_classify=debug"));
    }

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(config: &LogConfig, emit: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let subscriber = build_subscriber(config, buffer.clone());
        tracing::subscriber::with_default(subscriber, emit);
        buffer.contents()
    }

    fn quiet_config(format: LogFormat) -> LogConfig {
        LogConfig {
            use_env_filter: false,
            with_ansi: false,
            ..LogConfig::default()
        }
        .with_level(LevelFilter::INFO)
        .with_format(format)
    }

    #[test]
    fn json_format_writes_one_object_per_event() {
        let output = capture(&quiet_config(LogFormat::Json), || {
            tracing::info!(target: "colsense_catalog", rules = 10, "loaded field patterns");
            tracing::debug!(target: "colsense_catalog", "below the level");
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1, "{output}");
        assert!(lines[0].contains(r#""message":"loaded field patterns""#));
        assert!(lines[0].contains(r#""rules":10"#));
    }

    #[test]
    fn text_formats_respect_workspace_targets() {
        for format in [LogFormat::Pretty, LogFormat::Compact] {
            let output = capture(&quiet_config(format), || {
                tracing::info!(target: "colsense_classify", "classified column");
                tracing::info!(target: "some_dependency", "chatty dependency");
            });
            assert!(output.contains("classified column"), "{output}");
            assert!(!output.contains("chatty dependency"), "{output}");
        }
    }

    #[test]
    fn values_are_redacted_by_default() {
        assert!(!log_data_enabled());
        assert_eq!(redact_value("alice@example.com"), REDACTED_VALUE);
    }
}
