//! Subscriber setup for the `tracing` events emitted by the optimizers.
//!
//! The optimizers always emit events through `tracing` (synchronizations at
//! `debug`, individual steps at `trace`); this module only installs a global
//! subscriber to print them. It is compiled with the `structured-logging`
//! feature:
//!
//! ```toml
//! [dependencies]
//! tensorlogic-lookahead = { version = "0.1", features = ["structured-logging"] }
//! ```
//!
//! ```no_run
//! use tensorlogic_lookahead::structured_logging::{LogFormat, LogLevel, TracingLogger};
//!
//! let _logger = TracingLogger::builder()
//!     .with_format(LogFormat::Json)
//!     .with_level(LogLevel::Debug)
//!     .build()
//!     .expect("Failed to initialize logger");
//! ```

use crate::{TrainError, TrainResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output with colors.
    Pretty,
    /// Single-line output without colors.
    Compact,
    /// One JSON object per event.
    Json,
}

/// Log level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Every step (trace level).
    Trace,
    /// Synchronizations, resets and priming steps.
    Debug,
    /// Info and higher.
    Info,
    /// Warnings and errors only.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Builder for [`TracingLogger`].
#[derive(Debug, Clone)]
pub struct TracingLoggerBuilder {
    format: LogFormat,
    level: LogLevel,
    env_filter: Option<String>,
    with_targets: bool,
    with_thread_ids: bool,
}

impl Default for TracingLoggerBuilder {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            level: LogLevel::Info,
            env_filter: None,
            with_targets: true,
            with_thread_ids: false,
        }
    }
}

impl TracingLoggerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log level filter.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set a filter directive such as `"tensorlogic_lookahead=trace"`.
    ///
    /// Overrides both the level and `RUST_LOG`.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Include target names (module paths) in logs.
    pub fn with_targets(mut self, enabled: bool) -> Self {
        self.with_targets = enabled;
        self
    }

    /// Include thread IDs in logs.
    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.with_thread_ids = enabled;
        self
    }

    fn filter(&self) -> TrainResult<EnvFilter> {
        match &self.env_filter {
            Some(directives) => EnvFilter::try_new(directives)
                .map_err(|e| TrainError::ConfigError(format!("Invalid env filter: {}", e))),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))),
        }
    }

    /// Install the global subscriber.
    ///
    /// Only one subscriber can be installed per process; later calls fail.
    pub fn build(self) -> TrainResult<TracingLogger> {
        let env_filter = self.filter()?;
        let registry = tracing_subscriber::registry().with(env_filter);
        let base = fmt::layer()
            .with_target(self.with_targets)
            .with_thread_ids(self.with_thread_ids);

        let result = match self.format {
            LogFormat::Pretty => registry.with(base.pretty()).try_init(),
            LogFormat::Compact => registry.with(base.with_ansi(false).compact()).try_init(),
            LogFormat::Json => registry.with(base.json()).try_init(),
        };
        result.map_err(|e| TrainError::Other(format!("Failed to initialize tracing: {}", e)))?;

        Ok(TracingLogger {
            format: self.format,
        })
    }
}

/// Handle for the installed `tracing` subscriber.
#[derive(Debug)]
pub struct TracingLogger {
    format: LogFormat,
}

impl TracingLogger {
    /// Create a new logger builder.
    pub fn builder() -> TracingLoggerBuilder {
        TracingLoggerBuilder::new()
    }

    /// Install with default settings (compact format, info level).
    pub fn init() -> TrainResult<Self> {
        Self::builder().build()
    }

    /// Install a subscriber that shows every lookahead synchronization.
    pub fn init_development() -> TrainResult<Self> {
        Self::builder()
            .with_format(LogFormat::Pretty)
            .with_level(LogLevel::Debug)
            .build()
    }

    /// Format the subscriber was installed with.
    pub fn format(&self) -> LogFormat {
        self.format
    }
}
