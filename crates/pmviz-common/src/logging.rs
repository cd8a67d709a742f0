//! Logging Configuration and Initialization
//!
//! Centralized tracing setup for the pmviz binaries. Supports:
//!
//! - Console output (stderr, so stdout stays free for data), daily rotated
//!   log files, or both
//! - Text or JSON formatting
//! - Level and per-module filter directives
//! - Environment-based configuration
//!
//! Use the structured logging macros (`debug!`, `info!`, `warn!`, `error!`)
//! instead of `println!`, and attach context as fields:
//!
//! ```rust,ignore
//! warn!(line = line_num, content = %line, "Skipping malformed line");
//! ```
//!
//! # Example
//!
//! ```no_run
//! use pmviz_common::logging::{init_logging, LogConfig};
//! use tracing::info;
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!     info!("Application started");
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to tracing Level
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(anyhow::anyhow!("Invalid log level: {}", s)),
        }
    }
}

/// Output target for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

impl LogOutput {
    fn console(self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    fn file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

impl std::str::FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "stderr" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            "both" | "all" => Ok(LogOutput::Both),
            _ => Err(anyhow::anyhow!("Invalid log output: {}", s)),
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum log level to display
    pub level: LogLevel,

    /// Output target (console, file, or both)
    pub output: LogOutput,

    /// Log format (text or JSON)
    pub format: LogFormat,

    /// Directory for log files (only used when output includes file)
    pub log_dir: PathBuf,

    /// Log file name prefix (e.g., "pmviz" -> "pmviz.2024-01-18")
    pub log_file_prefix: String,

    /// Additional filter directives (e.g., "pmviz_convert::table=debug")
    pub filter_directives: Option<String>,

    /// Whether to include file and line number in logs
    pub include_location: bool,

    /// Whether to include target module names in logs
    pub include_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            output: LogOutput::Console,
            format: LogFormat::Text,
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: "pmviz".to_string(),
            filter_directives: None,
            include_location: false,
            include_targets: true,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables, starting from defaults
    ///
    /// Environment variables:
    /// - `LOG_LEVEL`: trace, debug, info, warn, error
    /// - `LOG_OUTPUT`: console, file, both
    /// - `LOG_FORMAT`: text, json
    /// - `LOG_DIR`: directory for log files
    /// - `LOG_FILE_PREFIX`: prefix for log files
    /// - `LOG_FILTER`: additional filter directives
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Override fields of `self` with any `LOG_*` variables that are set
    pub fn merge_env(mut self) -> Result<Self> {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.level = level.parse()?;
        }

        if let Ok(output) = std::env::var("LOG_OUTPUT") {
            self.output = output.parse()?;
        }

        if let Ok(format) = std::env::var("LOG_FORMAT") {
            self.format = format.parse()?;
        }

        if let Ok(dir) = std::env::var("LOG_DIR") {
            self.log_dir = PathBuf::from(dir);
        }

        if let Ok(prefix) = std::env::var("LOG_FILE_PREFIX") {
            self.log_file_prefix = prefix;
        }

        if let Ok(filter) = std::env::var("LOG_FILTER") {
            self.filter_directives = Some(filter);
        }

        Ok(self)
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> LogConfigBuilder {
        LogConfigBuilder::default()
    }

    fn filter(&self) -> Result<EnvFilter> {
        let mut filter =
            EnvFilter::from_default_env().add_directive(self.level.to_tracing_level().into());

        if let Some(ref directives) = self.filter_directives {
            for directive in directives.split(',').filter(|d| !d.trim().is_empty()) {
                filter = filter.add_directive(
                    directive
                        .trim()
                        .parse()
                        .with_context(|| format!("Failed to parse filter directive '{}'", directive))?,
                );
            }
        }

        Ok(filter)
    }
}

/// Builder for LogConfig
#[derive(Default)]
pub struct LogConfigBuilder {
    config: LogConfig,
}

impl LogConfigBuilder {
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.config.output = output;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    pub fn log_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.log_file_prefix = prefix.into();
        self
    }

    pub fn filter_directives(mut self, filter: impl Into<String>) -> Self {
        self.config.filter_directives = Some(filter.into());
        self
    }

    pub fn include_location(mut self, include: bool) -> Self {
        self.config.include_location = include;
        self
    }

    pub fn include_targets(mut self, include: bool) -> Self {
        self.config.include_targets = include;
        self
    }

    pub fn build(self) -> LogConfig {
        self.config
    }
}

/// Initialize the global tracing subscriber
///
/// Should be called once at startup. When the configuration writes to a file
/// the returned guard flushes the background writer on drop, so hold it for
/// the lifetime of the program.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = config.filter()?;
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    if config.output.console() {
        layers.push(fmt_layer(config, std::io::stderr, true));
    }

    if config.output.file() {
        std::fs::create_dir_all(&config.log_dir).context("Failed to create log directory")?;

        let file_appender =
            tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        // No ANSI colors in files
        layers.push(fmt_layer(config, non_blocking, false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

fn fmt_layer<W>(config: &LogConfig, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(config.include_targets)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    match config.format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("Info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("ERROR".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_output_targets() {
        let both: LogOutput = "both".parse().unwrap();
        assert!(both.console() && both.file());

        let console: LogOutput = "stderr".parse().unwrap();
        assert!(console.console() && !console.file());

        assert!("syslog".parse::<LogOutput>().is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::File)
            .format(LogFormat::Json)
            .log_dir("/var/log/pmviz")
            .log_file_prefix("convert")
            .build();

        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.output, LogOutput::File);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/pmviz"));
        assert_eq!(config.log_file_prefix, "convert");
        assert!(config.include_targets);
    }

    #[test]
    fn test_filter_rejects_bad_directive() {
        let config = LogConfig::builder()
            .filter_directives("pmviz_convert=debug,pmviz_common=loud")
            .build();
        assert!(config.filter().is_err());

        let config = LogConfig::builder()
            .filter_directives("pmviz_convert=debug, ")
            .build();
        assert!(config.filter().is_ok());
    }
}
