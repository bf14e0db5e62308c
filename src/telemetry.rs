//! Tracing subscriber setup (feature `telemetry`)
//!
//! The library itself only emits `tracing` events; transport events use the
//! target `phoenix::http`. Applications that do not install their own
//! subscriber can use the helpers here.
//!
//! ```rust,ignore
//! use phoenix_client::telemetry::{OutputFormat, SubscriberConfig, init_subscriber};
//!
//! let _guard = init_subscriber(
//!     SubscriberConfig::builder()
//!         .log_level(tracing::Level::DEBUG)
//!         .output_format(OutputFormat::JsonCompact)
//!         .build(),
//! )?;
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::error::PhoenixError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = PhoenixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            _ => Err(PhoenixError::Configuration(format!(
                "Invalid log format: {s}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    /// Write to stderr
    pub enable_console: bool,
    /// Append to this file through a non-blocking writer; takes precedence
    /// over the console
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    /// Debug level, text to stderr; shows every attempt and retry.
    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Default::default()
        }
    }

    /// Warnings and above, compact JSON into `log_file`.
    pub fn production(log_file: PathBuf) -> Self {
        Self {
            log_level: tracing::Level::WARN,
            output_format: OutputFormat::JsonCompact,
            enable_console: false,
            log_file: Some(log_file),
        }
    }

    fn filter(&self) -> String {
        let level = self.log_level.as_str().to_ascii_lowercase();
        format!("phoenix_client={level},phoenix={level}")
    }
}

#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn log_level_str(mut self, level: &str) -> Result<Self, PhoenixError> {
        let level = level.parse::<tracing::Level>().map_err(|_| {
            PhoenixError::Configuration(format!(
                "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
            ))
        })?;
        self.log_level = Some(level);
        Ok(self)
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

/// Install a global subscriber.
///
/// Returns the file writer guard when `log_file` is set; keep it alive for the
/// lifetime of the program or buffered lines are lost. An already installed
/// subscriber is left in place.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>, PhoenixError> {
    let filter = config.filter();

    let (writer, guard, ansi) = match &config.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let file_name = path.file_name().ok_or_else(|| {
                PhoenixError::Configuration(format!("Log file path has no file name: {}", path.display()))
            })?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        None if config.enable_console => (BoxMakeWriter::new(std::io::stderr), None, true),
        None => (BoxMakeWriter::new(std::io::sink), None, false),
    };

    let init_result = match config.output_format {
        OutputFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .json()
            .try_init(),
        OutputFormat::JsonCompact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .json()
            .flatten_event(true)
            .try_init(),
        OutputFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(true)
            .try_init(),
    };

    // `try_init` only fails when a global subscriber is already installed.
    if let Err(e) = init_result {
        tracing::debug!(err = %e, "tracing subscriber already installed, keeping it");
    }
    Ok(guard)
}

pub fn init_default() -> Result<Option<WorkerGuard>, PhoenixError> {
    init_subscriber(SubscriberConfig::default())
}

pub fn init_debug() -> Result<Option<WorkerGuard>, PhoenixError> {
    init_subscriber(SubscriberConfig::debug())
}

/// Configure from `PHOENIX_LOG_LEVEL`, `PHOENIX_LOG_FORMAT` (text, json,
/// json-compact) and `PHOENIX_LOG_FILE`.
pub fn init_from_env() -> Result<Option<WorkerGuard>, PhoenixError> {
    init_subscriber(config_from_lookup(|key| std::env::var(key).ok())?)
}

fn config_from_lookup<F>(lookup: F) -> Result<SubscriberConfig, PhoenixError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = SubscriberConfig::builder();
    if let Some(level) = lookup("PHOENIX_LOG_LEVEL") {
        builder = builder.log_level_str(&level)?;
    }
    if let Some(format) = lookup("PHOENIX_LOG_FORMAT") {
        builder = builder.output_format(format.parse()?);
    }
    if let Some(file) = lookup("PHOENIX_LOG_FILE") {
        builder = builder.log_file(PathBuf::from(file));
    }
    Ok(builder.build())
}
