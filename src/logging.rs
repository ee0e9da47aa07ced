//! Logging System
//!
//! Structured logging using the `tracing` crate. The library itself only emits
//! events; applications call [`init_logging`] to install a subscriber.
//! [`LoggingConfig`] is an ordinary record, so it can be embedded in an
//! application config and resolved by [`crate::load`] like any other section.

use crate::error::LoggingError;
use crate::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directive variable, takes precedence over [`LoggingConfig::level`].
pub const LOG_FILTER_ENV: &str = "LAYERCONF_LOG";

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[conf(default = "info", env = "LAYERCONF_LOG_LEVEL")]
    pub level: String,

    /// Output format: json, text
    #[conf(default = "text", env = "LAYERCONF_LOG_FORMAT")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[conf(default = "stderr", env = "LAYERCONF_LOG_OUTPUT")]
    pub output: String,

    /// Log file path (when output is "file")
    #[conf(default = "layerconf.log", env = "LAYERCONF_LOG_FILE")]
    pub file: String,

    /// Enable colored output (text format, terminal output only)
    #[conf(default = "true")]
    pub color: bool,

    /// Module-specific log levels
    #[conf(skip)]
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

impl LoggingConfig {
    /// A config with every field default applied.
    pub fn resolved() -> Self {
        let mut config = Self::default();
        crate::load_defaults(&mut config);
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Initialize the logging system
///
/// Without a config, [`LoggingConfig::resolved`] is used. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), LoggingError> {
    let resolved;
    let config = match config {
        Some(config) => config,
        None => {
            resolved = LoggingConfig::resolved();
            &resolved
        }
    };

    let filter = build_env_filter(config)?;
    let format = parse_format(&config.format)?;
    let output = parse_output(&config.output)?;
    let base_subscriber = Registry::default().with(filter);

    macro_rules! install {
        ($layer:expr) => {
            match format {
                Format::Json => base_subscriber.with($layer.json()).try_init(),
                Format::Text => base_subscriber.with($layer).try_init(),
            }
        };
    }

    let installed = match output {
        Output::Stdout => install!(fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(config.color)
            .with_writer(std::io::stdout)),
        Output::Stderr => install!(fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(config.color)
            .with_writer(std::io::stderr)),
        Output::File => {
            let file_writer = open_log_file(Path::new(&config.file))?;
            install!(fmt::layer()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file_writer)))
        }
    };

    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, LoggingError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LoggingError::Install(format!("Failed to create log directory: {}", e))
            })?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggingError::Install(format!("Failed to open log file {:?}: {}", path, e)))
}

/// Build the filter from `LAYERCONF_LOG` or the config
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_env(LOG_FILTER_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => config_filter(config),
    }
}

/// Filter from the configured level and module directives only.
fn config_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LoggingError::InvalidDirective(e.to_string()))?;

    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| LoggingError::InvalidDirective(format!("{}: {}", directive, e)))?,
        );
    }

    Ok(filter)
}

fn parse_format(format: &str) -> Result<Format, LoggingError> {
    match format {
        "text" => Ok(Format::Text),
        "json" => Ok(Format::Json),
        other => Err(LoggingError::InvalidFormat(other.to_string())),
    }
}

fn parse_output(output: &str) -> Result<Output, LoggingError> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        other => Err(LoggingError::InvalidOutput(other.to_string())),
    }
}
