//! Error types for layered configuration loading.

use crate::loader::FileFormat;
use crate::shape::Shape;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::load`].
///
/// Defaulting never produces an error; environment overlay failures are
/// reported separately as [`EnvError`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Input does not reference a value")]
    InvalidInputKind,

    #[error("Input is not a record: found {found}")]
    InvalidInputShape { found: Shape },

    #[error("Config file path empty")]
    EmptyPath,

    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {format} config: {message}")]
    Decode { format: FileFormat, message: String },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Environment binding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// Value does not coerce to the field type.
    #[error("Invalid value for {var}: expected {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        expected: String,
        value: String,
    },

    /// Variable bound to a field shape the binder cannot fill.
    #[error("Cannot bind {var} to {shape} field '{field}'")]
    Unsupported {
        var: String,
        field: String,
        shape: Shape,
    },
}

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log format: {0} (must be 'json' or 'text')")]
    InvalidFormat(String),

    #[error("Invalid log output: {0} (must be 'stdout', 'stderr' or 'file')")]
    InvalidOutput(String),

    #[error("Invalid log directive: {0}")]
    InvalidDirective(String),

    #[error("Failed to install subscriber: {0}")]
    Install(String),
}
