//! Config file source: format selection and decoding.

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Toml => "toml",
        }
    }

    /// Format implied by the file extension.
    pub fn from_extension(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ext.parse(),
            None => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Decode a whole document into a value tree.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, LoadError> {
        let decoded: Result<Value, String> = match self {
            FileFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            FileFormat::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
            FileFormat::Toml => std::str::from_utf8(bytes)
                .map_err(|e| e.to_string())
                .and_then(|text| toml::from_str(text).map_err(|e| e.to_string())),
        };
        decoded.map_err(|message| LoadError::Decode {
            format: *self,
            message,
        })
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(FileFormat::Json),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            "toml" => Ok(FileFormat::Toml),
            _ => Err(LoadError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// A config file to overlay after defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    pub format: FileFormat,
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(format: FileFormat, path: impl Into<PathBuf>) -> Self {
        Self {
            format,
            path: path.into(),
        }
    }

    /// Source whose format is taken from the path's extension.
    pub fn infer(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        let format = FileFormat::from_extension(&path)?;
        Ok(Self { format, path })
    }
}
