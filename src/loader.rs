//! Load Orchestrator
//!
//! Sequences the three resolution layers over a caller-allocated record:
//! field defaults, then an optional config file, then optional environment
//! bindings. Later layers overwrite only the fields they carry data for.

use crate::defaults::Walker;
use crate::error::LoadError;
use crate::shape::{Field, Record, Slot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

mod merge;
mod paths;
mod sources;

pub use paths::{is_existing_file, resolve_path};
pub use sources::environment::{bind_env, EnvSource, ProcessEnv};
pub use sources::file_source::{FileFormat, FileSource};

/// One stage of the resolution order, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Defaults,
    File,
    Environment,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Defaults => write!(f, "defaults"),
            Layer::File => write!(f, "file"),
            Layer::Environment => write!(f, "environment"),
        }
    }
}

/// Sources to resolve on top of the defaults layer.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Config file overlaid after defaults
    pub file: Option<FileSource>,

    /// Overlay environment bindings last
    pub from_env: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, source: FileSource) -> Self {
        self.file = Some(source);
        self
    }

    pub fn from_env(mut self, enabled: bool) -> Self {
        self.from_env = enabled;
        self
    }

    /// Layers these options resolve, in application order.
    pub fn layers(&self) -> Vec<Layer> {
        let mut layers = vec![Layer::Defaults];
        if self.file.is_some() {
            layers.push(Layer::File);
        }
        if self.from_env {
            layers.push(Layer::Environment);
        }
        layers
    }
}

/// Resolve `target` from defaults, then the configured file, then the
/// environment.
///
/// Defaults are always applied first and never fail. File errors are returned
/// immediately and skip the environment layer. Environment binding failures
/// are logged and otherwise ignored. A failed call leaves `target` with the
/// layers applied so far.
pub fn load<T>(target: &mut T, options: &LoadOptions) -> Result<(), LoadError>
where
    T: Field + Serialize + DeserializeOwned,
{
    let record = resolve_record(target)?;
    let type_name = record.type_name();
    debug!(record = type_name, layer = %Layer::Defaults, "Resolving layer");
    Walker::new().walk(record);

    if let Some(source) = &options.file {
        debug!(
            record = type_name,
            layer = %Layer::File,
            format = %source.format,
            path = %source.path.display(),
            "Resolving layer"
        );
        apply_file(target, source)?;
    }

    if options.from_env {
        debug!(record = type_name, layer = %Layer::Environment, "Resolving layer");
        let record = resolve_record(target)?;
        for error in bind_env(record, &ProcessEnv) {
            warn!(record = type_name, error = %error, "Ignoring environment binding");
        }
    }

    Ok(())
}

/// Dereference `target` down to the record it holds.
fn resolve_record<T: Field + ?Sized>(target: &mut T) -> Result<&mut dyn Record, LoadError> {
    let mut slot = target.slot();
    loop {
        match slot {
            Slot::Record(record) => return Ok(record),
            Slot::Indirect(Some(inner)) => slot = inner.slot(),
            Slot::Indirect(None) => return Err(LoadError::InvalidInputKind),
            other => {
                return Err(LoadError::InvalidInputShape {
                    found: other.shape(),
                })
            }
        }
    }
}

fn apply_file<T>(target: &mut T, source: &FileSource) -> Result<(), LoadError>
where
    T: Serialize + DeserializeOwned,
{
    if source.path.to_string_lossy().trim().is_empty() {
        return Err(LoadError::EmptyPath);
    }

    let path = resolve_path(&source.path);
    if !is_existing_file(&path) {
        return Err(LoadError::FileNotFound(path));
    }

    let bytes = std::fs::read(&path).map_err(|e| LoadError::Io {
        path: path.clone(),
        source: e,
    })?;
    let overlay = source.format.decode(&bytes)?;
    merge::overlay_into(target, source.format, overlay)
}
