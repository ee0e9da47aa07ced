//! Layerconf: Layered Configuration Loading
//!
//! Resolves a typed configuration record from three layers, lowest priority
//! first: field defaults declared with `#[conf(...)]`, one JSON/YAML/TOML file,
//! and process environment variables. Each layer overwrites only the fields it
//! has data for.

extern crate self as layerconf;

pub mod defaults;
pub mod error;
pub mod loader;
pub mod logging;
pub mod shape;

pub use defaults::load_defaults;
pub use error::{EnvError, LoadError};
pub use layerconf_derive::Record;
pub use loader::{load, FileFormat, FileSource, Layer, LoadOptions};
pub use shape::{Field, FieldMeta, Record, Repeated, Scalar, ScalarKind, Shape, Slot};
