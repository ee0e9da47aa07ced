//! Layer sources: the config file decoder and the environment binder.

pub mod environment;
pub mod file_source;
