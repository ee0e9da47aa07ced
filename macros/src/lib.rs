//! Proc macros for layerconf.
//!
//! # Record derive macro
//!
//! Generates the field table and slot accessors the default engine walks.
//!
//! ```ignore
//! #[derive(Default, Clone, Record)]
//! pub struct ServerConfig {
//!     /// Bind address.
//!     #[conf(default = "127.0.0.1", env = "SERVER_HOST")]
//!     pub host: String,
//!
//!     #[conf(default = "8080")]
//!     pub port: u16,
//!
//!     /// Two worker pools, each defaulted.
//!     #[conf(length = 2)]
//!     pub pools: Vec<PoolConfig>,
//!
//!     /// Not visited.
//!     #[conf(skip)]
//!     pub runtime: std::path::PathBuf,
//! }
//!
//! // Generates:
//! // - impl Field for ServerConfig (Slot::Record)
//! // - impl Record for ServerConfig (FIELDS table + field_mut)
//! ```
//!
//! # Attributes
//!
//! Field-level:
//! - `#[conf(default = "x")]` - Default literal, parsed per field type
//! - `#[conf(length = N)]` - Length of a materialized `Vec` (integer or string)
//! - `#[conf(env = "NAME")]` - Environment variable bound to the field
//! - `#[conf(skip)]` - Leave the field out of the table

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro that implements `Field` and `Record`.
#[proc_macro_derive(Record, attributes(conf))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::derive(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
