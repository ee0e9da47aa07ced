//! Shared test utilities for integration tests
//!
//! Provides the config record used across the suites, fixture lookup, and
//! serialized access to process environment variables.

use layerconf::Record;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct ObjKey {
    #[conf(default = "default name")]
    pub name: String,
    #[conf(default = "3")]
    pub retries: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct ArrObj {
    #[conf(default = "val")]
    pub key: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig {
    #[conf(default = "def value", env = "LAYERCONF_TEST_STR")]
    pub str_key: String,
    #[conf(default = "10", env = "LAYERCONF_TEST_INT")]
    pub int_key: i64,
    #[conf(default = "false", env = "LAYERCONF_TEST_BOOL")]
    pub bool_key: bool,
    #[conf(default = "0.5")]
    pub float_key: f64,
    #[conf(default = "arr1", length = 1, env = "LAYERCONF_TEST_ARR")]
    pub str_arr: Vec<String>,
    pub obj_key: ObjKey,
    #[conf(length = 2)]
    pub arr_obj: Vec<ArrObj>,
}

/// Every variable `TestConfig` binds.
pub const TEST_VARS: &[&str] = &[
    "LAYERCONF_TEST_STR",
    "LAYERCONF_TEST_INT",
    "LAYERCONF_TEST_BOOL",
    "LAYERCONF_TEST_ARR",
];

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run `f` with `vars` set and every other `TEST_VARS` entry removed
///
/// Holds a global lock for the duration and restores the previous values
/// afterwards, so tests touching the environment never interleave.
pub fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let names: Vec<&str> = TEST_VARS
        .iter()
        .copied()
        .chain(vars.iter().map(|(name, _)| *name))
        .collect();
    let saved: Vec<(&str, Option<String>)> = names
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    for name in TEST_VARS {
        std::env::remove_var(name);
    }
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = f();

    for (name, value) in saved {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }

    result
}
