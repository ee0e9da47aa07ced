//! Integration tests for layered configuration loading

mod file_layer;
pub mod test_utils;
