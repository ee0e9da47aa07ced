//! Environment binder: copies tagged environment variables into a record.
//!
//! A field opts in with `#[conf(env = "NAME")]`. Scalars are coerced with the
//! same rules as defaults; repeated scalar fields take a comma-separated list.
//! Nested records are always searched for tagged fields.

use crate::defaults::coerce;
use crate::error::EnvError;
use crate::shape::{FieldMeta, Record, Shape, Slot};
use std::collections::HashMap;
use tracing::trace;

/// Lookup of environment values by name.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Overlay environment bindings onto `record`.
///
/// Every binding is attempted; fields whose value does not bind are left
/// unchanged and reported in the returned list.
pub fn bind_env(record: &mut dyn Record, env: &dyn EnvSource) -> Vec<EnvError> {
    let mut errors = Vec::new();
    bind_record(record, env, &mut errors);
    errors
}

fn bind_record(record: &mut dyn Record, env: &dyn EnvSource, errors: &mut Vec<EnvError>) {
    for (index, meta) in record.fields().iter().enumerate() {
        let Some(slot) = record.field_mut(index) else {
            continue;
        };
        let bound = meta.env.and_then(|var| env.var(var).map(|value| (var, value)));

        match (slot, bound) {
            (Slot::Record(nested), bound) => {
                if let Some((var, _)) = bound {
                    errors.push(unsupported(var, meta, Shape::Record));
                }
                bind_record(nested, env, errors);
            }
            (slot, Some((var, value))) => bind_value(meta, var, &value, slot, errors),
            (_, None) => {}
        }
    }
}

fn bind_value(
    meta: &FieldMeta,
    var: &str,
    value: &str,
    slot: Slot<'_>,
    errors: &mut Vec<EnvError>,
) {
    match slot {
        Slot::Scalar(scalar) => {
            let kind = scalar.kind();
            if coerce(scalar, value) {
                trace!(field = meta.name, var, "Bound environment value");
            } else {
                errors.push(EnvError::InvalidValue {
                    var: var.to_string(),
                    expected: kind.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Slot::Repeated(list) => match list.element_shape() {
            Shape::Scalar(kind) => {
                if list.assign_items(&split_items(value)) {
                    trace!(field = meta.name, var, "Bound environment list");
                } else {
                    errors.push(EnvError::InvalidValue {
                        var: var.to_string(),
                        expected: format!("comma-separated list of {}", kind),
                        value: value.to_string(),
                    });
                }
            }
            _ => errors.push(unsupported(var, meta, Shape::Repeated)),
        },
        Slot::Indirect(_) => errors.push(unsupported(var, meta, Shape::Indirect)),
        Slot::Record(_) => errors.push(unsupported(var, meta, Shape::Record)),
    }
}

fn split_items(value: &str) -> Vec<&str> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::trim).collect()
}

fn unsupported(var: &str, meta: &FieldMeta, shape: Shape) -> EnvError {
    EnvError::Unsupported {
        var: var.to_string(),
        field: meta.name.to_string(),
        shape,
    }
}
