//! Repeated-value materialization.
//!
//! A repeated field with `length = N` is replaced by `N` clones of one
//! template element. Elements are independent values; nothing is shared
//! between slots.

use super::coerce::coerce;
use super::walker::Walker;
use crate::shape::{Field, Repeated, Shape, Slot};
use tracing::trace;

impl<T: Field + Default + Clone> Repeated for Vec<T> {
    fn element_shape(&self) -> Shape {
        let mut zero = T::default();
        let shape = zero.slot().shape();
        shape
    }

    fn materialize(&mut self, length: Option<i64>, default: Option<&str>, walker: &mut Walker) {
        let Some(length) = declared_length(length) else {
            return;
        };
        let Some(item) = template::<T>(default, walker) else {
            trace!("Element is repeated or already being walked, skipping materialization");
            return;
        };
        *self = vec![item; length];
    }

    fn assign_items(&mut self, items: &[&str]) -> bool {
        let mut values = Vec::with_capacity(items.len());
        for raw in items {
            let mut item = T::default();
            let applied = match item.slot() {
                Slot::Scalar(scalar) => coerce(scalar, raw),
                _ => false,
            };
            if !applied {
                return false;
            }
            values.push(item);
        }
        *self = values;
        true
    }
}

/// Usable container length, or `None` when the field must be left alone.
fn declared_length(length: Option<i64>) -> Option<usize> {
    length
        .filter(|len| *len >= 1)
        .and_then(|len| usize::try_from(len).ok())
}

/// One defaulted element computed from a zero value.
///
/// `None` when the element is itself a repeated container, or a record type
/// the walker is already inside.
fn template<T: Field + Default>(default: Option<&str>, walker: &mut Walker) -> Option<T> {
    let mut item = T::default();
    match item.slot() {
        Slot::Repeated(_) => return None,
        Slot::Record(record) => {
            if walker.is_walking(record.type_name()) {
                return None;
            }
            walker.walk(record);
        }
        Slot::Scalar(scalar) => {
            if let Some(raw) = default {
                coerce(scalar, raw);
            }
        }
        Slot::Indirect(_) => {}
    }
    Some(item)
}
