//! Default Resolution
//!
//! Populates a record from its `#[conf(default = ..)]` / `#[conf(length = ..)]`
//! metadata. Defaulting is best-effort: a malformed or out-of-range literal, a
//! repeated field with `length < 1`, and a repeated field of repeated values are
//! all skipped silently, leaving the field at its prior value.

mod coerce;
mod materialize;
mod walker;

pub use coerce::coerce;
pub use walker::{Walker, DEFAULT_MAX_DEPTH};

use crate::shape::Field;

/// Populate the defaults layer of `target`.
///
/// Non-record values are left untouched. Never fails.
pub fn load_defaults<T: Field + ?Sized>(target: &mut T) {
    Walker::new().walk_field(target);
}
