//! Record walker: visits every declared field and applies its default.

use super::coerce::coerce;
use crate::shape::{Field, FieldMeta, Record, Slot};
use tracing::{trace, warn};

/// Maximum record nesting the walker descends into.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Depth-bounded default walker.
///
/// The walker tracks the record types it is currently inside. A repeated field
/// whose element type is already being walked (a record holding a `Vec` of
/// itself, directly or through other records) is not materialized, so
/// self-referential shapes stay finite. Past `max_depth` the walker stops
/// descending and leaves the deeper values at zero.
#[derive(Debug, Clone)]
pub struct Walker {
    max_depth: usize,
    active: Vec<&'static str>,
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}

impl Walker {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            active: Vec::new(),
        }
    }

    /// Whether a record of type `type_name` is on the current walk path.
    pub fn is_walking(&self, type_name: &str) -> bool {
        self.active.iter().any(|active| *active == type_name)
    }

    /// Walk `field` if it resolves to a record; anything else is a no-op.
    pub fn walk_field<F: Field + ?Sized>(&mut self, field: &mut F) {
        let mut slot = field.slot();
        loop {
            match slot {
                Slot::Record(record) => return self.walk(record),
                Slot::Indirect(Some(inner)) => slot = inner.slot(),
                _ => return,
            }
        }
    }

    /// Apply defaults to every field of `record`, in declaration order.
    pub fn walk(&mut self, record: &mut dyn Record) {
        if self.active.len() >= self.max_depth {
            warn!(
                record = record.type_name(),
                max_depth = self.max_depth,
                "Record nesting exceeds maximum depth, defaults not applied below this point"
            );
            return;
        }

        self.active.push(record.type_name());
        for (index, meta) in record.fields().iter().enumerate() {
            if let Some(slot) = record.field_mut(index) {
                self.apply(meta, slot);
            }
        }
        self.active.pop();
    }

    fn apply(&mut self, meta: &FieldMeta, slot: Slot<'_>) {
        match slot {
            Slot::Repeated(list) => list.materialize(meta.length, meta.default, self),
            Slot::Record(nested) => self.walk(nested),
            Slot::Scalar(scalar) => {
                let Some(raw) = meta.default else {
                    return;
                };
                let kind = scalar.kind();
                if coerce(scalar, raw) {
                    trace!(field = meta.name, default = raw, "Applied default");
                } else {
                    trace!(
                        field = meta.name,
                        default = raw,
                        expected = %kind,
                        "Default does not coerce, field left unchanged"
                    );
                }
            }
            // Referenced values carry no defaults of their own.
            Slot::Indirect(_) => {}
        }
    }
}
