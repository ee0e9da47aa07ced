//! Property-based tests for default resolution

use layerconf::defaults::Walker;
use layerconf::{load_defaults, FieldMeta, Record, Repeated, Scalar, Slot};
use proptest::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Item {
    #[conf(default = "item")]
    name: String,
    #[conf(default = "1")]
    weight: u8,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Fixed {
    #[conf(default = "fixed")]
    label: String,
    #[conf(default = "-4")]
    offset: i32,
    #[conf(default = "2.5", length = 3)]
    ratios: Vec<f32>,
    #[conf(length = 2)]
    items: Vec<Item>,
}

/// Applying defaults twice yields the same record as applying them once
#[test]
fn test_defaults_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(any::<String>(), any::<i32>(), any::<Vec<f32>>()),
            |(label, offset, ratios)| {
                let mut once = Fixed {
                    label,
                    offset,
                    ratios,
                    items: Vec::new(),
                };
                load_defaults(&mut once);
                let mut twice = once.clone();
                load_defaults(&mut twice);

                prop_assert_eq!(&once.label, "fixed");
                prop_assert_eq!(once.offset, -4);
                prop_assert_eq!(&once.ratios, &vec![2.5f32; 3]);
                prop_assert_eq!(once, twice);
                Ok(())
            },
        )
        .unwrap();
}

/// A record whose table is built at runtime, so the declared length and
/// default literal can vary per case.
#[derive(Debug, Default)]
struct Dynamic {
    meta: Vec<FieldMeta>,
    values: Vec<i64>,
}

impl layerconf::Field for Dynamic {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Record(self)
    }
}

impl Record for Dynamic {
    fn type_name(&self) -> &'static str {
        "Dynamic"
    }

    fn fields(&self) -> &'static [FieldMeta] {
        Box::leak(self.meta.clone().into_boxed_slice())
    }

    fn field_mut(&mut self, index: usize) -> Option<Slot<'_>> {
        match index {
            0 => Some(Slot::Repeated(&mut self.values)),
            _ => None,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A declared length of L >= 1 yields exactly L elements; shorter lengths
    /// leave the field as it was
    #[test]
    fn test_declared_length_property(length in -4i64..24, value in any::<i64>()) {
        let default: &'static str = Box::leak(value.to_string().into_boxed_str());
        let mut record = Dynamic {
            meta: vec![FieldMeta {
                default: Some(default),
                length: Some(length),
                ..FieldMeta::named("values")
            }],
            values: vec![0, 0],
        };
        load_defaults(&mut record);

        if length >= 1 {
            prop_assert_eq!(record.values, vec![value; length as usize]);
        } else {
            prop_assert_eq!(record.values, vec![0, 0]);
        }
    }

    /// Materialized record elements are each fully defaulted
    #[test]
    fn test_record_elements_defaulted(length in 1i64..16) {
        let mut items: Vec<Item> = Vec::new();
        items.materialize(Some(length), None, &mut Walker::new());

        prop_assert_eq!(items.len(), length as usize);
        for item in &items {
            prop_assert_eq!(&item.name, "item");
            prop_assert_eq!(item.weight, 1);
        }
    }

    /// Out-of-range defaults leave every element at zero
    #[test]
    fn test_out_of_range_element_default(value in 256u64..u64::MAX) {
        let mut list: Vec<u8> = Vec::new();
        list.materialize(Some(2), Some(&value.to_string()), &mut Walker::new());
        prop_assert_eq!(list, vec![0u8, 0u8]);
    }
}

/// Scalar slots are reachable through a hand-written record
#[test]
fn test_dynamic_record_slot_shape() {
    let mut record = Dynamic {
        meta: vec![FieldMeta::named("values")],
        values: Vec::new(),
    };
    assert!(matches!(record.field_mut(0), Some(Slot::Repeated(_))));
    assert!(record.field_mut(1).is_none());

    let mut n = 0i64;
    assert!(matches!(
        layerconf::Field::slot(&mut n),
        Slot::Scalar(Scalar::I64(_))
    ));
}
