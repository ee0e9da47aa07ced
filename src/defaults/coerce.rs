//! Value coercion: string literal into a typed scalar slot.
//!
//! Coercion is all-or-nothing. A literal that does not parse, or that parses
//! but does not fit the destination width, leaves the slot untouched.

use crate::shape::Scalar;

/// Parse `raw` as the slot's native type and write it.
///
/// Returns `true` when the slot was written.
pub fn coerce(slot: Scalar<'_>, raw: &str) -> bool {
    match slot {
        Scalar::Str(dst) => {
            *dst = raw.to_string();
            true
        }
        Scalar::I8(dst) => store(dst, parse_signed(raw).and_then(|v| i8::try_from(v).ok())),
        Scalar::I16(dst) => store(dst, parse_signed(raw).and_then(|v| i16::try_from(v).ok())),
        Scalar::I32(dst) => store(dst, parse_signed(raw).and_then(|v| i32::try_from(v).ok())),
        Scalar::I64(dst) => store(dst, parse_signed(raw)),
        Scalar::Isize(dst) => {
            store(dst, parse_signed(raw).and_then(|v| isize::try_from(v).ok()))
        }
        Scalar::U8(dst) => store(dst, parse_unsigned(raw).and_then(|v| u8::try_from(v).ok())),
        Scalar::U16(dst) => store(dst, parse_unsigned(raw).and_then(|v| u16::try_from(v).ok())),
        Scalar::U32(dst) => store(dst, parse_unsigned(raw).and_then(|v| u32::try_from(v).ok())),
        Scalar::U64(dst) => store(dst, parse_unsigned(raw)),
        Scalar::Usize(dst) => {
            store(dst, parse_unsigned(raw).and_then(|v| usize::try_from(v).ok()))
        }
        Scalar::F32(dst) => store(dst, parse_float(raw).and_then(narrow_f32)),
        Scalar::F64(dst) => store(dst, parse_float(raw)),
        Scalar::Bool(dst) => store(dst, parse_bool(raw)),
    }
}

fn store<T>(dst: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) => {
            *dst = value;
            true
        }
        None => false,
    }
}

/// Base-10 signed integer with an optional sign.
fn parse_signed(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

/// Base-10 unsigned integer; signs are rejected.
fn parse_unsigned(raw: &str) -> Option<u64> {
    if raw.starts_with('+') {
        return None;
    }
    raw.parse::<u64>().ok()
}

/// Decimal or exponent float literal.
///
/// Only finite values are accepted. `inf` and `NaN` spellings are rejected, as
/// is a literal too large for `f64` (std parses it to infinity).
fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn narrow_f32(value: f64) -> Option<f32> {
    if value.abs() > f32::MAX as f64 {
        return None;
    }
    Some(value as f32)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
