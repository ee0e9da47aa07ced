//! Shape Model
//!
//! The describable-record abstraction the engine walks. A type takes part in
//! default resolution by implementing [`Field`], which hands out a typed
//! [`Slot`] view of itself. Records additionally implement [`Record`], a table
//! of [`FieldMeta`] descriptors plus indexed slot access. Both are normally
//! generated by `#[derive(Record)]`.

use crate::defaults::Walker;
use std::fmt;

/// Per-field metadata declared with `#[conf(...)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Rust field name
    pub name: &'static str,

    /// `default` literal, interpreted according to the field's shape
    pub default: Option<&'static str>,

    /// `length` of a repeated-value field
    pub length: Option<i64>,

    /// Environment variable bound to the field (environment binder only)
    pub env: Option<&'static str>,
}

impl FieldMeta {
    /// Metadata with only a name set.
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            default: None,
            length: None,
            env: None,
        }
    }
}

/// A value that can be addressed by the default engine.
pub trait Field {
    /// Typed view of this value.
    fn slot(&mut self) -> Slot<'_>;
}

/// A record shape: named fields visited in declaration order.
pub trait Record: Field {
    /// Fully qualified name of the record type.
    ///
    /// Used in diagnostics and to recognise a record type that is already
    /// being walked, so distinct types must return distinct names.
    fn type_name(&self) -> &'static str;

    /// Descriptor table, one entry per non-skipped field.
    fn fields(&self) -> &'static [FieldMeta];

    /// Slot of the field at `index` in [`Record::fields`].
    fn field_mut(&mut self, index: usize) -> Option<Slot<'_>>;
}

/// A repeated-value container.
pub trait Repeated {
    /// Shape of one element, computed on a zero value.
    fn element_shape(&self) -> Shape;

    /// Replace the container with `length` copies of one defaulted element.
    fn materialize(&mut self, length: Option<i64>, default: Option<&str>, walker: &mut Walker);

    /// Replace the container with one element per raw item.
    ///
    /// Returns `false` and leaves the container unchanged when an item does not
    /// coerce or the element shape is not a scalar.
    fn assign_items(&mut self, items: &[&str]) -> bool;
}

/// Classification of a field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar(ScalarKind),
    Record,
    Repeated,
    Indirect,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(kind) => write!(f, "scalar ({})", kind),
            Shape::Record => write!(f, "record"),
            Shape::Repeated => write!(f, "repeated"),
            Shape::Indirect => write!(f, "indirect"),
        }
    }
}

/// Native scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Str,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bool,
}

impl ScalarKind {
    /// Type name as written in Rust.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Str => "String",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::Isize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::Usize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Bool => "bool",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable view of a scalar destination.
pub enum Scalar<'a> {
    Str(&'a mut String),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Bool(&'a mut bool),
}

impl Scalar<'_> {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Str(_) => ScalarKind::Str,
            Scalar::I8(_) => ScalarKind::I8,
            Scalar::I16(_) => ScalarKind::I16,
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::I64(_) => ScalarKind::I64,
            Scalar::Isize(_) => ScalarKind::Isize,
            Scalar::U8(_) => ScalarKind::U8,
            Scalar::U16(_) => ScalarKind::U16,
            Scalar::U32(_) => ScalarKind::U32,
            Scalar::U64(_) => ScalarKind::U64,
            Scalar::Usize(_) => ScalarKind::Usize,
            Scalar::F32(_) => ScalarKind::F32,
            Scalar::F64(_) => ScalarKind::F64,
            Scalar::Bool(_) => ScalarKind::Bool,
        }
    }
}

/// Mutable, shape-tagged view of a value.
pub enum Slot<'a> {
    Scalar(Scalar<'a>),
    Record(&'a mut dyn Record),
    Repeated(&'a mut dyn Repeated),
    /// A reference to another value; `None` when nothing is referenced.
    Indirect(Option<&'a mut dyn Field>),
}

impl Slot<'_> {
    pub fn shape(&self) -> Shape {
        match self {
            Slot::Scalar(scalar) => Shape::Scalar(scalar.kind()),
            Slot::Record(_) => Shape::Record,
            Slot::Repeated(_) => Shape::Repeated,
            Slot::Indirect(_) => Shape::Indirect,
        }
    }
}

impl Field for String {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Scalar(Scalar::Str(self))
    }
}

macro_rules! scalar_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Field for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Scalar(Scalar::$variant(self))
                }
            }
        )*
    };
}

scalar_field! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

impl<T: Field + Default + Clone> Field for Vec<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Repeated(self)
    }
}

impl<T: Field> Field for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Indirect(self.as_mut().map(|value| value as &mut dyn Field))
    }
}

impl<T: Field> Field for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Indirect(Some(&mut **self))
    }
}
