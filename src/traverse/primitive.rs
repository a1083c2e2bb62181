use std::fmt::{self, Display};

use crate::{Traverse, Visitor, VisitorMut};

/// How a primitive is laid out, independent of its exact width.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PrimitiveKind {
    Bool,
    Unsigned,
    Signed,
    F32,
    F64,
}

/// A primitive value widened to its representation class.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Scalar {
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    F32(f32),
    F64(f64),
}

impl Scalar {
    /// Reinterprets the scalar as an unsigned integer, truncating or
    /// saturating the way `as` does.
    pub fn as_u64(self) -> u64 {
        match self {
            Scalar::Bool(value) => value as u64,
            Scalar::Unsigned(value) => value,
            Scalar::Signed(value) => value as u64,
            Scalar::F32(value) => value as u64,
            Scalar::F64(value) => value as u64,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Scalar::Bool(value) => value as i64,
            Scalar::Unsigned(value) => value as i64,
            Scalar::Signed(value) => value,
            Scalar::F32(value) => value as i64,
            Scalar::F64(value) => value as i64,
        }
    }

    /// Returns an `F32` unchanged, bit for bit.
    pub fn as_f32(self) -> f32 {
        match self {
            Scalar::Bool(value) => value as u8 as f32,
            Scalar::Unsigned(value) => value as f32,
            Scalar::Signed(value) => value as f32,
            Scalar::F32(value) => value,
            Scalar::F64(value) => value as f32,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Bool(value) => value as u8 as f64,
            Scalar::Unsigned(value) => value as f64,
            Scalar::Signed(value) => value as f64,
            Scalar::F32(value) => value as f64,
            Scalar::F64(value) => value,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scalar::Bool(value) => write!(formatter, "{value}"),
            Scalar::Unsigned(value) => write!(formatter, "{value}"),
            Scalar::Signed(value) => write!(formatter, "{value}"),
            Scalar::F32(value) => write!(formatter, "{value}"),
            Scalar::F64(value) => write!(formatter, "{value}"),
        }
    }
}

/// A leaf value handed to an operation as a whole.
///
/// Implemented for `bool`, every fixed-width integer, `f32`, `f64`, and any
/// fieldless enum passed to [`traverse_enum!`](crate::traverse_enum).
pub trait Primitive: Copy + 'static {
    const KIND: PrimitiveKind;

    /// Type name used in diagnostics.
    const NAME: &'static str;

    fn to_scalar(self) -> Scalar;

    /// Narrows a decoded scalar back to `Self`.
    ///
    /// Integers truncate, so a value written wide and read narrow keeps its
    /// low bits. Enums return `None` for a value they do not declare.
    fn from_scalar(scalar: Scalar) -> Option<Self>;
}

macro_rules! impl_primitive {
    ($kind:ident, $variant:ident, $wide:ident, $as_wide:ident: $($ty:ty),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const KIND: PrimitiveKind = PrimitiveKind::$kind;
                const NAME: &'static str = stringify!($ty);

                #[inline]
                fn to_scalar(self) -> Scalar {
                    Scalar::$variant(self as $wide)
                }

                #[inline]
                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    Some(scalar.$as_wide() as $ty)
                }
            }

            impl Traverse for $ty {
                #[inline]
                fn traverse<V: Visitor>(&self, visitor: &mut V) {
                    visitor.primitive(*self);
                }

                #[inline]
                fn traverse_mut<V: VisitorMut>(&mut self, visitor: &mut V) {
                    visitor.primitive(self);
                }
            }
        )*
    };
}

impl_primitive!(Unsigned, Unsigned, u64, as_u64: u8, u16, u32, u64, usize);
impl_primitive!(Signed, Signed, i64, as_i64: i8, i16, i32, i64, isize);
impl_primitive!(F32, F32, f32, as_f32: f32);
impl_primitive!(F64, F64, f64, as_f64: f64);

impl Primitive for bool {
    const KIND: PrimitiveKind = PrimitiveKind::Bool;
    const NAME: &'static str = "bool";

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }

    #[inline]
    fn from_scalar(scalar: Scalar) -> Option<Self> {
        Some(match scalar {
            Scalar::Bool(value) => value,
            other => other.as_u64() != 0,
        })
    }
}

impl Traverse for bool {
    #[inline]
    fn traverse<V: Visitor>(&self, visitor: &mut V) {
        visitor.primitive(*self);
    }

    #[inline]
    fn traverse_mut<V: VisitorMut>(&mut self, visitor: &mut V) {
        visitor.primitive(self);
    }
}

/// Declares a fieldless enum as a primitive backed by an integer.
///
/// The representation type decides whether values travel as unsigned or
/// signed integers. Reading a value that is not one of the listed variants
/// records a range error and leaves the destination unchanged.
///
/// ```
/// use traverse::{traverse_enum, to_vec, from_slice};
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq)]
/// enum Mood {
///     #[default]
///     Happy,
///     Sad,
///     HulkSmash,
/// }
///
/// traverse_enum!(Mood: u8 { Happy, Sad, HulkSmash });
///
/// let bytes = to_vec(&Mood::HulkSmash);
/// assert_eq!(bytes, [2]);
/// assert_eq!(from_slice::<Mood>(&bytes).unwrap(), Mood::HulkSmash);
/// assert!(from_slice::<Mood>(&[3]).is_err());
/// ```
#[macro_export]
macro_rules! traverse_enum {
    ($name:ident : $repr:ty { $($variant:ident),+ $(,)? }) => {
        impl $crate::Primitive for $name {
            const KIND: $crate::PrimitiveKind = <$repr as $crate::Primitive>::KIND;
            const NAME: &'static str = stringify!($name);

            #[inline]
            fn to_scalar(self) -> $crate::Scalar {
                $crate::Primitive::to_scalar(self as $repr)
            }

            fn from_scalar(scalar: $crate::Scalar) -> ::core::option::Option<Self> {
                let raw = <$repr as $crate::Primitive>::from_scalar(scalar)?;
                $(
                    if raw == $name::$variant as $repr {
                        return ::core::option::Option::Some($name::$variant);
                    }
                )+
                ::core::option::Option::None
            }
        }

        impl $crate::Traverse for $name {
            #[inline]
            fn traverse<V: $crate::Visitor>(&self, visitor: &mut V) {
                visitor.primitive(*self);
            }

            #[inline]
            fn traverse_mut<V: $crate::VisitorMut>(&mut self, visitor: &mut V) {
                visitor.primitive(self);
            }
        }
    };
}
