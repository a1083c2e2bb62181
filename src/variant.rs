//! Closed tagged unions.
//!
//! A union is an enum whose variants each wrap one alternative type. The
//! position of a variant in the declared list is its discriminant on the
//! wire, so reordering the list changes the format.
//!
//! ```
//! use traverse::{traverse_record, traverse_variant, render, to_vec, decode};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Move { speed: i32, turn: i32 }
//! #[derive(Debug, Default, PartialEq)]
//! struct Quit { time: i32 }
//!
//! traverse_record!(Move { speed, turn });
//! traverse_record!(Quit { time });
//!
//! #[derive(Debug, PartialEq)]
//! enum Message {
//!     Move(Move),
//!     Quit(Quit),
//! }
//!
//! traverse_variant!(Message { Move(Move), Quit(Quit) });
//!
//! let message = Message::Quit(Quit { time: 100 });
//! let bytes = to_vec(&message);
//! assert_eq!(bytes[0], 1);
//! assert_eq!(render(&message), "Quit{time:100}");
//!
//! let decoded = decode::<Message>(&bytes);
//! assert!(decoded.diagnostics.is_empty());
//! assert_eq!(decoded.value, message);
//! ```

/// Position of `name` in `alternatives`, evaluated at compile time by
/// [`traverse_variant!`].
#[doc(hidden)]
pub const fn position(alternatives: &[&str], name: &str) -> usize {
    let mut index = 0;
    while index < alternatives.len() {
        if str_eq(alternatives[index], name) {
            return index;
        }
        index += 1;
    }
    alternatives.len()
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut index = 0;
    while index < a.len() {
        if a[index] != b[index] {
            return false;
        }
        index += 1;
    }
    true
}

/// A closed, ordered list of alternatives.
pub trait Variant: Sized {
    const NAME: &'static str;

    /// Alternative names in discriminant order.
    const ALTERNATIVES: &'static [&'static str];

    /// Position of the active alternative.
    fn index(&self) -> usize;

    /// A default-constructed alternative at `index`, or `None` past the end.
    fn select(index: usize) -> Option<Self>;
}

/// Declares an enum as a tagged union of its variants' payloads.
///
/// Every variant must be a one-field tuple variant whose payload implements
/// [`Traverse`](crate::Traverse) and `Default`. The first alternative is the
/// union's `Default`.
#[macro_export]
macro_rules! traverse_variant {
    ($name:ident { $first:ident($first_ty:ty) $(, $variant:ident($ty:ty))* $(,)? }) => {
        impl $crate::Variant for $name {
            const NAME: &'static str = stringify!($name);
            const ALTERNATIVES: &'static [&'static str] =
                &[stringify!($first) $(, stringify!($variant))*];

            fn index(&self) -> usize {
                match self {
                    $name::$first(_) => 0,
                    $($name::$variant(_) => const {
                        $crate::variant::position(
                            <$name as $crate::Variant>::ALTERNATIVES,
                            stringify!($variant),
                        )
                    },)*
                }
            }

            fn select(index: usize) -> ::core::option::Option<Self> {
                let selected = match index {
                    0 => $name::$first(<$first_ty as ::core::default::Default>::default()),
                    $(index if index == const {
                        $crate::variant::position(
                            <$name as $crate::Variant>::ALTERNATIVES,
                            stringify!($variant),
                        )
                    } => $name::$variant(<$ty as ::core::default::Default>::default()),)*
                    _ => return ::core::option::Option::None,
                };
                ::core::option::Option::Some(selected)
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                $name::$first(<$first_ty as ::core::default::Default>::default())
            }
        }

        impl $crate::Traverse for $name {
            fn traverse<V: $crate::Visitor>(&self, visitor: &mut V) {
                visitor.begin_variant(
                    <Self as $crate::Variant>::NAME,
                    <Self as $crate::Variant>::ALTERNATIVES,
                    $crate::Variant::index(self),
                );
                match self {
                    $name::$first(inner) => $crate::Traverse::traverse(inner, visitor),
                    $($name::$variant(inner) => $crate::Traverse::traverse(inner, visitor),)*
                }
                visitor.end_variant();
            }

            fn traverse_mut<V: $crate::VisitorMut>(&mut self, visitor: &mut V) {
                let ::core::option::Option::Some(index) = visitor.begin_variant(
                    <Self as $crate::Variant>::NAME,
                    <Self as $crate::Variant>::ALTERNATIVES,
                ) else {
                    return;
                };
                if let ::core::option::Option::Some(selected) =
                    <Self as $crate::Variant>::select(index)
                {
                    *self = selected;
                    match self {
                        $name::$first(inner) => $crate::Traverse::traverse_mut(inner, visitor),
                        $($name::$variant(inner) => {
                            $crate::Traverse::traverse_mut(inner, visitor)
                        })*
                    }
                }
                visitor.end_variant();
            }
        }
    };
}
