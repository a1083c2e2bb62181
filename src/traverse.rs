//! The traversal protocol.
//!
//! A type describes its shape once by implementing [`Traverse`]. An
//! operation plugs in by implementing [`Visitor`] (operations that only look
//! at a value, such as writing or rendering) or [`VisitorMut`] (operations
//! that populate a value, such as reading). The shape drives the walk; the
//! operation only decides what happens at each leaf and boundary.
//!
//! | Shape | Rust types | Visitor calls |
//! |-------|------------|---------------|
//! | Primitive | `bool`, integers, `f32`, `f64`, [`traverse_enum!`](crate::traverse_enum) enums | `primitive` |
//! | Text | `String`, [`ByteString`] | `string` / `text` |
//! | Sequence | `Vec<T>` | `begin_sequence`, `element` per item, `end_sequence` |
//! | Record | [`traverse_record!`](crate::traverse_record) structs | `begin_record`, `field` per field, `end_record` |
//! | Tagged union | [`traverse_variant!`](crate::traverse_variant) enums | `begin_variant`, the alternative, `end_variant` |
//!
//! `Box<T>` is transparent. Values must form a tree; recursion depth follows
//! nesting depth and is not limited.

use std::ops::{Deref, DerefMut};

mod primitive;
mod record;

pub use primitive::*;
pub use record::*;

/// A value whose shape is known statically.
pub trait Traverse {
    /// Walks `self`, reporting each leaf and boundary to `visitor`.
    fn traverse<V: Visitor>(&self, visitor: &mut V);

    /// Walks `self`, letting `visitor` overwrite each leaf.
    fn traverse_mut<V: VisitorMut>(&mut self, visitor: &mut V);
}

/// An operation over a borrowed value.
pub trait Visitor {
    fn primitive<P: Primitive>(&mut self, value: P);

    /// Length-delimited text; any byte value is allowed.
    fn text(&mut self, value: &[u8]);

    fn string(&mut self, value: &str) {
        self.text(value.as_bytes());
    }

    fn begin_sequence(&mut self, len: usize);

    /// Called before each element.
    fn element(&mut self, index: usize) {
        let _ = index;
    }

    fn end_sequence(&mut self) {}

    fn begin_record(&mut self, name: &'static str, fields: &'static [&'static str]) {
        let _ = (name, fields);
    }

    /// Called before each field.
    fn field(&mut self, index: usize, label: &'static str) {
        let _ = (index, label);
    }

    fn end_record(&mut self) {}

    /// Called with the position of the active alternative, before it is
    /// walked.
    fn begin_variant(
        &mut self,
        name: &'static str,
        alternatives: &'static [&'static str],
        index: usize,
    );

    fn end_variant(&mut self) {}
}

/// An operation that populates a value in place.
///
/// A failing `begin_*` skips the body and the matching `end_*` call. Every
/// handler is expected to leave its destination in a deterministic state on
/// failure and record why, rather than stop the traversal.
pub trait VisitorMut {
    fn primitive<P: Primitive>(&mut self, value: &mut P);

    /// Replaces the contents of `value`.
    fn text(&mut self, value: &mut Vec<u8>);

    fn string(&mut self, value: &mut String);

    /// Returns the element count, or `None` if no sequence can be read here.
    fn begin_sequence(&mut self) -> Option<usize>;

    /// Whether element `index` should be read. `false` ends the sequence
    /// early.
    fn element(&mut self, index: usize) -> bool;

    /// Called with the count from `begin_sequence` and the number of
    /// elements actually read.
    fn end_sequence(&mut self, expected: usize, found: usize);

    fn begin_record(&mut self, name: &'static str, fields: &'static [&'static str]) -> bool {
        let _ = (name, fields);
        true
    }

    /// Whether the field should be read. `false` keeps its current value.
    fn field(&mut self, index: usize, label: &'static str) -> bool {
        let _ = (index, label);
        true
    }

    fn end_record(&mut self) {}

    /// Returns the position of the alternative to read, which must be below
    /// `alternatives.len()`, or `None` to leave the union as it is.
    fn begin_variant(
        &mut self,
        name: &'static str,
        alternatives: &'static [&'static str],
    ) -> Option<usize>;

    fn end_variant(&mut self) {}
}

/// Walks `value` with a read-only operation.
#[inline]
pub fn traverse<T: Traverse + ?Sized, V: Visitor>(visitor: &mut V, value: &T) {
    value.traverse(visitor);
}

/// Walks `value` with a populating operation.
#[inline]
pub fn traverse_mut<T: Traverse + ?Sized, V: VisitorMut>(visitor: &mut V, value: &mut T) {
    value.traverse_mut(visitor);
}

impl Traverse for String {
    #[inline]
    fn traverse<V: Visitor>(&self, visitor: &mut V) {
        visitor.string(self);
    }

    #[inline]
    fn traverse_mut<V: VisitorMut>(&mut self, visitor: &mut V) {
        visitor.string(self);
    }
}

/// Text that is not required to be UTF-8.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct ByteString(pub Vec<u8>);

impl ByteString {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for ByteString {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.0
    }
}

impl DerefMut for ByteString {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.0
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for ByteString {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl Traverse for ByteString {
    #[inline]
    fn traverse<V: Visitor>(&self, visitor: &mut V) {
        visitor.text(&self.0);
    }

    #[inline]
    fn traverse_mut<V: VisitorMut>(&mut self, visitor: &mut V) {
        visitor.text(&mut self.0);
    }
}

impl<T: Traverse + Default> Traverse for Vec<T> {
    fn traverse<V: Visitor>(&self, visitor: &mut V) {
        visitor.begin_sequence(self.len());
        for (index, element) in self.iter().enumerate() {
            visitor.element(index);
            element.traverse(visitor);
        }
        visitor.end_sequence();
    }

    fn traverse_mut<V: VisitorMut>(&mut self, visitor: &mut V) {
        self.clear();
        let Some(len) = visitor.begin_sequence() else {
            return;
        };
        // The count is untrusted; grow one element at a time.
        for index in 0..len {
            if !visitor.element(index) {
                break;
            }
            let mut element = T::default();
            element.traverse_mut(visitor);
            self.push(element);
        }
        visitor.end_sequence(len, self.len());
    }
}

impl<T: Traverse + ?Sized> Traverse for Box<T> {
    #[inline]
    fn traverse<V: Visitor>(&self, visitor: &mut V) {
        (**self).traverse(visitor);
    }

    #[inline]
    fn traverse_mut<V: VisitorMut>(&mut self, visitor: &mut V) {
        (**self).traverse_mut(visitor);
    }
}
