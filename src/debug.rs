//! Human-readable rendering.
//!
//! Records render as `Name{label:value, ...}`, sequences as `[a, b]`, and
//! text quoted with `"` and `\` escaped. Bytes that are not valid UTF-8
//! render as `\xNN`, so distinct text never renders the same. A tagged
//! union renders as its active alternative alone; alternatives that share a
//! payload type are indistinguishable in the output.

use std::fmt::{self, Display, Write as _};

use crate::{Primitive, Scalar, Traverse, Visitor};

/// Renders a value into a `String`.
#[derive(Default)]
pub struct DebugWriter {
    out: String,
}

impl DebugWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl Visitor for DebugWriter {
    fn primitive<P: Primitive>(&mut self, value: P) {
        match value.to_scalar() {
            Scalar::Bool(value) => self.out.push_str(if value { "true" } else { "false" }),
            scalar => {
                let _ = write!(self.out, "{scalar}");
            }
        }
    }

    fn text(&mut self, value: &[u8]) {
        self.out.push('"');
        for chunk in value.utf8_chunks() {
            for ch in chunk.valid().chars() {
                if matches!(ch, '"' | '\\') {
                    self.out.push('\\');
                }
                self.out.push(ch);
            }
            for byte in chunk.invalid() {
                let _ = write!(self.out, "\\x{byte:02x}");
            }
        }
        self.out.push('"');
    }

    fn begin_sequence(&mut self, _len: usize) {
        self.out.push('[');
    }

    fn element(&mut self, index: usize) {
        if index != 0 {
            self.out.push_str(", ");
        }
    }

    fn end_sequence(&mut self) {
        self.out.push(']');
    }

    fn begin_record(&mut self, name: &'static str, _fields: &'static [&'static str]) {
        self.out.push_str(name);
        self.out.push('{');
    }

    fn field(&mut self, index: usize, label: &'static str) {
        if index != 0 {
            self.out.push_str(", ");
        }
        self.out.push_str(label);
        self.out.push(':');
    }

    fn end_record(&mut self) {
        self.out.push('}');
    }

    fn begin_variant(
        &mut self,
        _name: &'static str,
        _alternatives: &'static [&'static str],
        _index: usize,
    ) {
    }
}

/// Renders `value` to a string.
///
/// ```
/// use traverse::render;
///
/// assert_eq!(render(&vec![String::from("a\"b")]), r#"["a\"b"]"#);
/// ```
pub fn render<T: Traverse + ?Sized>(value: &T) -> String {
    let mut writer = DebugWriter::new();
    value.traverse(&mut writer);
    writer.into_string()
}

/// A [`Display`] adapter over [`render`].
pub struct Render<'a, T: ?Sized>(pub &'a T);

impl<T: Traverse + ?Sized> Display for Render<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(&render(self.0))
    }
}
