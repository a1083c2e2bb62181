//! JSON adapter over [`serde_json::Value`].
//!
//! Uses the same traversal as the binary codec. Records become objects keyed
//! by field label, sequences become arrays, and a tagged union becomes
//! `{"which": <index>, "data": <alternative>}`.
//!
//! Reading is forgiving in the way JSON written by hand needs: a value of
//! the wrong JSON type, a missing field or an unexpected extra field is a
//! [`Mismatch`](DiagnosticKind::Mismatch) warning and the destination keeps
//! its default. A malformed union is an error.
//!
//! ```
//! use serde_json::json;
//! use traverse::{traverse_record, json::{from_json, to_json}};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point { x: i32, y: i32 }
//! traverse_record!(Point { x, y });
//!
//! assert_eq!(to_json(&Point { x: 3, y: 5 }), json!({"x": 3, "y": 5}));
//!
//! let decoded = from_json::<Point>(&json!({"y": 7}));
//! assert_eq!(decoded.value, Point { x: 0, y: 7 });
//! assert!(decoded.diagnostics.has_warnings());
//! assert!(!decoded.diagnostics.has_errors());
//! ```

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::{
    Decoded, Diagnostic, DiagnosticKind, Diagnostics, Primitive, PrimitiveKind, Scalar, Traverse,
    Visitor, VisitorMut,
};

const WHICH: &str = "which";
const DATA: &str = "data";

enum Frame {
    Array(Vec<Value>),
    Object(Map<String, Value>, Option<String>),
}

/// Builds a [`Value`] from a traversal.
#[derive(Default)]
pub struct JsonWriter {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished value, or `Null` if nothing was written.
    pub fn into_value(self) -> Value {
        self.root.unwrap_or(Value::Null)
    }

    fn emit(&mut self, value: Value) {
        match self.stack.last_mut() {
            None => self.root = Some(value),
            Some(Frame::Array(array)) => array.push(value),
            Some(Frame::Object(object, key)) => {
                if let Some(key) = key.take() {
                    object.insert(key, value);
                }
            }
        }
    }

    fn pop(&mut self) {
        let value = match self.stack.pop() {
            Some(Frame::Array(array)) => Value::Array(array),
            Some(Frame::Object(object, _)) => Value::Object(object),
            None => return,
        };
        self.emit(value);
    }

    fn set_key(&mut self, label: &str) {
        if let Some(Frame::Object(_, key)) = self.stack.last_mut() {
            *key = Some(label.to_owned());
        }
    }
}

impl Visitor for JsonWriter {
    fn primitive<P: Primitive>(&mut self, value: P) {
        let value = match value.to_scalar() {
            Scalar::Bool(value) => Value::Bool(value),
            Scalar::Unsigned(value) => Value::Number(value.into()),
            Scalar::Signed(value) => Value::Number(value.into()),
            Scalar::F32(value) => {
                Number::from_f64(value.into()).map_or(Value::Null, Value::Number)
            }
            Scalar::F64(value) => Number::from_f64(value).map_or(Value::Null, Value::Number),
        };
        self.emit(value);
    }

    fn text(&mut self, value: &[u8]) {
        self.emit(Value::String(String::from_utf8_lossy(value).into_owned()));
    }

    fn string(&mut self, value: &str) {
        self.emit(Value::String(value.to_owned()));
    }

    fn begin_sequence(&mut self, len: usize) {
        self.stack.push(Frame::Array(Vec::with_capacity(len)));
    }

    fn end_sequence(&mut self) {
        self.pop();
    }

    fn begin_record(&mut self, _name: &'static str, _fields: &'static [&'static str]) {
        self.stack.push(Frame::Object(Map::new(), None));
    }

    fn field(&mut self, _index: usize, label: &'static str) {
        self.set_key(label);
    }

    fn end_record(&mut self) {
        self.pop();
    }

    fn begin_variant(
        &mut self,
        _name: &'static str,
        _alternatives: &'static [&'static str],
        index: usize,
    ) {
        self.stack.push(Frame::Object(Map::new(), Some(WHICH.to_owned())));
        self.emit(Value::Number(index.into()));
        self.set_key(DATA);
    }

    fn end_variant(&mut self) {
        self.pop();
    }
}

/// Converts a value to JSON.
pub fn to_json<T: Traverse + ?Sized>(value: &T) -> Value {
    let mut writer = JsonWriter::new();
    value.traverse(&mut writer);
    writer.into_value()
}

enum Cursor<'a> {
    Array(&'a [Value]),
    Object(&'a Map<String, Value>),
}

/// Populates a value from a borrowed [`Value`], collecting diagnostics.
pub struct JsonReader<'a> {
    current: &'a Value,
    stack: Vec<Cursor<'a>>,
    diagnostics: Diagnostics,
}

impl<'a> JsonReader<'a> {
    pub fn new(input: &'a Value) -> Self {
        Self {
            current: input,
            stack: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    fn report(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(kind, message);
        debug!(target: "traverse::json", ?kind, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// The current value as a scalar of `kind`, or what was expected instead.
    fn scalar(&self, kind: PrimitiveKind) -> Result<Scalar, &'static str> {
        let number = match (self.current, kind) {
            (Value::Bool(value), PrimitiveKind::Bool) => return Ok(Scalar::Bool(*value)),
            (Value::Number(number), _) => number,
            (_, PrimitiveKind::Bool) => return Err("boolean"),
            _ => return Err("number"),
        };
        match kind {
            PrimitiveKind::Bool | PrimitiveKind::Unsigned => match number.as_u64() {
                Some(value) => Ok(Scalar::Unsigned(value)),
                None if number.is_i64() => Err("non-negative integer"),
                None => Err("integer"),
            },
            PrimitiveKind::Signed => match number.as_i64() {
                Some(value) => Ok(Scalar::Signed(value)),
                None if number.is_u64() => Err("integer within the signed 64-bit range"),
                None => Err("integer"),
            },
            PrimitiveKind::F32 | PrimitiveKind::F64 => {
                number.as_f64().map(Scalar::F64).ok_or("number")
            }
        }
    }
}

impl VisitorMut for JsonReader<'_> {
    fn primitive<P: Primitive>(&mut self, value: &mut P) {
        let scalar = match self.scalar(P::KIND) {
            Ok(scalar) => scalar,
            Err(expected) => {
                self.report(
                    DiagnosticKind::Mismatch,
                    format!("expected JSON {expected}; skipping"),
                );
                return;
            }
        };
        match P::from_scalar(scalar) {
            Some(decoded) => *value = decoded,
            None => self.report(
                DiagnosticKind::Range,
                format!("value {scalar} out of range for {}", P::NAME),
            ),
        }
    }

    fn text(&mut self, value: &mut Vec<u8>) {
        match self.current.as_str() {
            Some(text) => {
                value.clear();
                value.extend_from_slice(text.as_bytes());
            }
            None => self.report(DiagnosticKind::Mismatch, "expected JSON string; skipping"),
        }
    }

    fn string(&mut self, value: &mut String) {
        match self.current.as_str() {
            Some(text) => text.clone_into(value),
            None => self.report(DiagnosticKind::Mismatch, "expected JSON string; skipping"),
        }
    }

    fn begin_sequence(&mut self) -> Option<usize> {
        let current = self.current;
        match current.as_array() {
            Some(array) => {
                self.stack.push(Cursor::Array(array));
                Some(array.len())
            }
            None => {
                self.report(DiagnosticKind::Mismatch, "expected JSON array; skipping");
                None
            }
        }
    }

    fn element(&mut self, index: usize) -> bool {
        match self.stack.last() {
            Some(&Cursor::Array(array)) => match array.get(index) {
                Some(element) => {
                    self.current = element;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn end_sequence(&mut self, _expected: usize, _found: usize) {
        self.stack.pop();
    }

    fn begin_record(&mut self, name: &'static str, fields: &'static [&'static str]) -> bool {
        let current = self.current;
        let Some(object) = current.as_object() else {
            self.report(
                DiagnosticKind::Mismatch,
                format!("expected JSON object for {name}; skipping"),
            );
            return false;
        };
        for key in object.keys() {
            if !fields.contains(&key.as_str()) {
                self.report(
                    DiagnosticKind::Mismatch,
                    format!("JSON object has unexpected field {key} for {name}"),
                );
            }
        }
        self.stack.push(Cursor::Object(object));
        true
    }

    fn field(&mut self, _index: usize, label: &'static str) -> bool {
        let Some(&Cursor::Object(object)) = self.stack.last() else {
            return false;
        };
        match object.get(label) {
            Some(value) => {
                self.current = value;
                true
            }
            None => {
                self.report(
                    DiagnosticKind::Mismatch,
                    format!("JSON object missing field {label}"),
                );
                false
            }
        }
    }

    fn end_record(&mut self) {
        self.stack.pop();
    }

    fn begin_variant(
        &mut self,
        name: &'static str,
        alternatives: &'static [&'static str],
    ) -> Option<usize> {
        let current = self.current;
        let Some(object) = current.as_object() else {
            self.report(
                DiagnosticKind::Mismatch,
                format!("expected JSON object for {name}; skipping"),
            );
            return None;
        };
        let (Some(which), Some(data)) = (object.get(WHICH), object.get(DATA)) else {
            let missing = if object.contains_key(WHICH) { DATA } else { WHICH };
            self.report(
                DiagnosticKind::Underflow,
                format!("JSON object missing field '{missing}' for {name}"),
            );
            return None;
        };
        match which.as_u64().and_then(|which| usize::try_from(which).ok()) {
            Some(index) if index < alternatives.len() => {
                self.current = data;
                Some(index)
            }
            _ => {
                self.report(
                    DiagnosticKind::Range,
                    format!(
                        "tried to read variant {which} of {name} \
                         but there are only {} alternatives",
                        alternatives.len()
                    ),
                );
                None
            }
        }
    }
}

/// Converts JSON to a default-initialized `T`. Never fails; inspect the
/// diagnostics.
pub fn from_json<T: Traverse + Default>(input: &Value) -> Decoded<T> {
    let mut value = T::default();
    let mut reader = JsonReader::new(input);
    value.traverse_mut(&mut reader);
    Decoded {
        value,
        diagnostics: reader.into_diagnostics(),
    }
}
