//! The binary reader.
//!
//! [`BinaryReader`] rebuilds a value from bytes written by
//! [`BinaryWriter`](crate::BinaryWriter). It never panics and never stops a
//! traversal early. Each read that fails records a [`Diagnostic`] and leaves
//! its destination as follows:
//!
//! - primitives keep their current (usually default) value,
//! - text keeps whatever prefix was available,
//! - sequences keep the elements read before the source ran out,
//! - records keep every field that was read, including those after a
//!   failed one,
//! - tagged unions with an unknown discriminant keep their prior state.
//!
//! Length prefixes come from untrusted input. Nothing is allocated from a
//! claimed length; text is copied in bounded chunks and sequences grow one
//! element at a time.

use std::io::BufRead;

use tracing::{debug, trace};
use zerocopy::byteorder::{self, LittleEndian};

use crate::{
    ByteSource, Diagnostic, DiagnosticKind, Diagnostics, Error, Primitive, PrimitiveKind,
    ReaderSource, Result, Scalar, SliceSource, Traverse, VisitorMut, varint,
};

const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Knobs for decoding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReadOptions {
    chunk_size: usize,
    reject_trailing_data: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            reject_trailing_data: false,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest number of bytes copied per step while reading text.
    /// Values below 1 are treated as 1.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Make the strict functions fail with [`Error::TrailingData`] when bytes
    /// remain after the value.
    pub fn reject_trailing_data(mut self, reject: bool) -> Self {
        self.reject_trailing_data = reject;
        self
    }

    pub fn get_chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn rejects_trailing_data(&self) -> bool {
        self.reject_trailing_data
    }
}

/// Counts the bytes taken from a source.
struct Counted<S> {
    inner: S,
    consumed: u64,
}

impl<S: ByteSource> ByteSource for Counted<S> {
    #[inline]
    fn next_u8(&mut self) -> Option<u8> {
        let byte = self.inner.next_u8()?;
        self.consumed += 1;
        Some(byte)
    }

    fn read_into(&mut self, out: &mut Vec<u8>, max: usize) -> usize {
        let len = self.inner.read_into(out, max);
        self.consumed += len as u64;
        len
    }

    #[inline]
    fn is_exhausted(&mut self) -> bool {
        self.inner.is_exhausted()
    }

    fn skip_remaining(&mut self) -> usize {
        let len = self.inner.skip_remaining();
        self.consumed += len as u64;
        len
    }
}

/// Populates a value from a [`ByteSource`], collecting diagnostics.
pub struct BinaryReader<S: ByteSource> {
    source: Counted<S>,
    diagnostics: Diagnostics,
    chunk_size: usize,
    /// Source position at the start of the latest element of each open
    /// sequence, innermost last.
    elements: Vec<Option<u64>>,
}

impl<S: ByteSource> BinaryReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ReadOptions::default())
    }

    pub fn with_options(source: S, options: ReadOptions) -> Self {
        Self {
            source: Counted {
                inner: source,
                consumed: 0,
            },
            diagnostics: Diagnostics::new(),
            chunk_size: options.chunk_size,
            elements: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source.inner
    }

    /// Number of bytes taken from the source so far.
    pub fn position(&self) -> u64 {
        self.source.consumed
    }

    /// Consumes whatever is left in the source and records a trailing-data
    /// diagnostic if that was anything. Returns the number of bytes left.
    ///
    /// Call once, after the top-level value.
    pub fn finish(&mut self) -> usize {
        let remaining = self.source.skip_remaining();
        trace!(target: "traverse::read", remaining, "finished reading");
        if remaining > 0 {
            self.report(
                DiagnosticKind::TrailingData,
                format!("{remaining} extra bytes after end of message"),
            );
        }
        remaining
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub fn into_parts(self) -> (S, Diagnostics) {
        (self.source.inner, self.diagnostics)
    }

    fn report(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(kind, message);
        debug!(target: "traverse::read", ?kind, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let mut buf = [0u8; N];
        for byte in &mut buf {
            *byte = self.source.next_u8()?;
        }
        Some(buf)
    }

    fn read_scalar(&mut self, kind: PrimitiveKind) -> Option<Scalar> {
        match kind {
            PrimitiveKind::Bool | PrimitiveKind::Unsigned => {
                varint::decode_unsigned(&mut self.source).map(Scalar::Unsigned)
            }
            PrimitiveKind::Signed => varint::decode_signed(&mut self.source).map(Scalar::Signed),
            PrimitiveKind::F32 => self
                .read_array()
                .map(|bytes| Scalar::F32(byteorder::F32::<LittleEndian>::from_bytes(bytes).get())),
            PrimitiveKind::F64 => self
                .read_array()
                .map(|bytes| Scalar::F64(byteorder::F64::<LittleEndian>::from_bytes(bytes).get())),
        }
    }
}

impl<S: ByteSource> VisitorMut for BinaryReader<S> {
    fn primitive<P: Primitive>(&mut self, value: &mut P) {
        let Some(scalar) = self.read_scalar(P::KIND) else {
            self.report(DiagnosticKind::Underflow, "insufficient data for number");
            return;
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
        value.clear();
        let Some(len) = varint::decode_unsigned(&mut self.source) else {
            self.report(DiagnosticKind::Underflow, "insufficient data for string length");
            return;
        };
        let mut remaining = len;
        while remaining > 0 {
            let want = remaining.min(self.chunk_size as u64) as usize;
            let got = self.source.read_into(value, want);
            remaining -= got as u64;
            if got < want {
                break;
            }
        }
        if remaining > 0 {
            self.report(
                DiagnosticKind::Underflow,
                format!(
                    "insufficient data for string body: expected {len} bytes but only found {}",
                    value.len()
                ),
            );
        }
    }

    fn string(&mut self, value: &mut String) {
        let mut bytes = std::mem::take(value).into_bytes();
        self.text(&mut bytes);
        *value = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(error) => {
                let valid_up_to = error.utf8_error().valid_up_to();
                self.report(
                    DiagnosticKind::Encoding,
                    format!("string is not valid UTF-8 after byte {valid_up_to}"),
                );
                String::from_utf8_lossy(error.as_bytes()).into_owned()
            }
        };
    }

    fn begin_sequence(&mut self) -> Option<usize> {
        match varint::decode_unsigned(&mut self.source) {
            Some(len) => {
                self.elements.push(None);
                Some(usize::try_from(len).unwrap_or(usize::MAX))
            }
            None => {
                self.report(DiagnosticKind::Underflow, "insufficient data for sequence length");
                None
            }
        }
    }

    /// Stops at exhaustion, and after an element that consumed nothing: the
    /// rest of the claimed count would not be backed by any input.
    fn element(&mut self, index: usize) -> bool {
        if self.source.is_exhausted() {
            return false;
        }
        let position = self.source.consumed;
        let Some(start) = self.elements.last_mut() else {
            return true;
        };
        if *start == Some(position) {
            self.report(
                DiagnosticKind::Underflow,
                format!("sequence element consumed no input; stopped after {index} elements"),
            );
            return false;
        }
        *start = Some(position);
        true
    }

    fn end_sequence(&mut self, expected: usize, found: usize) {
        self.elements.pop();
        if expected != found {
            self.report(
                DiagnosticKind::Underflow,
                format!("expected {expected} elements in sequence but only found {found}"),
            );
        }
    }

    fn begin_variant(
        &mut self,
        name: &'static str,
        alternatives: &'static [&'static str],
    ) -> Option<usize> {
        let Some(index) = varint::decode_unsigned(&mut self.source) else {
            self.report(DiagnosticKind::Underflow, "insufficient data for variant index");
            return None;
        };
        match usize::try_from(index) {
            Ok(index) if index < alternatives.len() => Some(index),
            _ => {
                self.report(
                    DiagnosticKind::Range,
                    format!(
                        "tried to read variant {index} of {name} \
                         but there are only {} alternatives",
                        alternatives.len()
                    ),
                );
                None
            }
        }
    }
}

/// A decoded value together with everything the reader noticed.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
}

impl<T> Decoded<T> {
    /// Whether the value can be used as-is. Trailing data and warnings do
    /// not count against it.
    pub fn is_ok(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn into_result(self) -> Result<T> {
        if self.diagnostics.has_errors() {
            Err(Error::Malformed(self.diagnostics))
        } else {
            Ok(self.value)
        }
    }
}

/// Reads into an existing value and returns the diagnostics, including one
/// for trailing data.
pub fn decode_into<T: Traverse + ?Sized>(input: &[u8], value: &mut T) -> Diagnostics {
    let mut reader = BinaryReader::new(SliceSource::new(input));
    value.traverse_mut(&mut reader);
    reader.finish();
    reader.into_diagnostics()
}

/// Decodes a default-initialized `T` from `input`. Never fails; inspect the
/// diagnostics to decide whether the value is usable.
pub fn decode<T: Traverse + Default>(input: &[u8]) -> Decoded<T> {
    let mut value = T::default();
    let diagnostics = decode_into(input, &mut value);
    Decoded { value, diagnostics }
}

/// Deserialize a value from a byte slice.
///
/// Trailing bytes are tolerated. Use [`from_slice_exact`] to reject them.
///
/// # Errors
///
/// Returns [`Error::Malformed`] if any fatal diagnostic was recorded.
pub fn from_slice<T: Traverse + Default>(input: &[u8]) -> Result<T> {
    from_slice_with(input, ReadOptions::default())
}

/// Like [`from_slice`], but trailing bytes are an [`Error::TrailingData`].
pub fn from_slice_exact<T: Traverse + Default>(input: &[u8]) -> Result<T> {
    from_slice_with(input, ReadOptions::default().reject_trailing_data(true))
}

pub fn from_slice_with<T: Traverse + Default>(input: &[u8], options: ReadOptions) -> Result<T> {
    let mut value = T::default();
    let mut reader = BinaryReader::with_options(SliceSource::new(input), options);
    value.traverse_mut(&mut reader);
    let remaining = reader.finish();
    let diagnostics = reader.into_diagnostics();
    if diagnostics.has_errors() {
        return Err(Error::Malformed(diagnostics));
    }
    if options.reject_trailing_data && remaining > 0 {
        return Err(Error::TrailingData(remaining));
    }
    Ok(value)
}

/// Deserialize a value from an [`io::BufRead`](std::io::BufRead), reading it
/// to the end.
///
/// # Errors
///
/// Returns [`Error::IO`] if the reader failed, otherwise as [`from_slice`].
pub fn from_reader<T: Traverse + Default>(reader: impl BufRead) -> Result<T> {
    let mut value = T::default();
    let mut binary = BinaryReader::new(ReaderSource::new(reader));
    value.traverse_mut(&mut binary);
    binary.finish();
    let (mut source, diagnostics) = binary.into_parts();
    if let Some(error) = source.take_error() {
        return Err(Error::IO(error));
    }
    Decoded { value, diagnostics }.into_result()
}
