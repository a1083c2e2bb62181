//! The binary writer.
//!
//! # Wire format
//!
//! | Shape | Encoding |
//! |-------|----------|
//! | `bool`, unsigned integers, unsigned enums | unsigned varint |
//! | signed integers, signed enums | zigzag varint |
//! | `f32` / `f64` | 4 / 8 raw little-endian IEEE-754 bytes |
//! | text | unsigned varint length, then the raw bytes |
//! | sequence | unsigned varint count, then each element |
//! | record | each field in declared order, nothing else |
//! | tagged union | unsigned varint alternative index, then the alternative |
//!
//! No names, tags or terminators are written. A reader must know the exact
//! shape the writer used.

use std::io::Write;

use zerocopy::byteorder::{self, LittleEndian};

use crate::{ByteSink, Error, Primitive, Result, Scalar, Traverse, Visitor, WriterSink, varint};

/// Serializes a value depth-first into a [`ByteSink`].
///
/// Writing cannot fail; failures of the sink itself are the sink's concern.
pub struct BinaryWriter<S: ByteSink> {
    sink: S,
}

impl<S: ByteSink> BinaryWriter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: ByteSink> Visitor for BinaryWriter<S> {
    fn primitive<P: Primitive>(&mut self, value: P) {
        match value.to_scalar() {
            Scalar::Bool(value) => varint::encode_unsigned(&mut self.sink, value as u64),
            Scalar::Unsigned(value) => varint::encode_unsigned(&mut self.sink, value),
            Scalar::Signed(value) => varint::encode_signed(&mut self.sink, value),
            Scalar::F32(value) => self
                .sink
                .put_slice(&byteorder::F32::<LittleEndian>::new(value).to_bytes()),
            Scalar::F64(value) => self
                .sink
                .put_slice(&byteorder::F64::<LittleEndian>::new(value).to_bytes()),
        }
    }

    fn text(&mut self, value: &[u8]) {
        varint::encode_unsigned(&mut self.sink, value.len() as u64);
        self.sink.put_slice(value);
    }

    fn begin_sequence(&mut self, len: usize) {
        varint::encode_unsigned(&mut self.sink, len as u64);
    }

    fn begin_variant(
        &mut self,
        _name: &'static str,
        _alternatives: &'static [&'static str],
        index: usize,
    ) {
        varint::encode_unsigned(&mut self.sink, index as u64);
    }
}

/// Appends the encoding of `value` to `sink`.
#[inline]
pub fn write_into<T: Traverse + ?Sized>(value: &T, sink: &mut impl ByteSink) {
    value.traverse(&mut BinaryWriter::new(sink));
}

/// Serialize a value to a new byte vector.
///
/// # Example
///
/// ```
/// use traverse::to_vec;
///
/// assert_eq!(to_vec(&-1i64), [0x01]);
/// assert_eq!(to_vec(&300u32), [0xac, 0x02]);
/// assert_eq!(to_vec(&String::from("hi")), [2, b'h', b'i']);
/// assert_eq!(to_vec(&vec![1u8, 2, 3]), [3, 1, 2, 3]);
/// ```
pub fn to_vec<T: Traverse + ?Sized>(value: &T) -> Vec<u8> {
    let mut vec = Vec::new();
    write_into(value, &mut vec);
    vec
}

/// Serialize a value into an [`io::Write`](std::io::Write).
///
/// # Errors
///
/// Returns [`Error::IO`] with the first error the writer reported.
pub fn to_writer<T: Traverse + ?Sized>(value: &T, writer: impl Write) -> Result<()> {
    let mut sink = WriterSink::new(writer);
    write_into(value, &mut sink);
    sink.finish().map(drop).map_err(Error::IO)
}
