//! Variable-length integer encoding.
//!
//! Unsigned integers are written base-128, least significant group first,
//! seven value bits per byte. The high bit of a byte is set when more bytes
//! follow. Signed integers are zigzag-mapped onto unsigned ones first, so
//! small magnitudes of either sign stay short.
//!
//! ```
//! use traverse::varint;
//!
//! let mut buf = Vec::new();
//! varint::encode_signed(&mut buf, -1);
//! assert_eq!(buf, [0b0000_0001]);
//!
//! let mut source = traverse::SliceSource::new(&buf);
//! assert_eq!(varint::decode_signed(&mut source), Some(-1));
//! ```

use crate::{ByteSink, ByteSource};

/// Largest number of bytes a 64-bit value occupies on the wire.
pub const MAX_LEN: usize = 10;

const CONTINUE: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;

/// Maps a signed value onto an unsigned one: `0, -1, 1, -2, ...` become
/// `0, 1, 2, 3, ...`. Total over the whole `i64` range.
#[inline]
pub const fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag`].
#[inline]
pub const fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Number of bytes [`encode_unsigned`] emits for `value`.
#[inline]
pub const fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    if bits == 0 { 1 } else { bits.div_ceil(7) }
}

/// Writes `value` as a varint. Always emits at least one byte.
pub fn encode_unsigned<S: ByteSink + ?Sized>(sink: &mut S, mut value: u64) {
    let mut buf = [0u8; MAX_LEN];
    let mut len = 0;
    while value > PAYLOAD as u64 {
        buf[len] = (value as u8 & PAYLOAD) | CONTINUE;
        value >>= 7;
        len += 1;
    }
    buf[len] = value as u8;
    sink.put_slice(&buf[..=len]);
}

/// Reads one varint.
///
/// Consumes bytes until one has its high bit clear. Returns `None` if the
/// source runs dry first; the partial value is discarded. Bits beyond the
/// 64th are dropped, so an over-long encoding still terminates once its
/// final byte arrives.
pub fn decode_unsigned<S: ByteSource + ?Sized>(source: &mut S) -> Option<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = source.next_u8()?;
        if shift < 64 {
            value |= u64::from(byte & PAYLOAD) << shift;
        }
        if byte & CONTINUE == 0 {
            return Some(value);
        }
        shift = shift.saturating_add(7);
    }
}

/// Writes `value` zigzag-mapped, then as an unsigned varint.
#[inline]
pub fn encode_signed<S: ByteSink + ?Sized>(sink: &mut S, value: i64) {
    encode_unsigned(sink, zigzag(value));
}

/// Reads a zigzag-mapped varint.
#[inline]
pub fn decode_signed<S: ByteSource + ?Sized>(source: &mut S) -> Option<i64> {
    decode_unsigned(source).map(unzigzag)
}
