//! Byte sinks and sources the binary codec reads from and writes to.
//!
//! The codec itself never fails on I/O. Sinks that can fail (such as
//! [`WriterSink`]) keep the first error for the caller to collect, and
//! sources that can fail (such as [`ReaderSource`]) report exhaustion from
//! then on.

use std::io::{self, BufRead, Write};

/// Destination for encoded bytes.
pub trait ByteSink {
    fn put_u8(&mut self, byte: u8);

    fn put_slice(&mut self, bytes: &[u8]);
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn put_u8(&mut self, byte: u8) {
        self.push(byte);
    }

    #[inline]
    fn put_slice(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline]
    fn put_u8(&mut self, byte: u8) {
        (**self).put_u8(byte);
    }

    #[inline]
    fn put_slice(&mut self, bytes: &[u8]) {
        (**self).put_slice(bytes);
    }
}

/// Origin of encoded bytes.
///
/// Every method is bounded by what is actually available; a source never
/// blocks waiting for bytes a length prefix merely claims.
pub trait ByteSource {
    /// Takes one byte, or `None` once the source is exhausted.
    fn next_u8(&mut self) -> Option<u8>;

    /// Appends at most `max` bytes to `out` and returns how many were
    /// appended. Fewer than `max` means the source is exhausted.
    fn read_into(&mut self, out: &mut Vec<u8>, max: usize) -> usize;

    fn is_exhausted(&mut self) -> bool;

    /// Discards everything left and returns how many bytes that was.
    fn skip_remaining(&mut self) -> usize;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn next_u8(&mut self) -> Option<u8> {
        (**self).next_u8()
    }

    #[inline]
    fn read_into(&mut self, out: &mut Vec<u8>, max: usize) -> usize {
        (**self).read_into(out, max)
    }

    #[inline]
    fn is_exhausted(&mut self) -> bool {
        (**self).is_exhausted()
    }

    #[inline]
    fn skip_remaining(&mut self) -> usize {
        (**self).skip_remaining()
    }
}

/// A cursor over a borrowed byte slice.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    input: &'a [u8],
    consumed: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, consumed: 0 }
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        self.input
    }

    /// How many bytes have been consumed so far.
    pub fn position(&self) -> usize {
        self.consumed
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn next_u8(&mut self) -> Option<u8> {
        let (&first, rest) = self.input.split_first()?;
        self.input = rest;
        self.consumed += 1;
        Some(first)
    }

    fn read_into(&mut self, out: &mut Vec<u8>, max: usize) -> usize {
        let len = max.min(self.input.len());
        let (head, rest) = self.input.split_at(len);
        out.extend_from_slice(head);
        self.input = rest;
        self.consumed += len;
        len
    }

    #[inline]
    fn is_exhausted(&mut self) -> bool {
        self.input.is_empty()
    }

    fn skip_remaining(&mut self) -> usize {
        let len = self.input.len();
        self.input = &[];
        self.consumed += len;
        len
    }
}

/// Adapts an [`io::Write`] into a [`ByteSink`].
///
/// The first write error is kept and all later writes are dropped; collect
/// it with [`WriterSink::finish`].
pub struct WriterSink<W: Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// Flushes the writer and returns it, or the first error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    #[inline]
    fn put_u8(&mut self, byte: u8) {
        self.put_slice(&[byte]);
    }

    fn put_slice(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.inner.write_all(bytes) {
            self.error = Some(error);
        }
    }
}

/// Adapts an [`io::BufRead`] into a [`ByteSource`].
///
/// An I/O error is treated as exhaustion. The error itself is kept and can
/// be taken with [`ReaderSource::take_error`].
pub struct ReaderSource<R: BufRead> {
    inner: R,
    error: Option<io::Error>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, error: None }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self) -> Option<&[u8]> {
        if self.error.is_some() {
            return None;
        }
        loop {
            match self.inner.fill_buf() {
                Ok([]) => return None,
                Ok(_) => break,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => {
                    self.error = Some(error);
                    return None;
                }
            }
        }
        self.inner.fill_buf().ok()
    }
}

impl<R: BufRead> ByteSource for ReaderSource<R> {
    fn next_u8(&mut self) -> Option<u8> {
        let byte = *self.fill()?.first()?;
        self.inner.consume(1);
        Some(byte)
    }

    fn read_into(&mut self, out: &mut Vec<u8>, max: usize) -> usize {
        let mut total = 0;
        while total < max {
            let Some(buf) = self.fill() else { break };
            let len = buf.len().min(max - total);
            out.extend_from_slice(&buf[..len]);
            self.inner.consume(len);
            total += len;
        }
        total
    }

    fn is_exhausted(&mut self) -> bool {
        self.fill().is_none()
    }

    fn skip_remaining(&mut self) -> usize {
        let mut total = 0;
        while let Some(buf) = self.fill() {
            let len = buf.len();
            self.inner.consume(len);
            total += len;
        }
        total
    }
}

#[cfg(feature = "shared")]
mod shared {
    use bytes::{Buf, BufMut, Bytes, BytesMut};

    use super::{ByteSink, ByteSource};

    impl ByteSink for BytesMut {
        #[inline]
        fn put_u8(&mut self, byte: u8) {
            BufMut::put_u8(self, byte);
        }

        #[inline]
        fn put_slice(&mut self, bytes: &[u8]) {
            BufMut::put_slice(self, bytes);
        }
    }

    impl ByteSource for Bytes {
        #[inline]
        fn next_u8(&mut self) -> Option<u8> {
            self.has_remaining().then(|| self.get_u8())
        }

        fn read_into(&mut self, out: &mut Vec<u8>, max: usize) -> usize {
            let len = max.min(self.len());
            out.extend_from_slice(&self[..len]);
            self.advance(len);
            len
        }

        #[inline]
        fn is_exhausted(&mut self) -> bool {
            self.is_empty()
        }

        fn skip_remaining(&mut self) -> usize {
            let len = self.len();
            self.advance(len);
            len
        }
    }
}
