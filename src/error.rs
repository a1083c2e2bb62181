//! Error type for the strict convenience functions.
//!
//! The codec reports per-field problems as [`Diagnostics`](crate::Diagnostics)
//! and never fails mid-traversal. The functions here turn a finished
//! traversal into a [`Result`] for callers that only want a usable value or
//! nothing.
//!
//! # Example
//!
//! ```
//! use traverse::{from_slice, from_slice_exact, Error};
//!
//! // A complete `u8` followed by one stray byte.
//! let data = [0x05, 0xff];
//! assert_eq!(from_slice::<u8>(&data).unwrap(), 5);
//! assert!(matches!(from_slice_exact::<u8>(&data), Err(Error::TrailingData(1))));
//! assert!(matches!(from_slice::<u8>(&[]), Err(Error::Malformed(_))));
//! ```

use std::fmt::{self, Display};

use crate::Diagnostics;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents a traversal whose result the caller cannot use.
///
/// # Variants
///
/// - [`IO`](Error::IO) - The underlying writer or reader failed
/// - [`Malformed`](Error::Malformed) - Reading recorded fatal diagnostics
/// - [`TrailingData`](Error::TrailingData) - Extra bytes remained and the caller rejects them
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred.
    ///
    /// This happens when writing to a [`std::io::Write`] implementation or
    /// reading from a [`std::io::BufRead`] implementation that fails.
    IO(std::io::Error),

    /// The input could not be decoded into the requested shape.
    ///
    /// Carries every diagnostic recorded during the traversal, fatal or not.
    Malformed(Diagnostics),

    /// Extra bytes remain after a complete value.
    ///
    /// Only returned when trailing data was explicitly rejected through
    /// [`ReadOptions::reject_trailing_data`](crate::ReadOptions::reject_trailing_data).
    TrailingData(usize),
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IO(error) => formatter.write_str(&error.to_string()),
            Error::Malformed(diagnostics) => {
                formatter.write_str("malformed input")?;
                match diagnostics.errors().next() {
                    Some(first) => write!(formatter, ": {}", first.message),
                    None => Ok(()),
                }
            }
            Error::TrailingData(remaining_bytes) => formatter.write_str(&format!(
                "trailing data after end of input: {remaining_bytes} bytes remaining"
            )),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(error) => Some(error),
            _ => None,
        }
    }
}
