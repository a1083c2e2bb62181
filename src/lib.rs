//! Shape-driven value traversal with a compact binary codec.
//!
//! A type describes its shape once ([`Traverse`]), and any operation can
//! walk it: the [`BinaryWriter`] encodes it, the [`BinaryReader`] populates
//! it from untrusted bytes, the [`DebugWriter`] renders it, and the
//! [`json`] adapter converts it to and from JSON.
//!
//! ```
//! use traverse::{traverse_enum, traverse_record, decode, render, to_vec};
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq)]
//! enum Color {
//!     #[default]
//!     Red,
//!     Blue,
//! }
//! traverse_enum!(Color: u32 { Red, Blue });
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//! traverse_record!(Point { x, y });
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Polygon {
//!     color: Color,
//!     name: String,
//!     points: Vec<Point>,
//! }
//! traverse_record!(Polygon { color, name, points });
//!
//! let polygon = Polygon {
//!     color: Color::Blue,
//!     name: "ufo".into(),
//!     points: vec![Point { x: 3, y: 5 }, Point { x: 4, y: 6 }],
//! };
//!
//! let bytes = to_vec(&polygon);
//! assert_eq!(bytes, [1, 3, b'u', b'f', b'o', 2, 6, 10, 8, 12]);
//!
//! let decoded = decode::<Polygon>(&bytes);
//! assert!(decoded.diagnostics.is_empty());
//! assert_eq!(render(&decoded.value), render(&polygon));
//!
//! // Truncated input still decodes, with a diagnostic instead of a panic.
//! let decoded = decode::<Polygon>(&bytes[..7]);
//! assert!(decoded.diagnostics.has_errors());
//! assert_eq!(decoded.value.name, "ufo");
//! ```

pub mod debug;
pub mod diagnostic;
pub mod error;
pub mod io;
#[cfg(feature = "json")]
pub mod json;
pub mod read;
pub mod traverse;
pub mod variant;
pub mod varint;
pub mod write;

pub use debug::*;
pub use diagnostic::*;
pub use error::*;
pub use io::*;
pub use read::*;
pub use traverse::*;
pub use variant::Variant;
pub use write::*;
