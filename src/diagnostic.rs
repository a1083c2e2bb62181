//! Non-fatal diagnostics collected while reading.
//!
//! Readers never abort a traversal. Each leaf that cannot be read records a
//! [`Diagnostic`] and leaves its destination in a deterministic state, and
//! the traversal carries on with the next sibling. The caller inspects the
//! collected [`Diagnostics`] afterwards.
//!
//! Two severities exist. An [`Severity::Error`] means the input was
//! structurally insufficient or corrupt; the binary codec only ever produces
//! these. A [`Severity::Warning`] means the input was plausible but did not
//! match the declared shape, which only the text adapters report.
//!
//! Trailing data is an error by severity but is not *fatal*: it is reported
//! so the caller can see it, and [`Diagnostics::has_errors`] ignores it.
//!
//! # Example
//!
//! ```
//! use traverse::{decode, DiagnosticKind};
//!
//! let decoded = decode::<u32>(&[0x80]);
//! assert_eq!(decoded.value, 0);
//! assert!(decoded.diagnostics.has_errors());
//! assert_eq!(decoded.diagnostics[0].kind, DiagnosticKind::Underflow);
//! ```

use std::fmt::{self, Display};
use std::ops::Index;

/// What went wrong.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    /// The source ran out before a value was complete.
    Underflow,
    /// A decoded discriminant or enum value names nothing declared.
    Range,
    /// Bytes remain after a complete top-level value.
    TrailingData,
    /// Text was not valid UTF-8 where a `String` was expected.
    Encoding,
    /// The input had the wrong shape for the declared type.
    Mismatch,
}

impl DiagnosticKind {
    pub const fn severity(self) -> Severity {
        match self {
            Self::Mismatch => Severity::Warning,
            Self::Underflow | Self::Range | Self::TrailingData | Self::Encoding => Severity::Error,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Warning => formatter.write_str("Warning"),
            Severity::Error => formatter.write_str("Error"),
        }
    }
}

/// One human-readable problem found while reading.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[inline]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Whether this diagnostic makes the decoded value unusable.
    ///
    /// False for warnings and for trailing data.
    #[inline]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::Underflow | DiagnosticKind::Range | DiagnosticKind::Encoding
        )
    }
}

impl Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}: {}", self.severity(), self.message)
    }
}

/// The diagnostics of one traversal, in the order they were found.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Whether any diagnostic is fatal. Trailing data and warnings are not.
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_fatal)
    }

    pub fn has_warnings(&self) -> bool {
        self.0.iter().any(|d| d.severity() == Severity::Warning)
    }

    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.0.iter().any(|d| d.kind == kind)
    }

    /// The fatal diagnostics only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.is_fatal())
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl Index<usize> for Diagnostics {
    type Output = Diagnostic;

    fn index(&self, index: usize) -> &Diagnostic {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// One diagnostic per line.
impl Display for Diagnostics {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for diagnostic in &self.0 {
            writeln!(formatter, "{diagnostic}")?;
        }
        Ok(())
    }
}
