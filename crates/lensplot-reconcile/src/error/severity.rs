//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// - [`Severity::Warning`] marks input that was altered or discarded
/// - [`Severity::Note`] records a decision taken on the caller's behalf,
///   such as an inferred intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Input was clamped, dropped or otherwise changed.
    Warning,

    /// Informational; the input was used as given or a gap was filled.
    Note,
}

impl Severity {
    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// Returns `true` if this is a note severity.
    pub fn is_note(&self) -> bool {
        matches!(self, Severity::Note)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}
