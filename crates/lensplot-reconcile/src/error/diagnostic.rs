//! The core diagnostic type.
//!
//! A [`Diagnostic`] describes one repair or decision made during
//! reconciliation, together with the labels or set names it concerns.

use std::fmt;

use crate::error::{ErrorCode, Severity};

/// A diagnostic message about reconciled input.
///
/// Diagnostics carry:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - A primary message describing the issue
/// - The input labels or set names it is about
/// - Optional help text with suggestions
///
/// # Example
///
/// ```text
/// warning[E300]: intersection `A ∩ B` (9999) exceeds smallest member `B` (50); clamped to 50
///   = subjects: A_AND_B
///   = help: intersection sizes cannot be larger than any member set
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    subjects: Vec<String>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a note diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use lensplot_reconcile::error::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::note("inferred `A ∩ B` = 900")
    ///     .with_code(ErrorCode::E200)
    ///     .with_subject("A")
    ///     .with_subject("B");
    ///
    /// assert!(diag.severity().is_note());
    /// assert_eq!(diag.subjects(), ["A", "B"]);
    /// ```
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the labels or set names this diagnostic is about.
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            subjects: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[E001]: message" or "note: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Warning, "test warning");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.message(), "test warning");
        assert!(diag.code().is_none());
        assert!(diag.subjects().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("label `A_AND_` is malformed")
            .with_code(ErrorCode::E001)
            .with_subject("A_AND_")
            .with_help("join 2 or 3 set names with `_AND_`");

        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert_eq!(diag.subjects(), ["A_AND_"]);
        assert_eq!(diag.help(), Some("join 2 or 3 set names with `_AND_`"));
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::note("inferred").with_code(ErrorCode::E200);
        assert_eq!(diag.to_string(), "note[E200]: inferred");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("dropped");
        assert_eq!(diag.to_string(), "warning: dropped");
    }
}
