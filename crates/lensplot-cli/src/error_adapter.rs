//! Error adapter for converting Lensplot errors and diagnostics to miette reports.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Report Kinds
//!
//! - Reconciliation diagnostics are warnings or notes; each one is rendered
//!   independently with the input labels it concerns highlighted.
//! - An input file that is not valid JSON is rendered with the failing
//!   position highlighted.
//! - Every other [`LensplotError`] is rendered as a plain error.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity, SourceSpan,
};

use serde_json::error::Category;

use lensplot::{Diagnostic, LensplotError};

/// Adapter for a single reconciliation diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Input text for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        if self.diag.severity().is_warning() {
            Some(Severity::Warning)
        } else {
            Some(Severity::Advice)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let spans: Vec<SourceSpan> = self
            .diag
            .subjects()
            .iter()
            .filter_map(|subject| subject_span(self.src, subject))
            .collect();
        if spans.is_empty() {
            return None;
        }

        Some(Box::new(spans.into_iter().enumerate().map(|(index, span)| {
            if index == 0 {
                LabeledSpan::new_primary_with_span(Some("here".to_string()), span)
            } else {
                LabeledSpan::new_with_span(None, span)
            }
        })))
    }
}

/// Adapter for input text that is not valid JSON.
pub struct InputErrorAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> InputErrorAdapter<'a> {
    /// Create a new input error adapter.
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for InputErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for InputErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input: {}", self.err)
    }
}

impl std::error::Error for InputErrorAdapter<'_> {}

impl MietteDiagnostic for InputErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("lensplot::input"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "expected an object of label to count, or {\"counts\": {...}, \"hints\": {...}}",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let offset = line_column_to_offset(self.src, self.err.line(), self.err.column());
        let len = usize::from(offset < self.src.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(
                Some(category_label(self.err).to_string()),
                SourceSpan::new(offset.into(), len),
            ),
        )))
    }
}

/// Short label text for a JSON error category.
fn category_label(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        Category::Syntax => "invalid JSON",
        Category::Data => "unexpected value",
        Category::Eof => "unexpected end of input",
        Category::Io => "read failure",
    }
}

/// Adapter for [`LensplotError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a LensplotError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LensplotError::Io(_) => "lensplot::io",
            LensplotError::Input { .. } => "lensplot::input",
            LensplotError::Config(_) => "lensplot::config",
            LensplotError::Export(_) => "lensplot::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        None
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps a diagnostic, an input error or a plain error, providing
/// a uniform interface for rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A reconciliation diagnostic with the labels it concerns.
    Diagnostic(DiagnosticAdapter<'a>),
    /// Invalid input text with the failing position.
    Input(InputErrorAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Input(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) | Reportable::Input(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Input(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Input(_) | Reportable::Error(_) => None,
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Input(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Input(i) => i.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Input(i) => i.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Span of the first quoted occurrence of `subject` in the input text.
fn subject_span(src: &str, subject: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{subject}\"");
    src.find(&quoted)
        .map(|start| SourceSpan::new((start + 1).into(), subject.len()))
}

/// Byte offset of a 1-based line and column as reported by `serde_json`.
fn line_column_to_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}

/// Convert a [`LensplotError`] into a list of reportable errors.
pub fn to_reportables(err: &LensplotError) -> Vec<Reportable<'_>> {
    match err {
        LensplotError::Input { err, src } => {
            vec![Reportable::Input(InputErrorAdapter::new(err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Convert reconciliation diagnostics into reportables against `src`.
pub fn diagnostics_to_reportables<'a>(
    diagnostics: &'a [Diagnostic],
    src: &'a str,
) -> Vec<Reportable<'a>> {
    diagnostics
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
        .collect()
}

/// Render a reportable into a string with miette's graphical handler.
pub fn render(reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    if GraphicalReportHandler::new()
        .render_report(&mut writer, reportable)
        .is_err()
    {
        // Fall back to the plain message.
        return reportable.to_string();
    }
    writer
}

#[cfg(test)]
mod tests {
    use lensplot::DiagramBuilder;

    use super::*;

    #[test]
    fn test_clamp_diagnostic_points_at_label() {
        let src = r#"{"A": 100, "B": 50, "A_AND_B": 9999}"#;
        let builder = DiagramBuilder::default();
        let reconciled = builder.reconcile(&builder.parse(src).expect("valid JSON"));

        let reportables = diagnostics_to_reportables(reconciled.diagnostics(), src);
        assert_eq!(reportables.len(), 1);

        let reportable = &reportables[0];
        assert_eq!(reportable.severity(), Some(Severity::Warning));
        assert_eq!(
            reportable.code().map(|code| code.to_string()),
            Some("E300".to_string())
        );

        let labels: Vec<_> = reportable.labels().expect("labels").collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        let start = labels[0].offset();
        assert_eq!(&src[start..start + labels[0].len()], "A_AND_B");
    }

    #[test]
    fn test_invalid_json_points_at_failure() {
        let src = "{\n  \"A\": 10,\n  \"B\": oops\n}";
        let err = DiagramBuilder::default().parse(src).unwrap_err();

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Input(input) => {
                let labels: Vec<_> = input.labels().expect("labels").collect();
                assert_eq!(labels[0].label(), Some("invalid JSON"));
                let oops = src.find("oops").expect("present");
                assert!((oops..=oops + 1).contains(&labels[0].offset()));
            }
            other => panic!("Expected Input, got {other:?}"),
        }
    }

    #[test]
    fn test_non_input_error() {
        let err = LensplotError::Config("bad value".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad value");
                assert_eq!(
                    e.code().map(|code| code.to_string()),
                    Some("lensplot::config".to_string())
                );
            }
            other => panic!("Expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_line_column_to_offset() {
        let src = "ab\ncde\nf";
        assert_eq!(line_column_to_offset(src, 1, 1), 0);
        assert_eq!(line_column_to_offset(src, 2, 2), 4);
        assert_eq!(line_column_to_offset(src, 3, 1), 7);
        assert_eq!(line_column_to_offset(src, 9, 9), src.len());
    }

    #[test]
    fn test_render_includes_message() {
        let err = LensplotError::Config("bad value".to_string());
        let rendered = render(&to_reportables(&err)[0]);
        assert!(rendered.contains("bad value"));
    }
}
