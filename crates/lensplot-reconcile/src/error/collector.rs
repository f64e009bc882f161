//! Collector for accumulating diagnostics across reconciliation steps.

use log::debug;

use crate::error::Diagnostic;

/// A collector for accumulating diagnostics.
///
/// Every emitted diagnostic is also logged at debug level.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        debug!(
            severity:% = diagnostic.severity(),
            code:? = diagnostic.code();
            "{}", diagnostic.message()
        );
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return every diagnostic in emission order.
    pub(crate) fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_new_finish_empty() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().is_empty());
    }

    #[test]
    fn test_collector_keeps_emission_order() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("first").with_code(ErrorCode::E100));
        collector.emit(Diagnostic::note("second"));

        let diagnostics = collector.finish();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message(), "first");
        assert!(diagnostics[1].severity().is_note());
    }
}
