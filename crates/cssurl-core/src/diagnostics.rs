//! Diagnostics collected while processing declarations.

use std::fmt;

use crate::declaration::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Warning,
    Error,
}

/// A message attached to an optional source location.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }

    pub fn error(message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match self.span {
            Some(span) => write!(f, "{level} at {}:{}: {}", span.line, span.column, self.message),
            None => write!(f, "{level}: {}", self.message),
        }
    }
}

/// Receives diagnostics. Reporting never aborts processing.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::warning("first", None));
        sink.report(Diagnostic::error("second", None));

        assert_eq!(sink.len(), 2);
        assert!(sink[0].is_warning());
        assert_eq!(sink[1].severity, Severity::Error);
    }

    #[test]
    fn test_display_with_span() {
        let span = Span { line: 3, column: 7, ..Default::default() };
        let diag = Diagnostic::warning("Unable to find uri in 'a: url()'", Some(span));
        assert_eq!(diag.to_string(), "warning at 3:7: Unable to find uri in 'a: url()'");
    }

    #[test]
    fn test_display_without_span() {
        let diag = Diagnostic::error("boom", None);
        assert_eq!(diag.to_string(), "error: boom");
    }
}
