//! The diagnostic record and its severity scale.

use std::fmt;
use std::sync::Arc;

use lyn_syntax::Span;

use crate::DiagnosticCode;

/// Severity of a diagnostic, totally ordered from least to most severe.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// A structured report of one source problem.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    /// File the problem was found in.
    pub file: Arc<str>,
    /// Source interval the problem is anchored to.
    pub span: Span,
    /// Optional free-text elaboration.
    pub detail: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic at the code's default severity.
    pub fn new(code: DiagnosticCode, file: impl Into<Arc<str>>, span: Span) -> Self {
        Diagnostic {
            code,
            severity: code.severity(),
            file: file.into(),
            span,
            detail: None,
        }
    }

    /// A diagnostic not anchored to any source position, e.g. a failure
    /// converted at a task boundary.
    pub fn unanchored(code: DiagnosticCode, file: impl Into<Arc<str>>) -> Self {
        Diagnostic::new(code, file, Span::DUMMY)
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Whether this diagnostic makes the overall run fail.
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }

    /// Identity used by tests comparing diagnostic sets.
    pub fn key(&self) -> (DiagnosticCode, Arc<str>, Span) {
        (self.code, Arc::clone(&self.file), self.span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] at {}:{}",
            self.severity,
            self.code.message(),
            self.code,
            self.file,
            self.span
        )?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_severity_total_order() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_default_severity_from_code() {
        let diag = Diagnostic::new(DiagnosticCode::NoSuchSymbol, "a.lyn", Span::new(3, 4));
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.is_error());

        let warn = Diagnostic::new(DiagnosticCode::HidesOtherSymbol, "a.lyn", Span::new(3, 4));
        assert!(!warn.is_error());
    }

    #[test]
    fn test_key_identity() {
        let a = Diagnostic::new(DiagnosticCode::NoSuchSymbol, "a.lyn", Span::new(3, 4))
            .with_detail("x");
        let b = Diagnostic::new(DiagnosticCode::NoSuchSymbol, "a.lyn", Span::new(3, 4));
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::new(DiagnosticCode::UnresolvedType, "a.lyn", Span::new(0, 5))
            .with_detail("`Pointt`");
        let text = diag.to_string();
        assert!(text.contains("error"));
        assert!(text.contains("UnresolvedType"));
        assert!(text.contains("a.lyn"));
        assert!(text.contains("`Pointt`"));
    }
}
