//! Diagnostic codes for all analysis phases.

use std::fmt;

use crate::Severity;

/// The closed set of diagnostic codes.
///
/// Each code carries a default severity; severities are not chosen at
/// emission sites.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DiagnosticCode {
    /// A name was read but no declaration is visible anywhere outward.
    NoSuchSymbol,
    /// A name was read before the source position of its only visible
    /// declaration.
    UseBeforeDeclaration,
    /// A declaration reuses a name already visible from an enclosing
    /// scope. Legal, but reported.
    HidesOtherSymbol,
    /// An invariant the language rules make impossible was observed,
    /// e.g. several declarations of one name in one scope.
    InternalCompilerError,
    /// A type reference names no visible declaration and no built-in.
    UnresolvedType,
    /// The incoming parse tree violated its structural contract.
    MalformedTree,
}

impl DiagnosticCode {
    /// The severity this code is reported at.
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::HidesOtherSymbol => Severity::Warning,
            DiagnosticCode::NoSuchSymbol
            | DiagnosticCode::UseBeforeDeclaration
            | DiagnosticCode::UnresolvedType => Severity::Error,
            DiagnosticCode::InternalCompilerError | DiagnosticCode::MalformedTree => {
                Severity::Fatal
            }
        }
    }

    /// Short human-readable description.
    pub fn message(self) -> &'static str {
        match self {
            DiagnosticCode::NoSuchSymbol => "no declaration found for this name",
            DiagnosticCode::UseBeforeDeclaration => "name is read before its declaration",
            DiagnosticCode::HidesOtherSymbol => {
                "declaration hides a symbol from an enclosing scope"
            }
            DiagnosticCode::InternalCompilerError => "internal compiler error",
            DiagnosticCode::UnresolvedType => "type name does not resolve to any type",
            DiagnosticCode::MalformedTree => "malformed syntax tree",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_severities() {
        assert_eq!(DiagnosticCode::NoSuchSymbol.severity(), Severity::Error);
        assert_eq!(
            DiagnosticCode::UseBeforeDeclaration.severity(),
            Severity::Error
        );
        assert_eq!(
            DiagnosticCode::HidesOtherSymbol.severity(),
            Severity::Warning
        );
        assert_eq!(
            DiagnosticCode::InternalCompilerError.severity(),
            Severity::Fatal
        );
        assert_eq!(DiagnosticCode::UnresolvedType.severity(), Severity::Error);
        assert_eq!(DiagnosticCode::MalformedTree.severity(), Severity::Fatal);
    }

    #[test]
    fn test_display_is_code_name() {
        assert_eq!(DiagnosticCode::NoSuchSymbol.to_string(), "NoSuchSymbol");
    }
}
