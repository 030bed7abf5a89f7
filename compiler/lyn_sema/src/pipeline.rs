//! Stage composition for one file.
//!
//! A stage is a pure function from a unit to a new unit with diagnostics
//! as a side channel; phases compose stages by ordinary function
//! composition. The driver runs [`scope_collection`] for every file,
//! waits for all files at the barrier, then runs [`analysis`]: the
//! analysis stages rely on namespace state being globally complete.

use lyn_diagnostic::DiagnosticSink;
use tracing::debug_span;

use crate::{
    bind::bind_types, imports::merge_imports, order::check_declaration_order,
    scopes::attach_scopes, NamespaceTable, SourceUnit, StageError,
};

/// Phase one for one file: import merging, then scope attachment.
pub fn scope_collection(
    unit: &SourceUnit,
    table: &NamespaceTable,
) -> Result<SourceUnit, StageError> {
    let span = debug_span!("scope_collection", file = %unit.file());
    let _guard = span.entered();
    let merged = merge_imports(unit, table)?;
    attach_scopes(&merged)
}

/// Phase two for one file: declaration-order checking, then type binding.
pub fn analysis(unit: &SourceUnit, sink: &DiagnosticSink) -> SourceUnit {
    let span = debug_span!("analysis", file = %unit.file());
    let _guard = span.entered();
    check_declaration_order(unit, sink);
    bind_types(unit, sink)
}
