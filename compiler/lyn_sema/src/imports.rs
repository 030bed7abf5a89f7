//! Import merging: the first pipeline stage.
//!
//! Resolves every import directive of a file against the namespace table
//! and records the merged exported-declaration set on the tree root. The
//! later stages read the merged set when a name resolves to nothing
//! declared in the file itself.

use std::sync::Arc;

use lyn_syntax::{slot, GreenNode};
use lyn_types::Namespace;

use crate::{NamespaceTable, SourceUnit, StageError};

/// Merge the file's imported namespaces onto its root.
///
/// An import naming a module absent from the table aborts this file's
/// pipeline; the driver reports it as a fatal diagnostic.
pub fn merge_imports(unit: &SourceUnit, table: &NamespaceTable) -> Result<SourceUnit, StageError> {
    let root = unit.root();
    let imports = required_child(root, slot::UNIT_IMPORTS)?;

    let mut parts: Vec<&Namespace> = Vec::new();
    for import in imports.present_children() {
        let Some(path) = import.import_path() else {
            continue;
        };
        let namespace = table
            .get(path)
            .ok_or_else(|| StageError::UnknownModule {
                module: Arc::clone(path),
            })?;
        parts.push(namespace.as_ref());
    }

    let merged = Namespace::merge(parts);
    let new_root = root.with_imports(Arc::new(merged))?;
    Ok(unit.with_root(Arc::new(new_root)))
}

/// A fixed slot that the grammar guarantees is occupied.
pub(crate) fn required_child(
    node: &Arc<GreenNode>,
    slot: usize,
) -> Result<Arc<GreenNode>, StageError> {
    match node.child_at(slot)? {
        Some(child) => Ok(Arc::clone(child)),
        None => Err(StageError::MissingChild {
            kind: node.kind(),
            slot,
        }),
    }
}
