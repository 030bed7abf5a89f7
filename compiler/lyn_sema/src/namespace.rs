//! Loading and indexing importable namespaces.
//!
//! The loader is an external collaborator: given the set of module names
//! a compilation requests, it synchronously supplies each module's
//! exported declarations. The driver builds the table once, before any
//! per-file task starts; afterwards it is shared read-only.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use lyn_syntax::{slot, GreenNode};
use lyn_types::Namespace;

use crate::SourceUnit;

/// Read-only module-name to namespace mapping shared by all file tasks.
pub type NamespaceTable = FxHashMap<Arc<str>, Arc<Namespace>>;

/// Supplies exported-declaration sets for requested module names.
pub trait NamespaceLoader {
    /// Resolve each requested module name. Names the loader does not know
    /// are simply absent from the result; the import-merge stage reports
    /// them against the importing file.
    fn load(&self, modules: &[Arc<str>]) -> NamespaceTable;
}

/// A loader over a fixed, pre-built set of namespaces.
#[derive(Default, Clone)]
pub struct StaticLoader {
    namespaces: NamespaceTable,
}

impl StaticLoader {
    pub fn new() -> Self {
        StaticLoader::default()
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespaces
            .insert(Arc::from(namespace.name()), Arc::new(namespace));
        self
    }
}

impl NamespaceLoader for StaticLoader {
    fn load(&self, modules: &[Arc<str>]) -> NamespaceTable {
        modules
            .iter()
            .filter_map(|name| {
                self.namespaces
                    .get(name)
                    .map(|ns| (Arc::clone(name), Arc::clone(ns)))
            })
            .collect()
    }
}

/// Every module name imported by any of the given units, deduplicated.
pub fn requested_modules(units: &[SourceUnit]) -> Vec<Arc<str>> {
    let mut seen = FxHashSet::default();
    let mut modules = Vec::new();
    for unit in units {
        for path in import_paths(unit.root()) {
            if seen.insert(Arc::clone(&path)) {
                modules.push(path);
            }
        }
    }
    modules
}

fn import_paths(root: &Arc<GreenNode>) -> Vec<Arc<str>> {
    let Ok(Some(imports)) = root.child_at(slot::UNIT_IMPORTS) else {
        return Vec::new();
    };
    imports
        .present_children()
        .filter_map(|import| import.import_path().map(Arc::clone))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyn_syntax::{build, Construct, ParseNode, Span};
    use pretty_assertions::assert_eq;

    fn unit_importing(file: &str, modules: &[&str]) -> SourceUnit {
        let imports = modules
            .iter()
            .map(|module| {
                ParseNode::new(Construct::ImportDirective, Span::new(0, 10)).with_text(*module)
            })
            .collect();
        let parse = ParseNode::new(Construct::TranslationUnit, Span::new(0, 20)).with_children(
            vec![
                ParseNode::new(Construct::ImportDirectives, Span::new(0, 10))
                    .with_children(imports),
                ParseNode::new(Construct::Statements, Span::new(10, 20)),
            ],
        );
        let Ok(root) = build(&parse) else {
            panic!("unit builds");
        };
        SourceUnit::new(file, "", root)
    }

    #[test]
    fn test_requested_modules_deduplicates() {
        let units = [
            unit_importing("a.lyn", &["geometry", "collections"]),
            unit_importing("b.lyn", &["geometry"]),
        ];
        let modules = requested_modules(&units);
        let names: Vec<&str> = modules.iter().map(AsRef::as_ref).collect();
        assert_eq!(names, ["geometry", "collections"]);
    }

    #[test]
    fn test_static_loader_returns_only_known_modules() {
        let loader = StaticLoader::new().with_namespace(Namespace::new("geometry"));
        let table = loader.load(&[Arc::from("geometry"), Arc::from("missing")]);
        assert_eq!(table.len(), 1);
        assert!(table.contains_key("geometry"));
    }
}
