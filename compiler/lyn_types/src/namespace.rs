//! Namespaces: named sets of exported declarations.
//!
//! A namespace is what an import directive brings into a file. The driver
//! builds the full table of loadable namespaces once, single-threaded,
//! before any per-file work starts; after that the table is read-only.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::BindingInfo;

/// A named set of exported declarations.
#[derive(Clone, Debug, PartialEq)]
pub struct Namespace {
    name: Arc<str>,
    exports: FxHashMap<Arc<str>, Vec<BindingInfo>>,
}

impl Namespace {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Namespace {
            name: name.into(),
            exports: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record an exported declaration.
    pub fn insert(&mut self, name: Arc<str>, info: BindingInfo) {
        self.exports.entry(name).or_default().push(info);
    }

    /// Exported bindings under `name`; empty when the namespace does not
    /// export it.
    pub fn exports(&self, name: &str) -> &[BindingInfo] {
        self.exports.get(name).map_or(&[], Vec::as_slice)
    }

    /// Names this namespace exports, in no particular order.
    pub fn exported_names(&self) -> impl Iterator<Item = &Arc<str>> {
        self.exports.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    /// Merge several namespaces into one combined visible-symbol set.
    ///
    /// Exports under the same name from different namespaces accumulate;
    /// downstream lookup treats multiplicity the same way same-scope
    /// duplicates are treated.
    pub fn merge<'a>(parts: impl IntoIterator<Item = &'a Namespace>) -> Namespace {
        let mut merged = Namespace::new("");
        for part in parts {
            for (name, infos) in &part.exports {
                merged
                    .exports
                    .entry(Arc::clone(name))
                    .or_default()
                    .extend(infos.iter().cloned());
            }
        }
        merged
    }
}
