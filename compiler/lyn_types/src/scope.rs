//! Binding contexts attached to scope-bearing syntax nodes.
//!
//! A scope only knows its own local declarations. Full lexical resolution
//! walks outward through enclosing scopes; that walk belongs to the
//! analysis stages, which find enclosing scopes through the tree's parent
//! links rather than through cached scope-to-scope pointers.
//!
//! Scopes are created by the scope-attachment stage and belong to exactly
//! one version of a tree. A tree produced by a later rewrite gets freshly
//! created scopes.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::BindingInfo;

/// The two concrete shapes a scope can take.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScopeKind {
    /// One per block; holds locally declared variables, classes, methods.
    Block,
    /// One per method or constructor; holds parameter and
    /// generic-parameter names.
    Parameter,
}

/// A binding context: the set of names declared directly at one level.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scope {
    kind: ScopeKind,
    symbols: FxHashMap<Arc<str>, Vec<BindingInfo>>,
}

impl Default for ScopeKind {
    fn default() -> Self {
        ScopeKind::Block
    }
}

impl Scope {
    pub fn new(kind: ScopeKind) -> Self {
        Scope {
            kind,
            symbols: FxHashMap::default(),
        }
    }

    /// Build a scope from (name, binding) pairs.
    pub fn from_bindings(
        kind: ScopeKind,
        bindings: impl IntoIterator<Item = (Arc<str>, BindingInfo)>,
    ) -> Self {
        let mut scope = Scope::new(kind);
        for (name, info) in bindings {
            scope.insert(name, info);
        }
        scope
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Record one declaration of `name` at this level.
    ///
    /// A second insert under the same name is kept, not rejected: the
    /// declaration-order check reports same-level multiplicity as a fatal
    /// diagnostic, and it needs to observe all candidates to do so.
    pub fn insert(&mut self, name: Arc<str>, info: BindingInfo) {
        self.symbols.entry(name).or_default().push(info);
    }

    /// Bindings declared directly in this scope under `name`.
    ///
    /// Returns an empty slice when the name has no local declaration;
    /// callers needing full lexical resolution continue outward themselves.
    pub fn lookup_local(&self, name: &str) -> &[BindingInfo] {
        self.symbols.get(name).map_or(&[], Vec::as_slice)
    }

    /// Names declared directly in this scope, in no particular order.
    pub fn local_names(&self) -> impl Iterator<Item = &Arc<str>> {
        self.symbols.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}
