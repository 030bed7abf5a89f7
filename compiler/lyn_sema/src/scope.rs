//! Locating and chaining scopes through the tree.
//!
//! Scopes are attached to nodes, not linked to each other: the enclosing
//! scope of any position is found by walking red parent links upward
//! until a scope-bearing node appears. The walk is recomputed per lookup
//! and costs time proportional to nesting depth; nothing is cached.

use std::rc::Rc;
use std::sync::Arc;

use lyn_types::{Namespace, Scope};

use lyn_syntax::RedNode;

/// A scope together with the node it is attached to.
#[derive(Clone)]
pub struct ScopeRef {
    node: Rc<RedNode>,
    scope: Arc<Scope>,
}

impl ScopeRef {
    /// The scope-bearing node.
    pub fn node(&self) -> &Rc<RedNode> {
        &self.node
    }

    pub fn scope(&self) -> &Arc<Scope> {
        &self.scope
    }

    /// The lexically enclosing scope, found by walking parent links from
    /// the attached node.
    pub fn parent(&self) -> Option<ScopeRef> {
        enclosing_scope(&self.node)
    }
}

/// The scope attached to this node itself, if any.
pub fn scope_at(node: &Rc<RedNode>) -> Option<ScopeRef> {
    node.green().attached_scope().map(|scope| ScopeRef {
        node: Rc::clone(node),
        scope: Arc::clone(scope),
    })
}

/// The nearest scope strictly above this node.
pub fn enclosing_scope(node: &Rc<RedNode>) -> Option<ScopeRef> {
    node.ancestors().find_map(|ancestor| scope_at(&ancestor))
}

/// The scope chain visible from this node, innermost first.
///
/// Starts at the nearest scope above the node (or at the node's own
/// scope when it bears one) and continues outward to the root.
pub fn scope_chain(node: &Rc<RedNode>) -> impl Iterator<Item = ScopeRef> {
    let first = scope_at(node).or_else(|| enclosing_scope(node));
    std::iter::successors(first, ScopeRef::parent)
}

/// The root of the tree this node belongs to.
pub fn tree_root(node: &Rc<RedNode>) -> Rc<RedNode> {
    node.ancestors().last().unwrap_or_else(|| Rc::clone(node))
}

/// The merged imported namespaces recorded on this node's tree root.
pub fn visible_imports(node: &Rc<RedNode>) -> Option<Arc<Namespace>> {
    tree_root(node).green().merged_imports().map(Arc::clone)
}
