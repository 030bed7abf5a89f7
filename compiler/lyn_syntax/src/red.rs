//! The red layer: parent-aware views over green nodes.
//!
//! A red node wraps exactly one green node together with its position in
//! the tree: a non-owning back-reference to its parent and its index
//! within it. Children are materialized on first access and cached per
//! slot, so repeated traversal within one parent's lifetime returns the
//! identical view objects.
//!
//! Red trees are deliberately single-owner: `Rc` + `RefCell`, not
//! shareable across threads. The slot cache assumes one logical owner
//! traverses the tree at a time; per-file analysis tasks each own their
//! trees outright, so this holds by construction.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::{GreenNode, Span, SyntaxKind, TreeError};

/// A lazily materialized, parent-aware view of one green node.
pub struct RedNode {
    green: Arc<GreenNode>,
    parent: Option<Weak<RedNode>>,
    index: usize,
    cache: RefCell<Box<[Option<Rc<RedNode>>]>>,
}

impl RedNode {
    /// Wrap a green tree root in a red view.
    pub fn root(green: Arc<GreenNode>) -> Rc<RedNode> {
        RedNode::create(green, None, 0)
    }

    fn create(green: Arc<GreenNode>, parent: Option<Weak<RedNode>>, index: usize) -> Rc<RedNode> {
        let slots = green.child_count();
        Rc::new(RedNode {
            green,
            parent,
            index,
            cache: RefCell::new(vec![None; slots].into_boxed_slice()),
        })
    }

    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn span(&self) -> Span {
        self.green.span()
    }

    /// The green node backing this view.
    pub fn green(&self) -> &Arc<GreenNode> {
        &self.green
    }

    /// This node's index within its parent; 0 at the root.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The parent view, absent at the root.
    ///
    /// The back-reference is non-owning; it is valid only while the parent
    /// is alive, which holds for any node reached by traversal from a live
    /// root.
    pub fn parent(&self) -> Option<Rc<RedNode>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn child_count(&self) -> usize {
        self.green.child_count()
    }

    /// Bounds-checked child access; `Ok(None)` is an empty optional slot.
    ///
    /// The view is created on first access and cached, so a later call for
    /// the same slot returns the identical `Rc`.
    pub fn child(self: &Rc<Self>, slot: usize) -> Result<Option<Rc<RedNode>>, TreeError> {
        if slot >= self.green.child_count() {
            return Err(TreeError::SlotOutOfRange {
                kind: self.kind(),
                slot,
                len: self.green.child_count(),
            });
        }
        Ok(self.child_in_range(slot))
    }

    /// Slot access for indices already known to be in range.
    fn child_in_range(self: &Rc<Self>, slot: usize) -> Option<Rc<RedNode>> {
        let mut cache = self.cache.borrow_mut();
        if let Some(cached) = &cache[slot] {
            return Some(Rc::clone(cached));
        }
        let green_child = match self.green.child_at(slot) {
            Ok(Some(child)) => Arc::clone(child),
            _ => return None,
        };
        let red = RedNode::create(green_child, Some(Rc::downgrade(self)), slot);
        cache[slot] = Some(Rc::clone(&red));
        Some(red)
    }

    /// Present children in slot order, skipping empty slots.
    pub fn children(self: &Rc<Self>) -> impl Iterator<Item = Rc<RedNode>> + '_ {
        (0..self.green.child_count()).filter_map(move |slot| self.child_in_range(slot))
    }

    /// This node's ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = Rc<RedNode>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Replace this node's green backing, rebuilding the spine up to the
    /// root; returns the new red root.
    ///
    /// Every subtree not on the path from this node to the root is shared
    /// by reference with the original tree. If this node is the root, the
    /// replacement becomes the new root directly.
    pub fn replace_with(
        self: &Rc<Self>,
        new_green: Arc<GreenNode>,
    ) -> Result<Rc<RedNode>, TreeError> {
        match self.parent() {
            None => Ok(RedNode::root(new_green)),
            Some(parent) => {
                let rebuilt = parent.green.with_replaced_child(self.index, new_green)?;
                parent.replace_with(Arc::new(rebuilt))
            }
        }
    }
}

impl std::fmt::Debug for RedNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.span())
    }
}
