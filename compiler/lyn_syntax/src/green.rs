//! The green layer: immutable, position-agnostic node values.
//!
//! Green nodes are the tree's structural backbone. They are created once,
//! by the builder or by [`GreenNode::with_replaced_child`], and never
//! mutated. Two green nodes with identical content are interchangeable;
//! pointer identity (`Arc::ptr_eq`) is only a change-detection
//! optimization, never a correctness requirement.

use std::sync::Arc;

use smallvec::SmallVec;
use thiserror::Error;

use lyn_types::{Namespace, Scope, Type, Visibility};

use crate::{Arity, BinaryOp, FlowKind, Span, SyntaxKind};

/// Child storage: an absent optional child is an explicit empty slot.
pub type GreenChildren = SmallVec<[Option<Arc<GreenNode>>; 4]>;

/// Errors from the green node structural operations.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TreeError {
    #[error("child slot {slot} out of range for {kind:?} with {len} slots")]
    SlotOutOfRange {
        kind: SyntaxKind,
        slot: usize,
        len: usize,
    },
    #[error("{kind:?} requires exactly {expected} children, got {found}")]
    WrongChildCount {
        kind: SyntaxKind,
        expected: usize,
        found: usize,
    },
    #[error("{kind:?} does not carry {field}")]
    PayloadMismatch {
        kind: SyntaxKind,
        field: &'static str,
    },
}

/// Kind-specific data carried by a green node.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum GreenPayload {
    #[default]
    None,
    /// Identifier, variable reference, generic parameter, or member name.
    Name(Arc<str>),
    /// Dotted module path of an import directive.
    ImportPath(Arc<str>),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Text(Arc<str>),
    Operator(BinaryOp),
    /// Selective flow sub-kind.
    Flow(FlowKind),
    /// Declaration visibility (variable and class declarations).
    Visibility(Visibility),
    /// Method or constructor: visibility plus the parameter scope
    /// attached by scope attachment.
    Callable {
        visibility: Visibility,
        scope: Option<Arc<Scope>>,
    },
    /// Block: the scope attached by scope attachment.
    Block { scope: Option<Arc<Scope>> },
    /// Type reference: source name plus the type resolved by type binding.
    TypeRef {
        name: Arc<str>,
        resolved: Option<Type>,
    },
    /// Translation unit root: the merged imported namespaces.
    Unit { imports: Option<Arc<Namespace>> },
}

/// An immutable syntax node value.
#[derive(Clone, Debug, PartialEq)]
pub struct GreenNode {
    kind: SyntaxKind,
    span: Span,
    payload: GreenPayload,
    children: GreenChildren,
}

impl GreenNode {
    /// Create a node, validating the child count against the kind's arity.
    pub fn new(
        kind: SyntaxKind,
        span: Span,
        payload: GreenPayload,
        children: GreenChildren,
    ) -> Result<GreenNode, TreeError> {
        if let Arity::Fixed(expected) = kind.arity() {
            if children.len() != expected {
                return Err(TreeError::WrongChildCount {
                    kind,
                    expected,
                    found: children.len(),
                });
            }
        }
        Ok(GreenNode {
            kind,
            span,
            payload,
            children,
        })
    }

    /// Create a childless node.
    pub fn leaf(kind: SyntaxKind, span: Span, payload: GreenPayload) -> Result<GreenNode, TreeError> {
        GreenNode::new(kind, span, payload, GreenChildren::new())
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn payload(&self) -> &GreenPayload {
        &self.payload
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Bounds-checked slot access. `Ok(None)` is an empty optional slot.
    pub fn child_at(&self, slot: usize) -> Result<Option<&Arc<GreenNode>>, TreeError> {
        self.children
            .get(slot)
            .map(Option::as_ref)
            .ok_or(TreeError::SlotOutOfRange {
                kind: self.kind,
                slot,
                len: self.children.len(),
            })
    }

    /// All slots in order, empty ones included.
    pub fn children(&self) -> impl Iterator<Item = Option<&Arc<GreenNode>>> {
        self.children.iter().map(Option::as_ref)
    }

    /// Present children in order, skipping empty slots.
    pub fn present_children(&self) -> impl Iterator<Item = &Arc<GreenNode>> {
        self.children.iter().flatten()
    }

    /// A new node of the same kind with one child replaced and every other
    /// child reference shared unchanged.
    pub fn with_replaced_child(
        &self,
        slot: usize,
        new_child: Arc<GreenNode>,
    ) -> Result<GreenNode, TreeError> {
        if slot >= self.children.len() {
            return Err(TreeError::SlotOutOfRange {
                kind: self.kind,
                slot,
                len: self.children.len(),
            });
        }
        let mut node = self.clone();
        node.children[slot] = Some(new_child);
        Ok(node)
    }

    /// A new node of the same kind and payload with a full replacement
    /// child list of the same length. Used by the rewriter framework.
    pub(crate) fn with_children(&self, children: GreenChildren) -> GreenNode {
        debug_assert_eq!(children.len(), self.children.len());
        GreenNode {
            kind: self.kind,
            span: self.span,
            payload: self.payload.clone(),
            children,
        }
    }

    // Payload accessors. Each returns `None` when the node's kind does not
    // carry the requested field.

    pub fn name(&self) -> Option<&Arc<str>> {
        match &self.payload {
            GreenPayload::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn import_path(&self) -> Option<&Arc<str>> {
        match &self.payload {
            GreenPayload::ImportPath(path) => Some(path),
            _ => None,
        }
    }

    pub fn integer_value(&self) -> Option<i64> {
        match self.payload {
            GreenPayload::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn real_value(&self) -> Option<f64> {
        match self.payload {
            GreenPayload::Real(value) => Some(value),
            _ => None,
        }
    }

    pub fn boolean_value(&self) -> Option<bool> {
        match self.payload {
            GreenPayload::Boolean(value) => Some(value),
            _ => None,
        }
    }

    pub fn string_value(&self) -> Option<&Arc<str>> {
        match &self.payload {
            GreenPayload::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn operator(&self) -> Option<BinaryOp> {
        match self.payload {
            GreenPayload::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub fn flow_kind(&self) -> Option<FlowKind> {
        match self.payload {
            GreenPayload::Flow(flow) => Some(flow),
            _ => None,
        }
    }

    pub fn visibility(&self) -> Option<Visibility> {
        match self.payload {
            GreenPayload::Visibility(visibility)
            | GreenPayload::Callable { visibility, .. } => Some(visibility),
            _ => None,
        }
    }

    /// The scope attached to this node, if scope attachment has run.
    pub fn attached_scope(&self) -> Option<&Arc<Scope>> {
        match &self.payload {
            GreenPayload::Block { scope } | GreenPayload::Callable { scope, .. } => {
                scope.as_ref()
            }
            _ => None,
        }
    }

    /// The merged imported namespaces, present on a root after import
    /// merging has run.
    pub fn merged_imports(&self) -> Option<&Arc<Namespace>> {
        match &self.payload {
            GreenPayload::Unit { imports } => imports.as_ref(),
            _ => None,
        }
    }

    pub fn type_name(&self) -> Option<&Arc<str>> {
        match &self.payload {
            GreenPayload::TypeRef { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn resolved_type(&self) -> Option<&Type> {
        match &self.payload {
            GreenPayload::TypeRef { resolved, .. } => resolved.as_ref(),
            _ => None,
        }
    }

    // Payload-updating copies. Like `with_replaced_child`, these produce a
    // new node sharing all child references.

    /// A copy of this node carrying an attached scope.
    pub fn with_scope(&self, new_scope: Arc<Scope>) -> Result<GreenNode, TreeError> {
        let mut node = self.clone();
        node.payload = match node.payload {
            GreenPayload::Block { .. } => GreenPayload::Block {
                scope: Some(new_scope),
            },
            GreenPayload::Callable { visibility, .. } => GreenPayload::Callable {
                visibility,
                scope: Some(new_scope),
            },
            _ => {
                return Err(TreeError::PayloadMismatch {
                    kind: self.kind,
                    field: "an attached scope",
                })
            }
        };
        Ok(node)
    }

    /// A copy of this root carrying the merged imported namespaces.
    pub fn with_imports(&self, imports: Arc<Namespace>) -> Result<GreenNode, TreeError> {
        let mut node = self.clone();
        node.payload = match node.payload {
            GreenPayload::Unit { .. } => GreenPayload::Unit {
                imports: Some(imports),
            },
            _ => {
                return Err(TreeError::PayloadMismatch {
                    kind: self.kind,
                    field: "merged imports",
                })
            }
        };
        Ok(node)
    }

    /// A copy of this type reference carrying its resolved type.
    pub fn with_resolved_type(&self, ty: Type) -> Result<GreenNode, TreeError> {
        let mut node = self.clone();
        node.payload = match node.payload {
            GreenPayload::TypeRef { name, .. } => GreenPayload::TypeRef {
                name,
                resolved: Some(ty),
            },
            _ => {
                return Err(TreeError::PayloadMismatch {
                    kind: self.kind,
                    field: "a resolved type",
                })
            }
        };
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    fn int_leaf(value: i64, span: Span) -> Arc<GreenNode> {
        let Ok(node) = GreenNode::leaf(
            SyntaxKind::IntegerLiteral,
            span,
            GreenPayload::Integer(value),
        ) else {
            panic!("leaf construction cannot fail");
        };
        Arc::new(node)
    }

    fn binary(left: Arc<GreenNode>, right: Arc<GreenNode>) -> Arc<GreenNode> {
        let span = left.span().merge(right.span());
        let Ok(node) = GreenNode::new(
            SyntaxKind::Binary,
            span,
            GreenPayload::Operator(BinaryOp::Add),
            smallvec![Some(left), Some(right)],
        ) else {
            panic!("binary construction cannot fail");
        };
        Arc::new(node)
    }

    #[test]
    fn test_new_validates_arity() {
        let child = int_leaf(1, Span::new(0, 1));
        let result = GreenNode::new(
            SyntaxKind::Binary,
            Span::new(0, 1),
            GreenPayload::Operator(BinaryOp::Add),
            smallvec![Some(child)],
        );
        assert_eq!(
            result,
            Err(TreeError::WrongChildCount {
                kind: SyntaxKind::Binary,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_child_at_bounds_checked() {
        let node = binary(int_leaf(1, Span::new(0, 1)), int_leaf(2, Span::new(4, 5)));
        assert!(matches!(node.child_at(0), Ok(Some(_))));
        assert!(matches!(node.child_at(1), Ok(Some(_))));
        assert_eq!(
            node.child_at(2),
            Err(TreeError::SlotOutOfRange {
                kind: SyntaxKind::Binary,
                slot: 2,
                len: 2,
            })
        );
    }

    #[test]
    fn test_empty_slot_is_explicit() {
        let Ok(node) = GreenNode::new(
            SyntaxKind::Return,
            Span::new(0, 6),
            GreenPayload::None,
            smallvec![None],
        ) else {
            panic!("return construction cannot fail");
        };
        assert_eq!(node.child_count(), 1);
        assert!(matches!(node.child_at(0), Ok(None)));
    }

    #[test]
    fn test_with_replaced_child_shares_siblings() {
        let left = int_leaf(1, Span::new(0, 1));
        let right = int_leaf(2, Span::new(4, 5));
        let node = binary(Arc::clone(&left), Arc::clone(&right));

        let replacement = int_leaf(9, Span::new(0, 1));
        let Ok(updated) = node.with_replaced_child(0, Arc::clone(&replacement)) else {
            panic!("slot 0 is in range");
        };

        assert_eq!(updated.kind(), SyntaxKind::Binary);
        let Ok(Some(new_left)) = updated.child_at(0) else {
            panic!("slot 0 present");
        };
        let Ok(Some(new_right)) = updated.child_at(1) else {
            panic!("slot 1 present");
        };
        assert!(Arc::ptr_eq(new_left, &replacement));
        // The untouched sibling is the same object, not a copy.
        assert!(Arc::ptr_eq(new_right, &right));
    }

    #[test]
    fn test_with_replaced_child_out_of_range() {
        let node = binary(int_leaf(1, Span::new(0, 1)), int_leaf(2, Span::new(4, 5)));
        let replacement = int_leaf(3, Span::new(0, 1));
        assert!(matches!(
            node.with_replaced_child(5, replacement),
            Err(TreeError::SlotOutOfRange { slot: 5, .. })
        ));
    }

    #[test]
    fn test_content_equality_ignores_pointer_identity() {
        let a = binary(int_leaf(1, Span::new(0, 1)), int_leaf(2, Span::new(4, 5)));
        let b = binary(int_leaf(1, Span::new(0, 1)), int_leaf(2, Span::new(4, 5)));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_with_scope_on_block() {
        use lyn_types::{Scope, ScopeKind};
        let Ok(block) = GreenNode::new(
            SyntaxKind::Block,
            Span::new(0, 10),
            GreenPayload::Block { scope: None },
            GreenChildren::new(),
        ) else {
            panic!("block construction cannot fail");
        };
        assert!(block.attached_scope().is_none());

        let scope = Arc::new(Scope::new(ScopeKind::Block));
        let Ok(scoped) = block.with_scope(Arc::clone(&scope)) else {
            panic!("blocks bear scopes");
        };
        let Some(attached) = scoped.attached_scope() else {
            panic!("scope attached");
        };
        assert!(Arc::ptr_eq(attached, &scope));
    }

    #[test]
    fn test_with_scope_rejected_on_leaf() {
        use lyn_types::{Scope, ScopeKind};
        let leaf = int_leaf(1, Span::new(0, 1));
        assert!(matches!(
            leaf.with_scope(Arc::new(Scope::new(ScopeKind::Block))),
            Err(TreeError::PayloadMismatch { .. })
        ));
    }

    #[test]
    fn test_with_resolved_type() {
        use lyn_types::Type;
        let Ok(leaf) = GreenNode::leaf(
            SyntaxKind::TypeRef,
            Span::new(0, 3),
            GreenPayload::TypeRef {
                name: "int".into(),
                resolved: None,
            },
        ) else {
            panic!("type ref construction cannot fail");
        };
        let Ok(resolved) = leaf.with_resolved_type(Type::integer()) else {
            panic!("type refs bear resolved types");
        };
        assert_eq!(resolved.resolved_type(), Some(&Type::integer()));
        assert_eq!(resolved.type_name().map(AsRef::as_ref), Some("int"));
        // The original leaf is untouched.
        assert_eq!(leaf.resolved_type(), None);
    }
}
