//! Lyn syntax trees.
//!
//! The tree has two layers:
//! - **Green**: immutable, position-agnostic node values
//!   ([`GreenNode`]). Edits go through [`GreenNode::with_replaced_child`]
//!   and produce new nodes that share every untouched child reference.
//! - **Red**: parent-aware views ([`RedNode`]) materialized lazily during
//!   traversal. A red node knows its parent and its index within it; its
//!   kind, span, and children are fully determined by its green node.
//!
//! Traversal code works on red nodes through the [`visit`] framework:
//! read-only [`Visitor`]s and tree-producing [`Rewriter`]s, both
//! dispatching over the closed [`SyntaxKind`] set.
//!
//! The [`build`] entry point converts an external concrete parse tree
//! into a green root.

mod builder;
mod green;
mod kind;
mod red;
mod span;
pub mod visit;

pub use builder::{build, BuildError, Construct, ParseNode};
pub use green::{GreenChildren, GreenNode, GreenPayload, TreeError};
pub use kind::{slot, Arity, BinaryOp, FlowKind, KindFamily, SyntaxKind};
pub use red::RedNode;
pub use span::Span;
pub use visit::{dispatch, rewrite_children, rewrite_dispatch, walk, Rewriter, Visitor};
