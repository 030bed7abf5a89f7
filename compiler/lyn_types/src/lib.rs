//! Lyn type system and symbol information.
//!
//! This crate contains the semantic value types shared by the syntax tree
//! and the analysis stages:
//! - Nominal type values with their assignability and cast relations
//! - Visibility levels and per-declaration binding information
//! - Scopes (block and parameter shaped) with local symbol lookup
//! - Namespaces holding exported declaration sets
//!
//! Everything here is plain immutable data: scopes and namespaces are built
//! once by an analysis stage and then only read. Types have structural
//! equality on their nominal identity, so they can be compared and stored
//! freely without interning.

mod binding;
mod namespace;
mod scope;
mod ty;

pub use binding::{BindingInfo, Visibility};
pub use namespace::Namespace;
pub use scope::{Scope, ScopeKind};
pub use ty::{Type, TypeIdentity, BUILTIN_NAMESPACE};
