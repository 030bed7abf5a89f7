//! Semantic analysis for the Lyn compiler.
//!
//! Each file passes through four stages, every one a pure function from
//! a [`SourceUnit`] to a new one (or a read-only check):
//!
//! 1. **Import merge** ([`merge_imports`]): record the merged exported
//!    declarations of the file's imports on its root.
//! 2. **Scope attachment** ([`attach_scopes`]): give every block and
//!    every method/constructor a fresh scope.
//! 3. **Order check** ([`check_declaration_order`]): report unresolved
//!    names, use-before-declaration, same-scope duplicates, shadowing.
//! 4. **Type binding** ([`bind_types`]): decorate type-reference leaves
//!    with resolved types.
//!
//! Stages 1+2 form the scope-collection phase and stages 3+4 the
//! analysis phase; the driver places a barrier between the phases across
//! all files.

mod bind;
mod error;
mod imports;
mod namespace;
mod order;
mod pipeline;
pub mod scope;
mod scopes;
#[cfg(test)]
pub(crate) mod testutil;
mod unit;

pub use bind::bind_types;
pub use error::StageError;
pub use imports::merge_imports;
pub use namespace::{requested_modules, NamespaceLoader, NamespaceTable, StaticLoader};
pub use order::check_declaration_order;
pub use pipeline::{analysis, scope_collection};
pub use scopes::attach_scopes;
pub use unit::SourceUnit;
