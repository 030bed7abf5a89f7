//! Type binding: the fourth pipeline stage.
//!
//! One rewrite over type-reference leaves. Each referenced name resolves
//! against the visible class declarations walking outward through the
//! scope chain, then the root's merged imports, then the built-in
//! primitives. A resolved leaf is replaced by a copy carrying the type;
//! an unresolved one is reported and left as it was, and the pass keeps
//! going so one run surfaces every unresolved reference.

use std::rc::Rc;
use std::sync::Arc;

use lyn_diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink};
use lyn_syntax::{GreenNode, RedNode, Rewriter};
use lyn_types::Type;

use crate::scope::{scope_chain, visible_imports};
use crate::SourceUnit;

/// Decorate every type reference in the unit with its resolved type.
pub fn bind_types(unit: &SourceUnit, sink: &DiagnosticSink) -> SourceUnit {
    let root = RedNode::root(Arc::clone(unit.root()));
    let mut binder = TypeBinder {
        file: Arc::clone(unit.file()),
        sink,
    };
    let new_root = binder.rewrite(&root);
    unit.with_root(new_root)
}

struct TypeBinder<'a> {
    file: Arc<str>,
    sink: &'a DiagnosticSink,
}

impl Rewriter for TypeBinder<'_> {
    fn rewrite_type_ref(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        let green = node.green();
        let Some(name) = green.type_name().map(Arc::clone) else {
            return Arc::clone(green);
        };

        match resolve_type(node, &name) {
            Some(ty) => match green.with_resolved_type(ty) {
                Ok(resolved) => Arc::new(resolved),
                Err(_) => Arc::clone(green),
            },
            None => {
                self.sink.emit(
                    Diagnostic::new(
                        DiagnosticCode::UnresolvedType,
                        Arc::clone(&self.file),
                        node.span(),
                    )
                    .with_detail(format!("`{name}`")),
                );
                Arc::clone(green)
            }
        }
    }
}

/// Resolve a type name at a tree position.
fn resolve_type(node: &Rc<RedNode>, name: &str) -> Option<Type> {
    for level in scope_chain(node) {
        if let Some(found) = level
            .scope()
            .lookup_local(name)
            .iter()
            .find_map(|binding| match &binding.ty {
                Some(ty @ Type::Class(_)) => Some(ty.clone()),
                _ => None,
            })
        {
            return Some(found);
        }
    }

    if let Some(imports) = visible_imports(node) {
        if let Some(found) = imports
            .exports(name)
            .iter()
            .find_map(|binding| binding.ty.clone())
        {
            return Some(found);
        }
    }

    Type::builtin(name)
}
