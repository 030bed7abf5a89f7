//! Declaration-order and shadowing validation: the third pipeline stage.
//!
//! A single pre-order pass that only reports; the tree is unchanged.
//!
//! For every variable reference the pass resolves the name outward
//! through the scope chain and then the root's merged imports:
//! - nothing found anywhere: `NoSuchSymbol`
//! - one declaration, positioned after the reference: `UseBeforeDeclaration`
//! - several declarations at one level: `InternalCompilerError`, since the
//!   language rules out same-scope name reuse entirely
//!
//! Independently, at every scope-bearing node the pass walks the scope
//! chain outward and reports each locally declared name that an enclosing
//! scope also declares: `HidesOtherSymbol`. The walk is recomputed per
//! scope-bearing node, quadratic in nesting depth; an enter/exit-stack
//! formulation would be linear but must emit the identical diagnostic
//! set.

use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use lyn_diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink};
use lyn_syntax::{
    visit::{dispatch, walk},
    RedNode, Visitor,
};

use crate::scope::{enclosing_scope, scope_at, scope_chain, visible_imports};
use crate::SourceUnit;

/// Run the declaration-order and shadowing checks over one unit.
pub fn check_declaration_order(unit: &SourceUnit, sink: &DiagnosticSink) {
    let root = RedNode::root(Arc::clone(unit.root()));
    let mut checker = DeclarationOrderCheck {
        file: Arc::clone(unit.file()),
        sink,
    };
    checker.visit(&root);
}

struct DeclarationOrderCheck<'a> {
    file: Arc<str>,
    sink: &'a DiagnosticSink,
}

impl DeclarationOrderCheck<'_> {
    fn emit(&self, diagnostic: Diagnostic) {
        self.sink.emit(diagnostic);
    }

    /// Resolve one variable reference outward and report ordering issues.
    fn check_reference(&self, node: &Rc<RedNode>) {
        let Some(name) = node.green().name().map(Arc::clone) else {
            return;
        };
        let reference_start = node.span().start;

        for level in scope_chain(node) {
            let bindings = level.scope().lookup_local(&name);
            match bindings.len() {
                0 => {}
                1 => {
                    if bindings[0].declared_at > reference_start {
                        self.emit(Diagnostic::new(
                            DiagnosticCode::UseBeforeDeclaration,
                            Arc::clone(&self.file),
                            node.span(),
                        )
                        .with_detail(format!("`{name}` is declared later in this scope")));
                    }
                    return;
                }
                _ => {
                    self.emit(Diagnostic::new(
                        DiagnosticCode::InternalCompilerError,
                        Arc::clone(&self.file),
                        node.span(),
                    )
                    .with_detail(format!(
                        "`{name}` has several declarations in one scope"
                    )));
                    return;
                }
            }
        }

        // Nothing declared in the file: the merged imports are the
        // outermost level.
        if let Some(imports) = visible_imports(node) {
            match imports.exports(&name).len() {
                0 => {}
                1 => return,
                _ => {
                    self.emit(Diagnostic::new(
                        DiagnosticCode::InternalCompilerError,
                        Arc::clone(&self.file),
                        node.span(),
                    )
                    .with_detail(format!(
                        "`{name}` is exported by several imported modules"
                    )));
                    return;
                }
            }
        }

        self.emit(
            Diagnostic::new(
                DiagnosticCode::NoSuchSymbol,
                Arc::clone(&self.file),
                node.span(),
            )
            .with_detail(format!("`{name}`")),
        );
    }

    /// Report names this scope declares that an enclosing scope also
    /// declares. Each name is reported once, against its nearest outer
    /// declaration.
    fn check_hides(&self, node: &Rc<RedNode>) {
        let Some(own) = scope_at(node) else {
            return;
        };
        let mut pending: FxHashSet<Arc<str>> =
            own.scope().local_names().map(Arc::clone).collect();
        if pending.is_empty() {
            return;
        }

        let mut outer = enclosing_scope(node);
        while let Some(level) = outer {
            for name in level.scope().local_names() {
                if pending.remove(name) {
                    self.emit(
                        Diagnostic::new(
                            DiagnosticCode::HidesOtherSymbol,
                            Arc::clone(&self.file),
                            node.span(),
                        )
                        .with_detail(format!(
                            "`{name}` hides the declaration visible from the enclosing \
                             {:?} scope at {}",
                            level.scope().kind(),
                            level.node().span(),
                        )),
                    );
                }
            }
            if pending.is_empty() {
                break;
            }
            outer = level.parent();
        }
    }
}

impl Visitor for DeclarationOrderCheck<'_> {
    fn visit(&mut self, node: &Rc<RedNode>) {
        if node.green().attached_scope().is_some() {
            self.check_hides(node);
        }
        dispatch(self, node);
    }

    fn visit_variable_ref(&mut self, node: &Rc<RedNode>) {
        self.check_reference(node);
        walk(self, node);
    }
}
