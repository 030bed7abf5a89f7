//! Scope attachment: the second pipeline stage.
//!
//! A rewrite that gives every block a fresh block scope holding its
//! directly declared variables, classes, and methods, and every method or
//! constructor a parameter scope holding its parameter and
//! generic-parameter names.
//!
//! Scopes belong to the tree version this rewrite produces. Running the
//! stage again on the result creates new scope objects, never reuses.

use std::rc::Rc;
use std::sync::Arc;

use lyn_syntax::{
    slot, visit::rewrite_children, GreenNode, RedNode, Rewriter, SyntaxKind,
};
use lyn_types::{BindingInfo, Scope, ScopeKind, Type, Visibility};

use crate::imports::required_child;
use crate::{SourceUnit, StageError};

/// Attach fresh scopes throughout the unit's tree.
pub fn attach_scopes(unit: &SourceUnit) -> Result<SourceUnit, StageError> {
    let root = RedNode::root(Arc::clone(unit.root()));
    let mut attacher = ScopeAttacher { failure: None };
    let new_root = attacher.rewrite(&root);
    match attacher.failure {
        Some(error) => Err(error),
        None => Ok(unit.with_root(new_root)),
    }
}

struct ScopeAttacher {
    /// First structural failure observed; the rewrite keeps returning
    /// originals once set.
    failure: Option<StageError>,
}

impl ScopeAttacher {
    fn fail(&mut self, error: StageError) {
        if self.failure.is_none() {
            self.failure = Some(error);
        }
    }

    fn attach(
        &mut self,
        rewritten: Arc<GreenNode>,
        scope: Result<Scope, StageError>,
    ) -> Arc<GreenNode> {
        match scope.and_then(|scope| {
            rewritten
                .with_scope(Arc::new(scope))
                .map_err(StageError::from)
        }) {
            Ok(scoped) => Arc::new(scoped),
            Err(error) => {
                self.fail(error);
                rewritten
            }
        }
    }
}

impl Rewriter for ScopeAttacher {
    fn rewrite_block(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        let rewritten = rewrite_children(self, node);
        let scope = collect_block_scope(&rewritten);
        self.attach(rewritten, scope)
    }

    fn rewrite_method_decl(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        let rewritten = rewrite_children(self, node);
        let scope = collect_parameter_scope(&rewritten);
        self.attach(rewritten, scope)
    }

    fn rewrite_constructor_decl(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        let rewritten = rewrite_children(self, node);
        let scope = collect_parameter_scope(&rewritten);
        self.attach(rewritten, scope)
    }

    fn rewrite_for(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        let rewritten = rewrite_children(self, node);
        match add_induction_binding(&rewritten) {
            Ok(updated) => updated,
            Err(error) => {
                self.fail(error);
                rewritten
            }
        }
    }
}

/// The induction variable of a for loop is visible inside the loop body:
/// add it to the body block's freshly attached scope.
fn add_induction_binding(for_green: &Arc<GreenNode>) -> Result<Arc<GreenNode>, StageError> {
    let name_node = required_child(for_green, slot::FOR_NAME)?;
    let name = declared_name(&name_node)?;
    let body = required_child(for_green, slot::FOR_BODY)?;
    let Some(existing) = body.attached_scope() else {
        return Err(StageError::MissingChild {
            kind: body.kind(),
            slot: slot::FOR_BODY,
        });
    };

    let mut scope = existing.as_ref().clone();
    scope.insert(
        name,
        BindingInfo::new(None, Visibility::NotApplicable, name_node.span().end),
    );
    let new_body = body.with_scope(Arc::new(scope))?;
    let updated = for_green.with_replaced_child(slot::FOR_BODY, Arc::new(new_body))?;
    Ok(Arc::new(updated))
}

/// The names a block declares directly: one binding per declarator,
/// class, and method statement.
fn collect_block_scope(block: &Arc<GreenNode>) -> Result<Scope, StageError> {
    let mut scope = Scope::new(ScopeKind::Block);
    for statement in block.present_children() {
        match statement.kind() {
            SyntaxKind::VariableDecl => {
                let visibility = statement.visibility().unwrap_or_default();
                let declarators = required_child(statement, slot::VAR_DECL_DECLARATORS)?;
                for declarator in declarators.present_children() {
                    let name = required_child(declarator, slot::DECLARATOR_NAME)?;
                    scope.insert(
                        declared_name(&name)?,
                        BindingInfo::new(None, visibility, name.span().start),
                    );
                }
            }
            SyntaxKind::ClassDecl => {
                let visibility = statement.visibility().unwrap_or_default();
                let name = required_child(statement, slot::CLASS_NAME)?;
                let class_name = declared_name(&name)?;
                scope.insert(
                    Arc::clone(&class_name),
                    BindingInfo::new(
                        Some(Type::class(class_name, "")),
                        visibility,
                        name.span().start,
                    ),
                );
            }
            SyntaxKind::MethodDecl => {
                let visibility = statement.visibility().unwrap_or_default();
                let name = required_child(statement, slot::METHOD_NAME)?;
                scope.insert(
                    declared_name(&name)?,
                    BindingInfo::new(None, visibility, name.span().start),
                );
            }
            _ => {}
        }
    }
    Ok(scope)
}

/// The parameter and generic-parameter names of a method or constructor.
///
/// Parameters count from their span end for declaration ordering, so a
/// parameter is visible throughout the body it precedes.
fn collect_parameter_scope(decl: &Arc<GreenNode>) -> Result<Scope, StageError> {
    let params_slot = match decl.kind() {
        SyntaxKind::ConstructorDecl => slot::CTOR_PARAMS,
        _ => slot::METHOD_PARAMS,
    };
    let mut scope = Scope::new(ScopeKind::Parameter);

    let params = required_child(decl, params_slot)?;
    for parameter in params.present_children() {
        let name = required_child(parameter, slot::PARAM_NAME)?;
        scope.insert(
            declared_name(&name)?,
            BindingInfo::new(None, Visibility::NotApplicable, parameter.span().end),
        );
    }

    if decl.kind() == SyntaxKind::MethodDecl {
        if let Some(generics) = decl.child_at(slot::METHOD_GENERICS)? {
            for generic in generics.present_children() {
                let Some(name) = generic.name() else {
                    continue;
                };
                scope.insert(
                    Arc::clone(name),
                    BindingInfo::new(None, Visibility::NotApplicable, generic.span().end),
                );
            }
        }
    }

    Ok(scope)
}

fn declared_name(identifier: &Arc<GreenNode>) -> Result<Arc<str>, StageError> {
    identifier
        .name()
        .map(Arc::clone)
        .ok_or(StageError::MissingChild {
            kind: identifier.kind(),
            slot: 0,
        })
}
