//! Generic traversal over the closed set of node kinds.
//!
//! Two traversal shapes share one dispatch structure:
//!
//! - [`Visitor`]: read-only pre-order walk. The default handler for every
//!   kind visits all children in order; overriding a handler without
//!   calling [`walk`] deliberately prunes descent into that subtree.
//! - [`Rewriter`]: same dispatch, but every handler returns a green node
//!   of the same kind. The default handler rewrites each child and
//!   compares it by reference to the original: only if at least one child
//!   actually changed does it construct a new parent, so unchanged
//!   subtrees keep their identity and no allocation happens on quiet
//!   paths.
//!
//! Selective flow dispatches one level further: [`Visitor::visit_flow`]
//! resolves the sub-kind to the if / if-else / while handler, and
//! [`Rewriter::rewrite_flow`] does the same.

use std::rc::Rc;
use std::sync::Arc;

use crate::{FlowKind, GreenChildren, GreenNode, RedNode, SyntaxKind};

/// Read-only pre-order visitor.
///
/// Override `visit_*` methods for the kinds of interest and call [`walk`]
/// to continue into children. Overriding [`Visitor::visit`] itself allows
/// a check at every node before normal dispatch; call [`dispatch`] to
/// resume.
pub trait Visitor {
    /// Visit one node: dispatch on its kind.
    fn visit(&mut self, node: &Rc<RedNode>) {
        dispatch(self, node);
    }

    fn visit_translation_unit(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_import_list(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_import(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_block(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_variable_decl(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_declarator_list(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_declarator(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_class_decl(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_method_decl(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_constructor_decl(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_parameter_list(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_parameter(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_generic_parameter_list(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_generic_parameter(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    /// Selective flow resolves one level further by sub-kind.
    fn visit_flow(&mut self, node: &Rc<RedNode>) {
        match node.green().flow_kind() {
            Some(FlowKind::If) => self.visit_if(node),
            Some(FlowKind::IfElse) => self.visit_if_else(node),
            Some(FlowKind::While) => self.visit_while(node),
            None => walk(self, node),
        }
    }

    fn visit_if(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_if_else(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_while(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_for(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_return(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_assignment(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_binary(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_call(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_argument_list(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_member_access(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_variable_ref(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_integer_literal(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_real_literal(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_boolean_literal(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_string_literal(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_type_ref(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }

    fn visit_identifier(&mut self, node: &Rc<RedNode>) {
        walk(self, node);
    }
}

/// Kind dispatch for visitors; the body of the default [`Visitor::visit`].
pub fn dispatch<V: Visitor + ?Sized>(visitor: &mut V, node: &Rc<RedNode>) {
    match node.kind() {
        SyntaxKind::TranslationUnit => visitor.visit_translation_unit(node),
        SyntaxKind::ImportList => visitor.visit_import_list(node),
        SyntaxKind::Import => visitor.visit_import(node),
        SyntaxKind::Block => visitor.visit_block(node),
        SyntaxKind::VariableDecl => visitor.visit_variable_decl(node),
        SyntaxKind::DeclaratorList => visitor.visit_declarator_list(node),
        SyntaxKind::Declarator => visitor.visit_declarator(node),
        SyntaxKind::ClassDecl => visitor.visit_class_decl(node),
        SyntaxKind::MethodDecl => visitor.visit_method_decl(node),
        SyntaxKind::ConstructorDecl => visitor.visit_constructor_decl(node),
        SyntaxKind::ParameterList => visitor.visit_parameter_list(node),
        SyntaxKind::Parameter => visitor.visit_parameter(node),
        SyntaxKind::GenericParameterList => visitor.visit_generic_parameter_list(node),
        SyntaxKind::GenericParameter => visitor.visit_generic_parameter(node),
        SyntaxKind::SelectiveFlow => visitor.visit_flow(node),
        SyntaxKind::For => visitor.visit_for(node),
        SyntaxKind::Return => visitor.visit_return(node),
        SyntaxKind::Assignment => visitor.visit_assignment(node),
        SyntaxKind::Binary => visitor.visit_binary(node),
        SyntaxKind::Call => visitor.visit_call(node),
        SyntaxKind::ArgumentList => visitor.visit_argument_list(node),
        SyntaxKind::MemberAccess => visitor.visit_member_access(node),
        SyntaxKind::VariableRef => visitor.visit_variable_ref(node),
        SyntaxKind::IntegerLiteral => visitor.visit_integer_literal(node),
        SyntaxKind::RealLiteral => visitor.visit_real_literal(node),
        SyntaxKind::BooleanLiteral => visitor.visit_boolean_literal(node),
        SyntaxKind::StringLiteral => visitor.visit_string_literal(node),
        SyntaxKind::TypeRef => visitor.visit_type_ref(node),
        SyntaxKind::Identifier => visitor.visit_identifier(node),
    }
}

/// Visit all present children in slot order.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, node: &Rc<RedNode>) {
    for child in node.children() {
        visitor.visit(&child);
    }
}

/// Tree-producing rewriter.
///
/// Handlers return a green node of the same kind as their input. The
/// default for every kind is [`rewrite_children`], which preserves
/// structural sharing wherever nothing changed.
pub trait Rewriter {
    /// Rewrite one node: dispatch on its kind.
    fn rewrite(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_dispatch(self, node)
    }

    fn rewrite_translation_unit(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_import_list(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_import(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_block(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_variable_decl(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_declarator_list(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_declarator(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_class_decl(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_method_decl(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_constructor_decl(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_parameter_list(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_parameter(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_generic_parameter_list(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_generic_parameter(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    /// Selective flow resolves one level further by sub-kind.
    fn rewrite_flow(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        match node.green().flow_kind() {
            Some(FlowKind::If) => self.rewrite_if(node),
            Some(FlowKind::IfElse) => self.rewrite_if_else(node),
            Some(FlowKind::While) => self.rewrite_while(node),
            None => rewrite_children(self, node),
        }
    }

    fn rewrite_if(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_if_else(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_while(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_for(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_return(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_assignment(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_binary(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_call(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_argument_list(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_member_access(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_variable_ref(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_integer_literal(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_real_literal(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_boolean_literal(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_string_literal(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_type_ref(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }

    fn rewrite_identifier(&mut self, node: &Rc<RedNode>) -> Arc<GreenNode> {
        rewrite_children(self, node)
    }
}

/// Kind dispatch for rewriters; the body of the default
/// [`Rewriter::rewrite`].
pub fn rewrite_dispatch<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    node: &Rc<RedNode>,
) -> Arc<GreenNode> {
    match node.kind() {
        SyntaxKind::TranslationUnit => rewriter.rewrite_translation_unit(node),
        SyntaxKind::ImportList => rewriter.rewrite_import_list(node),
        SyntaxKind::Import => rewriter.rewrite_import(node),
        SyntaxKind::Block => rewriter.rewrite_block(node),
        SyntaxKind::VariableDecl => rewriter.rewrite_variable_decl(node),
        SyntaxKind::DeclaratorList => rewriter.rewrite_declarator_list(node),
        SyntaxKind::Declarator => rewriter.rewrite_declarator(node),
        SyntaxKind::ClassDecl => rewriter.rewrite_class_decl(node),
        SyntaxKind::MethodDecl => rewriter.rewrite_method_decl(node),
        SyntaxKind::ConstructorDecl => rewriter.rewrite_constructor_decl(node),
        SyntaxKind::ParameterList => rewriter.rewrite_parameter_list(node),
        SyntaxKind::Parameter => rewriter.rewrite_parameter(node),
        SyntaxKind::GenericParameterList => rewriter.rewrite_generic_parameter_list(node),
        SyntaxKind::GenericParameter => rewriter.rewrite_generic_parameter(node),
        SyntaxKind::SelectiveFlow => rewriter.rewrite_flow(node),
        SyntaxKind::For => rewriter.rewrite_for(node),
        SyntaxKind::Return => rewriter.rewrite_return(node),
        SyntaxKind::Assignment => rewriter.rewrite_assignment(node),
        SyntaxKind::Binary => rewriter.rewrite_binary(node),
        SyntaxKind::Call => rewriter.rewrite_call(node),
        SyntaxKind::ArgumentList => rewriter.rewrite_argument_list(node),
        SyntaxKind::MemberAccess => rewriter.rewrite_member_access(node),
        SyntaxKind::VariableRef => rewriter.rewrite_variable_ref(node),
        SyntaxKind::IntegerLiteral => rewriter.rewrite_integer_literal(node),
        SyntaxKind::RealLiteral => rewriter.rewrite_real_literal(node),
        SyntaxKind::BooleanLiteral => rewriter.rewrite_boolean_literal(node),
        SyntaxKind::StringLiteral => rewriter.rewrite_string_literal(node),
        SyntaxKind::TypeRef => rewriter.rewrite_type_ref(node),
        SyntaxKind::Identifier => rewriter.rewrite_identifier(node),
    }
}

/// Rewrite every child and rebuild the parent only if something changed.
///
/// Empty slots stay empty. Each rewritten child is compared by reference
/// to the original; if all are identical the original green node is
/// returned as-is, keeping the whole subtree shared.
pub fn rewrite_children<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    node: &Rc<RedNode>,
) -> Arc<GreenNode> {
    let green = node.green();
    let mut changed = false;
    let mut children = GreenChildren::with_capacity(green.child_count());
    for slot in 0..green.child_count() {
        match node.child(slot) {
            Ok(Some(child)) => {
                let rewritten = rewriter.rewrite(&child);
                if !Arc::ptr_eq(&rewritten, child.green()) {
                    changed = true;
                }
                children.push(Some(rewritten));
            }
            _ => children.push(None),
        }
    }
    if changed {
        Arc::new(green.with_children(children))
    } else {
        Arc::clone(green)
    }
}
