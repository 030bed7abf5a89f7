//! Plain-text transcription of a decorated tree.
//!
//! A read-only visitor over the analysis output, rendering each unit as
//! C#-flavoured source text. Type references render through their
//! resolved type when type binding has decorated them, falling back to
//! the source spelling otherwise.

use std::rc::Rc;
use std::sync::Arc;

use lyn_sema::SourceUnit;
use lyn_syntax::{slot, GreenNode, RedNode, SyntaxKind, Visitor};

/// Render one unit as plain text.
pub fn render_unit(unit: &SourceUnit) -> String {
    let mut emitter = PlainTextEmitter {
        out: String::new(),
        indent: 0,
    };
    emitter.visit(&RedNode::root(Arc::clone(unit.root())));
    emitter.out
}

struct PlainTextEmitter {
    out: String,
    indent: usize,
}

impl PlainTextEmitter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn braced(&mut self, header: &str, node: &Rc<RedNode>, body_slot: usize) {
        self.line(&format!("{header} {{"));
        self.indent += 1;
        if let Ok(Some(body)) = node.child(body_slot) {
            self.visit(&body);
        }
        self.indent -= 1;
        self.line("}");
    }
}

impl Visitor for PlainTextEmitter {
    fn visit_import(&mut self, node: &Rc<RedNode>) {
        if let Some(path) = node.green().import_path() {
            self.line(&format!("using {path};"));
        }
    }

    fn visit_variable_decl(&mut self, node: &Rc<RedNode>) {
        let green = node.green();
        let ty = child_text(green, slot::VAR_DECL_TYPE);
        if let Ok(Some(declarators)) = green.child_at(slot::VAR_DECL_DECLARATORS) {
            for declarator in declarators.present_children() {
                let name = child_text(declarator, slot::DECLARATOR_NAME);
                match declarator
                    .child_at(slot::DECLARATOR_INIT)
                    .ok()
                    .flatten()
                {
                    Some(init) => {
                        self.line(&format!("{ty} {name} = {};", expression_text(init)))
                    }
                    None => self.line(&format!("{ty} {name};")),
                }
            }
        }
    }

    fn visit_class_decl(&mut self, node: &Rc<RedNode>) {
        let name = child_text(node.green(), slot::CLASS_NAME);
        self.braced(&format!("class {name}"), node, slot::CLASS_BODY);
    }

    fn visit_method_decl(&mut self, node: &Rc<RedNode>) {
        let green = node.green();
        let ret = child_text(green, slot::METHOD_RETURN_TYPE);
        let name = child_text(green, slot::METHOD_NAME);
        let mut params = Vec::new();
        if let Ok(Some(list)) = green.child_at(slot::METHOD_PARAMS) {
            for parameter in list.present_children() {
                let ty = child_text(parameter, slot::PARAM_TYPE);
                let param_name = child_text(parameter, slot::PARAM_NAME);
                params.push(format!("{ty} {param_name}"));
            }
        }
        self.braced(
            &format!("{ret} {name}({})", params.join(", ")),
            node,
            slot::METHOD_BODY,
        );
    }

    fn visit_if(&mut self, node: &Rc<RedNode>) {
        let cond = slot_expression_text(node.green(), slot::FLOW_CONDITION);
        self.braced(&format!("if ({cond})"), node, slot::FLOW_PRIMARY);
    }

    fn visit_if_else(&mut self, node: &Rc<RedNode>) {
        let cond = slot_expression_text(node.green(), slot::FLOW_CONDITION);
        self.braced(&format!("if ({cond})"), node, slot::FLOW_PRIMARY);
        self.braced("else", node, slot::FLOW_ALTERNATIVE);
    }

    fn visit_while(&mut self, node: &Rc<RedNode>) {
        let cond = slot_expression_text(node.green(), slot::FLOW_CONDITION);
        self.braced(&format!("while ({cond})"), node, slot::FLOW_PRIMARY);
    }

    fn visit_for(&mut self, node: &Rc<RedNode>) {
        let green = node.green();
        let ty = child_text(green, slot::FOR_TYPE);
        let name = child_text(green, slot::FOR_NAME);
        let iterable = slot_expression_text(green, slot::FOR_ITERABLE);
        self.braced(
            &format!("foreach ({ty} {name} in {iterable})"),
            node,
            slot::FOR_BODY,
        );
    }

    fn visit_return(&mut self, node: &Rc<RedNode>) {
        match node.green().child_at(slot::RETURN_VALUE).ok().flatten() {
            Some(value) => self.line(&format!("return {};", expression_text(value))),
            None => self.line("return;"),
        }
    }

    fn visit_assignment(&mut self, node: &Rc<RedNode>) {
        let green = node.green();
        let target = slot_expression_text(green, slot::ASSIGN_TARGET);
        let value = slot_expression_text(green, slot::ASSIGN_VALUE);
        self.line(&format!("{target} = {value};"));
    }

    fn visit_call(&mut self, node: &Rc<RedNode>) {
        self.line(&format!("{};", expression_text(node.green())));
    }
}

fn child_text(green: &Arc<GreenNode>, slot: usize) -> String {
    match green.child_at(slot) {
        Ok(Some(child)) => node_text(child),
        _ => String::new(),
    }
}

fn slot_expression_text(green: &Arc<GreenNode>, slot: usize) -> String {
    match green.child_at(slot) {
        Ok(Some(child)) => expression_text(child),
        _ => String::new(),
    }
}

fn node_text(green: &Arc<GreenNode>) -> String {
    match green.kind() {
        SyntaxKind::Identifier | SyntaxKind::VariableRef | SyntaxKind::GenericParameter => green
            .name()
            .map(ToString::to_string)
            .unwrap_or_default(),
        // A decorated type reference renders its resolved identity.
        SyntaxKind::TypeRef => match green.resolved_type() {
            Some(ty) => ty.identity().name.to_string(),
            None => green
                .type_name()
                .map(ToString::to_string)
                .unwrap_or_default(),
        },
        _ => expression_text(green),
    }
}

fn expression_text(green: &Arc<GreenNode>) -> String {
    match green.kind() {
        SyntaxKind::VariableRef | SyntaxKind::Identifier => green
            .name()
            .map(ToString::to_string)
            .unwrap_or_default(),
        SyntaxKind::IntegerLiteral => green
            .integer_value()
            .map(|value| value.to_string())
            .unwrap_or_default(),
        SyntaxKind::RealLiteral => green
            .real_value()
            .map(|value| value.to_string())
            .unwrap_or_default(),
        SyntaxKind::BooleanLiteral => green
            .boolean_value()
            .map(|value| value.to_string())
            .unwrap_or_default(),
        SyntaxKind::StringLiteral => green
            .string_value()
            .map(|text| format!("\"{text}\""))
            .unwrap_or_default(),
        SyntaxKind::Binary => {
            let left = slot_expression_text(green, slot::BINARY_LEFT);
            let right = slot_expression_text(green, slot::BINARY_RIGHT);
            let op = green.operator().map_or("?", |op| op.symbol());
            format!("{left} {op} {right}")
        }
        SyntaxKind::Call => {
            let target = slot_expression_text(green, slot::CALL_TARGET);
            let args = match green.child_at(slot::CALL_ARGS) {
                Ok(Some(list)) => list
                    .present_children()
                    .map(expression_text)
                    .collect::<Vec<_>>()
                    .join(", "),
                _ => String::new(),
            };
            format!("{target}({args})")
        }
        SyntaxKind::MemberAccess => {
            let receiver = slot_expression_text(green, slot::MEMBER_RECEIVER);
            let member = green.name().map(ToString::to_string).unwrap_or_default();
            format!("{receiver}.{member}")
        }
        _ => String::new(),
    }
}
