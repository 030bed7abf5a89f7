//! Shared helpers for building parse trees in tests.

use lyn_syntax::{build, Construct, ParseNode, Span};

use crate::SourceUnit;

pub(crate) fn translation_unit(imports: Vec<ParseNode>, body: ParseNode) -> ParseNode {
    ParseNode::new(Construct::TranslationUnit, Span::new(0, 200)).with_children(vec![
        ParseNode::new(Construct::ImportDirectives, Span::new(0, 10)).with_children(imports),
        body,
    ])
}

pub(crate) fn statements(children: Vec<ParseNode>) -> ParseNode {
    ParseNode::new(Construct::Statements, Span::new(0, 200)).with_children(children)
}

/// A nested bare block with its own span.
pub(crate) fn block_stmt(inner: ParseNode, span: Span) -> ParseNode {
    ParseNode { span, ..inner }
}

pub(crate) fn import(module: &str) -> ParseNode {
    ParseNode::new(Construct::ImportDirective, Span::new(0, 10)).with_text(module)
}

pub(crate) fn type_name(name: &str, span: Span) -> ParseNode {
    ParseNode::new(Construct::TypeName, span).with_text(name)
}

pub(crate) fn identifier(name: &str, span: Span) -> ParseNode {
    ParseNode::new(Construct::Identifier, span).with_text(name)
}

pub(crate) fn declarator(name: &str, span: Span, init: Option<ParseNode>) -> ParseNode {
    let mut children = vec![identifier(name, span)];
    children.extend(init);
    ParseNode::new(Construct::Declarator, span).with_children(children)
}

pub(crate) fn variable_decl(ty: &str, declarators: Vec<ParseNode>, span: Span) -> ParseNode {
    let mut children = vec![type_name(ty, Span::new(span.start, span.start + 3))];
    children.extend(declarators);
    ParseNode::new(Construct::VariableDeclaration, span).with_children(children)
}

pub(crate) fn class(name: &str, body: ParseNode, span: Span) -> ParseNode {
    ParseNode::new(Construct::ClassDeclaration, span).with_children(vec![
        identifier(name, Span::new(span.start + 6, span.start + 6 + name.len() as u32)),
        body,
    ])
}

pub(crate) fn method(
    ret: &str,
    name: &str,
    params: Vec<ParseNode>,
    body: ParseNode,
    span: Span,
) -> ParseNode {
    ParseNode::new(Construct::MethodDeclaration, span).with_children(vec![
        type_name(ret, Span::new(span.start, span.start + 3)),
        identifier(
            name,
            Span::new(span.start + 4, span.start + 4 + name.len() as u32),
        ),
        ParseNode::new(Construct::Parameters, Span::new(span.start + 8, span.start + 20))
            .with_children(params),
        body,
    ])
}

pub(crate) fn parameter(ty: &str, name: &str, span: Span) -> ParseNode {
    ParseNode::new(Construct::Parameter, span).with_children(vec![
        type_name(ty, Span::new(span.start, span.start + 3)),
        identifier(name, Span::new(span.start + 4, span.end)),
    ])
}

pub(crate) fn for_loop(
    ty: &str,
    name: &str,
    iterable: ParseNode,
    body: ParseNode,
    span: Span,
) -> ParseNode {
    ParseNode::new(Construct::ForLoop, span).with_children(vec![
        type_name(ty, Span::new(span.start, span.start + 3)),
        identifier(name, Span::new(span.start + 4, span.start + 5)),
        iterable,
        body,
    ])
}

pub(crate) fn assignment(target: ParseNode, value: ParseNode, span: Span) -> ParseNode {
    ParseNode::new(Construct::Assignment, span).with_children(vec![target, value])
}

pub(crate) fn variable_ref(name: &str, span: Span) -> ParseNode {
    identifier(name, span)
}

pub(crate) fn integer(text: &str, span: Span) -> ParseNode {
    ParseNode::new(Construct::IntegerLiteral, span).with_text(text)
}

pub(crate) fn file_unit(file: &str, parse: ParseNode) -> SourceUnit {
    let Ok(root) = build(&parse) else {
        panic!("test parse tree must build");
    };
    SourceUnit::new(file, "", root)
}
