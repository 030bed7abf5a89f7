//! Conversion from a concrete parse tree to a green tree.
//!
//! The parser is an external collaborator: it hands over a generic
//! concrete tree of [`ParseNode`]s, each with a typed construct tag,
//! ordered children, a source interval, and (for terminals) raw text.
//! [`build`] maps each grammar construct to exactly one green node kind:
//! an absent optional clause becomes an explicit empty slot, a repeated
//! clause becomes a sequence node.
//!
//! Shape violations are structural errors: they abort the affected file's
//! conversion and nothing else.

use std::sync::Arc;

use smallvec::smallvec;
use thiserror::Error;

use lyn_types::Visibility;

use crate::{
    BinaryOp, FlowKind, GreenChildren, GreenNode, GreenPayload, Span, SyntaxKind, TreeError,
};

/// Grammar construct tags the external parser produces.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Construct {
    TranslationUnit,
    ImportDirectives,
    ImportDirective,
    Statements,
    VariableDeclaration,
    Declarator,
    ClassDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    Parameters,
    Parameter,
    GenericParameters,
    GenericParameter,
    IfSelection,
    WhileLoop,
    ForLoop,
    ReturnStatement,
    Assignment,
    BinaryExpression,
    CallExpression,
    MemberAccess,
    Identifier,
    IntegerLiteral,
    RealLiteral,
    BooleanLiteral,
    StringLiteral,
    TypeName,
    VisibilityModifier,
}

/// One node of the external concrete parse tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseNode {
    pub construct: Construct,
    pub span: Span,
    /// Raw text, present on terminals (names, literals, operators, paths).
    pub text: Option<Arc<str>>,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    pub fn new(construct: Construct, span: Span) -> Self {
        ParseNode {
            construct,
            span,
            text: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<ParseNode>) -> Self {
        self.children = children;
        self
    }
}

/// Violations of the parse-tree contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("expected {expected} at {span}, found {found:?}")]
    UnexpectedConstruct {
        expected: &'static str,
        found: Construct,
        span: Span,
    },
    #[error("{construct:?} at {span} expects {expected} children, found {found}")]
    WrongChildCount {
        construct: Construct,
        expected: &'static str,
        found: usize,
        span: Span,
    },
    #[error("{construct:?} at {span} carries no text")]
    MissingText { construct: Construct, span: Span },
    #[error("malformed literal `{text}` at {span}")]
    InvalidLiteral { text: String, span: Span },
    #[error("unknown operator `{text}` at {span}")]
    UnknownOperator { text: String, span: Span },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Convert a parse tree rooted at a translation unit into a green root.
pub fn build(root: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    expect(root, Construct::TranslationUnit, "a translation unit")?;
    let [imports, statements] = fixed_children(root, "import directives and statements")?;
    expect(imports, Construct::ImportDirectives, "import directives")?;
    expect(statements, Construct::Statements, "statements")?;

    let import_list = build_import_list(imports)?;
    let body = build_block(statements)?;
    let unit = GreenNode::new(
        SyntaxKind::TranslationUnit,
        root.span,
        GreenPayload::Unit { imports: None },
        smallvec![Some(import_list), Some(body)],
    )?;
    Ok(Arc::new(unit))
}

fn expect(
    node: &ParseNode,
    construct: Construct,
    expected: &'static str,
) -> Result<(), BuildError> {
    if node.construct == construct {
        Ok(())
    } else {
        Err(BuildError::UnexpectedConstruct {
            expected,
            found: node.construct,
            span: node.span,
        })
    }
}

fn fixed_children<'a, const N: usize>(
    node: &'a ParseNode,
    expected: &'static str,
) -> Result<[&'a ParseNode; N], BuildError> {
    let children: Vec<&ParseNode> = node.children.iter().collect();
    children
        .try_into()
        .map_err(|_| BuildError::WrongChildCount {
            construct: node.construct,
            expected,
            found: node.children.len(),
            span: node.span,
        })
}

fn required_text(node: &ParseNode) -> Result<Arc<str>, BuildError> {
    node.text.clone().ok_or(BuildError::MissingText {
        construct: node.construct,
        span: node.span,
    })
}

fn build_import_list(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    let mut children = GreenChildren::with_capacity(node.children.len());
    for directive in &node.children {
        expect(directive, Construct::ImportDirective, "an import directive")?;
        let path = required_text(directive)?;
        let import = GreenNode::leaf(
            SyntaxKind::Import,
            directive.span,
            GreenPayload::ImportPath(path),
        )?;
        children.push(Some(Arc::new(import)));
    }
    let list = GreenNode::new(SyntaxKind::ImportList, node.span, GreenPayload::None, children)?;
    Ok(Arc::new(list))
}

fn build_block(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    expect(node, Construct::Statements, "a statement block")?;
    let mut children = GreenChildren::with_capacity(node.children.len());
    for statement in &node.children {
        children.push(Some(build_statement(statement)?));
    }
    let block = GreenNode::new(
        SyntaxKind::Block,
        node.span,
        GreenPayload::Block { scope: None },
        children,
    )?;
    Ok(Arc::new(block))
}

fn build_statement(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    match node.construct {
        // A bare nested block is a statement of its own.
        Construct::Statements => build_block(node),
        Construct::VariableDeclaration => build_variable_decl(node),
        Construct::ClassDeclaration => build_class_decl(node),
        Construct::MethodDeclaration => build_method_decl(node),
        Construct::ConstructorDeclaration => build_constructor_decl(node),
        Construct::IfSelection => build_if(node),
        Construct::WhileLoop => build_while(node),
        Construct::ForLoop => build_for(node),
        Construct::ReturnStatement => build_return(node),
        Construct::Assignment => build_assignment(node),
        Construct::CallExpression => build_expression(node),
        _ => Err(BuildError::UnexpectedConstruct {
            expected: "a statement",
            found: node.construct,
            span: node.span,
        }),
    }
}

/// Split an optional leading visibility modifier off a declaration's
/// children.
fn split_visibility(node: &ParseNode) -> Result<(Visibility, &[ParseNode]), BuildError> {
    match node.children.first() {
        Some(first) if first.construct == Construct::VisibilityModifier => {
            let text = required_text(first)?;
            let visibility =
                Visibility::from_keyword(&text).ok_or_else(|| BuildError::InvalidLiteral {
                    text: text.to_string(),
                    span: first.span,
                })?;
            Ok((visibility, &node.children[1..]))
        }
        _ => Ok((Visibility::default(), &node.children[..])),
    }
}

fn build_variable_decl(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    let (visibility, rest) = split_visibility(node)?;
    let [ty, declarators @ ..] = rest else {
        return Err(BuildError::WrongChildCount {
            construct: node.construct,
            expected: "a type and at least one declarator",
            found: rest.len(),
            span: node.span,
        });
    };
    if declarators.is_empty() {
        return Err(BuildError::WrongChildCount {
            construct: node.construct,
            expected: "a type and at least one declarator",
            found: rest.len(),
            span: node.span,
        });
    }

    let type_ref = build_type_ref(ty)?;
    let mut list_children = GreenChildren::with_capacity(declarators.len());
    let mut list_span = declarators[0].span;
    for declarator in declarators {
        list_span = list_span.merge(declarator.span);
        list_children.push(Some(build_declarator(declarator)?));
    }
    let list = Arc::new(GreenNode::new(
        SyntaxKind::DeclaratorList,
        list_span,
        GreenPayload::None,
        list_children,
    )?);

    let decl = GreenNode::new(
        SyntaxKind::VariableDecl,
        node.span,
        GreenPayload::Visibility(visibility),
        smallvec![Some(type_ref), Some(list)],
    )?;
    Ok(Arc::new(decl))
}

fn build_declarator(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    expect(node, Construct::Declarator, "a declarator")?;
    let (name, initializer) = match node.children.as_slice() {
        [name] => (name, None),
        [name, init] => (name, Some(init)),
        _ => {
            return Err(BuildError::WrongChildCount {
                construct: node.construct,
                expected: "a name and an optional initializer",
                found: node.children.len(),
                span: node.span,
            })
        }
    };
    let name = build_identifier(name)?;
    let init = initializer.map(build_expression).transpose()?;
    let declarator = GreenNode::new(
        SyntaxKind::Declarator,
        node.span,
        GreenPayload::None,
        smallvec![Some(name), init],
    )?;
    Ok(Arc::new(declarator))
}

fn build_class_decl(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    let (visibility, rest) = split_visibility(node)?;
    let [name, body] = rest else {
        return Err(BuildError::WrongChildCount {
            construct: node.construct,
            expected: "a name and a body",
            found: rest.len(),
            span: node.span,
        });
    };
    let name = build_identifier(name)?;
    let body = build_block(body)?;
    let decl = GreenNode::new(
        SyntaxKind::ClassDecl,
        node.span,
        GreenPayload::Visibility(visibility),
        smallvec![Some(name), Some(body)],
    )?;
    Ok(Arc::new(decl))
}

fn build_method_decl(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    let (visibility, rest) = split_visibility(node)?;
    let (ret, name, params, generics, body) = match rest {
        [ret, name, params, body] => (ret, name, params, None, body),
        [ret, name, params, generics, body] => (ret, name, params, Some(generics), body),
        _ => {
            return Err(BuildError::WrongChildCount {
                construct: node.construct,
                expected: "return type, name, parameters, optional generics, body",
                found: rest.len(),
                span: node.span,
            })
        }
    };

    let return_type = build_type_ref(ret)?;
    let name = build_identifier(name)?;
    let params = build_parameter_list(params)?;
    let generics = generics.map(build_generic_parameter_list).transpose()?;
    let body = build_block(body)?;

    let decl = GreenNode::new(
        SyntaxKind::MethodDecl,
        node.span,
        GreenPayload::Callable {
            visibility,
            scope: None,
        },
        smallvec![Some(name), Some(return_type), Some(params), generics, Some(body)],
    )?;
    Ok(Arc::new(decl))
}

fn build_constructor_decl(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    let (visibility, rest) = split_visibility(node)?;
    let [params, body] = rest else {
        return Err(BuildError::WrongChildCount {
            construct: node.construct,
            expected: "parameters and a body",
            found: rest.len(),
            span: node.span,
        });
    };
    let params = build_parameter_list(params)?;
    let body = build_block(body)?;
    let decl = GreenNode::new(
        SyntaxKind::ConstructorDecl,
        node.span,
        GreenPayload::Callable {
            visibility,
            scope: None,
        },
        smallvec![Some(params), Some(body)],
    )?;
    Ok(Arc::new(decl))
}

fn build_parameter_list(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    expect(node, Construct::Parameters, "a parameter list")?;
    let mut children = GreenChildren::with_capacity(node.children.len());
    for parameter in &node.children {
        expect(parameter, Construct::Parameter, "a parameter")?;
        let [ty, name] = fixed_children(parameter, "a type and a name")?;
        let ty = build_type_ref(ty)?;
        let name = build_identifier(name)?;
        let param = GreenNode::new(
            SyntaxKind::Parameter,
            parameter.span,
            GreenPayload::None,
            smallvec![Some(ty), Some(name)],
        )?;
        children.push(Some(Arc::new(param)));
    }
    let list = GreenNode::new(
        SyntaxKind::ParameterList,
        node.span,
        GreenPayload::None,
        children,
    )?;
    Ok(Arc::new(list))
}

fn build_generic_parameter_list(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    expect(node, Construct::GenericParameters, "generic parameters")?;
    let mut children = GreenChildren::with_capacity(node.children.len());
    for parameter in &node.children {
        expect(parameter, Construct::GenericParameter, "a generic parameter")?;
        let name = required_text(parameter)?;
        let generic = GreenNode::leaf(
            SyntaxKind::GenericParameter,
            parameter.span,
            GreenPayload::Name(name),
        )?;
        children.push(Some(Arc::new(generic)));
    }
    let list = GreenNode::new(
        SyntaxKind::GenericParameterList,
        node.span,
        GreenPayload::None,
        children,
    )?;
    Ok(Arc::new(list))
}

fn build_if(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    match node.children.as_slice() {
        [condition, primary] => {
            let condition = build_expression(condition)?;
            let primary = build_block(primary)?;
            let flow = GreenNode::new(
                SyntaxKind::SelectiveFlow,
                node.span,
                GreenPayload::Flow(FlowKind::If),
                smallvec![Some(condition), Some(primary), None],
            )?;
            Ok(Arc::new(flow))
        }
        [condition, primary, alternative] => {
            let condition = build_expression(condition)?;
            let primary = build_block(primary)?;
            let alternative = build_block(alternative)?;
            let flow = GreenNode::new(
                SyntaxKind::SelectiveFlow,
                node.span,
                GreenPayload::Flow(FlowKind::IfElse),
                smallvec![Some(condition), Some(primary), Some(alternative)],
            )?;
            Ok(Arc::new(flow))
        }
        _ => Err(BuildError::WrongChildCount {
            construct: node.construct,
            expected: "a condition, a block, and an optional else block",
            found: node.children.len(),
            span: node.span,
        }),
    }
}

fn build_while(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    let [condition, body] = fixed_children(node, "a condition and a body")?;
    let condition = build_expression(condition)?;
    let body = build_block(body)?;
    let flow = GreenNode::new(
        SyntaxKind::SelectiveFlow,
        node.span,
        GreenPayload::Flow(FlowKind::While),
        smallvec![Some(condition), Some(body), None],
    )?;
    Ok(Arc::new(flow))
}

fn build_for(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    let [ty, name, iterable, body] =
        fixed_children(node, "induction type, name, iterable, body")?;
    let ty = build_type_ref(ty)?;
    let name = build_identifier(name)?;
    let iterable = build_expression(iterable)?;
    let body = build_block(body)?;
    let flow = GreenNode::new(
        SyntaxKind::For,
        node.span,
        GreenPayload::None,
        smallvec![Some(ty), Some(name), Some(iterable), Some(body)],
    )?;
    Ok(Arc::new(flow))
}

fn build_return(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    let value = match node.children.as_slice() {
        [] => None,
        [value] => Some(build_expression(value)?),
        _ => {
            return Err(BuildError::WrongChildCount {
                construct: node.construct,
                expected: "at most one value",
                found: node.children.len(),
                span: node.span,
            })
        }
    };
    let ret = GreenNode::new(
        SyntaxKind::Return,
        node.span,
        GreenPayload::None,
        smallvec![value],
    )?;
    Ok(Arc::new(ret))
}

fn build_assignment(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    let [target, value] = fixed_children(node, "a target and a value")?;
    let target = build_expression(target)?;
    let value = build_expression(value)?;
    let assignment = GreenNode::new(
        SyntaxKind::Assignment,
        node.span,
        GreenPayload::None,
        smallvec![Some(target), Some(value)],
    )?;
    Ok(Arc::new(assignment))
}

fn build_expression(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    match node.construct {
        Construct::Identifier => {
            // A name in expression position reads a variable.
            let name = required_text(node)?;
            let leaf =
                GreenNode::leaf(SyntaxKind::VariableRef, node.span, GreenPayload::Name(name))?;
            Ok(Arc::new(leaf))
        }
        Construct::IntegerLiteral => {
            let text = required_text(node)?;
            let value = text.parse::<i64>().map_err(|_| BuildError::InvalidLiteral {
                text: text.to_string(),
                span: node.span,
            })?;
            let leaf = GreenNode::leaf(
                SyntaxKind::IntegerLiteral,
                node.span,
                GreenPayload::Integer(value),
            )?;
            Ok(Arc::new(leaf))
        }
        Construct::RealLiteral => {
            let text = required_text(node)?;
            let value = text.parse::<f64>().map_err(|_| BuildError::InvalidLiteral {
                text: text.to_string(),
                span: node.span,
            })?;
            let leaf =
                GreenNode::leaf(SyntaxKind::RealLiteral, node.span, GreenPayload::Real(value))?;
            Ok(Arc::new(leaf))
        }
        Construct::BooleanLiteral => {
            let text = required_text(node)?;
            let value = match &*text {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(BuildError::InvalidLiteral {
                        text: text.to_string(),
                        span: node.span,
                    })
                }
            };
            let leaf = GreenNode::leaf(
                SyntaxKind::BooleanLiteral,
                node.span,
                GreenPayload::Boolean(value),
            )?;
            Ok(Arc::new(leaf))
        }
        Construct::StringLiteral => {
            let text = required_text(node)?;
            let leaf =
                GreenNode::leaf(SyntaxKind::StringLiteral, node.span, GreenPayload::Text(text))?;
            Ok(Arc::new(leaf))
        }
        Construct::BinaryExpression => {
            let symbol = required_text(node)?;
            let op = BinaryOp::from_symbol(&symbol).ok_or_else(|| BuildError::UnknownOperator {
                text: symbol.to_string(),
                span: node.span,
            })?;
            let [left, right] = fixed_children(node, "two operands")?;
            let left = build_expression(left)?;
            let right = build_expression(right)?;
            let expr = GreenNode::new(
                SyntaxKind::Binary,
                node.span,
                GreenPayload::Operator(op),
                smallvec![Some(left), Some(right)],
            )?;
            Ok(Arc::new(expr))
        }
        Construct::CallExpression => {
            let (target, args) = match node.children.as_slice() {
                [target, args @ ..] => (target, args),
                [] => {
                    return Err(BuildError::WrongChildCount {
                        construct: node.construct,
                        expected: "a call target and arguments",
                        found: 0,
                        span: node.span,
                    })
                }
            };
            let target = build_expression(target)?;
            let mut arg_children = GreenChildren::with_capacity(args.len());
            let mut args_span = Span::point(node.span.end);
            for arg in args {
                args_span = if arg_children.is_empty() {
                    arg.span
                } else {
                    args_span.merge(arg.span)
                };
                arg_children.push(Some(build_expression(arg)?));
            }
            let arg_list = Arc::new(GreenNode::new(
                SyntaxKind::ArgumentList,
                args_span,
                GreenPayload::None,
                arg_children,
            )?);
            let call = GreenNode::new(
                SyntaxKind::Call,
                node.span,
                GreenPayload::None,
                smallvec![Some(target), Some(arg_list)],
            )?;
            Ok(Arc::new(call))
        }
        Construct::MemberAccess => {
            let member = required_text(node)?;
            let [receiver] = fixed_children(node, "a receiver")?;
            let receiver = build_expression(receiver)?;
            let access = GreenNode::new(
                SyntaxKind::MemberAccess,
                node.span,
                GreenPayload::Name(member),
                smallvec![Some(receiver)],
            )?;
            Ok(Arc::new(access))
        }
        _ => Err(BuildError::UnexpectedConstruct {
            expected: "an expression",
            found: node.construct,
            span: node.span,
        }),
    }
}

fn build_type_ref(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    expect(node, Construct::TypeName, "a type name")?;
    let name = required_text(node)?;
    let leaf = GreenNode::leaf(
        SyntaxKind::TypeRef,
        node.span,
        GreenPayload::TypeRef {
            name,
            resolved: None,
        },
    )?;
    Ok(Arc::new(leaf))
}

fn build_identifier(node: &ParseNode) -> Result<Arc<GreenNode>, BuildError> {
    expect(node, Construct::Identifier, "a name")?;
    let name = required_text(node)?;
    let leaf = GreenNode::leaf(SyntaxKind::Identifier, node.span, GreenPayload::Name(name))?;
    Ok(Arc::new(leaf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn identifier(name: &str, span: Span) -> ParseNode {
        ParseNode::new(Construct::Identifier, span).with_text(name)
    }

    fn type_name(name: &str, span: Span) -> ParseNode {
        ParseNode::new(Construct::TypeName, span).with_text(name)
    }

    fn unit(imports: Vec<ParseNode>, statements: Vec<ParseNode>) -> ParseNode {
        ParseNode::new(Construct::TranslationUnit, Span::new(0, 100)).with_children(vec![
            ParseNode::new(Construct::ImportDirectives, Span::new(0, 0)).with_children(imports),
            ParseNode::new(Construct::Statements, Span::new(0, 100)).with_children(statements),
        ])
    }

    fn variable_decl(ty: &str, name: &str, span: Span) -> ParseNode {
        ParseNode::new(Construct::VariableDeclaration, span).with_children(vec![
            type_name(ty, Span::new(span.start, span.start + 3)),
            ParseNode::new(Construct::Declarator, Span::new(span.start + 4, span.end))
                .with_children(vec![identifier(name, Span::new(span.start + 4, span.end))]),
        ])
    }

    #[test]
    fn test_build_empty_unit() {
        let Ok(green) = build(&unit(vec![], vec![])) else {
            panic!("empty unit builds");
        };
        assert_eq!(green.kind(), SyntaxKind::TranslationUnit);
        assert_eq!(green.child_count(), 2);
        let Ok(Some(imports)) = green.child_at(0) else {
            panic!("import list present");
        };
        assert_eq!(imports.kind(), SyntaxKind::ImportList);
        assert_eq!(imports.child_count(), 0);
    }

    #[test]
    fn test_build_import_paths() {
        let imports = vec![
            ParseNode::new(Construct::ImportDirective, Span::new(0, 10)).with_text("geometry"),
            ParseNode::new(Construct::ImportDirective, Span::new(11, 30))
                .with_text("collections.sets"),
        ];
        let Ok(green) = build(&unit(imports, vec![])) else {
            panic!("unit with imports builds");
        };
        let Ok(Some(list)) = green.child_at(0) else {
            panic!("import list present");
        };
        let paths: Vec<&str> = list
            .present_children()
            .filter_map(|import| import.import_path().map(AsRef::as_ref))
            .collect();
        assert_eq!(paths, ["geometry", "collections.sets"]);
    }

    #[test]
    fn test_build_variable_declaration() {
        let Ok(green) = build(&unit(vec![], vec![variable_decl("int", "x", Span::new(0, 9))]))
        else {
            panic!("declaration builds");
        };
        let Ok(Some(body)) = green.child_at(1) else {
            panic!("body present");
        };
        let Ok(Some(decl)) = body.child_at(0) else {
            panic!("statement present");
        };
        assert_eq!(decl.kind(), SyntaxKind::VariableDecl);
        let Ok(Some(ty)) = decl.child_at(0) else {
            panic!("type present");
        };
        assert_eq!(ty.type_name().map(AsRef::as_ref), Some("int"));
        assert_eq!(ty.resolved_type(), None);
    }

    #[test]
    fn test_if_without_else_leaves_empty_slot() {
        let if_node = ParseNode::new(Construct::IfSelection, Span::new(0, 30)).with_children(vec![
            ParseNode::new(Construct::BooleanLiteral, Span::new(3, 7)).with_text("true"),
            ParseNode::new(Construct::Statements, Span::new(9, 30)),
        ]);
        let Ok(green) = build(&unit(vec![], vec![if_node])) else {
            panic!("if builds");
        };
        let Ok(Some(body)) = green.child_at(1) else {
            panic!("body present");
        };
        let Ok(Some(flow)) = body.child_at(0) else {
            panic!("flow present");
        };
        assert_eq!(flow.kind(), SyntaxKind::SelectiveFlow);
        assert_eq!(flow.flow_kind(), Some(FlowKind::If));
        assert_eq!(flow.child_count(), 3);
        assert!(matches!(flow.child_at(2), Ok(None)));
    }

    #[test]
    fn test_unknown_statement_rejected() {
        let bad = ParseNode::new(Construct::GenericParameter, Span::new(0, 5)).with_text("T");
        let result = build(&unit(vec![], vec![bad]));
        assert!(matches!(
            result,
            Err(BuildError::UnexpectedConstruct {
                found: Construct::GenericParameter,
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_integer_rejected() {
        let decl = ParseNode::new(Construct::VariableDeclaration, Span::new(0, 14)).with_children(
            vec![
                type_name("int", Span::new(0, 3)),
                ParseNode::new(Construct::Declarator, Span::new(4, 14)).with_children(vec![
                    identifier("x", Span::new(4, 5)),
                    ParseNode::new(Construct::IntegerLiteral, Span::new(8, 14)).with_text("12q4"),
                ]),
            ],
        );
        let result = build(&unit(vec![], vec![decl]));
        assert!(matches!(result, Err(BuildError::InvalidLiteral { .. })));
    }

    #[test]
    fn test_missing_text_rejected() {
        let import = ParseNode::new(Construct::ImportDirective, Span::new(0, 10));
        let result = build(&unit(vec![import], vec![]));
        assert!(matches!(result, Err(BuildError::MissingText { .. })));
    }

    #[test]
    fn test_wrong_shape_rejected() {
        let lopsided = ParseNode::new(Construct::TranslationUnit, Span::new(0, 10))
            .with_children(vec![ParseNode::new(
                Construct::ImportDirectives,
                Span::new(0, 0),
            )]);
        assert!(matches!(
            build(&lopsided),
            Err(BuildError::WrongChildCount { .. })
        ));
    }

    #[test]
    fn test_method_declaration_optional_generics() {
        let method = ParseNode::new(Construct::MethodDeclaration, Span::new(0, 50)).with_children(
            vec![
                type_name("int", Span::new(0, 3)),
                identifier("area", Span::new(4, 8)),
                ParseNode::new(Construct::Parameters, Span::new(8, 20)).with_children(vec![
                    ParseNode::new(Construct::Parameter, Span::new(9, 14)).with_children(vec![
                        type_name("int", Span::new(9, 12)),
                        identifier("n", Span::new(13, 14)),
                    ]),
                ]),
                ParseNode::new(Construct::Statements, Span::new(21, 50)),
            ],
        );
        let Ok(green) = build(&unit(vec![], vec![method])) else {
            panic!("method builds");
        };
        let Ok(Some(body)) = green.child_at(1) else {
            panic!("body present");
        };
        let Ok(Some(decl)) = body.child_at(0) else {
            panic!("method present");
        };
        assert_eq!(decl.kind(), SyntaxKind::MethodDecl);
        assert_eq!(decl.child_count(), 5);
        // Absent generic parameters map to an explicit empty slot.
        assert!(matches!(decl.child_at(3), Ok(None)));
    }

    #[test]
    fn test_call_with_arguments() {
        let call = ParseNode::new(Construct::CallExpression, Span::new(0, 12)).with_children(vec![
            identifier("print", Span::new(0, 5)),
            ParseNode::new(Construct::IntegerLiteral, Span::new(6, 7)).with_text("1"),
            ParseNode::new(Construct::IntegerLiteral, Span::new(9, 10)).with_text("2"),
        ]);
        let Ok(green) = build(&unit(vec![], vec![call])) else {
            panic!("call builds");
        };
        let Ok(Some(body)) = green.child_at(1) else {
            panic!("body present");
        };
        let Ok(Some(call)) = body.child_at(0) else {
            panic!("call present");
        };
        assert_eq!(call.kind(), SyntaxKind::Call);
        let Ok(Some(args)) = call.child_at(1) else {
            panic!("argument list present");
        };
        assert_eq!(args.kind(), SyntaxKind::ArgumentList);
        assert_eq!(args.child_count(), 2);
    }
}
