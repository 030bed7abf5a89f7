//! End-to-end pipeline tests over programmatically built parse trees.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;

use lyn_diagnostic::{Diagnostic, DiagnosticCode, Severity};
use lyn_sema::StaticLoader;
use lyn_syntax::{Construct, ParseNode, Span};
use lyn_types::{BindingInfo, Namespace, Type};
use lync::{compile, CompilationStatus, CompilerConfig, FileInput};

fn translation_unit(imports: Vec<ParseNode>, statements: Vec<ParseNode>) -> ParseNode {
    ParseNode::new(Construct::TranslationUnit, Span::new(0, 200)).with_children(vec![
        ParseNode::new(Construct::ImportDirectives, Span::new(0, 10)).with_children(imports),
        ParseNode::new(Construct::Statements, Span::new(0, 200)).with_children(statements),
    ])
}

fn import(module: &str) -> ParseNode {
    ParseNode::new(Construct::ImportDirective, Span::new(0, 10)).with_text(module)
}

fn identifier(name: &str, span: Span) -> ParseNode {
    ParseNode::new(Construct::Identifier, span).with_text(name)
}

fn type_name(name: &str, span: Span) -> ParseNode {
    ParseNode::new(Construct::TypeName, span).with_text(name)
}

fn integer(text: &str, span: Span) -> ParseNode {
    ParseNode::new(Construct::IntegerLiteral, span).with_text(text)
}

fn variable_decl(ty: &str, name: &str, span: Span) -> ParseNode {
    ParseNode::new(Construct::VariableDeclaration, span).with_children(vec![
        type_name(ty, Span::new(span.start, span.start + 3)),
        ParseNode::new(Construct::Declarator, Span::new(span.start + 4, span.end))
            .with_children(vec![identifier(name, Span::new(span.start + 4, span.end))]),
    ])
}

fn assignment(target: ParseNode, value: ParseNode, span: Span) -> ParseNode {
    ParseNode::new(Construct::Assignment, span).with_children(vec![target, value])
}

fn parameter(ty: &str, name: &str, span: Span) -> ParseNode {
    ParseNode::new(Construct::Parameter, span).with_children(vec![
        type_name(ty, Span::new(span.start, span.start + 3)),
        identifier(name, Span::new(span.start + 4, span.end)),
    ])
}

fn method(
    ret: &str,
    name: &str,
    params: Vec<ParseNode>,
    body: Vec<ParseNode>,
    span: Span,
) -> ParseNode {
    ParseNode::new(Construct::MethodDeclaration, span).with_children(vec![
        type_name(ret, Span::new(span.start, span.start + 3)),
        identifier(name, Span::new(span.start + 4, span.start + 5)),
        ParseNode::new(
            Construct::Parameters,
            Span::new(span.start + 6, span.start + 20),
        )
        .with_children(params),
        ParseNode::new(Construct::Statements, Span::new(span.start + 21, span.end))
            .with_children(body),
    ])
}

fn nested_block(statements: Vec<ParseNode>, span: Span) -> ParseNode {
    ParseNode::new(Construct::Statements, span).with_children(statements)
}

fn input(file: &str, parse: ParseNode) -> FileInput {
    FileInput::new(file, "", parse)
}

fn diagnostic_keys(diagnostics: &[Diagnostic]) -> FxHashSet<(DiagnosticCode, Arc<str>, Span)> {
    diagnostics.iter().map(Diagnostic::key).collect()
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<DiagnosticCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn test_use_before_declaration_fails_compilation() {
    // int x declared after a read of x in the same block.
    let parse = translation_unit(
        vec![],
        vec![
            assignment(
                identifier("x", Span::new(0, 1)),
                integer("1", Span::new(4, 5)),
                Span::new(0, 5),
            ),
            variable_decl("int", "x", Span::new(6, 11)),
        ],
    );
    let result = compile(
        &CompilerConfig::new(),
        vec![input("a.lyn", parse)],
        &StaticLoader::new(),
    );

    assert_eq!(codes(&result.diagnostics), vec![DiagnosticCode::UseBeforeDeclaration]);
    assert_eq!(result.status, CompilationStatus::Failure);
    assert!(!result.succeeded());
}

#[test]
fn test_unused_import_succeeds() {
    // File B imports module A but uses none of its symbols.
    let mut exported = Namespace::new("alpha");
    exported.insert(
        Arc::from("Widget"),
        BindingInfo::imported(Type::class("Widget", "alpha")),
    );
    let loader = StaticLoader::new().with_namespace(exported);

    let parse = translation_unit(vec![import("alpha")], vec![]);
    let result = compile(&CompilerConfig::new(), vec![input("b.lyn", parse)], &loader);

    assert_eq!(result.diagnostics, vec![]);
    assert_eq!(result.status, CompilationStatus::Success);
    assert_eq!(result.units.len(), 1);
}

#[test]
fn test_parameter_shadowed_by_nested_local_warns() {
    // A parameter named n and a nested block redeclaring local n.
    let parse = translation_unit(
        vec![],
        vec![method(
            "int",
            "f",
            vec![parameter("int", "n", Span::new(10, 15))],
            vec![nested_block(
                vec![variable_decl("int", "n", Span::new(30, 35))],
                Span::new(25, 40),
            )],
            Span::new(0, 50),
        )],
    );
    let result = compile(
        &CompilerConfig::new(),
        vec![input("a.lyn", parse)],
        &StaticLoader::new(),
    );

    assert_eq!(codes(&result.diagnostics), vec![DiagnosticCode::HidesOtherSymbol]);
    assert_eq!(result.diagnostics[0].severity, Severity::Warning);
    // Warnings alone do not fail the run.
    assert_eq!(result.status, CompilationStatus::Success);
}

#[test]
fn test_duplicate_parameters_are_fatal() {
    // A method with two parameters both named n.
    let parse = translation_unit(
        vec![],
        vec![method(
            "int",
            "f",
            vec![
                parameter("int", "n", Span::new(10, 15)),
                parameter("int", "n", Span::new(17, 22)),
            ],
            vec![assignment(
                identifier("n", Span::new(30, 31)),
                integer("1", Span::new(34, 35)),
                Span::new(30, 35),
            )],
            Span::new(0, 50),
        )],
    );
    let result = compile(
        &CompilerConfig::new(),
        vec![input("a.lyn", parse)],
        &StaticLoader::new(),
    );

    assert_eq!(
        codes(&result.diagnostics),
        vec![DiagnosticCode::InternalCompilerError]
    );
    assert_eq!(result.diagnostics[0].severity, Severity::Fatal);
    assert_eq!(result.status, CompilationStatus::Failure);
}

#[test]
fn test_cross_file_diagnostics_are_scheduling_independent() {
    // Three files with one expected diagnostic each, plus a clean one.
    let files = || {
        vec![
            input(
                "one.lyn",
                translation_unit(
                    vec![],
                    vec![assignment(
                        identifier("ghost", Span::new(0, 5)),
                        integer("1", Span::new(8, 9)),
                        Span::new(0, 9),
                    )],
                ),
            ),
            input(
                "two.lyn",
                translation_unit(
                    vec![],
                    vec![
                        assignment(
                            identifier("y", Span::new(0, 1)),
                            integer("2", Span::new(4, 5)),
                            Span::new(0, 5),
                        ),
                        variable_decl("int", "y", Span::new(6, 11)),
                    ],
                ),
            ),
            input(
                "three.lyn",
                translation_unit(vec![], vec![variable_decl("int", "ok", Span::new(0, 6))]),
            ),
            input(
                "four.lyn",
                translation_unit(
                    vec![],
                    vec![variable_decl("Ghost", "g", Span::new(0, 7))],
                ),
            ),
        ]
    };

    let parallel = compile(&CompilerConfig::new(), files(), &StaticLoader::new());
    let sequential = compile(
        &CompilerConfig::new().single_threaded(),
        files(),
        &StaticLoader::new(),
    );

    // Same multiset of diagnostics regardless of interleaving; order is
    // never part of the contract.
    assert_eq!(
        diagnostic_keys(&parallel.diagnostics),
        diagnostic_keys(&sequential.diagnostics)
    );
    assert_eq!(parallel.diagnostics.len(), sequential.diagnostics.len());
    assert_eq!(parallel.status, sequential.status);
    assert_eq!(parallel.status, CompilationStatus::Failure);
    assert_eq!(parallel.units.len(), 4);

    let expected: FxHashSet<(DiagnosticCode, Arc<str>, Span)> = [
        (
            DiagnosticCode::NoSuchSymbol,
            Arc::from("one.lyn"),
            Span::new(0, 5),
        ),
        (
            DiagnosticCode::UseBeforeDeclaration,
            Arc::from("two.lyn"),
            Span::new(0, 1),
        ),
        (
            DiagnosticCode::UnresolvedType,
            Arc::from("four.lyn"),
            Span::new(0, 3),
        ),
    ]
    .into_iter()
    .collect();
    assert_eq!(diagnostic_keys(&parallel.diagnostics), expected);
}

#[test]
fn test_malformed_file_does_not_stop_siblings() {
    // A translation unit missing its statements child violates the
    // parse-tree contract.
    let malformed = ParseNode::new(Construct::TranslationUnit, Span::new(0, 10)).with_children(
        vec![ParseNode::new(Construct::ImportDirectives, Span::new(0, 0))],
    );
    let healthy = translation_unit(vec![], vec![variable_decl("int", "x", Span::new(0, 5))]);

    let result = compile(
        &CompilerConfig::new(),
        vec![input("bad.lyn", malformed), input("good.lyn", healthy)],
        &StaticLoader::new(),
    );

    assert_eq!(codes(&result.diagnostics), vec![DiagnosticCode::MalformedTree]);
    assert_eq!(result.diagnostics[0].severity, Severity::Fatal);
    assert_eq!(&*result.diagnostics[0].file, "bad.lyn");
    assert_eq!(result.status, CompilationStatus::Failure);
    // The healthy sibling ran to completion.
    assert_eq!(result.units.len(), 1);
    assert_eq!(&**result.units[0].file(), "good.lyn");
}

#[test]
fn test_unknown_module_is_isolated_to_its_file() {
    let importer = translation_unit(vec![import("missing")], vec![]);
    let healthy = translation_unit(vec![], vec![variable_decl("int", "x", Span::new(0, 5))]);

    let result = compile(
        &CompilerConfig::new(),
        vec![input("imp.lyn", importer), input("good.lyn", healthy)],
        &StaticLoader::new(),
    );

    assert_eq!(
        codes(&result.diagnostics),
        vec![DiagnosticCode::InternalCompilerError]
    );
    assert_eq!(&*result.diagnostics[0].file, "imp.lyn");
    assert_eq!(result.status, CompilationStatus::Failure);
    assert_eq!(result.units.len(), 1);
}

#[test]
fn test_scope_collection_target_skips_analysis() {
    // A file full of analysis-stage errors is clean when the run stops
    // after scope collection.
    let parse = translation_unit(
        vec![],
        vec![assignment(
            identifier("ghost", Span::new(0, 5)),
            integer("1", Span::new(8, 9)),
            Span::new(0, 9),
        )],
    );
    let result = compile(
        &CompilerConfig::new().stop_after(lync::TargetStage::ScopeCollection),
        vec![input("a.lyn", parse)],
        &StaticLoader::new(),
    );
    assert_eq!(result.diagnostics, vec![]);
    assert_eq!(result.status, CompilationStatus::Success);
}

#[test]
fn test_type_binding_decorates_output_units() {
    let parse = translation_unit(vec![], vec![variable_decl("int", "x", Span::new(0, 9))]);
    let result = compile(
        &CompilerConfig::new(),
        vec![input("a.lyn", parse)],
        &StaticLoader::new(),
    );
    assert_eq!(result.status, CompilationStatus::Success);

    let rendered = lync::render_unit(&result.units[0]);
    assert!(rendered.contains("int x;"));
}
