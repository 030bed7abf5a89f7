//! Compilation orchestration.
//!
//! One task per file, run on the rayon worker pool (bounded by available
//! cores). The run proceeds in phases with a full barrier between them:
//! every file finishes ingestion before scope collection starts, and
//! every file finishes scope collection before any file enters analysis,
//! because the analysis stages read namespace state that must be globally
//! complete first.
//!
//! Failure isolation: anything that ends one file's pipeline (a parse
//! tree violating its contract, a stage error, even a panic inside the
//! task) becomes a single fatal diagnostic for that file, and every
//! other file runs to completion.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info_span};

use lyn_diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink};
use lyn_sema::{
    analysis, requested_modules, scope_collection, NamespaceLoader, SourceUnit, StageError,
};
use lyn_syntax::{build, ParseNode};

use crate::{CompilerConfig, TargetStage};

/// One file handed to the compiler: identity, source text, and the parse
/// tree the external parser produced for it.
#[derive(Clone, Debug)]
pub struct FileInput {
    pub file: Arc<str>,
    pub source: Arc<str>,
    pub parse: ParseNode,
}

impl FileInput {
    pub fn new(
        file: impl Into<Arc<str>>,
        source: impl Into<Arc<str>>,
        parse: ParseNode,
    ) -> Self {
        FileInput {
            file: file.into(),
            source: source.into(),
            parse,
        }
    }
}

/// Overall outcome of a run.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CompilationStatus {
    Success,
    Failure,
}

/// Everything a run produces: decorated units plus the unordered
/// diagnostic collection.
#[derive(Clone, Debug)]
pub struct CompilationResult {
    pub status: CompilationStatus,
    pub diagnostics: Vec<Diagnostic>,
    pub units: Vec<SourceUnit>,
}

impl CompilationResult {
    pub fn succeeded(&self) -> bool {
        self.status == CompilationStatus::Success
    }
}

/// Compile a set of files against a namespace loader.
pub fn compile(
    config: &CompilerConfig,
    inputs: Vec<FileInput>,
    loader: &dyn NamespaceLoader,
) -> CompilationResult {
    let span = info_span!("compile", files = inputs.len());
    let _guard = span.entered();

    let sink = DiagnosticSink::new();
    let parallel = !config.force_single_threaded;

    // Ingestion: convert every parse tree to a green tree.
    let units = execute(parallel, inputs, |input| ingest(&input, &sink));
    let units: Vec<SourceUnit> = units.into_iter().flatten().collect();

    // The namespace table is built once, single-threaded, before any
    // semantic task starts; afterwards it is shared read-only.
    let modules = requested_modules(&units);
    let table = Arc::new(loader.load(&modules));
    debug!(modules = modules.len(), loaded = table.len(), "namespaces loaded");

    // Phase one: scope collection. The collect is the barrier.
    let collected = execute(parallel, units, |unit| {
        isolated(&unit, &sink, |unit| scope_collection(unit, &table))
    });
    let collected: Vec<SourceUnit> = collected.into_iter().flatten().collect();

    // Phase two: analysis, unless the run stops early.
    let finished = if config.target_stage == TargetStage::ScopeCollection {
        collected
    } else {
        let analyzed = execute(parallel, collected, |unit| {
            isolated(&unit, &sink, |unit| Ok(analysis(unit, &sink)))
        });
        analyzed.into_iter().flatten().collect()
    };

    let diagnostics = sink.snapshot();
    let status = if diagnostics.iter().any(Diagnostic::is_error) {
        CompilationStatus::Failure
    } else {
        CompilationStatus::Success
    };
    CompilationResult {
        status,
        diagnostics,
        units: finished,
    }
}

/// Run one task per item, on the pool or inline. Collecting waits for
/// every task: each call is a full barrier.
fn execute<I, T, F>(parallel: bool, items: Vec<I>, task: F) -> Vec<T>
where
    I: Send,
    T: Send,
    F: Fn(I) -> T + Sync + Send,
{
    if parallel {
        items.into_par_iter().map(task).collect()
    } else {
        items.into_iter().map(task).collect()
    }
}

/// Convert one parse tree, reporting contract violations against the file.
fn ingest(input: &FileInput, sink: &DiagnosticSink) -> Option<SourceUnit> {
    match build(&input.parse) {
        Ok(root) => Some(SourceUnit::new(
            Arc::clone(&input.file),
            Arc::clone(&input.source),
            root,
        )),
        Err(error) => {
            sink.emit(
                Diagnostic::unanchored(DiagnosticCode::MalformedTree, Arc::clone(&input.file))
                    .with_detail(error.to_string()),
            );
            None
        }
    }
}

/// Run one file's phase inside a task boundary.
///
/// A stage error or a panic becomes one fatal diagnostic for this file;
/// the file drops out of later phases and sibling files are unaffected.
fn isolated<F>(unit: &SourceUnit, sink: &DiagnosticSink, stage: F) -> Option<SourceUnit>
where
    F: FnOnce(&SourceUnit) -> Result<SourceUnit, StageError>,
{
    let outcome = catch_unwind(AssertUnwindSafe(|| stage(unit)));
    match outcome {
        Ok(Ok(next)) => Some(next),
        Ok(Err(error)) => {
            let code = match &error {
                StageError::UnknownModule { .. } => DiagnosticCode::InternalCompilerError,
                StageError::MissingChild { .. } | StageError::Tree(_) => {
                    DiagnosticCode::MalformedTree
                }
            };
            sink.emit(
                Diagnostic::unanchored(code, Arc::clone(unit.file()))
                    .with_detail(error.to_string()),
            );
            None
        }
        Err(_) => {
            sink.emit(
                Diagnostic::unanchored(
                    DiagnosticCode::InternalCompilerError,
                    Arc::clone(unit.file()),
                )
                .with_detail("file task terminated unexpectedly"),
            );
            None
        }
    }
}
