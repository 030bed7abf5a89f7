//! Errors that abort a single file's pipeline.

use std::sync::Arc;

use thiserror::Error;

use lyn_syntax::{SyntaxKind, TreeError};

/// A condition that ends one file's analysis.
///
/// These never unwind past the file task: the driver converts them into a
/// single fatal diagnostic for the affected file and lets every other
/// file finish.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageError {
    #[error("unknown module `{module}`")]
    UnknownModule { module: Arc<str> },
    #[error("{kind:?} is missing required child slot {slot}")]
    MissingChild { kind: SyntaxKind, slot: usize },
    #[error(transparent)]
    Tree(#[from] TreeError),
}
