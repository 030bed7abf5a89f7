//! The per-file value threaded through the pipeline.

use std::sync::Arc;

use lyn_syntax::GreenNode;

/// One file's analysis state: identity, source text for rendering, and
/// the current tree root.
///
/// Units are replaced wholesale as they pass through stages, never
/// mutated in place.
#[derive(Clone, Debug)]
pub struct SourceUnit {
    file: Arc<str>,
    source: Arc<str>,
    root: Arc<GreenNode>,
}

impl SourceUnit {
    pub fn new(
        file: impl Into<Arc<str>>,
        source: impl Into<Arc<str>>,
        root: Arc<GreenNode>,
    ) -> Self {
        SourceUnit {
            file: file.into(),
            source: source.into(),
            root,
        }
    }

    pub fn file(&self) -> &Arc<str> {
        &self.file
    }

    pub fn source(&self) -> &Arc<str> {
        &self.source
    }

    pub fn root(&self) -> &Arc<GreenNode> {
        &self.root
    }

    /// The same file with a new tree root.
    #[must_use]
    pub fn with_root(&self, root: Arc<GreenNode>) -> SourceUnit {
        SourceUnit {
            file: Arc::clone(&self.file),
            source: Arc::clone(&self.source),
            root,
        }
    }
}
