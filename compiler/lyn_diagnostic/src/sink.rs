//! Concurrent append-only diagnostic collection.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Diagnostic, Severity};

/// An append-only, order-irrelevant multiset of diagnostics.
///
/// Cloning shares the underlying storage, so one sink can be handed to
/// every per-file task. Tasks only append; nothing is removed, and no
/// insertion order is guaranteed.
#[derive(Clone, Default)]
pub struct DiagnosticSink {
    inner: Arc<Mutex<Vec<Diagnostic>>>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        DiagnosticSink::default()
    }

    /// Append one diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.inner.lock().push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Whether any collected diagnostic is error severity or above.
    pub fn has_errors(&self) -> bool {
        self.inner
            .lock()
            .iter()
            .any(|diagnostic| diagnostic.severity >= Severity::Error)
    }

    /// The highest severity collected so far.
    pub fn max_severity(&self) -> Option<Severity> {
        self.inner
            .lock()
            .iter()
            .map(|diagnostic| diagnostic.severity)
            .max()
    }

    /// A copy of everything collected so far, in no particular order.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.inner.lock().clone()
    }
}

impl std::fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticSink")
            .field("len", &self.len())
            .finish()
    }
}
