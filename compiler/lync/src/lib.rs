//! Lyn compiler driver.
//!
//! Ties the front-end together: parse-tree ingestion, the namespace
//! loader, the per-file semantic pipeline run in parallel with phase
//! barriers, and result aggregation.
//!
//! ```text
//! FileInput (external parse tree)
//!     │ build()                 ── per file, pooled
//!     ▼
//! SourceUnit
//!     │ scope_collection()      ── per file, pooled  ┐ barrier
//!     ▼                                              ┘
//! SourceUnit (scoped)
//!     │ analysis()              ── per file, pooled  ┐ barrier
//!     ▼                                              ┘
//! CompilationResult { status, diagnostics, units }
//! ```

mod compile;
mod config;
mod emit;

pub use compile::{compile, CompilationResult, CompilationStatus, FileInput};
pub use config::{CompilerConfig, TargetStage};
pub use emit::render_unit;

/// Install a tracing subscriber reading `LYN_LOG` from the environment.
///
/// Intended for binaries and ad-hoc debugging; calling it twice is
/// harmless.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LYN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init();
}
