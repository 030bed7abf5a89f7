//! Diagnostics for the Lyn compiler.
//!
//! Defines the closed set of [`DiagnosticCode`]s, the ordered
//! [`Severity`] scale, the [`Diagnostic`] record itself, and the
//! [`DiagnosticSink`] that analysis stages append into concurrently.
//!
//! Diagnostics accumulate as an unordered multiset: stages only ever
//! append, nothing is removed, and no insertion order is guaranteed or
//! relied upon. Tests compare diagnostic sets keyed by
//! (code, file, span), never sequences.

mod code;
mod diagnostic;
mod render;
mod sink;

pub use code::DiagnosticCode;
pub use diagnostic::{Diagnostic, Severity};
pub use render::render;
pub use sink::DiagnosticSink;
