//! Source-level syntax for weft templates.
//!
//! This crate holds everything the compiler passes share about template
//! source: the checked AST ([`ast`]), byte spans ([`span`]), the
//! per-template scope table ([`scope`]), and the [`SyntaxError`] type that
//! every pass reports user mistakes with.

pub mod ast;
pub mod entity;
pub mod error;
pub mod scope;
pub mod span;

pub use error::SyntaxError;
pub use scope::{BlockSymbol, ScopeTable};
pub use span::{SourceSlice, Span};
