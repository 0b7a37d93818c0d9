//! The weft template compiler's normalization stage.
//!
//! [`normalize`] lowers a parsed template ([`weft_syntax::ast::Template`])
//! into the typed mid-level IR in [`mir`], dispatching reserved keyword
//! names through position-scoped tables ([`normalize::keywords`]) and
//! reporting every user mistake as a [`weft_syntax::SyntaxError`] result.
//! The bytecode encoder consumes the resulting [`mir::NormalizedTemplate`].

pub mod mir;
pub mod normalize;
pub mod printer;

pub use normalize::{normalize, NormalizeOptions, NormalizeState};

#[cfg(test)]
pub(crate) mod test_helpers;
