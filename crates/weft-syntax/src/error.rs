//! Syntax errors reported against template source.

use thiserror::Error;

use crate::span::Span;

/// A user-facing error produced while validating template syntax.
///
/// Normalization never panics on bad input: every invalid construct is
/// reported as a `SyntaxError` carrying the span of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{span}] {message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        SyntaxError {
            message: message.into(),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SyntaxError::new("debugger does not take any named arguments", Span::new(2, 14));
        assert_eq!(
            err.to_string(),
            "[2..14] debugger does not take any named arguments"
        );
    }

    #[test]
    fn test_error_display_synthetic_span() {
        let err = SyntaxError::new("oops", Span::SYNTHETIC);
        assert_eq!(err.to_string(), "[synthetic] oops");
    }
}
