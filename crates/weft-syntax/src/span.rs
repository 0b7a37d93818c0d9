//! Byte spans and source slices.
//!
//! Every syntax node carries a [`Span`] pointing back into the template
//! source. Nodes minted by the compiler itself (implicit `undefined`
//! arguments, generated cursor ids) carry [`Span::SYNTHETIC`], which
//! serializes like any other span but never matches real source text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open byte range `start..end` into the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Marker span for nodes that have no source text of their own.
    pub const SYNTHETIC: Span = Span {
        start: u32::MAX,
        end: u32::MAX,
    };

    pub fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    pub fn is_synthetic(&self) -> bool {
        *self == Span::SYNTHETIC
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthetic() {
            write!(f, "synthetic")
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

/// A piece of literal source text together with the span it was read from.
///
/// Identifier-like leaves (path segments, argument names, block names) keep
/// their characters here so later passes never re-slice the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSlice {
    pub span: Span,
    pub chars: String,
}

impl SourceSlice {
    pub fn new(chars: impl Into<String>, span: Span) -> Self {
        SourceSlice {
            span,
            chars: chars.into(),
        }
    }

    /// A slice invented by the compiler, not present in the source.
    pub fn synthetic(chars: impl Into<String>) -> Self {
        SourceSlice {
            span: Span::SYNTHETIC,
            chars: chars.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }
}

impl fmt::Display for SourceSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(4, 17).to_string(), "4..17");
        assert_eq!(Span::SYNTHETIC.to_string(), "synthetic");
    }

    #[test]
    fn test_synthetic_slice() {
        let slice = SourceSlice::synthetic("undefined");
        assert!(slice.span.is_synthetic());
        assert_eq!(slice.as_str(), "undefined");
    }

    #[test]
    fn test_span_serde_round_trip() {
        let span = Span::new(3, 9);
        let json = serde_json::to_string(&span).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(span, back);
    }
}
