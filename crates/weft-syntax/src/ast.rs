//! AST node types for template content.
//!
//! The AST represents a parsed template after name resolution: every
//! variable head is already classified (`this`, `@arg`, local, or free),
//! curly invocations are split into append (`{{...}}`) and block
//! (`{{#...}}`) forms, and argument lists carry positional and named parts
//! separately. Normalization consumes this tree and produces the typed
//! mid-level IR in `weft-compiler`.

use serde::{Deserialize, Serialize};

use crate::span::{SourceSlice, Span};

/// A whole template: top-level content plus the span of the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub body: Vec<ContentNode>,
    pub span: Span,
}

/// A single node in a content body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContentNode {
    /// Plain text content (including whitespace).
    Text(TextNode),
    /// A template comment: `{{! ... }}`. Produces no output.
    Comment(CommentNode),
    /// An append invocation: `{{expr ...}}` or `{{{expr ...}}}`.
    Append(AppendContent),
    /// A block invocation: `{{#expr ...}} ... {{/expr}}`.
    Block(InvokeBlock),
}

impl ContentNode {
    pub fn span(&self) -> Span {
        match self {
            ContentNode::Text(text) => text.span,
            ContentNode::Comment(comment) => comment.span,
            ContentNode::Append(append) => append.span,
            ContentNode::Block(block) => block.span,
        }
    }
}

/// Literal text between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub chars: String,
    pub span: Span,
}

/// A `{{! ... }}` comment. Kept in the AST for tooling; dropped by
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    pub text: String,
    pub span: Span,
}

/// An append invocation: `{{callee args}}`.
///
/// `trusting` is true for triple-curly form (`{{{...}}}`), which emits
/// unescaped HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendContent {
    pub callee: ExpressionNode,
    pub args: Args,
    pub trusting: bool,
    pub span: Span,
}

/// A block invocation: `{{#callee args}}...{{/callee}}`.
///
/// The bodies live in `blocks`: the main body is the block named
/// `"default"`, an `{{else}}` clause is the block named `"else"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeBlock {
    pub callee: ExpressionNode,
    pub args: Args,
    pub blocks: NamedBlocks,
    pub span: Span,
}

// ── Expressions ────────────────────────────────────────────────────────

/// An expression in argument or callee position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionNode {
    /// A literal value: `"str"`, `1.5`, `true`, `null`, `undefined`.
    Literal(LiteralNode),
    /// A (possibly dotted) variable path: `foo`, `this.bar`, `@arg.baz`.
    Path(PathExpression),
    /// A parenthesized subexpression call: `(helper args)`.
    Call(Box<CallExpression>),
}

impl ExpressionNode {
    pub fn span(&self) -> Span {
        match self {
            ExpressionNode::Literal(lit) => lit.span,
            ExpressionNode::Path(path) => path.span,
            ExpressionNode::Call(call) => call.span,
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralValue> {
        match self {
            ExpressionNode::Literal(lit) => Some(&lit.value),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&str> {
        match self.as_literal() {
            Some(LiteralValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// The bare free-variable name this expression is, if it is one.
    ///
    /// Only a path with a free head and no tail qualifies: `foo` does,
    /// `foo.bar`, `this.foo`, and `@foo` do not.
    pub fn as_free_variable(&self) -> Option<&str> {
        match self {
            ExpressionNode::Path(path) if path.tail.is_empty() => match &path.head {
                VariableReference::Free { name } => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A literal with its source span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralNode {
    pub value: LiteralValue,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
}

/// A variable path: a resolved head plus zero or more property segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathExpression {
    pub head: VariableReference,
    pub tail: Vec<SourceSlice>,
    pub span: Span,
}

/// The resolved head of a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariableReference {
    /// `this`.
    This,
    /// A named argument reference: `@name` (name stored with the `@`).
    Arg { name: String },
    /// A block-param or other in-scope local.
    Local { name: String },
    /// An unresolved bare name, subject to keyword and helper lookup.
    Free { name: String },
}

/// A parenthesized call: `(callee positional... named...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub callee: ExpressionNode,
    pub args: Args,
    pub span: Span,
}

// ── Arguments ──────────────────────────────────────────────────────────

/// The full argument list of an invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Args {
    pub positional: PositionalArguments,
    pub named: NamedArguments,
    pub span: Span,
}

impl Args {
    pub fn empty() -> Self {
        Args {
            positional: PositionalArguments::empty(),
            named: NamedArguments::empty(),
            span: Span::SYNTHETIC,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Positional arguments in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionalArguments {
    pub exprs: Vec<ExpressionNode>,
    pub span: Span,
}

impl PositionalArguments {
    pub fn empty() -> Self {
        PositionalArguments {
            exprs: Vec::new(),
            span: Span::SYNTHETIC,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn nth(&self, n: usize) -> Option<&ExpressionNode> {
        self.exprs.get(n)
    }
}

/// Named (`key=value`) arguments in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArguments {
    pub entries: Vec<NamedArgument>,
    pub span: Span,
}

impl NamedArguments {
    pub fn empty() -> Self {
        NamedArguments {
            entries: Vec::new(),
            span: Span::SYNTHETIC,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&ExpressionNode> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_str() == name)
            .map(|entry| &entry.value)
    }
}

/// One `key=value` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArgument {
    pub name: SourceSlice,
    pub value: ExpressionNode,
}

// ── Blocks ─────────────────────────────────────────────────────────────

/// The bodies attached to a block invocation, keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedBlocks {
    pub blocks: Vec<NamedBlock>,
    pub span: Span,
}

impl NamedBlocks {
    pub fn get(&self, name: &str) -> Option<&NamedBlock> {
        self.blocks.iter().find(|block| block.name.as_str() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// One named body: `{{#x as |params|}}...` is the `"default"` block,
/// `{{else}}...` the `"else"` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedBlock {
    pub name: SourceSlice,
    pub params: Vec<SourceSlice>,
    pub body: Vec<ContentNode>,
    pub span: Span,
}
