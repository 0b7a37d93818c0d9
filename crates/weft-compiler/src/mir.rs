//! Typed mid-level IR (MIR).
//!
//! MIR is what normalization produces and the bytecode encoder consumes. The
//! statement and expression sets are closed: every recognized keyword lowers
//! to exactly one of these shapes, and the generic fallthrough paths cover
//! the rest. Leaf value types (literals, paths, slices) are shared with the
//! AST — they pass through normalization unchanged.

use serde::{Deserialize, Serialize};

use weft_syntax::ast::{LiteralNode, PathExpression};
use weft_syntax::scope::{BlockSymbol, ScopeTable};
use weft_syntax::span::{SourceSlice, Span};

/// A fully normalized template: the lowered body plus the final scope table
/// (allocated block symbols and the has-eval flag) the encoder reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTemplate {
    pub body: Vec<Statement>,
    pub scope: ScopeTable,
    pub span: Span,
}

// ── Statements ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    AppendTextNode(AppendTextNode),
    AppendTrustedHtml(AppendTrustedHtml),
    Yield(Yield),
    Partial(Partial),
    Debugger(Debugger),
    InvokeComponent(InvokeComponent),
    If(If),
    Each(Each),
    With(With),
    Let(Let),
    InElement(InElement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::AppendTextNode(s) => s.span,
            Statement::AppendTrustedHtml(s) => s.span,
            Statement::Yield(s) => s.span,
            Statement::Partial(s) => s.span,
            Statement::Debugger(s) => s.span,
            Statement::InvokeComponent(s) => s.span,
            Statement::If(s) => s.span,
            Statement::Each(s) => s.span,
            Statement::With(s) => s.span,
            Statement::Let(s) => s.span,
            Statement::InElement(s) => s.span,
        }
    }
}

/// Append a value as escaped text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendTextNode {
    pub text: ExpressionNode,
    pub span: Span,
}

/// Append a value as unescaped HTML (triple-curly form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendTrustedHtml {
    pub html: ExpressionNode,
    pub span: Span,
}

/// Invoke the caller-supplied block bound to `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Yield {
    pub to: BlockSymbol,
    pub target: SourceSlice,
    pub positional: Positional,
    pub span: Span,
}

/// Render another template by (dynamic) name. Forces has-eval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partial {
    pub target: ExpressionNode,
    pub span: Span,
}

/// Pause in the host debugger with the template scope visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debugger {
    pub span: Span,
}

/// Invoke a component definition. `blocks` is `None` when attachment is
/// deferred to a later pass (the `{{component}}` append keyword).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeComponent {
    pub definition: ExpressionNode,
    pub args: Args,
    pub blocks: Option<NamedBlocks>,
    pub span: Span,
}

/// Conditional block. `{{#unless}}` lowers to this with a `Not`-wrapped
/// condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct If {
    pub condition: ExpressionNode,
    pub block: NamedBlock,
    pub inverse: Option<NamedBlock>,
    pub span: Span,
}

/// Iterate a collection, optionally keyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Each {
    pub value: ExpressionNode,
    pub key: Option<ExpressionNode>,
    pub block: NamedBlock,
    pub inverse: Option<NamedBlock>,
    pub span: Span,
}

/// Bind a value as the block's context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct With {
    pub value: ExpressionNode,
    pub block: NamedBlock,
    pub inverse: Option<NamedBlock>,
    pub span: Span,
}

/// Bind positional values to the block's parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Let {
    pub positional: Positional,
    pub block: NamedBlock,
    pub span: Span,
}

/// Render the block into a remote element. `guid` is a cursor id unique
/// within the compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InElement {
    pub guid: String,
    pub destination: ExpressionNode,
    pub insert_before: Option<ExpressionNode>,
    pub block: NamedBlock,
    pub span: Span,
}

// ── Expressions ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionNode {
    /// Literals pass through from the AST unchanged.
    Literal(LiteralNode),
    /// Variable paths pass through from the AST unchanged.
    Path(PathExpression),
    Call(Box<CallExpression>),
    Not(Box<Not>),
    IfInline(Box<IfInline>),
    HasBlock(HasBlock),
    HasBlockParams(HasBlockParams),
    Curry(Box<Curry>),
    Log(Log),
}

impl ExpressionNode {
    pub fn span(&self) -> Span {
        match self {
            ExpressionNode::Literal(e) => e.span,
            ExpressionNode::Path(e) => e.span,
            ExpressionNode::Call(e) => e.span,
            ExpressionNode::Not(e) => e.span,
            ExpressionNode::IfInline(e) => e.span,
            ExpressionNode::HasBlock(e) => e.span,
            ExpressionNode::HasBlockParams(e) => e.span,
            ExpressionNode::Curry(e) => e.span,
            ExpressionNode::Log(e) => e.span,
        }
    }
}

/// A lowered call: helper invocation or generic subexpression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub callee: ExpressionNode,
    pub args: Args,
    pub span: Span,
}

/// Logical negation, introduced by `unless`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Not {
    pub value: ExpressionNode,
    pub span: Span,
}

/// Inline conditional produced by `{{if}}`/`(if)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfInline {
    pub condition: ExpressionNode,
    pub truthy: ExpressionNode,
    pub falsy: Option<ExpressionNode>,
    pub span: Span,
}

/// Whether the caller passed the named block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HasBlock {
    pub target: SourceSlice,
    pub symbol: BlockSymbol,
    pub span: Span,
}

/// Whether the caller passed block parameters to the named block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HasBlockParams {
    pub target: SourceSlice,
    pub symbol: BlockSymbol,
    pub span: Span,
}

/// A curried definition: closes over a definition plus partial args
/// without invoking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curry {
    pub kind: CurriedKind,
    pub definition: ExpressionNode,
    pub args: Args,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurriedKind {
    Component,
    Helper,
    Modifier,
}

impl CurriedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CurriedKind::Component => "component",
            CurriedKind::Helper => "helper",
            CurriedKind::Modifier => "modifier",
        }
    }
}

/// Developer console output: `(log ...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub positional: Positional,
    pub span: Span,
}

// ── Arguments & blocks ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Positional {
    pub exprs: Vec<ExpressionNode>,
    pub span: Span,
}

impl Positional {
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntry {
    pub name: SourceSlice,
    pub value: ExpressionNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Named {
    pub entries: Vec<NamedEntry>,
    pub span: Span,
}

impl Named {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Args {
    pub positional: Positional,
    pub named: Named,
    pub span: Span,
}

impl Args {
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// A lowered block body with its parameter names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedBlock {
    pub name: SourceSlice,
    pub params: Vec<SourceSlice>,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedBlocks {
    pub blocks: Vec<NamedBlock>,
    pub span: Span,
}

impl NamedBlocks {
    pub fn get(&self, name: &str) -> Option<&NamedBlock> {
        self.blocks.iter().find(|block| block.name.as_str() == name)
    }
}
