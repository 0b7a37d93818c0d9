//! AST construction shorthand for unit tests.
//!
//! Spans are zeroed: the tests assert shapes and messages, not locations,
//! except where a specific span matters and the test builds its own node.

use weft_syntax::ast;
use weft_syntax::span::{SourceSlice, Span};

pub fn text(chars: &str) -> ast::ContentNode {
    ast::ContentNode::Text(ast::TextNode {
        chars: chars.to_string(),
        span: Span::new(0, chars.len() as u32),
    })
}

pub fn comment(text: &str) -> ast::ContentNode {
    ast::ContentNode::Comment(ast::CommentNode {
        text: text.to_string(),
        span: Span::new(0, 0),
    })
}

pub fn free(name: &str) -> ast::ExpressionNode {
    ast::ExpressionNode::Path(ast::PathExpression {
        head: ast::VariableReference::Free {
            name: name.to_string(),
        },
        tail: Vec::new(),
        span: Span::new(0, name.len() as u32),
    })
}

pub fn this() -> ast::ExpressionNode {
    ast::ExpressionNode::Path(ast::PathExpression {
        head: ast::VariableReference::This,
        tail: Vec::new(),
        span: Span::new(0, 4),
    })
}

fn literal(value: ast::LiteralValue) -> ast::ExpressionNode {
    ast::ExpressionNode::Literal(ast::LiteralNode {
        value,
        span: Span::new(0, 0),
    })
}

pub fn string(value: &str) -> ast::ExpressionNode {
    literal(ast::LiteralValue::String(value.to_string()))
}

pub fn number(value: f64) -> ast::ExpressionNode {
    literal(ast::LiteralValue::Number(value))
}

pub fn boolean(value: bool) -> ast::ExpressionNode {
    literal(ast::LiteralValue::Boolean(value))
}

pub fn null() -> ast::ExpressionNode {
    literal(ast::LiteralValue::Null)
}

pub fn args(
    positional: Vec<ast::ExpressionNode>,
    named: Vec<(&str, ast::ExpressionNode)>,
) -> ast::Args {
    ast::Args {
        positional: ast::PositionalArguments {
            exprs: positional,
            span: Span::new(0, 0),
        },
        named: ast::NamedArguments {
            entries: named
                .into_iter()
                .map(|(name, value)| ast::NamedArgument {
                    name: SourceSlice::new(name, Span::new(0, 0)),
                    value,
                })
                .collect(),
            span: Span::new(0, 0),
        },
        span: Span::new(0, 0),
    }
}

pub fn append(callee: ast::ExpressionNode, args: ast::Args) -> ast::AppendContent {
    ast::AppendContent {
        callee,
        args,
        trusting: false,
        span: Span::new(0, 0),
    }
}

pub fn append_trusting(callee: ast::ExpressionNode, args: ast::Args) -> ast::AppendContent {
    ast::AppendContent {
        callee,
        args,
        trusting: true,
        span: Span::new(0, 0),
    }
}

pub fn block(
    callee: ast::ExpressionNode,
    args: ast::Args,
    blocks: ast::NamedBlocks,
) -> ast::InvokeBlock {
    ast::InvokeBlock {
        callee,
        args,
        blocks,
        span: Span::new(0, 0),
    }
}

pub fn blocks(blocks: Vec<ast::NamedBlock>) -> ast::NamedBlocks {
    ast::NamedBlocks {
        blocks,
        span: Span::new(0, 0),
    }
}

pub fn named_block(name: &str, params: Vec<&str>, body: Vec<ast::ContentNode>) -> ast::NamedBlock {
    ast::NamedBlock {
        name: SourceSlice::new(name, Span::new(0, 0)),
        params: params
            .into_iter()
            .map(|param| SourceSlice::new(param, Span::new(0, 0)))
            .collect(),
        body,
        span: Span::new(0, 0),
    }
}

pub fn call_expr(callee: ast::ExpressionNode, args: ast::Args) -> ast::ExpressionNode {
    ast::ExpressionNode::Call(Box::new(ast::CallExpression {
        callee,
        args,
        span: Span::new(0, 0),
    }))
}
