//! Statement-level content lowering.
//!
//! Walks a content body in source order. Append and block invocations are
//! offered to their position's keyword table first; unmatched appends
//! lower to text/HTML appends of the lowered value, unmatched block
//! invocations to dynamic component invocations with their blocks
//! attached. Comments are dropped.

use weft_syntax::ast;
use weft_syntax::SyntaxError;

use crate::mir;
use crate::normalize::expressions;
use crate::normalize::keywords::{APPEND_KEYWORDS, BLOCK_KEYWORDS};
use crate::normalize::result::{all2, all3};
use crate::normalize::NormalizeState;

pub(crate) fn visit_body(
    body: &[ast::ContentNode],
    state: &mut NormalizeState,
) -> Result<Vec<mir::Statement>, SyntaxError> {
    let mut statements = Vec::with_capacity(body.len());
    for node in body {
        if let Some(statement) = visit_content(node, state)? {
            statements.push(statement);
        }
    }
    Ok(statements)
}

fn visit_content(
    node: &ast::ContentNode,
    state: &mut NormalizeState,
) -> Result<Option<mir::Statement>, SyntaxError> {
    match node {
        ast::ContentNode::Text(text) => Ok(Some(lower_text(text))),
        ast::ContentNode::Comment(_) => Ok(None),
        ast::ContentNode::Append(append) => visit_append(append, state).map(Some),
        ast::ContentNode::Block(block) => visit_invoke_block(block, state).map(Some),
    }
}

fn lower_text(text: &ast::TextNode) -> mir::Statement {
    mir::Statement::AppendTextNode(mir::AppendTextNode {
        text: mir::ExpressionNode::Literal(ast::LiteralNode {
            value: ast::LiteralValue::String(text.chars.clone()),
            span: text.span,
        }),
        span: text.span,
    })
}

fn visit_append(
    node: &ast::AppendContent,
    state: &mut NormalizeState,
) -> Result<mir::Statement, SyntaxError> {
    if let Some(result) = APPEND_KEYWORDS.translate(node, state) {
        return result;
    }

    let value = if node.args.is_empty() {
        expressions::visit_expr(&node.callee, state)?
    } else {
        let callee = expressions::visit_expr(&node.callee, state);
        let args = expressions::visit_args(&node.args, state);
        let (callee, args) = all2(callee, args)?;
        mir::ExpressionNode::Call(Box::new(mir::CallExpression {
            callee,
            args,
            span: node.span,
        }))
    };

    Ok(if node.trusting {
        mir::Statement::AppendTrustedHtml(mir::AppendTrustedHtml {
            html: value,
            span: node.span,
        })
    } else {
        mir::Statement::AppendTextNode(mir::AppendTextNode {
            text: value,
            span: node.span,
        })
    })
}

fn visit_invoke_block(
    node: &ast::InvokeBlock,
    state: &mut NormalizeState,
) -> Result<mir::Statement, SyntaxError> {
    if let Some(result) = BLOCK_KEYWORDS.translate(node, state) {
        return result;
    }

    let definition = expressions::visit_expr(&node.callee, state);
    let args = expressions::visit_args(&node.args, state);
    let blocks = visit_named_blocks(&node.blocks, state);
    let (definition, args, blocks) = all3(definition, args, blocks)?;
    Ok(mir::Statement::InvokeComponent(mir::InvokeComponent {
        definition,
        args,
        blocks: Some(blocks),
        span: node.span,
    }))
}

pub(crate) fn visit_named_block(
    block: &ast::NamedBlock,
    state: &mut NormalizeState,
) -> Result<mir::NamedBlock, SyntaxError> {
    let body = visit_body(&block.body, state)?;
    Ok(mir::NamedBlock {
        name: block.name.clone(),
        params: block.params.clone(),
        body,
        span: block.span,
    })
}

pub(crate) fn visit_named_blocks(
    blocks: &ast::NamedBlocks,
    state: &mut NormalizeState,
) -> Result<mir::NamedBlocks, SyntaxError> {
    let mut lowered = Vec::with_capacity(blocks.len());
    for block in &blocks.blocks {
        lowered.push(visit_named_block(block, state)?);
    }
    Ok(mir::NamedBlocks {
        blocks: lowered,
        span: blocks.span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeOptions;
    use crate::test_helpers as h;

    fn state() -> NormalizeState {
        NormalizeState::new(NormalizeOptions::default())
    }

    #[test]
    fn test_text_lowers_to_string_append() {
        let mut state = state();
        let body = vec![h::text("Hello ")];
        let statements = visit_body(&body, &mut state).unwrap();
        assert_eq!(statements.len(), 1);
        match &statements[0] {
            mir::Statement::AppendTextNode(append) => match &append.text {
                mir::ExpressionNode::Literal(lit) => {
                    assert_eq!(lit.value, ast::LiteralValue::String("Hello ".to_string()));
                }
                other => panic!("expected string literal, got {other:?}"),
            },
            other => panic!("expected append-text, got {other:?}"),
        }
    }

    #[test]
    fn test_comments_are_dropped() {
        let mut state = state();
        let body = vec![h::comment("ignore me"), h::text("kept")];
        let statements = visit_body(&body, &mut state).unwrap();
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_bare_append_lowers_callee_only() {
        let mut state = state();
        let node = ast::ContentNode::Append(h::append(h::free("name"), h::args(vec![], vec![])));
        let statements = visit_body(&[node], &mut state).unwrap();
        match &statements[0] {
            mir::Statement::AppendTextNode(append) => {
                assert!(matches!(append.text, mir::ExpressionNode::Path(_)));
            }
            other => panic!("expected append-text, got {other:?}"),
        }
    }

    #[test]
    fn test_append_with_args_lowers_to_call() {
        let mut state = state();
        let node = ast::ContentNode::Append(h::append(
            h::free("format"),
            h::args(vec![h::free("value")], vec![]),
        ));
        let statements = visit_body(&[node], &mut state).unwrap();
        match &statements[0] {
            mir::Statement::AppendTextNode(append) => {
                assert!(matches!(append.text, mir::ExpressionNode::Call(_)));
            }
            other => panic!("expected append-text, got {other:?}"),
        }
    }

    #[test]
    fn test_trusting_append_lowers_to_html() {
        let mut state = state();
        let node =
            ast::ContentNode::Append(h::append_trusting(h::free("raw"), h::args(vec![], vec![])));
        let statements = visit_body(&[node], &mut state).unwrap();
        assert!(matches!(
            statements[0],
            mir::Statement::AppendTrustedHtml(_)
        ));
    }

    #[test]
    fn test_non_keyword_block_lowers_to_component_with_blocks() {
        let mut state = state();
        let node = ast::ContentNode::Block(h::block(
            h::free("my-widget"),
            h::args(vec![], vec![("title", h::string("hi"))]),
            h::blocks(vec![h::named_block("default", vec![], vec![h::text("body")])]),
        ));
        let statements = visit_body(&[node], &mut state).unwrap();
        match &statements[0] {
            mir::Statement::InvokeComponent(invoke) => {
                let blocks = invoke.blocks.as_ref().unwrap();
                assert!(blocks.get("default").is_some());
                assert_eq!(invoke.args.named.entries.len(), 1);
            }
            other => panic!("expected invoke-component, got {other:?}"),
        }
    }
}
