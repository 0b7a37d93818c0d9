//! Block-position keywords: `{{#kw ...}} ... {{/kw}}`.
//!
//! `{{#if}}`, `{{#unless}}`, `{{#each}}`, `{{#with}}`, `{{#let}}`,
//! `{{#in-element}}` and `{{#component}}`. Every handler receives the
//! invocation's named blocks (the parser guarantees a `default` block; an
//! `{{else}}` clause arrives as the `else` block) and produces a MIR
//! statement.

use std::sync::LazyLock;

use weft_syntax::ast;
use weft_syntax::SyntaxError;

use crate::mir;
use crate::normalize::content;
use crate::normalize::expressions;
use crate::normalize::result::{all2, all3, all4};
use crate::normalize::NormalizeState;

use super::utils::{assert_valid_curry_usage, assert_valid_if_unless_block_usage, CurryPayload};
use super::{keywords, Keywords};

pub static BLOCK_KEYWORDS: LazyLock<Keywords<ast::InvokeBlock, mir::Statement>> =
    LazyLock::new(|| {
        keywords("block")
            .kw("if", assert_if, translate_if)
            .kw("unless", assert_unless, translate_unless)
            .kw("each", assert_each, translate_each)
            .kw("with", assert_with, translate_with)
            .kw("let", assert_let, translate_let)
            .kw("in-element", assert_in_element, translate_in_element)
            .kw("component", assert_component, translate_component)
    });

fn default_block(node: &ast::InvokeBlock) -> Result<&ast::NamedBlock, SyntaxError> {
    node.blocks.get("default").ok_or_else(|| {
        SyntaxError::new("block invocation is missing its default block", node.span)
    })
}

fn lower_inverse(
    node: &ast::InvokeBlock,
    state: &mut NormalizeState,
) -> Result<Option<mir::NamedBlock>, SyntaxError> {
    match node.blocks.get("else") {
        Some(block) => content::visit_named_block(block, state).map(Some),
        None => Ok(None),
    }
}

// ── if / unless ────────────────────────────────────────────────────────

fn assert_if(
    node: &ast::InvokeBlock,
    _state: &NormalizeState,
) -> Result<ast::ExpressionNode, SyntaxError> {
    assert_valid_if_unless_block_usage("{{#if}}", &node.args, node.span)
}

fn translate_if(
    node: &ast::InvokeBlock,
    state: &mut NormalizeState,
    condition: ast::ExpressionNode,
) -> Result<mir::Statement, SyntaxError> {
    lower_if_unless_block(node, state, condition, false)
}

fn assert_unless(
    node: &ast::InvokeBlock,
    _state: &NormalizeState,
) -> Result<ast::ExpressionNode, SyntaxError> {
    assert_valid_if_unless_block_usage("{{#unless}}", &node.args, node.span)
}

fn translate_unless(
    node: &ast::InvokeBlock,
    state: &mut NormalizeState,
    condition: ast::ExpressionNode,
) -> Result<mir::Statement, SyntaxError> {
    lower_if_unless_block(node, state, condition, true)
}

fn lower_if_unless_block(
    node: &ast::InvokeBlock,
    state: &mut NormalizeState,
    condition: ast::ExpressionNode,
    inverted: bool,
) -> Result<mir::Statement, SyntaxError> {
    let condition = expressions::visit_expr(&condition, state);
    let block = default_block(node).and_then(|block| content::visit_named_block(block, state));
    let inverse = lower_inverse(node, state);
    let (condition, block, inverse) = all3(condition, block, inverse)?;

    let condition = if inverted {
        mir::ExpressionNode::Not(Box::new(mir::Not {
            value: condition,
            span: node.span,
        }))
    } else {
        condition
    };

    Ok(mir::Statement::If(mir::If {
        condition,
        block,
        inverse,
        span: node.span,
    }))
}

// ── each ───────────────────────────────────────────────────────────────

struct EachPayload {
    value: ast::ExpressionNode,
    key: Option<ast::ExpressionNode>,
}

fn assert_each(node: &ast::InvokeBlock, _state: &NormalizeState) -> Result<EachPayload, SyntaxError> {
    for entry in &node.args.named.entries {
        if entry.name.as_str() != "key" {
            return Err(SyntaxError::new(
                "{{#each}} can only receive the 'key' named parameter",
                entry.name.span,
            ));
        }
    }

    match node.args.positional.exprs.as_slice() {
        [value] => Ok(EachPayload {
            value: value.clone(),
            key: node.args.named.get("key").cloned(),
        }),
        _ => Err(SyntaxError::new(
            "{{#each}} requires exactly one argument, the collection to iterate over",
            node.span,
        )),
    }
}

fn translate_each(
    node: &ast::InvokeBlock,
    state: &mut NormalizeState,
    payload: EachPayload,
) -> Result<mir::Statement, SyntaxError> {
    let value = expressions::visit_expr(&payload.value, state);
    let key = match &payload.key {
        Some(expr) => expressions::visit_expr(expr, state).map(Some),
        None => Ok(None),
    };
    let block = default_block(node).and_then(|block| content::visit_named_block(block, state));
    let inverse = lower_inverse(node, state);
    let (value, key, block, inverse) = all4(value, key, block, inverse)?;
    Ok(mir::Statement::Each(mir::Each {
        value,
        key,
        block,
        inverse,
        span: node.span,
    }))
}

// ── with ───────────────────────────────────────────────────────────────

fn assert_with(
    node: &ast::InvokeBlock,
    _state: &NormalizeState,
) -> Result<ast::ExpressionNode, SyntaxError> {
    if !node.args.named.is_empty() {
        return Err(SyntaxError::new(
            "{{#with}} cannot receive named parameters",
            node.args.named.span,
        ));
    }
    match node.args.positional.exprs.as_slice() {
        [value] => Ok(value.clone()),
        _ => Err(SyntaxError::new(
            "{{#with}} requires exactly one argument, the value to bind",
            node.span,
        )),
    }
}

fn translate_with(
    node: &ast::InvokeBlock,
    state: &mut NormalizeState,
    value: ast::ExpressionNode,
) -> Result<mir::Statement, SyntaxError> {
    let value = expressions::visit_expr(&value, state);
    let block = default_block(node).and_then(|block| content::visit_named_block(block, state));
    let inverse = lower_inverse(node, state);
    let (value, block, inverse) = all3(value, block, inverse)?;
    Ok(mir::Statement::With(mir::With {
        value,
        block,
        inverse,
        span: node.span,
    }))
}

// ── let ────────────────────────────────────────────────────────────────

fn assert_let(
    node: &ast::InvokeBlock,
    _state: &NormalizeState,
) -> Result<ast::PositionalArguments, SyntaxError> {
    if !node.args.named.is_empty() {
        return Err(SyntaxError::new(
            "{{#let}} cannot receive named parameters",
            node.args.named.span,
        ));
    }
    if node.args.positional.is_empty() {
        return Err(SyntaxError::new(
            "{{#let}} requires at least one argument",
            node.span,
        ));
    }
    if node.blocks.get("else").is_some() {
        return Err(SyntaxError::new(
            "{{#let}} cannot receive an inverse block",
            node.span,
        ));
    }
    Ok(node.args.positional.clone())
}

fn translate_let(
    node: &ast::InvokeBlock,
    state: &mut NormalizeState,
    positional: ast::PositionalArguments,
) -> Result<mir::Statement, SyntaxError> {
    let positional = expressions::visit_positional(&positional, state);
    let block = default_block(node).and_then(|block| content::visit_named_block(block, state));
    let (positional, block) = all2(positional, block)?;
    Ok(mir::Statement::Let(mir::Let {
        positional,
        block,
        span: node.span,
    }))
}

// ── in-element ─────────────────────────────────────────────────────────

struct InElementPayload {
    destination: ast::ExpressionNode,
    insert_before: Option<ast::ExpressionNode>,
}

fn assert_in_element(
    node: &ast::InvokeBlock,
    _state: &NormalizeState,
) -> Result<InElementPayload, SyntaxError> {
    for entry in &node.args.named.entries {
        if entry.name.as_str() != "insertBefore" {
            return Err(SyntaxError::new(
                "{{#in-element}} can only receive the 'insertBefore' named parameter",
                entry.name.span,
            ));
        }
        match entry.value.as_literal() {
            Some(ast::LiteralValue::Null) | Some(ast::LiteralValue::Undefined) => {}
            _ => {
                return Err(SyntaxError::new(
                    "{{#in-element}} can only receive a null or undefined literal for \
                     'insertBefore'",
                    entry.value.span(),
                ));
            }
        }
    }

    if node.blocks.get("else").is_some() {
        return Err(SyntaxError::new(
            "{{#in-element}} cannot receive an inverse block",
            node.span,
        ));
    }

    match node.args.positional.exprs.as_slice() {
        [destination] => Ok(InElementPayload {
            destination: destination.clone(),
            insert_before: node.args.named.get("insertBefore").cloned(),
        }),
        _ => Err(SyntaxError::new(
            "{{#in-element}} requires exactly one argument, the destination element",
            node.span,
        )),
    }
}

fn translate_in_element(
    node: &ast::InvokeBlock,
    state: &mut NormalizeState,
    payload: InElementPayload,
) -> Result<mir::Statement, SyntaxError> {
    let guid = state.generate_unique_cursor();
    let destination = expressions::visit_expr(&payload.destination, state);
    let insert_before = match &payload.insert_before {
        Some(expr) => expressions::visit_expr(expr, state).map(Some),
        None => Ok(None),
    };
    let block = default_block(node).and_then(|block| content::visit_named_block(block, state));
    let (destination, insert_before, block) = all3(destination, insert_before, block)?;
    Ok(mir::Statement::InElement(mir::InElement {
        guid,
        destination,
        insert_before,
        block,
        span: node.span,
    }))
}

// ── component ──────────────────────────────────────────────────────────

fn assert_component(
    node: &ast::InvokeBlock,
    _state: &NormalizeState,
) -> Result<CurryPayload, SyntaxError> {
    assert_valid_curry_usage("{{#component}}", "component", &node.args, node.span)
}

fn translate_component(
    node: &ast::InvokeBlock,
    state: &mut NormalizeState,
    payload: CurryPayload,
) -> Result<mir::Statement, SyntaxError> {
    let definition = expressions::visit_expr(&payload.definition, state);
    let args = expressions::visit_args(&payload.args, state);
    let blocks = content::visit_named_blocks(&node.blocks, state);
    let (definition, args, blocks) = all3(definition, args, blocks)?;
    Ok(mir::Statement::InvokeComponent(mir::InvokeComponent {
        definition,
        args,
        blocks: Some(blocks),
        span: node.span,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeOptions;
    use crate::test_helpers as h;

    fn state() -> NormalizeState {
        NormalizeState::new(NormalizeOptions::default())
    }

    fn run(node: &ast::InvokeBlock, state: &mut NormalizeState) -> Result<mir::Statement, SyntaxError> {
        match BLOCK_KEYWORDS.translate(node, state) {
            Some(result) => result,
            None => panic!("expected keyword dispatch for {:?}", node.callee),
        }
    }

    fn run_err(node: &ast::InvokeBlock) -> SyntaxError {
        match run(node, &mut state()) {
            Err(err) => err,
            Ok(statement) => panic!("expected an error, got {statement:?}"),
        }
    }

    fn default_only(body: Vec<ast::ContentNode>) -> ast::NamedBlocks {
        h::blocks(vec![h::named_block("default", vec![], body)])
    }

    fn with_else() -> ast::NamedBlocks {
        h::blocks(vec![
            h::named_block("default", vec![], vec![h::text("yes")]),
            h::named_block("else", vec![], vec![h::text("no")]),
        ])
    }

    // if / unless

    #[test]
    fn test_block_if_with_else() {
        let mut state = state();
        let node = h::block(h::free("if"), h::args(vec![h::free("ok")], vec![]), with_else());
        match run(&node, &mut state) {
            Ok(mir::Statement::If(stmt)) => {
                assert!(matches!(stmt.condition, mir::ExpressionNode::Path(_)));
                assert_eq!(stmt.block.name.as_str(), "default");
                assert_eq!(stmt.inverse.as_ref().unwrap().name.as_str(), "else");
            }
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_block_unless_wraps_condition_in_not() {
        let mut state = state();
        let node = h::block(
            h::free("unless"),
            h::args(vec![h::free("ok")], vec![]),
            default_only(vec![h::text("hidden")]),
        );
        match run(&node, &mut state) {
            Ok(mir::Statement::If(stmt)) => {
                assert!(matches!(stmt.condition, mir::ExpressionNode::Not(_)));
                assert!(stmt.inverse.is_none());
            }
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_block_if_requires_a_condition() {
        let node = h::block(h::free("if"), h::args(vec![], vec![]), default_only(vec![]));
        let err = run_err(&node);
        assert!(
            err.message.starts_with("{{#if}} requires a condition"),
            "unexpected message: {}",
            err.message
        );
    }

    #[test]
    fn test_block_if_rejects_two_conditions() {
        let node = h::block(
            h::free("if"),
            h::args(vec![h::free("a"), h::free("b")], vec![]),
            default_only(vec![]),
        );
        let err = run_err(&node);
        assert!(err.message.ends_with("Received 2 parameters"));
    }

    // each

    #[test]
    fn test_each_with_key_and_else() {
        let mut state = state();
        let node = h::block(
            h::free("each"),
            h::args(vec![h::free("items")], vec![("key", h::string("id"))]),
            with_else(),
        );
        match run(&node, &mut state) {
            Ok(mir::Statement::Each(each)) => {
                assert!(each.key.is_some());
                assert!(each.inverse.is_some());
            }
            other => panic!("expected each, got {other:?}"),
        }
    }

    #[test]
    fn test_each_requires_one_collection() {
        let node = h::block(h::free("each"), h::args(vec![], vec![]), default_only(vec![]));
        let err = run_err(&node);
        assert_eq!(
            err.message,
            "{{#each}} requires exactly one argument, the collection to iterate over"
        );
    }

    #[test]
    fn test_each_rejects_other_named_parameters() {
        let node = h::block(
            h::free("each"),
            h::args(vec![h::free("items")], vec![("sort", h::string("asc"))]),
            default_only(vec![]),
        );
        let err = run_err(&node);
        assert_eq!(
            err.message,
            "{{#each}} can only receive the 'key' named parameter"
        );
    }

    // with

    #[test]
    fn test_with_binds_one_value() {
        let mut state = state();
        let node = h::block(
            h::free("with"),
            h::args(vec![h::free("user")], vec![]),
            default_only(vec![h::text("body")]),
        );
        assert!(matches!(run(&node, &mut state), Ok(mir::Statement::With(_))));
    }

    #[test]
    fn test_with_rejects_named_parameters() {
        let node = h::block(
            h::free("with"),
            h::args(vec![h::free("user")], vec![("as", h::string("u"))]),
            default_only(vec![]),
        );
        let err = run_err(&node);
        assert_eq!(err.message, "{{#with}} cannot receive named parameters");
    }

    // let

    #[test]
    fn test_let_takes_multiple_positional_values() {
        let mut state = state();
        let node = h::block(
            h::free("let"),
            h::args(vec![h::free("a"), h::free("b")], vec![]),
            default_only(vec![h::text("body")]),
        );
        match run(&node, &mut state) {
            Ok(mir::Statement::Let(stmt)) => assert_eq!(stmt.positional.len(), 2),
            other => panic!("expected let, got {other:?}"),
        }
    }

    #[test]
    fn test_let_requires_an_argument() {
        let node = h::block(h::free("let"), h::args(vec![], vec![]), default_only(vec![]));
        let err = run_err(&node);
        assert_eq!(err.message, "{{#let}} requires at least one argument");
    }

    #[test]
    fn test_let_rejects_an_inverse_block() {
        let node = h::block(h::free("let"), h::args(vec![h::free("a")], vec![]), with_else());
        let err = run_err(&node);
        assert_eq!(err.message, "{{#let}} cannot receive an inverse block");
    }

    // in-element

    #[test]
    fn test_in_element_mints_distinct_cursors() {
        let mut state = state();
        let node = || {
            h::block(
                h::free("in-element"),
                h::args(vec![h::free("dest")], vec![]),
                h::blocks(vec![h::named_block("default", vec![], vec![])]),
            )
        };
        let first = run(&node(), &mut state).unwrap();
        let second = run(&node(), &mut state).unwrap();
        match (first, second) {
            (mir::Statement::InElement(a), mir::Statement::InElement(b)) => {
                assert_ne!(a.guid, b.guid);
            }
            other => panic!("expected two in-element statements, got {other:?}"),
        }
    }

    #[test]
    fn test_in_element_accepts_null_insert_before() {
        let mut state = state();
        let node = h::block(
            h::free("in-element"),
            h::args(vec![h::free("dest")], vec![("insertBefore", h::null())]),
            default_only(vec![]),
        );
        match run(&node, &mut state) {
            Ok(mir::Statement::InElement(stmt)) => assert!(stmt.insert_before.is_some()),
            other => panic!("expected in-element, got {other:?}"),
        }
    }

    #[test]
    fn test_in_element_rejects_live_insert_before() {
        let node = h::block(
            h::free("in-element"),
            h::args(vec![h::free("dest")], vec![("insertBefore", h::free("marker"))]),
            default_only(vec![]),
        );
        let err = run_err(&node);
        assert_eq!(
            err.message,
            "{{#in-element}} can only receive a null or undefined literal for 'insertBefore'"
        );
    }

    #[test]
    fn test_in_element_rejects_other_named_parameters() {
        let node = h::block(
            h::free("in-element"),
            h::args(vec![h::free("dest")], vec![("append", h::boolean(true))]),
            default_only(vec![]),
        );
        let err = run_err(&node);
        assert_eq!(
            err.message,
            "{{#in-element}} can only receive the 'insertBefore' named parameter"
        );
    }

    // component

    #[test]
    fn test_block_component_attaches_blocks() {
        let mut state = state();
        let node = h::block(
            h::free("component"),
            h::args(vec![h::string("widget")], vec![("title", h::string("hi"))]),
            default_only(vec![h::text("body")]),
        );
        match run(&node, &mut state) {
            Ok(mir::Statement::InvokeComponent(invoke)) => {
                assert!(invoke.blocks.as_ref().unwrap().get("default").is_some());
                assert_eq!(invoke.args.named.entries.len(), 1);
            }
            other => panic!("expected invoke-component, got {other:?}"),
        }
    }

    // dispatch scoping

    #[test]
    fn test_append_keywords_do_not_match_at_block() {
        // `yield` is an append keyword; in block position it falls through
        // to generic component invocation.
        let node = h::block(h::free("yield"), h::args(vec![], vec![]), h::blocks(vec![]));
        assert!(BLOCK_KEYWORDS.translate(&node, &mut state()).is_none());
    }
}
