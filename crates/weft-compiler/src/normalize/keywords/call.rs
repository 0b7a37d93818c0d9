//! Call-position keywords: `(kw ...)` in expression position.
//!
//! `(has-block)`, `(has-block-params)`, `(if)`, `(unless)`, `(component)`,
//! `(helper)`, `(modifier)` and `(log)`. Everything here produces a MIR
//! *expression* — no append wrapping; the surrounding statement decides
//! what happens to the value.

use std::sync::LazyLock;

use weft_syntax::ast;
use weft_syntax::span::SourceSlice;
use weft_syntax::SyntaxError;

use crate::mir;
use crate::normalize::expressions;
use crate::normalize::result::all2;
use crate::normalize::NormalizeState;

use super::utils::{
    assert_valid_curry_usage, assert_valid_has_block_usage, assert_valid_if_unless_inline_usage,
    lower_if_unless_inline, CurryPayload, IfUnlessPayload,
};
use super::{keywords, Keywords};

pub static CALL_KEYWORDS: LazyLock<Keywords<ast::CallExpression, mir::ExpressionNode>> =
    LazyLock::new(|| {
        keywords("call")
            .kw("has-block", assert_has_block, translate_has_block)
            .kw(
                "has-block-params",
                assert_has_block_params,
                translate_has_block_params,
            )
            .kw("if", assert_if, translate_if)
            .kw("unless", assert_unless, translate_unless)
            .kw("component", assert_component, translate_component)
            .kw("helper", assert_helper, translate_helper)
            .kw("modifier", assert_modifier, translate_modifier)
            .kw("log", assert_log, translate_log)
    });

// ── has-block / has-block-params ───────────────────────────────────────

fn assert_has_block(
    node: &ast::CallExpression,
    _state: &NormalizeState,
) -> Result<SourceSlice, SyntaxError> {
    assert_valid_has_block_usage("(has-block)", &node.args, node.span)
}

fn translate_has_block(
    node: &ast::CallExpression,
    state: &mut NormalizeState,
    target: SourceSlice,
) -> Result<mir::ExpressionNode, SyntaxError> {
    let symbol = state.scope.allocate_block(target.as_str());
    Ok(mir::ExpressionNode::HasBlock(mir::HasBlock {
        target,
        symbol,
        span: node.span,
    }))
}

fn assert_has_block_params(
    node: &ast::CallExpression,
    _state: &NormalizeState,
) -> Result<SourceSlice, SyntaxError> {
    assert_valid_has_block_usage("(has-block-params)", &node.args, node.span)
}

fn translate_has_block_params(
    node: &ast::CallExpression,
    state: &mut NormalizeState,
    target: SourceSlice,
) -> Result<mir::ExpressionNode, SyntaxError> {
    let symbol = state.scope.allocate_block(target.as_str());
    Ok(mir::ExpressionNode::HasBlockParams(mir::HasBlockParams {
        target,
        symbol,
        span: node.span,
    }))
}

// ── if / unless ────────────────────────────────────────────────────────

fn assert_if(
    node: &ast::CallExpression,
    _state: &NormalizeState,
) -> Result<IfUnlessPayload, SyntaxError> {
    assert_valid_if_unless_inline_usage("(if)", false, &node.args, node.span)
}

fn translate_if(
    node: &ast::CallExpression,
    state: &mut NormalizeState,
    payload: IfUnlessPayload,
) -> Result<mir::ExpressionNode, SyntaxError> {
    lower_if_unless_inline(payload, state, false, node.span)
}

fn assert_unless(
    node: &ast::CallExpression,
    _state: &NormalizeState,
) -> Result<IfUnlessPayload, SyntaxError> {
    assert_valid_if_unless_inline_usage("(unless)", true, &node.args, node.span)
}

fn translate_unless(
    node: &ast::CallExpression,
    state: &mut NormalizeState,
    payload: IfUnlessPayload,
) -> Result<mir::ExpressionNode, SyntaxError> {
    lower_if_unless_inline(payload, state, true, node.span)
}

// ── component / helper / modifier ──────────────────────────────────────

fn assert_component(
    node: &ast::CallExpression,
    _state: &NormalizeState,
) -> Result<CurryPayload, SyntaxError> {
    assert_valid_curry_usage("(component)", "component", &node.args, node.span)
}

fn translate_component(
    node: &ast::CallExpression,
    state: &mut NormalizeState,
    payload: CurryPayload,
) -> Result<mir::ExpressionNode, SyntaxError> {
    lower_curry(node, state, payload, mir::CurriedKind::Component)
}

fn assert_helper(
    node: &ast::CallExpression,
    _state: &NormalizeState,
) -> Result<CurryPayload, SyntaxError> {
    assert_valid_curry_usage("(helper)", "helper", &node.args, node.span)
}

fn translate_helper(
    node: &ast::CallExpression,
    state: &mut NormalizeState,
    payload: CurryPayload,
) -> Result<mir::ExpressionNode, SyntaxError> {
    lower_curry(node, state, payload, mir::CurriedKind::Helper)
}

fn assert_modifier(
    node: &ast::CallExpression,
    _state: &NormalizeState,
) -> Result<CurryPayload, SyntaxError> {
    assert_valid_curry_usage("(modifier)", "modifier", &node.args, node.span)
}

fn translate_modifier(
    node: &ast::CallExpression,
    state: &mut NormalizeState,
    payload: CurryPayload,
) -> Result<mir::ExpressionNode, SyntaxError> {
    lower_curry(node, state, payload, mir::CurriedKind::Modifier)
}

fn lower_curry(
    node: &ast::CallExpression,
    state: &mut NormalizeState,
    payload: CurryPayload,
    kind: mir::CurriedKind,
) -> Result<mir::ExpressionNode, SyntaxError> {
    let definition = expressions::visit_expr(&payload.definition, state);
    let args = expressions::visit_args(&payload.args, state);
    let (definition, args) = all2(definition, args)?;
    Ok(mir::ExpressionNode::Curry(Box::new(mir::Curry {
        kind,
        definition,
        args,
        span: node.span,
    })))
}

// ── log ────────────────────────────────────────────────────────────────

fn assert_log(
    node: &ast::CallExpression,
    _state: &NormalizeState,
) -> Result<ast::PositionalArguments, SyntaxError> {
    if !node.args.named.is_empty() {
        return Err(SyntaxError::new(
            "(log) does not take any named arguments",
            node.args.named.span,
        ));
    }
    Ok(node.args.positional.clone())
}

fn translate_log(
    node: &ast::CallExpression,
    state: &mut NormalizeState,
    positional: ast::PositionalArguments,
) -> Result<mir::ExpressionNode, SyntaxError> {
    let positional = expressions::visit_positional(&positional, state)?;
    Ok(mir::ExpressionNode::Log(mir::Log {
        positional,
        span: node.span,
    }))
}
