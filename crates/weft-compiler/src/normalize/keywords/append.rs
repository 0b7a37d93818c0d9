//! Append-position keywords: the whole `{{...}}` statement.
//!
//! `{{yield}}`, `{{partial}}`, `{{debugger}}`, `{{has-block}}`,
//! `{{has-block-params}}`, `{{if}}`, `{{unless}}`, `{{component}}` and
//! `{{helper}}`. Everything here produces a MIR statement; value-producing
//! keywords wrap their expression in an `AppendTextNode` because an append
//! always emits output.

use std::sync::LazyLock;

use weft_syntax::ast;
use weft_syntax::span::{SourceSlice, Span};
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

pub static APPEND_KEYWORDS: LazyLock<Keywords<ast::AppendContent, mir::Statement>> =
    LazyLock::new(|| {
        keywords("append")
            .kw("yield", assert_yield, translate_yield)
            .kw("partial", assert_partial, translate_partial)
            .kw("debugger", assert_debugger, translate_debugger)
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
    });

// ── yield ──────────────────────────────────────────────────────────────

struct YieldPayload {
    target: SourceSlice,
    positional: ast::PositionalArguments,
}

fn assert_yield(
    node: &ast::AppendContent,
    _state: &NormalizeState,
) -> Result<YieldPayload, SyntaxError> {
    let args = &node.args;

    if args.named.is_empty() {
        return Ok(YieldPayload {
            target: SourceSlice::synthetic("default"),
            positional: args.positional.clone(),
        });
    }

    match args.named.get("to") {
        Some(target) if args.named.len() == 1 => match target.as_string_literal() {
            Some(chars) => Ok(YieldPayload {
                target: SourceSlice::new(chars, target.span()),
                positional: args.positional.clone(),
            }),
            None => Err(SyntaxError::new(
                "you can only yield to a literal string value",
                target.span(),
            )),
        },
        _ => Err(SyntaxError::new(
            "yield only takes a single named argument: 'to'",
            args.named.span,
        )),
    }
}

fn translate_yield(
    node: &ast::AppendContent,
    state: &mut NormalizeState,
    payload: YieldPayload,
) -> Result<mir::Statement, SyntaxError> {
    let positional = expressions::visit_positional(&payload.positional, state)?;
    let to = state.scope.allocate_block(payload.target.as_str());
    Ok(mir::Statement::Yield(mir::Yield {
        to,
        target: payload.target,
        positional,
        span: node.span,
    }))
}

// ── partial ────────────────────────────────────────────────────────────

fn assert_partial(
    node: &ast::AppendContent,
    state: &NormalizeState,
) -> Result<Option<ast::ExpressionNode>, SyntaxError> {
    if state.is_strict() {
        return Err(SyntaxError::new(
            "{{partial}} is not allowed in strict mode templates",
            node.span,
        ));
    }

    let positional = &node.args.positional;
    let named = &node.args.named;

    if positional.is_empty() {
        return Err(SyntaxError::new(
            "Partial found with no arguments. You must specify a template name",
            node.span,
        ));
    }
    if positional.len() != 1 {
        return Err(SyntaxError::new(
            format!(
                "Partial found with {} arguments. You must specify a template name",
                positional.len()
            ),
            node.span,
        ));
    }

    if named.is_empty() {
        if node.trusting {
            return Err(SyntaxError::new(
                "{{{partial ...}}} is not supported, please use {{partial ...}} instead",
                node.span,
            ));
        }
        Ok(positional.nth(0).cloned())
    } else {
        Err(SyntaxError::new(
            "Partial does not take any named argument",
            node.span,
        ))
    }
}

fn translate_partial(
    node: &ast::AppendContent,
    state: &mut NormalizeState,
    target: Option<ast::ExpressionNode>,
) -> Result<mir::Statement, SyntaxError> {
    state.scope.set_has_eval();

    // A missing target is unreachable through assert, but the substitution
    // is total: render `undefined` rather than trusting the caller.
    let target = match target {
        Some(expr) => expressions::visit_expr(&expr, state)?,
        None => mir::ExpressionNode::Literal(ast::LiteralNode {
            value: ast::LiteralValue::Undefined,
            span: Span::SYNTHETIC,
        }),
    };

    Ok(mir::Statement::Partial(mir::Partial {
        target,
        span: node.span,
    }))
}

// ── debugger ───────────────────────────────────────────────────────────

fn assert_debugger(node: &ast::AppendContent, _state: &NormalizeState) -> Result<(), SyntaxError> {
    let args = &node.args;

    if args.is_empty() {
        Ok(())
    } else if args.positional.is_empty() {
        Err(SyntaxError::new(
            "debugger does not take any named arguments",
            node.span,
        ))
    } else {
        Err(SyntaxError::new(
            "debugger does not take any positional arguments",
            node.span,
        ))
    }
}

fn translate_debugger(
    node: &ast::AppendContent,
    state: &mut NormalizeState,
    _payload: (),
) -> Result<mir::Statement, SyntaxError> {
    state.scope.set_has_eval();
    Ok(mir::Statement::Debugger(mir::Debugger { span: node.span }))
}

// ── has-block / has-block-params ───────────────────────────────────────

fn assert_has_block(
    node: &ast::AppendContent,
    _state: &NormalizeState,
) -> Result<SourceSlice, SyntaxError> {
    assert_valid_has_block_usage("has-block", &node.args, node.span)
}

fn translate_has_block(
    node: &ast::AppendContent,
    state: &mut NormalizeState,
    target: SourceSlice,
) -> Result<mir::Statement, SyntaxError> {
    let symbol = state.scope.allocate_block(target.as_str());
    let text = mir::ExpressionNode::HasBlock(mir::HasBlock {
        target,
        symbol,
        span: node.span,
    });
    Ok(mir::Statement::AppendTextNode(mir::AppendTextNode {
        text,
        span: node.span,
    }))
}

fn assert_has_block_params(
    node: &ast::AppendContent,
    _state: &NormalizeState,
) -> Result<SourceSlice, SyntaxError> {
    assert_valid_has_block_usage("has-block-params", &node.args, node.span)
}

fn translate_has_block_params(
    node: &ast::AppendContent,
    state: &mut NormalizeState,
    target: SourceSlice,
) -> Result<mir::Statement, SyntaxError> {
    let symbol = state.scope.allocate_block(target.as_str());
    let text = mir::ExpressionNode::HasBlockParams(mir::HasBlockParams {
        target,
        symbol,
        span: node.span,
    });
    Ok(mir::Statement::AppendTextNode(mir::AppendTextNode {
        text,
        span: node.span,
    }))
}

// ── if / unless (inline) ───────────────────────────────────────────────

fn assert_if(
    node: &ast::AppendContent,
    _state: &NormalizeState,
) -> Result<IfUnlessPayload, SyntaxError> {
    assert_valid_if_unless_inline_usage("{{if}}", false, &node.args, node.span)
}

fn translate_if(
    node: &ast::AppendContent,
    state: &mut NormalizeState,
    payload: IfUnlessPayload,
) -> Result<mir::Statement, SyntaxError> {
    let text = lower_if_unless_inline(payload, state, false, node.span)?;
    Ok(mir::Statement::AppendTextNode(mir::AppendTextNode {
        text,
        span: node.span,
    }))
}

fn assert_unless(
    node: &ast::AppendContent,
    _state: &NormalizeState,
) -> Result<IfUnlessPayload, SyntaxError> {
    assert_valid_if_unless_inline_usage("{{unless}}", true, &node.args, node.span)
}

fn translate_unless(
    node: &ast::AppendContent,
    state: &mut NormalizeState,
    payload: IfUnlessPayload,
) -> Result<mir::Statement, SyntaxError> {
    let text = lower_if_unless_inline(payload, state, true, node.span)?;
    Ok(mir::Statement::AppendTextNode(mir::AppendTextNode {
        text,
        span: node.span,
    }))
}

// ── component / helper ─────────────────────────────────────────────────

fn assert_component(
    node: &ast::AppendContent,
    _state: &NormalizeState,
) -> Result<CurryPayload, SyntaxError> {
    assert_valid_curry_usage("{{component}}", "component", &node.args, node.span)
}

fn translate_component(
    node: &ast::AppendContent,
    state: &mut NormalizeState,
    payload: CurryPayload,
) -> Result<mir::Statement, SyntaxError> {
    let definition = expressions::visit_expr(&payload.definition, state);
    let args = expressions::visit_args(&payload.args, state);
    let (definition, args) = all2(definition, args)?;
    // Block attachment is a later pass's concern for the append form.
    Ok(mir::Statement::InvokeComponent(mir::InvokeComponent {
        definition,
        args,
        blocks: None,
        span: node.span,
    }))
}

fn assert_helper(
    node: &ast::AppendContent,
    _state: &NormalizeState,
) -> Result<CurryPayload, SyntaxError> {
    assert_valid_curry_usage("{{helper}}", "helper", &node.args, node.span)
}

fn translate_helper(
    node: &ast::AppendContent,
    state: &mut NormalizeState,
    payload: CurryPayload,
) -> Result<mir::Statement, SyntaxError> {
    let definition = expressions::visit_expr(&payload.definition, state);
    let args = expressions::visit_args(&payload.args, state);
    let (callee, args) = all2(definition, args)?;
    let text = mir::ExpressionNode::Call(Box::new(mir::CallExpression {
        callee,
        args,
        span: node.span,
    }));
    Ok(mir::Statement::AppendTextNode(mir::AppendTextNode {
        text,
        span: node.span,
    }))
}
