//! Generic expression and argument lowering.
//!
//! Literals and paths pass through unchanged. Call expressions are offered
//! to the call-position keyword table first; unmatched calls lower to a
//! generic `mir::CallExpression`.

use weft_syntax::ast;
use weft_syntax::SyntaxError;

use crate::mir;
use crate::normalize::keywords::CALL_KEYWORDS;
use crate::normalize::result::all2;
use crate::normalize::NormalizeState;

pub(crate) fn visit_expr(
    node: &ast::ExpressionNode,
    state: &mut NormalizeState,
) -> Result<mir::ExpressionNode, SyntaxError> {
    match node {
        ast::ExpressionNode::Literal(lit) => Ok(mir::ExpressionNode::Literal(lit.clone())),
        ast::ExpressionNode::Path(path) => Ok(mir::ExpressionNode::Path(path.clone())),
        ast::ExpressionNode::Call(call) => visit_call(call, state),
    }
}

fn visit_call(
    node: &ast::CallExpression,
    state: &mut NormalizeState,
) -> Result<mir::ExpressionNode, SyntaxError> {
    if let Some(result) = CALL_KEYWORDS.translate(node, state) {
        return result;
    }

    let callee = visit_expr(&node.callee, state);
    let args = visit_args(&node.args, state);
    let (callee, args) = all2(callee, args)?;
    Ok(mir::ExpressionNode::Call(Box::new(mir::CallExpression {
        callee,
        args,
        span: node.span,
    })))
}

pub(crate) fn visit_positional(
    positional: &ast::PositionalArguments,
    state: &mut NormalizeState,
) -> Result<mir::Positional, SyntaxError> {
    let mut exprs = Vec::with_capacity(positional.len());
    for expr in &positional.exprs {
        exprs.push(visit_expr(expr, state)?);
    }
    Ok(mir::Positional {
        exprs,
        span: positional.span,
    })
}

pub(crate) fn visit_named(
    named: &ast::NamedArguments,
    state: &mut NormalizeState,
) -> Result<mir::Named, SyntaxError> {
    let mut entries = Vec::with_capacity(named.len());
    for entry in &named.entries {
        entries.push(mir::NamedEntry {
            name: entry.name.clone(),
            value: visit_expr(&entry.value, state)?,
        });
    }
    Ok(mir::Named {
        entries,
        span: named.span,
    })
}

pub(crate) fn visit_args(
    args: &ast::Args,
    state: &mut NormalizeState,
) -> Result<mir::Args, SyntaxError> {
    let positional = visit_positional(&args.positional, state);
    let named = visit_named(&args.named, state);
    let (positional, named) = all2(positional, named)?;
    Ok(mir::Args {
        positional,
        named,
        span: args.span,
    })
}
