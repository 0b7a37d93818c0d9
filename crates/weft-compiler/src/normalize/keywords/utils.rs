//! Shared keyword validators.
//!
//! Several keywords accept the same argument shapes in more than one
//! position (`has-block` at append and call, `if`/`unless` inline at append
//! and call, the curry family everywhere). The validators here are plain
//! parameterized functions returning `Result` payloads, invoked from the
//! `assert` slot of each registration; the display name parameter only
//! changes message wording.

use weft_syntax::ast;
use weft_syntax::span::{SourceSlice, Span};
use weft_syntax::SyntaxError;

use crate::mir;
use crate::normalize::expressions;
use crate::normalize::result::all3;
use crate::normalize::NormalizeState;

fn named_names(named: &ast::NamedArguments) -> String {
    named
        .entries
        .iter()
        .map(|entry| entry.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── has-block usage ────────────────────────────────────────────────────

/// Validate `has-block`/`has-block-params` arguments and resolve the
/// target block name (defaulting to `default`).
pub(crate) fn assert_valid_has_block_usage(
    display: &str,
    args: &ast::Args,
    span: Span,
) -> Result<SourceSlice, SyntaxError> {
    if !args.named.is_empty() {
        return Err(SyntaxError::new(
            format!("{display} does not take any named arguments"),
            args.named.span,
        ));
    }

    match args.positional.exprs.as_slice() {
        [] => Ok(SourceSlice::synthetic("default")),
        [target] => match target.as_string_literal() {
            Some(chars) => Ok(SourceSlice::new(chars, target.span())),
            None => Err(SyntaxError::new(
                format!("{display} can only receive a string literal as its first argument"),
                target.span(),
            )),
        },
        _ => Err(SyntaxError::new(
            format!("{display} only takes a single positional argument"),
            span,
        )),
    }
}

// ── if/unless usage ────────────────────────────────────────────────────

/// The validated pieces of an inline `if`/`unless`.
pub(crate) struct IfUnlessPayload {
    pub(crate) condition: ast::ExpressionNode,
    pub(crate) truthy: ast::ExpressionNode,
    pub(crate) falsy: Option<ast::ExpressionNode>,
}

/// Validate inline `if`/`unless` arguments: a condition, a value for the
/// matching state, and optionally a value for the opposite state. The
/// `inverted` flag affects message wording only.
pub(crate) fn assert_valid_if_unless_inline_usage(
    display: &str,
    inverted: bool,
    args: &ast::Args,
    span: Span,
) -> Result<IfUnlessPayload, SyntaxError> {
    if !args.named.is_empty() {
        return Err(SyntaxError::new(
            format!(
                "{display} cannot receive named parameters, received {}",
                named_names(&args.named)
            ),
            span,
        ));
    }

    let when_true = if inverted { "false" } else { "true" };
    let when_false = if inverted { "true" } else { "false" };

    match args.positional.exprs.as_slice() {
        [condition, truthy] => Ok(IfUnlessPayload {
            condition: condition.clone(),
            truthy: truthy.clone(),
            falsy: None,
        }),
        [condition, truthy, falsy] => Ok(IfUnlessPayload {
            condition: condition.clone(),
            truthy: truthy.clone(),
            falsy: Some(falsy.clone()),
        }),
        exprs if exprs.len() < 2 => Err(SyntaxError::new(
            format!(
                "When used inline, {display} requires at least two parameters 1. the condition \
                 that determines the state of the {display}, and 2. the value to return if the \
                 condition is {when_true}. Did not receive enough parameters"
            ),
            span,
        )),
        exprs => Err(SyntaxError::new(
            format!(
                "When used inline, {display} can receive a maximum of three positional \
                 parameters 1. the condition that determines the state of the {display}, 2. the \
                 value to return if the condition is {when_true}, and 3. the value to return if \
                 the condition is {when_false}. Received {} parameters",
                exprs.len()
            ),
            span,
        )),
    }
}

/// Validate block-form `if`/`unless` arguments and extract the condition.
pub(crate) fn assert_valid_if_unless_block_usage(
    display: &str,
    args: &ast::Args,
    span: Span,
) -> Result<ast::ExpressionNode, SyntaxError> {
    if !args.named.is_empty() {
        return Err(SyntaxError::new(
            format!(
                "{display} cannot receive named parameters, received {}",
                named_names(&args.named)
            ),
            span,
        ));
    }

    match args.positional.exprs.as_slice() {
        [condition] => Ok(condition.clone()),
        [] => Err(SyntaxError::new(
            format!(
                "{display} requires a condition as its first positional parameter, did not \
                 receive any parameters"
            ),
            span,
        )),
        exprs => Err(SyntaxError::new(
            format!(
                "{display} can only receive one positional parameter in block form, the \
                 conditional value. Received {} parameters",
                exprs.len()
            ),
            span,
        )),
    }
}

/// Lower a validated inline `if`/`unless` to an `IfInline` expression,
/// `Not`-wrapping the condition when inverted. Branches are lowered
/// independently and joined, so the first failure wins in argument order.
pub(crate) fn lower_if_unless_inline(
    payload: IfUnlessPayload,
    state: &mut NormalizeState,
    inverted: bool,
    span: Span,
) -> Result<mir::ExpressionNode, SyntaxError> {
    let condition = expressions::visit_expr(&payload.condition, state);
    let truthy = expressions::visit_expr(&payload.truthy, state);
    let falsy = match &payload.falsy {
        Some(expr) => expressions::visit_expr(expr, state).map(Some),
        None => Ok(None),
    };

    let (condition, truthy, falsy) = all3(condition, truthy, falsy)?;

    let condition = if inverted {
        mir::ExpressionNode::Not(Box::new(mir::Not {
            value: condition,
            span,
        }))
    } else {
        condition
    };

    Ok(mir::ExpressionNode::IfInline(Box::new(mir::IfInline {
        condition,
        truthy,
        falsy,
        span,
    })))
}

// ── curry usage ────────────────────────────────────────────────────────

/// The validated pieces of a curry-family invocation: the definition
/// expression plus the remaining (partially applied) arguments.
pub(crate) struct CurryPayload {
    pub(crate) definition: ast::ExpressionNode,
    pub(crate) args: ast::Args,
}

/// Validate `component`/`helper`/`modifier` arguments: the first
/// positional is the definition, the rest curry onto it.
pub(crate) fn assert_valid_curry_usage(
    display: &str,
    definite: &str,
    args: &ast::Args,
    span: Span,
) -> Result<CurryPayload, SyntaxError> {
    match args.positional.exprs.split_first() {
        Some((definition, rest)) => Ok(CurryPayload {
            definition: definition.clone(),
            args: ast::Args {
                positional: ast::PositionalArguments {
                    exprs: rest.to_vec(),
                    span: args.positional.span,
                },
                named: args.named.clone(),
                span: args.span,
            },
        }),
        None => Err(SyntaxError::new(
            format!(
                "{display} requires a {definite} definition or identifier as its first \
                 positional parameter, did not receive any parameters"
            ),
            span,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers as h;

    #[test]
    fn test_has_block_defaults_to_default() {
        let args = h::args(vec![], vec![]);
        let target = assert_valid_has_block_usage("has-block", &args, Span::new(0, 0)).unwrap();
        assert_eq!(target.as_str(), "default");
        assert!(target.span.is_synthetic());
    }

    #[test]
    fn test_has_block_takes_explicit_string_target() {
        let args = h::args(vec![h::string("else")], vec![]);
        let target = assert_valid_has_block_usage("has-block", &args, Span::new(0, 0)).unwrap();
        assert_eq!(target.as_str(), "else");
    }

    #[test]
    fn test_curry_splits_definition_from_args() {
        let args = h::args(
            vec![h::free("def"), h::number(1.0)],
            vec![("title", h::string("x"))],
        );
        let payload =
            assert_valid_curry_usage("{{component}}", "component", &args, Span::new(0, 0)).unwrap();
        assert_eq!(payload.definition.as_free_variable(), Some("def"));
        assert_eq!(payload.args.positional.len(), 1);
        assert_eq!(payload.args.named.len(), 1);
    }

    #[test]
    fn test_curry_requires_a_definition() {
        let args = h::args(vec![], vec![]);
        let err = assert_valid_curry_usage("(helper)", "helper", &args, Span::new(3, 9))
            .err()
            .unwrap();
        assert!(err.message.starts_with("(helper) requires a helper definition"));
        assert_eq!(err.span, Span::new(3, 9));
    }

    #[test]
    fn test_if_unless_block_usage_extracts_condition() {
        let args = h::args(vec![h::free("ok")], vec![]);
        let condition =
            assert_valid_if_unless_block_usage("{{#if}}", &args, Span::new(0, 0)).unwrap();
        assert_eq!(condition.as_free_variable(), Some("ok"));
    }

    #[test]
    fn test_if_unless_block_usage_lists_named_parameters() {
        let args = h::args(vec![h::free("ok")], vec![("a", h::number(1.0)), ("b", h::number(2.0))]);
        let err = assert_valid_if_unless_block_usage("{{#unless}}", &args, Span::new(0, 0))
            .err()
            .unwrap();
        assert_eq!(
            err.message,
            "{{#unless}} cannot receive named parameters, received a, b"
        );
    }
}
