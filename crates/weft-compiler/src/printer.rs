//! Human-readable MIR printer.
//!
//! Renders a [`NormalizedTemplate`] as an indented listing for debugging
//! and the CLI's `print-mir` subcommand. The format is for humans only;
//! the serialized interchange format is the serde JSON form.

use std::fmt;

use weft_syntax::ast::{LiteralValue, PathExpression, VariableReference};
use weft_syntax::entity::EntityRef;

use crate::mir::{
    Args, ExpressionNode, Named, NamedBlock, NormalizedTemplate, Positional, Statement,
};

fn indent(f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
    for _ in 0..level {
        write!(f, "  ")?;
    }
    Ok(())
}

fn fmt_literal(value: &LiteralValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        LiteralValue::String(s) => write!(f, "{s:?}"),
        LiteralValue::Number(n) => {
            if n.fract() == 0.0 && n.is_finite() {
                write!(f, "{n:.1}")
            } else {
                write!(f, "{n}")
            }
        }
        LiteralValue::Boolean(b) => write!(f, "{b}"),
        LiteralValue::Null => write!(f, "null"),
        LiteralValue::Undefined => write!(f, "undefined"),
    }
}

fn fmt_path(path: &PathExpression, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &path.head {
        VariableReference::This => write!(f, "this")?,
        VariableReference::Arg { name } => write!(f, "{name}")?,
        VariableReference::Local { name } => write!(f, "{name}")?,
        VariableReference::Free { name } => write!(f, "{name}")?,
    }
    for segment in &path.tail {
        write!(f, ".{segment}")?;
    }
    Ok(())
}

fn fmt_expr(expr: &ExpressionNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expr {
        ExpressionNode::Literal(lit) => fmt_literal(&lit.value, f),
        ExpressionNode::Path(path) => fmt_path(path, f),
        ExpressionNode::Call(call) => {
            write!(f, "(")?;
            fmt_expr(&call.callee, f)?;
            fmt_args(&call.args, f)?;
            write!(f, ")")
        }
        ExpressionNode::Not(not) => {
            write!(f, "(not ")?;
            fmt_expr(&not.value, f)?;
            write!(f, ")")
        }
        ExpressionNode::IfInline(if_inline) => {
            write!(f, "(if ")?;
            fmt_expr(&if_inline.condition, f)?;
            write!(f, " ")?;
            fmt_expr(&if_inline.truthy, f)?;
            if let Some(falsy) = &if_inline.falsy {
                write!(f, " ")?;
                fmt_expr(falsy, f)?;
            }
            write!(f, ")")
        }
        ExpressionNode::HasBlock(has_block) => {
            write!(
                f,
                "(has-block {:?} block{})",
                has_block.target.as_str(),
                has_block.symbol.index()
            )
        }
        ExpressionNode::HasBlockParams(has_block_params) => {
            write!(
                f,
                "(has-block-params {:?} block{})",
                has_block_params.target.as_str(),
                has_block_params.symbol.index()
            )
        }
        ExpressionNode::Curry(curry) => {
            write!(f, "(curry {} ", curry.kind.as_str())?;
            fmt_expr(&curry.definition, f)?;
            fmt_args(&curry.args, f)?;
            write!(f, ")")
        }
        ExpressionNode::Log(log) => {
            write!(f, "(log")?;
            fmt_positional(&log.positional, f)?;
            write!(f, ")")
        }
    }
}

fn fmt_positional(positional: &Positional, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for expr in &positional.exprs {
        write!(f, " ")?;
        fmt_expr(expr, f)?;
    }
    Ok(())
}

fn fmt_named(named: &Named, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for entry in &named.entries {
        write!(f, " {}=", entry.name)?;
        fmt_expr(&entry.value, f)?;
    }
    Ok(())
}

fn fmt_args(args: &Args, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt_positional(&args.positional, f)?;
    fmt_named(&args.named, f)
}

fn fmt_block(block: &NamedBlock, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
    indent(f, level)?;
    write!(f, "block {:?}", block.name.as_str())?;
    if !block.params.is_empty() {
        write!(f, " |")?;
        for (i, param) in block.params.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, "|")?;
    }
    writeln!(f, " {{")?;
    for statement in &block.body {
        fmt_statement(statement, f, level + 1)?;
    }
    indent(f, level)?;
    writeln!(f, "}}")
}

fn fmt_statement(statement: &Statement, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
    match statement {
        Statement::AppendTextNode(append) => {
            indent(f, level)?;
            write!(f, "append-text ")?;
            fmt_expr(&append.text, f)?;
            writeln!(f)
        }
        Statement::AppendTrustedHtml(append) => {
            indent(f, level)?;
            write!(f, "append-html ")?;
            fmt_expr(&append.html, f)?;
            writeln!(f)
        }
        Statement::Yield(stmt) => {
            indent(f, level)?;
            write!(
                f,
                "yield block{} to {:?}",
                stmt.to.index(),
                stmt.target.as_str()
            )?;
            fmt_positional(&stmt.positional, f)?;
            writeln!(f)
        }
        Statement::Partial(partial) => {
            indent(f, level)?;
            write!(f, "partial ")?;
            fmt_expr(&partial.target, f)?;
            writeln!(f)
        }
        Statement::Debugger(_) => {
            indent(f, level)?;
            writeln!(f, "debugger")
        }
        Statement::InvokeComponent(invoke) => {
            indent(f, level)?;
            write!(f, "component ")?;
            fmt_expr(&invoke.definition, f)?;
            fmt_args(&invoke.args, f)?;
            match &invoke.blocks {
                Some(blocks) if !blocks.blocks.is_empty() => {
                    writeln!(f, " {{")?;
                    for block in &blocks.blocks {
                        fmt_block(block, f, level + 1)?;
                    }
                    indent(f, level)?;
                    writeln!(f, "}}")
                }
                _ => writeln!(f),
            }
        }
        Statement::If(stmt) => {
            indent(f, level)?;
            write!(f, "if ")?;
            fmt_expr(&stmt.condition, f)?;
            writeln!(f, " {{")?;
            fmt_block(&stmt.block, f, level + 1)?;
            if let Some(inverse) = &stmt.inverse {
                fmt_block(inverse, f, level + 1)?;
            }
            indent(f, level)?;
            writeln!(f, "}}")
        }
        Statement::Each(stmt) => {
            indent(f, level)?;
            write!(f, "each ")?;
            fmt_expr(&stmt.value, f)?;
            if let Some(key) = &stmt.key {
                write!(f, " key=")?;
                fmt_expr(key, f)?;
            }
            writeln!(f, " {{")?;
            fmt_block(&stmt.block, f, level + 1)?;
            if let Some(inverse) = &stmt.inverse {
                fmt_block(inverse, f, level + 1)?;
            }
            indent(f, level)?;
            writeln!(f, "}}")
        }
        Statement::With(stmt) => {
            indent(f, level)?;
            write!(f, "with ")?;
            fmt_expr(&stmt.value, f)?;
            writeln!(f, " {{")?;
            fmt_block(&stmt.block, f, level + 1)?;
            if let Some(inverse) = &stmt.inverse {
                fmt_block(inverse, f, level + 1)?;
            }
            indent(f, level)?;
            writeln!(f, "}}")
        }
        Statement::Let(stmt) => {
            indent(f, level)?;
            write!(f, "let")?;
            fmt_positional(&stmt.positional, f)?;
            writeln!(f, " {{")?;
            fmt_block(&stmt.block, f, level + 1)?;
            indent(f, level)?;
            writeln!(f, "}}")
        }
        Statement::InElement(stmt) => {
            indent(f, level)?;
            write!(f, "in-element {} ", stmt.guid)?;
            fmt_expr(&stmt.destination, f)?;
            if let Some(insert_before) = &stmt.insert_before {
                write!(f, " insertBefore=")?;
                fmt_expr(insert_before, f)?;
            }
            writeln!(f, " {{")?;
            fmt_block(&stmt.block, f, level + 1)?;
            indent(f, level)?;
            writeln!(f, "}}")
        }
    }
}

impl fmt::Display for NormalizedTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "template [{}] {{", self.span)?;
        for (symbol, name) in self.scope.blocks() {
            indent(f, 1)?;
            writeln!(f, "block{} = {:?}", symbol.index(), name)?;
        }
        if self.scope.has_eval() {
            indent(f, 1)?;
            writeln!(f, "has_eval")?;
        }
        for statement in &self.body {
            fmt_statement(statement, f, 1)?;
        }
        writeln!(f, "}}")
    }
}
