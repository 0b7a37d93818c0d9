//! Template normalization: lowering the checked AST into MIR.
//!
//! The walk is driven by two generic visitors — [`content`] for statements,
//! [`expressions`] for values — which consult the position-scoped keyword
//! tables in [`keywords`] before falling through to generic call lowering.
//! All user-facing failures travel as [`SyntaxError`] results; the only
//! panics in this module tree are duplicate keyword registrations, which
//! are programming errors caught at table construction.

pub mod keywords;
pub mod result;

mod content;
mod expressions;

use tracing::debug;
use weft_syntax::ast;
use weft_syntax::scope::ScopeTable;
use weft_syntax::SyntaxError;

use crate::mir;

/// Per-compilation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Disallow dynamic features (`{{partial}}`, implicit globals).
    pub strict_mode: bool,
}

/// Mutable state threaded through one template's normalization.
///
/// Exclusively owned by one in-progress compilation; concurrent
/// compilations each get their own.
pub struct NormalizeState {
    pub scope: ScopeTable,
    strict_mode: bool,
    cursor_count: u32,
}

impl NormalizeState {
    pub fn new(options: NormalizeOptions) -> Self {
        NormalizeState {
            scope: ScopeTable::new(),
            strict_mode: options.strict_mode,
            cursor_count: 0,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict_mode
    }

    /// Mint a cursor id unique within this compilation.
    pub fn generate_unique_cursor(&mut self) -> String {
        let id = self.cursor_count;
        self.cursor_count += 1;
        format!("%cursor:{id}%")
    }

    fn into_scope(self) -> ScopeTable {
        self.scope
    }
}

/// Lower a parsed template into MIR.
///
/// Surfaces the first failing statement's syntax error; on success the
/// result carries the final scope table for the encoder.
pub fn normalize(
    template: &ast::Template,
    options: NormalizeOptions,
) -> Result<mir::NormalizedTemplate, SyntaxError> {
    debug!(
        nodes = template.body.len(),
        strict = options.strict_mode,
        "normalizing template"
    );
    let mut state = NormalizeState::new(options);
    let body = content::visit_body(&template.body, &mut state)?;
    debug!(
        statements = body.len(),
        blocks = state.scope.blocks().count(),
        has_eval = state.scope.has_eval(),
        "normalization complete"
    );
    Ok(mir::NormalizedTemplate {
        body,
        scope: state.into_scope(),
        span: template.span,
    })
}
