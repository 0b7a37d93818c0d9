//! Position-scoped keyword tables.
//!
//! A keyword is a reserved callee name recognized in one syntactic
//! position: append (`{{kw ...}}`), block (`{{#kw ...}}`), or call
//! (`(kw ...)`). Each table maps names to an (assert, translate) pair:
//! `assert` validates the node's shape and extracts a typed payload,
//! `translate` lowers the payload to MIR. The pair always runs in that
//! order and `translate` never runs when `assert` fails.
//!
//! Dispatch is exact and case-sensitive and never consults argument
//! shape. Registering the same name twice in one table is a programming
//! error and panics at table construction.

pub mod append;
pub mod block;
pub mod call;

mod utils;

use std::collections::BTreeMap;

use tracing::trace;
use weft_syntax::ast;
use weft_syntax::span::Span;
use weft_syntax::SyntaxError;

use super::NormalizeState;

pub use append::APPEND_KEYWORDS;
pub use block::BLOCK_KEYWORDS;
pub use call::CALL_KEYWORDS;

/// A syntax node a keyword table can dispatch on.
pub trait KeywordNode {
    /// The bare free-variable callee name, if the node has one.
    fn keyword_name(&self) -> Option<&str>;
    fn span(&self) -> Span;
}

impl KeywordNode for ast::AppendContent {
    fn keyword_name(&self) -> Option<&str> {
        self.callee.as_free_variable()
    }
    fn span(&self) -> Span {
        self.span
    }
}

impl KeywordNode for ast::InvokeBlock {
    fn keyword_name(&self) -> Option<&str> {
        self.callee.as_free_variable()
    }
    fn span(&self) -> Span {
        self.span
    }
}

impl KeywordNode for ast::CallExpression {
    fn keyword_name(&self) -> Option<&str> {
        self.callee.as_free_variable()
    }
    fn span(&self) -> Span {
        self.span
    }
}

type KeywordDelegate<N, Out> =
    Box<dyn Fn(&N, &mut NormalizeState) -> Result<Out, SyntaxError> + Send + Sync>;

/// One registered keyword: the assert/translate pair composed behind a
/// single delegate.
pub struct Keyword<N, Out> {
    delegate: KeywordDelegate<N, Out>,
}

impl<N: 'static, Out: 'static> Keyword<N, Out> {
    fn new<P: 'static>(
        assert: fn(&N, &NormalizeState) -> Result<P, SyntaxError>,
        translate: fn(&N, &mut NormalizeState, P) -> Result<Out, SyntaxError>,
    ) -> Self {
        Keyword {
            delegate: Box::new(move |node, state| {
                let payload = assert(node, state)?;
                translate(node, state, payload)
            }),
        }
    }
}

/// The keyword table for one syntactic position.
pub struct Keywords<N, Out> {
    position: &'static str,
    keywords: BTreeMap<&'static str, Keyword<N, Out>>,
}

/// Start an empty table for `position`.
pub fn keywords<N, Out>(position: &'static str) -> Keywords<N, Out>
where
    N: KeywordNode + 'static,
    Out: 'static,
{
    Keywords {
        position,
        keywords: BTreeMap::new(),
    }
}

impl<N, Out> Keywords<N, Out>
where
    N: KeywordNode + 'static,
    Out: 'static,
{
    /// Register a keyword. Panics if `name` is already registered in this
    /// table.
    pub fn kw<P: 'static>(
        mut self,
        name: &'static str,
        assert: fn(&N, &NormalizeState) -> Result<P, SyntaxError>,
        translate: fn(&N, &mut NormalizeState, P) -> Result<Out, SyntaxError>,
    ) -> Self {
        if self
            .keywords
            .insert(name, Keyword::new(assert, translate))
            .is_some()
        {
            panic!(
                "duplicate keyword `{name}` registered at {} position",
                self.position
            );
        }
        self
    }

    /// Dispatch `node` if its callee names a keyword in this table.
    ///
    /// `None` means "not a keyword here" and sends the caller down the
    /// generic lowering path. `Some(Err(..))` is a real syntax error in a
    /// recognized keyword.
    pub fn translate(
        &self,
        node: &N,
        state: &mut NormalizeState,
    ) -> Option<Result<Out, SyntaxError>> {
        let name = node.keyword_name()?;
        let keyword = self.keywords.get(name)?;
        trace!(
            keyword = name,
            position = self.position,
            span = %node.span(),
            "keyword matched"
        );
        Some((keyword.delegate)(node, state))
    }

    pub fn position(&self) -> &'static str {
        self.position
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.keywords.keys().copied()
    }
}
