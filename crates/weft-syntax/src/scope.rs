//! Per-template scope bookkeeping.
//!
//! The scope table records the whole-template facts that normalization
//! discovers as it walks the tree: which named blocks the template yields
//! to, and whether it ever evaluates `{{partial}}` (which forces the
//! runtime to keep the full local scope alive).

use serde::{Deserialize, Serialize};

use crate::define_entity;
use crate::entity::PrimaryMap;

define_entity!(BlockSymbol);

/// Symbol table threaded through normalization of a single template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeTable {
    blocks: PrimaryMap<BlockSymbol, String>,
    has_eval: bool,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the symbol for the named block, allocating one on first use.
    ///
    /// Asking for the same name twice returns the same symbol. The name
    /// `"inverse"` is an alias for `"else"`: both resolve to one block.
    pub fn allocate_block(&mut self, name: &str) -> BlockSymbol {
        let name = if name == "inverse" { "else" } else { name };
        if let Some((symbol, _)) = self.blocks.iter().find(|(_, n)| n.as_str() == name) {
            return symbol;
        }
        self.blocks.push(name.to_string())
    }

    /// Mark the template as evaluating `{{partial}}`. Never unset.
    pub fn set_has_eval(&mut self) {
        self.has_eval = true;
    }

    pub fn has_eval(&self) -> bool {
        self.has_eval
    }

    pub fn block_name(&self, symbol: BlockSymbol) -> Option<&str> {
        self.blocks.get(symbol).map(String::as_str)
    }

    /// Allocated blocks in allocation order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockSymbol, &str)> {
        self.blocks.iter().map(|(symbol, name)| (symbol, name.as_str()))
    }
}
