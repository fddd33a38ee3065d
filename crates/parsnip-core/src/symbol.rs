//! Grammar symbol identities.
//!
//! A `Symbol` is a cheap integer handle minted by a `SymbolTable`. Comparing
//! two symbols is O(1) integer comparison. Two distinguished symbols exist in
//! every table: the grammar axiom `Symbol::START` and the end-of-input
//! sentinel `Symbol::EOI`, fixed at ids 0 and 1.

use std::collections::HashMap;

/// A lightweight handle to an interned symbol name.
///
/// Symbols are ordered by minting order, not lexicographically; use
/// `SymbolTable::resolve` if you need the name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize)]
#[serde(transparent)]
pub struct Symbol(u32);

impl Symbol {
    /// The grammar axiom. The user-defined start non-terminal aliases it.
    pub const START: Symbol = Symbol(0);

    /// The end-of-input sentinel produced by every lexer at exhaustion.
    pub const EOI: Symbol = Symbol(1);

    /// Raw index for serialization/debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Create a Symbol from a raw index. Use only for deserialization.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// Symbol factory and name table.
///
/// Mints symbols with a per-table monotonic counter and remembers their
/// printable names. A fresh table always contains `START` (named `<start>`)
/// and `EOI`. Symbols from different tables must not be mixed in one
/// grammar; nothing checks this at runtime.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    /// Map from name to symbol for deduplication.
    map: HashMap<String, Symbol>,
    /// Names indexed by symbol id.
    names: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            map: HashMap::new(),
            names: Vec::new(),
        };
        table.intern("<start>");
        table.intern("EOI");
        table
    }

    /// Intern a name, returning its Symbol.
    /// If the name was already interned, returns the existing Symbol.
    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(&sym) = self.map.get(name) {
            return sym;
        }

        let sym = Symbol(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.map.insert(name.to_owned(), sym);
        sym
    }

    /// Look up a name without minting.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.map.get(name).copied()
    }

    /// Resolve a Symbol back to its name.
    ///
    /// # Panics
    /// Panics if the symbol was not minted by this table.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.names[sym.0 as usize]
    }

    /// Try to resolve a Symbol, returning None if it is foreign.
    #[inline]
    pub fn try_resolve(&self, sym: Symbol) -> Option<&str> {
        self.names.get(sym.0 as usize).map(|s| s.as_str())
    }

    /// Number of minted symbols, sentinels included.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over all symbols with their names, in minting order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, s)| (Symbol(i as u32), s.as_str()))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
