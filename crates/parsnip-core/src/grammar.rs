//! Context-free grammars.
//!
//! A grammar is the tuple (start symbol, ordered production rules). The
//! terminal, non-terminal and full symbol sets are derived when the builder
//! finishes: non-terminals are the symbols appearing as some left-hand side,
//! the symbol set is the union of both sides, and terminals are the set
//! difference. Productions are identified by their index in declaration
//! order; the table generator and the parse driver both rely on that
//! numbering.

use std::collections::BTreeSet;

use crate::Symbol;

/// A rewrite rule `lhs -> rhs…`. The right-hand side is never empty.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Production {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

/// Errors detected when finishing a grammar definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// Epsilon productions are not supported by the table generator.
    #[error("production #{production} has an empty right-hand side")]
    EmptyRhs { production: usize },

    /// The end-of-input sentinel can never be rewritten.
    #[error("production #{production} rewrites the end-of-input sentinel")]
    EoiRewritten { production: usize },
}

/// A finalized context-free grammar. Read-only once built.
#[derive(Clone, Debug)]
pub struct Grammar {
    start: Symbol,
    productions: Vec<Production>,
    terminals: Vec<Symbol>,
    non_terminals: Vec<Symbol>,
    symbols: Vec<Symbol>,
}

impl Grammar {
    pub fn start(&self) -> Symbol {
        self.start
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, id: usize) -> &Production {
        &self.productions[id]
    }

    /// Symbols appearing only on right-hand sides, sorted by id.
    pub fn terminals(&self) -> &[Symbol] {
        &self.terminals
    }

    /// Symbols appearing as some left-hand side, sorted by id.
    pub fn non_terminals(&self) -> &[Symbol] {
        &self.non_terminals
    }

    /// All symbols of the grammar, sorted by id.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn is_terminal(&self, s: Symbol) -> bool {
        self.terminals.binary_search(&s).is_ok()
    }

    pub fn is_non_terminal(&self, s: Symbol) -> bool {
        self.non_terminals.binary_search(&s).is_ok()
    }

    /// Generalize a recovery goal by walking unit productions upward.
    ///
    /// While some production `M -> s` exists whose sole right-hand symbol is
    /// the current goal and whose left-hand side is itself a candidate,
    /// replace the goal with `M`. Used by the driver's panic-mode recovery
    /// to prefer the most general reduction target available.
    pub fn important_goal(&self, mut s: Symbol, candidates: &BTreeSet<Symbol>) -> Symbol {
        let mut done = false;
        while !done {
            done = true;
            for p in &self.productions {
                if p.rhs.len() == 1 && p.rhs[0] == s && candidates.contains(&p.lhs) {
                    s = p.lhs;
                    done = false;
                }
            }
        }
        s
    }
}

/// Accumulates production rules, then derives the symbol sets.
#[derive(Debug)]
pub struct GrammarBuilder {
    start: Symbol,
    productions: Vec<Production>,
}

impl GrammarBuilder {
    pub fn new(start: Symbol) -> Self {
        Self {
            start,
            productions: Vec::new(),
        }
    }

    /// Append a production rule. Rules are numbered in call order.
    pub fn rule(&mut self, lhs: Symbol, rhs: impl IntoIterator<Item = Symbol>) -> &mut Self {
        self.productions.push(Production {
            lhs,
            rhs: rhs.into_iter().collect(),
        });
        self
    }

    /// Validate the rules and derive the terminal and non-terminal sets.
    pub fn finish(self) -> Result<Grammar, GrammarError> {
        let mut all = BTreeSet::new();
        let mut lhs_set = BTreeSet::new();

        for (id, p) in self.productions.iter().enumerate() {
            if p.rhs.is_empty() {
                return Err(GrammarError::EmptyRhs { production: id });
            }
            if p.lhs == Symbol::EOI {
                return Err(GrammarError::EoiRewritten { production: id });
            }
            lhs_set.insert(p.lhs);
            all.insert(p.lhs);
            all.extend(p.rhs.iter().copied());
        }

        let terminals: Vec<Symbol> = all.difference(&lhs_set).copied().collect();
        let non_terminals: Vec<Symbol> = lhs_set.into_iter().collect();
        let symbols: Vec<Symbol> = all.into_iter().collect();

        Ok(Grammar {
            start: self.start,
            productions: self.productions,
            terminals,
            non_terminals,
            symbols,
        })
    }
}
