//! Human-readable rendering of grammars, item sets and parser tables.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use parsnip_core::{Grammar, Symbol, SymbolTable};

use crate::item::{Item, ItemSet};
use crate::tables::LrTables;

/// Renders the full diagnostic dump: productions, states, ACTION/GOTO
/// tables, FIRST and FOLLOW sets.
pub struct TablePrinter<'a> {
    tables: &'a LrTables,
    grammar: &'a Grammar,
    names: &'a SymbolTable,
}

impl<'a> TablePrinter<'a> {
    pub fn new(tables: &'a LrTables, grammar: &'a Grammar, names: &'a SymbolTable) -> Self {
        Self {
            tables,
            grammar,
            names,
        }
    }

    fn name(&self, s: Symbol) -> &str {
        self.names.try_resolve(s).unwrap_or("?")
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_grammar(&mut out);
        self.render_states(&mut out);
        self.render_actions(&mut out);
        self.render_gotos(&mut out);
        self.render_sets(&mut out, "FIRST", &self.tables.firsts);
        self.render_sets(&mut out, "FOLLOW", &self.tables.follows);
        out
    }

    pub fn render_grammar(&self, out: &mut String) {
        let _ = writeln!(out, "Start symbol: {}", self.name(self.grammar.start()));
        let _ = write!(out, "Terminals:");
        for &t in self.grammar.terminals() {
            let _ = write!(out, " {}", self.name(t));
        }
        let _ = writeln!(out);
        let _ = write!(out, "Non-terminals:");
        for &nt in self.grammar.non_terminals() {
            let _ = write!(out, " {}", self.name(nt));
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Productions:");
        for (id, p) in self.grammar.productions().iter().enumerate() {
            let _ = write!(out, "  {id}: {} ->", self.name(p.lhs));
            for &s in &p.rhs {
                let _ = write!(out, " {}", self.name(s));
            }
            let _ = writeln!(out);
        }
        let _ = writeln!(out);
    }

    fn render_item(&self, item: &Item, out: &mut String) {
        let p = self.grammar.production(item.production);
        let _ = write!(out, "{} ->", self.name(p.lhs));
        for (pos, &s) in p.rhs.iter().enumerate() {
            if item.dot == pos {
                let _ = write!(out, " .");
            }
            let _ = write!(out, " {}", self.name(s));
        }
        if item.dot == p.rhs.len() {
            let _ = write!(out, " .");
        }
    }

    fn render_state(&self, state: &ItemSet, out: &mut String) {
        for item in state {
            let _ = write!(out, "  ");
            self.render_item(item, out);
            let _ = writeln!(out);
        }
    }

    pub fn render_states(&self, out: &mut String) {
        for (i, state) in self.tables.states.iter().enumerate() {
            let _ = writeln!(out, "state {i}:");
            self.render_state(state, out);
        }
        let _ = writeln!(out);
    }

    pub fn render_actions(&self, out: &mut String) {
        let widths: Vec<usize> = self
            .tables
            .terminal_index
            .keys()
            .map(|&t| self.name(t).len().max(4) + 1)
            .collect();

        let _ = writeln!(
            out,
            "ACTION table (accept on state {}):",
            self.tables.accepting_state
        );
        let _ = write!(out, "{:>5}", "");
        for (col, &t) in self.tables.terminal_index.keys().enumerate() {
            let _ = write!(out, "{:>width$}", self.name(t), width = widths[col]);
        }
        let _ = writeln!(out);

        for (i, row) in self.tables.actions.iter().enumerate() {
            let _ = write!(out, "{i:>4}:");
            for (col, cell) in row.iter().enumerate() {
                let _ = write!(out, "{cell:>width$}", width = widths[col]);
            }
            let _ = writeln!(out);
        }
        let _ = writeln!(out);
    }

    pub fn render_gotos(&self, out: &mut String) {
        let widths: Vec<usize> = self
            .tables
            .non_terminal_index
            .keys()
            .map(|&nt| self.name(nt).len().max(4) + 1)
            .collect();

        let _ = writeln!(out, "GOTO table:");
        let _ = write!(out, "{:>5}", "");
        for (col, &nt) in self.tables.non_terminal_index.keys().enumerate() {
            let _ = write!(out, "{:>width$}", self.name(nt), width = widths[col]);
        }
        let _ = writeln!(out);

        for (i, row) in self.tables.gotos.iter().enumerate() {
            let _ = write!(out, "{i:>4}:");
            for (col, cell) in row.iter().enumerate() {
                let _ = write!(out, "{cell:>width$}", width = widths[col]);
            }
            let _ = writeln!(out);
        }
        let _ = writeln!(out);
    }

    fn render_sets(
        &self,
        out: &mut String,
        label: &str,
        sets: &BTreeMap<Symbol, BTreeSet<Symbol>>,
    ) {
        for (&sym, set) in sets {
            let _ = write!(out, "{label}({}) = {{", self.name(sym));
            for &s in set {
                let _ = write!(out, " {}", self.name(s));
            }
            let _ = writeln!(out, " }}");
        }
        let _ = writeln!(out);
    }
}
