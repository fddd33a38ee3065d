use std::collections::BTreeSet;

use crate::{GrammarBuilder, GrammarError, Symbol, SymbolTable};

fn list_grammar() -> (SymbolTable, crate::Grammar) {
    let mut table = SymbolTable::new();
    let nl = table.intern("<number-list>");
    let n = table.intern("N");
    let comma = table.intern("COMMA");

    let mut builder = GrammarBuilder::new(Symbol::START);
    builder.rule(Symbol::START, [nl, Symbol::EOI]);
    builder.rule(nl, [n]);
    builder.rule(nl, [n, comma, nl]);

    (table, builder.finish().unwrap())
}

#[test]
fn derives_symbol_sets() {
    let (table, grammar) = list_grammar();
    let nl = table.get("<number-list>").unwrap();
    let n = table.get("N").unwrap();
    let comma = table.get("COMMA").unwrap();

    assert_eq!(grammar.non_terminals(), &[Symbol::START, nl]);
    assert_eq!(grammar.terminals(), &[Symbol::EOI, n, comma]);
    assert_eq!(
        grammar.symbols().len(),
        grammar.terminals().len() + grammar.non_terminals().len()
    );
}

#[test]
fn terminal_classification() {
    let (table, grammar) = list_grammar();
    let nl = table.get("<number-list>").unwrap();
    let n = table.get("N").unwrap();

    assert!(grammar.is_terminal(n));
    assert!(!grammar.is_terminal(nl));
    assert!(grammar.is_non_terminal(nl));
    assert!(grammar.is_non_terminal(Symbol::START));
    assert!(!grammar.is_non_terminal(n));
}

#[test]
fn production_numbering_follows_declaration_order() {
    let (table, grammar) = list_grammar();
    let nl = table.get("<number-list>").unwrap();

    assert_eq!(grammar.production(0).lhs, Symbol::START);
    assert_eq!(grammar.production(1).lhs, nl);
    assert_eq!(grammar.production(1).rhs.len(), 1);
    assert_eq!(grammar.production(2).rhs.len(), 3);
}

#[test]
fn rejects_empty_rhs() {
    let mut table = SymbolTable::new();
    let a = table.intern("<a>");

    let mut builder = GrammarBuilder::new(Symbol::START);
    builder.rule(Symbol::START, [a, Symbol::EOI]);
    builder.rule(a, []);

    assert_eq!(
        builder.finish().unwrap_err(),
        GrammarError::EmptyRhs { production: 1 }
    );
}

#[test]
fn rejects_eoi_as_lhs() {
    let mut table = SymbolTable::new();
    let a = table.intern("<a>");

    let mut builder = GrammarBuilder::new(Symbol::START);
    builder.rule(Symbol::START, [a, Symbol::EOI]);
    builder.rule(Symbol::EOI, [a]);

    assert_eq!(
        builder.finish().unwrap_err(),
        GrammarError::EoiRewritten { production: 1 }
    );
}

#[test]
fn important_goal_walks_unit_productions() {
    let mut table = SymbolTable::new();
    let stmt = table.intern("<stmt>");
    let expr = table.intern("<expr>");
    let atom = table.intern("<atom>");
    let id = table.intern("ID");

    let mut builder = GrammarBuilder::new(Symbol::START);
    builder.rule(Symbol::START, [stmt, Symbol::EOI]);
    builder.rule(stmt, [expr]);
    builder.rule(expr, [atom]);
    builder.rule(atom, [id]);
    let grammar = builder.finish().unwrap();

    let candidates: BTreeSet<Symbol> = [stmt, expr, atom].into_iter().collect();
    assert_eq!(grammar.important_goal(atom, &candidates), stmt);

    // The walk stops as soon as the ancestor is not itself a candidate.
    let narrow: BTreeSet<Symbol> = [expr, atom].into_iter().collect();
    assert_eq!(grammar.important_goal(atom, &narrow), expr);
}
