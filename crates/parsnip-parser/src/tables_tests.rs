use std::collections::BTreeSet;

use parsnip_core::{Grammar, GrammarBuilder, Symbol, SymbolTable};

use crate::tables::{BuildError, LrTables};

fn list_grammar() -> (SymbolTable, Grammar) {
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
fn first_sets_of_list_grammar() {
    let (table, grammar) = list_grammar();
    let tables = LrTables::build(&grammar).unwrap();
    let nl = table.get("<number-list>").unwrap();
    let n = table.get("N").unwrap();

    let singleton = |s: Symbol| BTreeSet::from([s]);
    assert_eq!(tables.firsts[&n], singleton(n));
    assert_eq!(tables.firsts[&nl], singleton(n));
    assert_eq!(tables.firsts[&Symbol::START], singleton(n));
}

#[test]
fn follow_sets_of_list_grammar() {
    let (table, grammar) = list_grammar();
    let tables = LrTables::build(&grammar).unwrap();
    let nl = table.get("<number-list>").unwrap();

    assert_eq!(tables.follows[&nl], BTreeSet::from([Symbol::EOI]));
}

#[test]
fn caches_mirror_productions() {
    let (_, grammar) = list_grammar();
    let tables = LrTables::build(&grammar).unwrap();

    for (id, p) in grammar.productions().iter().enumerate() {
        assert_eq!(tables.rule_len[id], p.rhs.len());
        assert_eq!(tables.reduce_symbol[id], p.lhs);
    }
}

#[test]
fn index_maps_cover_all_symbols() {
    let (_, grammar) = list_grammar();
    let tables = LrTables::build(&grammar).unwrap();

    assert_eq!(
        tables.terminal_index.len() + tables.non_terminal_index.len(),
        grammar.symbols().len()
    );
    for (col, (&t, &idx)) in tables.terminal_index.iter().enumerate() {
        assert_eq!(col, idx);
        assert!(grammar.is_terminal(t));
    }
}

#[test]
fn every_state_is_reachable_from_state_zero() {
    let (_, grammar) = list_grammar();
    let tables = LrTables::build(&grammar).unwrap();

    let n = tables.states.len();
    let mut reachable = vec![false; n];
    reachable[0] = true;
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..n {
            if !reachable[i] {
                continue;
            }
            for &cell in tables.actions[i].iter().filter(|&&c| c > 0) {
                let target = cell as usize - 1;
                if !reachable[target] {
                    reachable[target] = true;
                    changed = true;
                }
            }
            for &cell in tables.gotos[i].iter().filter(|&&c| c > 0) {
                let target = cell as usize - 1;
                if !reachable[target] {
                    reachable[target] = true;
                    changed = true;
                }
            }
        }
    }
    assert!(reachable.into_iter().all(|r| r));
}

#[test]
fn action_cells_are_in_range() {
    let (_, grammar) = list_grammar();
    let tables = LrTables::build(&grammar).unwrap();

    let n_states = tables.states.len() as i32;
    let n_rules = grammar.productions().len() as i32;
    for row in &tables.actions {
        for &cell in row {
            assert!(cell <= n_states && cell >= -n_rules);
        }
    }
}

#[test]
fn expected_terminals_of_start_state() {
    let (table, grammar) = list_grammar();
    let tables = LrTables::build(&grammar).unwrap();
    let n = table.get("N").unwrap();

    assert_eq!(tables.expected_terminals(0), vec![n]);
}

#[test]
fn shift_reduce_conflict_is_fatal() {
    let mut table = SymbolTable::new();
    let e = table.intern("<expr>");
    let plus = table.intern("PLUS");
    let n = table.intern("N");

    let mut builder = GrammarBuilder::new(Symbol::START);
    builder.rule(Symbol::START, [e, Symbol::EOI]);
    builder.rule(e, [e, plus, e]);
    builder.rule(e, [n]);
    let grammar = builder.finish().unwrap();

    assert!(matches!(
        LrTables::build(&grammar),
        Err(BuildError::ShiftReduce { .. })
    ));
}

#[test]
fn reduce_reduce_conflict_is_fatal() {
    let mut table = SymbolTable::new();
    let x = table.intern("<x>");
    let a = table.intern("<a>");
    let b = table.intern("<b>");
    let n = table.intern("N");

    let mut builder = GrammarBuilder::new(Symbol::START);
    builder.rule(Symbol::START, [x, Symbol::EOI]);
    builder.rule(x, [a]);
    builder.rule(x, [b]);
    builder.rule(a, [n]);
    builder.rule(b, [n]);
    let grammar = builder.finish().unwrap();

    assert!(matches!(
        LrTables::build(&grammar),
        Err(BuildError::ReduceReduce { .. })
    ));
}

#[test]
fn missing_start_rule_is_fatal() {
    let mut table = SymbolTable::new();
    let a = table.intern("<a>");
    let n = table.intern("N");

    let mut builder = GrammarBuilder::new(Symbol::START);
    builder.rule(a, [n]);
    let grammar = builder.finish().unwrap();

    assert_eq!(LrTables::build(&grammar).unwrap_err(), BuildError::NoStartRule);
}

#[test]
fn duplicate_start_rule_is_fatal() {
    let mut table = SymbolTable::new();
    let a = table.intern("<a>");
    let b = table.intern("<b>");
    let n = table.intern("N");
    let m = table.intern("M");

    let mut builder = GrammarBuilder::new(Symbol::START);
    builder.rule(Symbol::START, [a, Symbol::EOI]);
    builder.rule(Symbol::START, [b, Symbol::EOI]);
    builder.rule(a, [n]);
    builder.rule(b, [m]);
    let grammar = builder.finish().unwrap();

    assert_eq!(
        LrTables::build(&grammar).unwrap_err(),
        BuildError::DuplicateStartRule
    );
}
