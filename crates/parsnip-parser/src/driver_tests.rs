use parsnip_core::{Coordinates, Grammar, GrammarBuilder, Symbol, SymbolTable, Token};

use crate::driver::{
    CollectingHandler, SilentHandler, SliceTokenSource, parse_to_tree, validate,
};
use crate::tables::LrTables;
use crate::tree::{ParseTree, TreeBuilder};

fn tok(symbol: Symbol, lexeme: &str) -> Token {
    Token::new(symbol, lexeme, Coordinates::default())
}

fn list_grammar() -> (SymbolTable, Grammar, LrTables) {
    let mut table = SymbolTable::new();
    let nl = table.intern("<number-list>");
    let n = table.intern("N");
    let comma = table.intern("COMMA");

    let mut builder = GrammarBuilder::new(Symbol::START);
    builder.rule(Symbol::START, [nl, Symbol::EOI]);
    builder.rule(nl, [n]);
    builder.rule(nl, [n, comma, nl]);
    let grammar = builder.finish().unwrap();
    let tables = LrTables::build(&grammar).unwrap();

    (table, grammar, tables)
}

fn leaf_count(tree: &ParseTree, symbol: Symbol) -> usize {
    match tree {
        ParseTree::Leaf { symbol: s, .. } => usize::from(*s == symbol),
        ParseTree::Node { children, .. } => {
            children.iter().map(|c| leaf_count(c, symbol)).sum()
        }
    }
}

#[test]
fn parses_comma_separated_list_into_nested_tree() {
    let (table, grammar, tables) = list_grammar();
    let nl = table.get("<number-list>").unwrap();
    let n = table.get("N").unwrap();
    let comma = table.get("COMMA").unwrap();

    let tokens = [
        tok(n, "1"),
        tok(comma, ","),
        tok(n, "2"),
        tok(comma, ","),
        tok(n, "3"),
        tok(Symbol::EOI, ""),
    ];
    let mut source = SliceTokenSource::new(&tokens);
    let tree = parse_to_tree(
        &tables,
        &grammar,
        &mut source,
        &mut TreeBuilder,
        &mut SilentHandler,
    )
    .unwrap()
    .expect("input is in the language");

    assert_eq!(tree.symbol(), nl);
    assert_eq!(tree.rule(), Some(2));
    assert_eq!(leaf_count(&tree, n), 3);

    // N COMMA <nested list>
    assert_eq!(tree.children().len(), 3);
    assert_eq!(tree.children()[0].lexeme(), Some("1"));
    let inner = &tree.children()[2];
    assert_eq!(inner.symbol(), nl);
    assert_eq!(inner.rule(), Some(2));
    assert_eq!(inner.children()[2].rule(), Some(1));
}

#[test]
fn validates_membership() {
    let (table, grammar, tables) = list_grammar();
    let n = table.get("N").unwrap();
    let comma = table.get("COMMA").unwrap();

    let good = [tok(n, "1"), tok(comma, ","), tok(n, "2"), tok(Symbol::EOI, "")];
    let mut source = SliceTokenSource::new(&good);
    assert!(validate(&tables, &grammar, &mut source, &mut SilentHandler).unwrap());

    let bad = [tok(comma, ","), tok(n, "1"), tok(Symbol::EOI, "")];
    let mut source = SliceTokenSource::new(&bad);
    assert!(!validate(&tables, &grammar, &mut source, &mut SilentHandler).unwrap());
}

#[test]
fn skips_tokens_outside_the_grammar() {
    let (mut table, grammar, tables) = list_grammar();
    let n = table.get("N").unwrap();
    let comma = table.get("COMMA").unwrap();
    let stray = table.intern("STRAY");

    let tokens = [
        tok(n, "1"),
        tok(stray, "@"),
        tok(comma, ","),
        tok(n, "2"),
        tok(Symbol::EOI, ""),
    ];
    let mut source = SliceTokenSource::new(&tokens);
    let mut handler = CollectingHandler::new();
    let tree = parse_to_tree(&tables, &grammar, &mut source, &mut TreeBuilder, &mut handler)
        .unwrap()
        .expect("stray token is skipped, rest is in the language");

    assert_eq!(handler.unknown.len(), 1);
    assert_eq!(handler.unknown[0].symbol, stray);
    assert!(handler.errors.is_empty());
    assert!(!tree.has_synthetic());
}

#[test]
fn reports_expected_terminals_on_error() {
    let (table, grammar, tables) = list_grammar();
    let n = table.get("N").unwrap();
    let comma = table.get("COMMA").unwrap();

    let tokens = [tok(comma, ","), tok(n, "1"), tok(Symbol::EOI, "")];
    let mut source = SliceTokenSource::new(&tokens);
    let mut handler = CollectingHandler::new();
    let _ = parse_to_tree(&tables, &grammar, &mut source, &mut TreeBuilder, &mut handler).unwrap();

    assert!(!handler.errors.is_empty());
    assert_eq!(handler.errors[0].token.symbol, comma);
    assert_eq!(handler.errors[0].expected, vec![n]);
}

fn recovery_grammar() -> (SymbolTable, Grammar, LrTables) {
    let mut table = SymbolTable::new();
    let list = table.intern("<list>");
    let elem = table.intern("<elem>");
    let n = table.intern("N");
    let comma = table.intern("COMMA");

    let mut builder = GrammarBuilder::new(Symbol::START);
    builder.rule(Symbol::START, [list, Symbol::EOI]);
    builder.rule(list, [elem]);
    builder.rule(list, [list, comma, elem]);
    builder.rule(elem, [n]);
    let grammar = builder.finish().unwrap();
    let tables = LrTables::build(&grammar).unwrap();

    (table, grammar, tables)
}

#[test]
fn recovers_with_a_synthetic_node() {
    let (table, grammar, tables) = recovery_grammar();
    let list = table.get("<list>").unwrap();
    let n = table.get("N").unwrap();
    let comma = table.get("COMMA").unwrap();

    // "N , , N" - the second comma has no action; recovery pretends a <list>
    // was just reduced so the comma becomes shiftable again.
    let tokens = [
        tok(n, "1"),
        tok(comma, ","),
        tok(comma, ","),
        tok(n, "2"),
        tok(Symbol::EOI, ""),
    ];
    let mut source = SliceTokenSource::new(&tokens);
    let mut handler = CollectingHandler::new();
    let tree = parse_to_tree(&tables, &grammar, &mut source, &mut TreeBuilder, &mut handler)
        .unwrap()
        .expect("recovery should produce a tree");

    assert_eq!(handler.errors.len(), 1);
    assert!(tree.has_synthetic());
    assert_eq!(tree.symbol(), list);

    fn synthetic_symbols(tree: &ParseTree, out: &mut Vec<Symbol>) {
        if let ParseTree::Node { rule, symbol, children } = tree {
            if rule.is_none() {
                out.push(*symbol);
            }
            for c in children {
                synthetic_symbols(c, out);
            }
        }
    }
    let mut goals = Vec::new();
    synthetic_symbols(&tree, &mut goals);
    assert_eq!(goals, vec![list]);
}

#[test]
fn returns_none_when_recovery_is_impossible() {
    let (table, grammar, tables) = list_grammar();
    let n = table.get("N").unwrap();
    let comma = table.get("COMMA").unwrap();

    // A leading comma: no stack prefix offers a goto whose target shifts it.
    let tokens = [tok(comma, ","), tok(comma, ","), tok(n, "1"), tok(Symbol::EOI, "")];
    let mut source = SliceTokenSource::new(&tokens);
    let mut handler = CollectingHandler::new();
    let tree =
        parse_to_tree(&tables, &grammar, &mut source, &mut TreeBuilder, &mut handler).unwrap();

    assert!(tree.is_none());
    assert!(!handler.errors.is_empty());
}
