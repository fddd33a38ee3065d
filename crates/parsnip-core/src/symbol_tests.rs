use crate::{Symbol, SymbolTable};

#[test]
fn sentinels_are_fixed() {
    let table = SymbolTable::new();

    assert_eq!(Symbol::START.as_u32(), 0);
    assert_eq!(Symbol::EOI.as_u32(), 1);
    assert_eq!(table.resolve(Symbol::START), "<start>");
    assert_eq!(table.resolve(Symbol::EOI), "EOI");
}

#[test]
fn intern_deduplicates() {
    let mut table = SymbolTable::new();

    let a = table.intern("EXPR");
    let b = table.intern("EXPR");
    let c = table.intern("TERM");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(table.len(), 4); // two sentinels + two user symbols
}

#[test]
fn resolve_roundtrip() {
    let mut table = SymbolTable::new();

    let sym = table.intern("NUMBER");
    assert_eq!(table.resolve(sym), "NUMBER");
    assert_eq!(table.get("NUMBER"), Some(sym));
    assert_eq!(table.get("MISSING"), None);
}

#[test]
fn minting_order_defines_order() {
    let mut table = SymbolTable::new();

    let first = table.intern("zeta");
    let second = table.intern("alpha");

    assert!(Symbol::START < Symbol::EOI);
    assert!(Symbol::EOI < first);
    assert!(first < second);
}

#[test]
fn try_resolve_rejects_foreign_symbols() {
    let table = SymbolTable::new();
    assert_eq!(table.try_resolve(Symbol::from_raw(99)), None);
}
