use std::rc::Rc;

use crate::env::Environment;
use crate::eval::EvalError;
use crate::value::Value;

fn real(v: f64) -> Rc<Value> {
    Rc::new(Value::Real(v))
}

#[test]
fn bind_then_resolve() {
    let mut env = Environment::new();
    env.bind("x", real(1.0));

    assert_eq!(env.resolve("x").unwrap().as_real().unwrap(), 1.0);
}

#[test]
fn unbound_name_carries_its_spelling() {
    let env = Environment::new();
    match env.resolve("missing") {
        Err(EvalError::UndefinedSymbol(name)) => assert_eq!(name, "missing"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn inner_scope_shadows_global() {
    let mut env = Environment::new();
    env.bind("x", real(1.0));
    env.push_scope();
    env.bind("x", real(2.0));

    assert_eq!(env.resolve("x").unwrap().as_real().unwrap(), 2.0);
    env.pop_scope();
    assert_eq!(env.resolve("x").unwrap().as_real().unwrap(), 1.0);
}

#[test]
fn lookup_skips_intermediate_scopes() {
    // Resolution consults only the innermost scope and the global one.
    let mut env = Environment::new();
    env.push_scope();
    env.bind("y", real(5.0));
    env.push_scope();

    assert!(env.resolve("y").is_err());
}

#[test]
fn the_two_outermost_scopes_are_never_popped() {
    let mut env = Environment::new();
    env.push_scope();
    assert_eq!(env.depth(), 2);

    env.pop_scope();
    assert_eq!(env.depth(), 2);

    env.push_scope();
    assert_eq!(env.depth(), 3);
    env.pop_scope();
    assert_eq!(env.depth(), 2);
    env.pop_scope();
    assert_eq!(env.depth(), 2);
}
