//! Parse tree → value conversion.
//!
//! An EXPR subtree becomes a cons-list value: atoms become `Real`, `Str`
//! or `Symbol`, `( … )` becomes the right-spined cons chain of its
//! elements, `( )` becomes `Nil`. Nothing is evaluated here.

use std::rc::Rc;

use parsnip_parser::ParseTree;

use crate::ScriptError;
use crate::syntax::{ScriptSyntax, rules};
use crate::value::Value;

/// Convert an EXPR (or EXPRLIST) subtree into a value.
pub fn expr_to_value(tree: &ParseTree, syntax: &ScriptSyntax) -> Result<Rc<Value>, ScriptError> {
    match tree {
        ParseTree::Leaf { symbol, lexeme, .. } => {
            if *symbol == syntax.sym_id {
                Ok(Rc::new(Value::Symbol(lexeme.clone())))
            } else if *symbol == syntax.sym_real {
                let number: f64 = lexeme.parse().map_err(|_| ScriptError::Malformed)?;
                Ok(Rc::new(Value::Real(number)))
            } else if *symbol == syntax.sym_string {
                Ok(Rc::new(Value::Str(strip_quotes(lexeme).to_owned())))
            } else {
                Err(ScriptError::Malformed)
            }
        }
        ParseTree::Node {
            rule: Some(rule),
            children,
            ..
        } => match *rule {
            rules::STMT_EXPR | rules::EXPR_ID | rules::EXPR_REAL | rules::EXPR_STRING => {
                expr_to_value(&children[0], syntax)
            }
            rules::EXPR_LIST => expr_to_value(&children[1], syntax),
            rules::EXPR_EMPTY_LIST => Ok(Rc::new(Value::Nil)),
            rules::EXPRLIST_CONS => {
                let car = expr_to_value(&children[0], syntax)?;
                let cdr = expr_to_value(&children[1], syntax)?;
                Ok(Rc::new(Value::Cons(car, cdr)))
            }
            rules::EXPRLIST_LAST => {
                let car = expr_to_value(&children[0], syntax)?;
                Ok(Rc::new(Value::Cons(car, Rc::new(Value::Nil))))
            }
            _ => Err(ScriptError::Malformed),
        },
        ParseTree::Node { rule: None, .. } => Err(ScriptError::Malformed),
    }
}

fn strip_quotes(lexeme: &str) -> &str {
    lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme)
}
