//! The script value universe.
//!
//! Values are reference counted: the environment and evaluation results may
//! share sub-structure freely. Every value is self-evaluating except
//! symbols (environment lookup) and cons cells (form application).

use std::rc::Rc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::eval::EvalError;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Real(f64),
    Str(String),
    Symbol(String),
    Nil,
    Cons(Rc<Value>, Rc<Value>),
    Form(Form),
}

/// A value whose application semantics the evaluator defines.
#[derive(Clone, Debug, PartialEq)]
pub enum Form {
    /// `(quote x)`: returns its argument unevaluated.
    Quote,
    /// `(set sym v)`: binds into the innermost scope.
    Set,
    /// Left-folding arithmetic over one or more numeric arguments.
    Fold(BinOp),
    /// One-argument float builtin such as `sin`.
    Unary { name: &'static str, f: fn(f64) -> f64 },
    /// Two-argument float builtin such as `pow`.
    Binary {
        name: &'static str,
        f: fn(f64, f64) -> f64,
    },
    /// Extension slot; applying it is an error for now.
    Lambda,
    /// Extension slot; applying it is an error for now.
    Macro,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinOp::Add => a + b,
            BinOp::Sub => a - b,
            BinOp::Mul => a * b,
            BinOp::Div => a / b,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl Value {
    /// The numeric view of this value.
    pub fn as_real(&self) -> Result<f64, EvalError> {
        match self {
            Value::Real(v) => Ok(*v),
            other => Err(EvalError::NotAReal {
                found: other.to_string(),
            }),
        }
    }

    pub fn as_form(&self) -> Result<&Form, EvalError> {
        match self {
            Value::Form(form) => Ok(form),
            other => Err(EvalError::NotAForm {
                found: other.to_string(),
            }),
        }
    }

    pub fn as_symbol_name(&self) -> Result<&str, EvalError> {
        match self {
            Value::Symbol(name) => Ok(name),
            other => Err(EvalError::NotASymbol {
                found: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Real(v) => write!(f, "real({v})"),
            Value::Str(s) => write!(f, "string({s})"),
            Value::Symbol(s) => write!(f, "symbol({s})"),
            Value::Nil => write!(f, "nil"),
            Value::Cons(car, cdr) => write!(f, "cons({car} . {cdr})"),
            Value::Form(form) => write!(f, "{form}"),
        }
    }
}

impl std::fmt::Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Form::Quote => write!(f, "quote builtin"),
            Form::Set => write!(f, "set builtin"),
            Form::Fold(_) => write!(f, "binary op"),
            Form::Unary { .. } => write!(f, "unary builtin"),
            Form::Binary { .. } => write!(f, "binary builtin"),
            Form::Lambda => write!(f, "lambda"),
            Form::Macro => write!(f, "macro"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Real(v) => serializer.serialize_f64(*v),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Symbol(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("symbol", name)?;
                map.end()
            }
            Value::Nil => serializer.serialize_none(),
            Value::Cons(car, cdr) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("car", &**car)?;
                map.serialize_entry("cdr", &**cdr)?;
                map.end()
            }
            Value::Form(form) => serializer.serialize_str(&form.to_string()),
        }
    }
}
