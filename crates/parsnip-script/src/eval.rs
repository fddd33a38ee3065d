//! The evaluator and form application.

use std::rc::Rc;

use crate::env::Environment;
use crate::value::{BinOp, Form, Value};

/// Errors fatal to the current evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("symbol not defined: {0}")]
    UndefinedSymbol(String),

    #[error("{form} expects {expected} argument(s), got {got}")]
    Arity {
        form: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("{found} is not a number")]
    NotAReal { found: String },

    #[error("{found} is not a form and cannot head a call")]
    NotAForm { found: String },

    #[error("{found} is not a symbol and cannot be bound")]
    NotASymbol { found: String },

    #[error("{form} is not implemented")]
    Unimplemented { form: &'static str },
}

/// Reduces values under an environment pre-bound with the builtin forms.
pub struct Evaluator {
    env: Environment,
}

impl Evaluator {
    pub fn new() -> Self {
        let mut env = Environment::new();

        let unary: &[(&'static str, fn(f64) -> f64)] = &[
            ("sin", f64::sin),
            ("cos", f64::cos),
            ("tan", f64::tan),
            ("asin", f64::asin),
            ("acos", f64::acos),
            ("atan", f64::atan),
            ("cosh", f64::cosh),
            ("sinh", f64::sinh),
            ("tanh", f64::tanh),
            ("exp", f64::exp),
            ("log", f64::ln),
            ("sqrt", f64::sqrt),
            ("ceil", f64::ceil),
            ("floor", f64::floor),
            ("abs", f64::abs),
        ];
        for &(name, f) in unary {
            env.bind(name, Rc::new(Value::Form(Form::Unary { name, f })));
        }

        let binary: &[(&'static str, fn(f64, f64) -> f64)] =
            &[("pow", f64::powf), ("atan2", f64::atan2)];
        for &(name, f) in binary {
            env.bind(name, Rc::new(Value::Form(Form::Binary { name, f })));
        }

        for op in [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div] {
            env.bind(op.symbol(), Rc::new(Value::Form(Form::Fold(op))));
        }

        env.bind("quote", Rc::new(Value::Form(Form::Quote)));
        env.bind("set", Rc::new(Value::Form(Form::Set)));

        Self { env }
    }

    pub fn env(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Reduce one value. Numbers, strings, nil and forms are
    /// self-evaluating; symbols resolve through the environment; a cons
    /// cell applies its evaluated head to the flattened, unevaluated tail.
    pub fn eval(&mut self, value: &Rc<Value>) -> Result<Rc<Value>, EvalError> {
        match &**value {
            Value::Real(_) | Value::Str(_) | Value::Nil | Value::Form(_) => Ok(value.clone()),
            Value::Symbol(name) => self.env.resolve(name),
            Value::Cons(car, cdr) => {
                let head = self.eval(car)?;
                let form = head.as_form()?.clone();
                let args = flatten(cdr);
                form.execute(self, &args)
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect the right spine of a cons list into an argument vector. The
/// elements stay unevaluated; anything that is not a cons cell ends the
/// walk.
fn flatten(list: &Rc<Value>) -> Vec<Rc<Value>> {
    let mut args = Vec::new();
    let mut cursor = list;
    while let Value::Cons(car, cdr) = &**cursor {
        args.push(car.clone());
        cursor = cdr;
    }
    args
}

impl Form {
    /// Apply this form to its argument list.
    pub fn execute(
        &self,
        evaluator: &mut Evaluator,
        args: &[Rc<Value>],
    ) -> Result<Rc<Value>, EvalError> {
        match *self {
            Form::Quote => {
                expect_arity("quote", "1", args, |n| n == 1)?;
                Ok(args[0].clone())
            }
            Form::Set => {
                expect_arity("set", "2", args, |n| n == 2)?;
                let value = evaluator.eval(&args[1])?;
                // A literal symbol names the binding directly; anything
                // else is evaluated and must produce a symbol.
                let name = match &*args[0] {
                    Value::Symbol(name) => name.clone(),
                    _ => evaluator.eval(&args[0])?.as_symbol_name()?.to_owned(),
                };
                evaluator.env().bind(name, value.clone());
                Ok(value)
            }
            Form::Fold(op) => {
                expect_arity(op.symbol(), "at least 1", args, |n| n >= 1)?;
                let mut acc = evaluator.eval(&args[0])?.as_real()?;
                for arg in &args[1..] {
                    acc = op.apply(acc, evaluator.eval(arg)?.as_real()?);
                }
                Ok(Rc::new(Value::Real(acc)))
            }
            Form::Unary { name, f } => {
                expect_arity(name, "1", args, |n| n == 1)?;
                let x = evaluator.eval(&args[0])?.as_real()?;
                Ok(Rc::new(Value::Real(f(x))))
            }
            Form::Binary { name, f } => {
                expect_arity(name, "2", args, |n| n == 2)?;
                let a = evaluator.eval(&args[0])?.as_real()?;
                let b = evaluator.eval(&args[1])?.as_real()?;
                Ok(Rc::new(Value::Real(f(a, b))))
            }
            Form::Lambda => Err(EvalError::Unimplemented { form: "lambda" }),
            Form::Macro => Err(EvalError::Unimplemented { form: "macro" }),
        }
    }
}

fn expect_arity(
    form: &'static str,
    expected: &'static str,
    args: &[Rc<Value>],
    ok: impl Fn(usize) -> bool,
) -> Result<(), EvalError> {
    if ok(args.len()) {
        Ok(())
    } else {
        Err(EvalError::Arity {
            form,
            expected,
            got: args.len(),
        })
    }
}
