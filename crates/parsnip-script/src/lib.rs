//! A small Lisp-like scripting language.
//!
//! Scripts are tokenized by a runtime-built lexer, parsed with the SLR
//! engine into a concrete syntax tree, converted expression by expression
//! into cons-list values, and reduced by an evaluator over a lexically
//! scoped environment with pre-bound arithmetic and transcendental
//! builtins.
//!
//! - `value` - the value universe (numbers, strings, symbols, cons cells,
//!   forms)
//! - `env` - the scope stack
//! - `eval` - the evaluator and form application
//! - `syntax` - the script grammar and lexical specification
//! - `convert` - parse tree → value conversion
//! - `interpreter` - the facade owning all of the above

pub mod convert;
pub mod env;
pub mod eval;
pub mod interpreter;
pub mod syntax;
pub mod value;

#[cfg(test)]
mod env_tests;

pub use env::Environment;
pub use eval::{EvalError, Evaluator};
pub use interpreter::Interpreter;
pub use value::{BinOp, Form, Value};

/// Errors surfaced by the interpreter facade.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Scan(#[from] parsnip_core::ScanError),

    #[error("{}", messages.join("; "))]
    Parse { messages: Vec<String> },

    #[error(transparent)]
    Eval(#[from] EvalError),

    /// The parse tree did not have the shape the converter expects.
    #[error("malformed expression tree")]
    Malformed,
}
