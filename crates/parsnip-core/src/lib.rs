//! Core data structures shared by the parsnip toolkit.
//!
//! Three layers:
//! - **Symbols**: interned grammar identities (`Symbol`, `SymbolTable`)
//! - **Tokens**: lexer output (`Token`, `Coordinates`, `ScanError`)
//! - **Grammars**: context-free production rules (`Grammar`, `GrammarBuilder`)
//!
//! Everything here is built once and read-only afterwards; the table
//! generators and drivers in the downstream crates never mutate a finished
//! grammar.

mod grammar;
mod symbol;
mod token;

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod symbol_tests;

pub use grammar::{Grammar, GrammarBuilder, GrammarError, Production};
pub use symbol::{Symbol, SymbolTable};
pub use token::{Coordinates, ScanError, Token};
