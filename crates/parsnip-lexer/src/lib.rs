//! Runtime-constructed lexers.
//!
//! A lexical specification is a list of (regex, symbol) pairs plus a skipper
//! regex. Each regex is parsed by a miniature SLR parser, bootstrapped
//! through the same engine the generated parsers use, into an AST whose
//! node positions form an NFA liveness bitmap. Subset construction turns the
//! bitmap into DFA tables, and a greedy longest-match scanner drives those
//! tables over a buffered character source.
//!
//! - `input` - the pull-based character source with line/column tracking
//! - `ast` - the regex expression tree and its step relation
//! - `syntax` - regex string → AST (tokenizer + bootstrapped mini-parser)
//! - `dfa` - subset construction and the match loops
//! - `lexer` - the user-facing builder and token stream

pub mod ast;
pub mod dfa;
pub mod input;
pub mod lexer;
mod syntax;

#[cfg(test)]
mod dfa_tests;
#[cfg(test)]
mod syntax_tests;

pub use dfa::Dfa;
pub use input::CharInput;
pub use lexer::{Lexer, LexerBuilder, TokenStream};

/// Errors raised while compiling a lexical specification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegexError {
    #[error("unterminated character class in /{pattern}/")]
    UnterminatedBracket { pattern: String },

    #[error("unexpected end of pattern after escape in /{pattern}/")]
    DanglingEscape { pattern: String },

    #[error("invalid byte {byte:#04x} in /{pattern}/")]
    InvalidToken { pattern: String, byte: u8 },

    #[error("/{pattern}/ is not a valid regular expression")]
    Syntax { pattern: String },

    #[error("a lexer needs at least one token rule")]
    NoTokenRules,
}
