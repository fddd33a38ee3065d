//! The user-facing lexer: build once, stream tokens.

use parsnip_core::{ScanError, Symbol, Token};
use parsnip_parser::TokenSource;

use crate::RegexError;
use crate::ast::RegexAst;
use crate::dfa::Dfa;
use crate::input::CharInput;
use crate::syntax::RegexSyntax;

/// Accumulates token rules and a skipper, then compiles the DFAs.
///
/// Declaration order is priority order: when two rules accept the same
/// longest prefix, the rule added first wins.
pub struct LexerBuilder {
    syntax: RegexSyntax,
    symbols: Vec<Symbol>,
    rules: Vec<RegexAst>,
    skipper: Option<RegexAst>,
}

impl LexerBuilder {
    pub fn new() -> Self {
        Self {
            syntax: RegexSyntax::new(),
            symbols: Vec::new(),
            rules: Vec::new(),
            skipper: None,
        }
    }

    /// Add a token rule: input matching `pattern` produces `symbol`.
    pub fn token(&mut self, pattern: &str, symbol: Symbol) -> Result<&mut Self, RegexError> {
        let mut ast = self.syntax.parse(pattern)?;
        ast.mark_accept(self.rules.len() + 1);
        self.symbols.push(symbol);
        self.rules.push(ast);
        Ok(self)
    }

    /// Set the skipper: the longest prefix it accepts is discarded before
    /// each token match.
    pub fn skipper(&mut self, pattern: &str) -> Result<&mut Self, RegexError> {
        let mut ast = self.syntax.parse(pattern)?;
        ast.mark_accept(1);
        self.skipper = Some(ast);
        Ok(self)
    }

    /// Compile the accumulated rules into the token and skipper DFAs.
    pub fn build(self) -> Result<Lexer, RegexError> {
        let mut rules = self.rules.into_iter();
        let Some(first) = rules.next() else {
            return Err(RegexError::NoTokenRules);
        };
        let mut root = first;
        for rule in rules {
            root = RegexAst::alt_top(root, rule);
        }

        let tokens = Dfa::compile(&mut root);
        let skipper = self.skipper.map(|mut ast| Dfa::compile(&mut ast));

        Ok(Lexer {
            tokens,
            skipper,
            symbols: self.symbols,
        })
    }
}

impl Default for LexerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A compiled lexer. Immutable; may serve any number of streams.
pub struct Lexer {
    tokens: Dfa,
    skipper: Option<Dfa>,
    symbols: Vec<Symbol>,
}

impl Lexer {
    /// Bind the lexer to a character source and prime the first token.
    pub fn stream(&self, input: CharInput) -> Result<TokenStream<'_>, ScanError> {
        let mut stream = TokenStream {
            lexer: self,
            input,
            current: Token::end_of_input(Default::default()),
        };
        stream.advance()?;
        Ok(stream)
    }

    fn next_token(&self, input: &mut CharInput) -> Result<Token, ScanError> {
        if let Some(skipper) = &self.skipper {
            let _ = skipper.longest_match(input)?;
        }

        let coordinates = input.coordinates();
        if !input.good()? {
            return Ok(Token::end_of_input(coordinates));
        }

        match self.tokens.longest_match(input)? {
            Some((lexeme, id)) => Ok(Token::new(self.symbols[id - 1], lexeme, coordinates)),
            None => Err(ScanError::UnrecognizedToken { coordinates }),
        }
    }
}

/// A lexer bound to one input, holding the current token.
pub struct TokenStream<'l> {
    lexer: &'l Lexer,
    input: CharInput,
    current: Token,
}

impl TokenSource for TokenStream<'_> {
    fn current(&self) -> &Token {
        &self.current
    }

    fn advance(&mut self) -> Result<(), ScanError> {
        self.current = self.lexer.next_token(&mut self.input)?;
        Ok(())
    }
}
