//! Regex syntax: tokenizer, bootstrapped mini-parser, and the fold from
//! parse tree to expression tree.
//!
//! The regex language is itself parsed with the toolkit's own SLR engine.
//! The grammar; note that alternation binds tighter than juxtaposition, so
//! `ab|c` reads as `a(b|c)`:
//!
//! ```text
//! regex  ::= regex concat | concat
//! concat ::= concat '|' alt | alt
//! alt    ::= c QUANT | c
//! c      ::= CHAR | '(' regex ')' | BRACKET
//! ```

use parsnip_core::{Coordinates, Grammar, GrammarBuilder, Symbol, SymbolTable, Token};
use parsnip_parser::{
    LrTables, ParseTree, SilentHandler, SliceTokenSource, TreeBuilder, parse_to_tree,
};

use crate::RegexError;
use crate::ast::RegexAst;

pub(crate) struct RegexSyntax {
    grammar: Grammar,
    tables: LrTables,
    sym_char: Symbol,
    sym_pipe: Symbol,
    sym_quant: Symbol,
    sym_lp: Symbol,
    sym_rp: Symbol,
    sym_bracket: Symbol,
}

impl RegexSyntax {
    pub fn new() -> Self {
        let mut table = SymbolTable::new();
        let regex = table.intern("<regex>");
        let concat = table.intern("<concat>");
        let alt = table.intern("<alt>");
        let c = table.intern("<c>");
        let sym_char = table.intern("CHAR");
        let sym_pipe = table.intern("PIPE");
        let sym_quant = table.intern("QUANT");
        let sym_lp = table.intern("LP");
        let sym_rp = table.intern("RP");
        let sym_bracket = table.intern("BRACKET");

        let mut builder = GrammarBuilder::new(Symbol::START);
        builder.rule(Symbol::START, [regex, Symbol::EOI]);
        builder.rule(regex, [regex, concat]);
        builder.rule(regex, [concat]);
        builder.rule(concat, [concat, sym_pipe, alt]);
        builder.rule(concat, [alt]);
        builder.rule(alt, [c, sym_quant]);
        builder.rule(alt, [c]);
        builder.rule(c, [sym_char]);
        builder.rule(c, [sym_lp, regex, sym_rp]);
        builder.rule(c, [sym_bracket]);

        let grammar = builder.finish().expect("regex grammar has no empty rules");
        let tables = LrTables::build(&grammar).expect("regex grammar is SLR(1)");

        Self {
            grammar,
            tables,
            sym_char,
            sym_pipe,
            sym_quant,
            sym_lp,
            sym_rp,
            sym_bracket,
        }
    }

    /// Parse a pattern into an expression tree.
    pub fn parse(&self, pattern: &str) -> Result<RegexAst, RegexError> {
        let tokens = self.scan(pattern)?;
        let mut source = SliceTokenSource::new(&tokens);
        let tree = parse_to_tree(
            &self.tables,
            &self.grammar,
            &mut source,
            &mut TreeBuilder,
            &mut SilentHandler,
        );
        match tree {
            Ok(Some(tree)) => self.fold(&tree, pattern),
            _ => Err(RegexError::Syntax {
                pattern: pattern.to_owned(),
            }),
        }
    }

    /// Tokenize the pattern. Escapes collapse to plain CHAR tokens, so an
    /// escaped operator loses its special meaning; bracket contents are
    /// captured whole (escapes already processed).
    fn scan(&self, pattern: &str) -> Result<Vec<Token>, RegexError> {
        let bytes = pattern.as_bytes();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            let at = Coordinates::new(0, i);
            let byte = bytes[i];
            i += 1;
            match byte {
                b'\\' => {
                    let Some(&escaped) = bytes.get(i) else {
                        return Err(RegexError::DanglingEscape {
                            pattern: pattern.to_owned(),
                        });
                    };
                    i += 1;
                    let value = unescape(escaped);
                    tokens.push(Token::new(self.sym_char, (value as char).to_string(), at));
                }
                b'[' => {
                    let (content, next) = bracket_contents(bytes, i).ok_or_else(|| {
                        RegexError::UnterminatedBracket {
                            pattern: pattern.to_owned(),
                        }
                    })?;
                    i = next;
                    tokens.push(Token::new(self.sym_bracket, content, at));
                }
                b'|' => tokens.push(Token::new(self.sym_pipe, "|", at)),
                b'*' | b'+' | b'?' => {
                    tokens.push(Token::new(self.sym_quant, (byte as char).to_string(), at))
                }
                b'(' => tokens.push(Token::new(self.sym_lp, "(", at)),
                b')' => tokens.push(Token::new(self.sym_rp, ")", at)),
                b if b <= 126 => {
                    tokens.push(Token::new(self.sym_char, (b as char).to_string(), at))
                }
                b => {
                    return Err(RegexError::InvalidToken {
                        pattern: pattern.to_owned(),
                        byte: b,
                    });
                }
            }
        }

        tokens.push(Token::end_of_input(Coordinates::new(0, bytes.len())));
        Ok(tokens)
    }

    fn fold(&self, tree: &ParseTree, pattern: &str) -> Result<RegexAst, RegexError> {
        let syntax_error = || RegexError::Syntax {
            pattern: pattern.to_owned(),
        };

        match tree {
            ParseTree::Leaf { symbol, lexeme, .. } => {
                if *symbol == self.sym_char {
                    Ok(RegexAst::literal(lexeme.as_bytes()[0]))
                } else if *symbol == self.sym_bracket {
                    Ok(character_class(lexeme))
                } else {
                    Err(syntax_error())
                }
            }
            ParseTree::Node {
                rule: Some(rule),
                children,
                ..
            } => match *rule {
                // Unit rules forward to their only meaningful child.
                0 | 2 | 4 | 6 | 7 | 9 => self.fold(&children[0], pattern),
                1 => Ok(RegexAst::concat(
                    self.fold(&children[0], pattern)?,
                    self.fold(&children[1], pattern)?,
                )),
                3 => Ok(RegexAst::alt(
                    self.fold(&children[0], pattern)?,
                    self.fold(&children[2], pattern)?,
                )),
                5 => {
                    let inner = self.fold(&children[0], pattern)?;
                    let quant = children[1].lexeme().ok_or_else(syntax_error)?;
                    match quant {
                        "*" => Ok(RegexAst::star(inner)),
                        "+" => {
                            let repeat = RegexAst::star(inner.clone());
                            Ok(RegexAst::concat(inner, repeat))
                        }
                        "?" => Ok(RegexAst::alt(RegexAst::epsilon(), inner)),
                        _ => Err(syntax_error()),
                    }
                }
                8 => self.fold(&children[1], pattern),
                _ => Err(syntax_error()),
            },
            // A synthetic node means the mini-parser recovered over garbage.
            ParseTree::Node { rule: None, .. } => Err(syntax_error()),
        }
    }
}

fn unescape(byte: u8) -> u8 {
    match byte {
        b'n' => b'\n',
        b't' => b'\t',
        b'f' => 0x0C,
        b'r' => b'\r',
        b'b' => 0x08,
        b'a' => 0x07,
        b'0' => 0,
        other => other,
    }
}

/// Read a bracket body starting at `from`, processing escapes, up to the
/// closing `]`. Returns the content and the index past the bracket.
fn bracket_contents(bytes: &[u8], from: usize) -> Option<(String, usize)> {
    let mut content = Vec::new();
    let mut i = from;
    while i < bytes.len() {
        let byte = bytes[i];
        i += 1;
        if byte == b'\\' {
            let &escaped = bytes.get(i)?;
            i += 1;
            content.push(unescape(escaped));
        } else if byte == b']' {
            return Some((String::from_utf8_lossy(&content).into_owned(), i));
        } else {
            content.push(byte);
        }
    }
    None
}

/// Build a character class node from processed bracket content. A leading
/// `^` negates; `a-b` forms a range via the pending-character stack; a `-`
/// with nothing pending, or trailing, is a literal.
fn character_class(content: &str) -> RegexAst {
    let bytes = content.as_bytes();
    let mut negated = false;
    let mut start = 0;
    if bytes.first() == Some(&b'^') {
        negated = true;
        start = 1;
    }

    let mut ranges = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    let mut i = start;
    while i < bytes.len() {
        if bytes[i] == b'-' && !pending.is_empty() && i + 1 < bytes.len() {
            i += 1;
            ranges.push((pending.pop().unwrap(), bytes[i]));
        } else {
            pending.push(bytes[i]);
        }
        i += 1;
    }
    while let Some(c) = pending.pop() {
        ranges.push((c, c));
    }

    RegexAst::class(ranges, negated)
}
