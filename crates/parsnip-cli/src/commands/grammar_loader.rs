//! Loader for grammar specification files.
//!
//! The file format is line-oriented with `; … ;` comments:
//!
//! ```text
//! NUMBER  ::= /[0-9]+/ .
//! COMMA   ::= /,/ .
//! <start> ::= <list> EOI .
//! <list>  ::= NUMBER | NUMBER COMMA <list> .
//! ```
//!
//! Terminals are uppercased names defined by a `/regex/`; non-terminals are
//! bracketed lowercased names defined by alternatives. `<start>` binds the
//! reserved start symbol, `EOI` the reserved end-of-input terminal. The
//! file itself is tokenized and parsed with the same machinery the loaded
//! grammar will use.

use parsnip_core::{
    Grammar, GrammarBuilder, GrammarError, ScanError, Symbol, SymbolTable,
};
use parsnip_lexer::{CharInput, Lexer, LexerBuilder, RegexError};
use parsnip_parser::{
    BuildError, CollectingHandler, LrTables, ParseTree, TreeBuilder, parse_to_tree,
};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Regex(#[from] RegexError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("grammar file syntax error: {0}")]
    Syntax(String),

    #[error("rule references the undefined name {0}")]
    UndefinedSymbol(String),

    #[error("terminal {0} is defined more than once")]
    DuplicateTerminal(String),

    #[error("{0} is a reserved name and cannot be defined")]
    ReservedName(String),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Tables(#[from] BuildError),
}

/// A grammar file turned into live objects: symbol table, grammar, SLR
/// tables, and the generated lexer.
pub struct LoadedGrammar {
    pub table: SymbolTable,
    pub grammar: Grammar,
    pub tables: LrTables,
    pub lexer: Lexer,
}

/// Parse a grammar specification and generate its symbol table, grammar,
/// parser tables and lexer.
pub fn load_grammar(text: &str) -> Result<LoadedGrammar, LoadError> {
    let meta = MetaSyntax::new();
    let (terminal_defs, rules) = meta.parse(text)?;

    let mut table = SymbolTable::new();

    // Terminals first, in declaration order. EOI needs no definition; a
    // definition for it (or for <start>) is rejected.
    for (name, _) in &terminal_defs {
        if name == "EOI" {
            return Err(LoadError::ReservedName(name.clone()));
        }
        if table.get(name).is_some() {
            return Err(LoadError::DuplicateTerminal(name.clone()));
        }
        table.intern(name);
    }
    for (lhs, _) in &rules {
        table.intern(lhs);
    }

    let mut builder = GrammarBuilder::new(Symbol::START);
    for (lhs, alternatives) in &rules {
        let lhs_sym = table.get(lhs).expect("left-hand sides were interned");
        for alternative in alternatives {
            let mut rhs = Vec::with_capacity(alternative.len());
            for name in alternative {
                let sym = table
                    .get(name)
                    .ok_or_else(|| LoadError::UndefinedSymbol(name.clone()))?;
                rhs.push(sym);
            }
            builder.rule(lhs_sym, rhs);
        }
    }
    let grammar = builder.finish()?;
    let tables = LrTables::build(&grammar)?;

    let mut lexer = LexerBuilder::new();
    for (name, pattern) in &terminal_defs {
        let sym = table.get(name).expect("terminal names were interned");
        // Strip the surrounding slashes; escaped slashes inside unescape
        // during regex scanning.
        let inner = &pattern[1..pattern.len() - 1];
        lexer.token(inner, sym)?;
    }
    lexer.skipper("[ \\t\\r\\f\\n]*")?;
    let lexer = lexer.build()?;

    Ok(LoadedGrammar {
        table,
        grammar,
        tables,
        lexer,
    })
}

type TerminalDefs = Vec<(String, String)>;
type ProductionRules = Vec<(String, Vec<Vec<String>>)>;

/// The meta-grammar and meta-lexer for specification files.
struct MetaSyntax {
    table: SymbolTable,
    grammar: Grammar,
    tables: LrTables,
    lexer: Lexer,
    sym_deflist: Symbol,
    sym_altlist: Symbol,
    sym_concat: Symbol,
}

/// Production ids of the meta-grammar.
mod meta_rules {
    pub const DEF_TERMINAL: usize = 3;
    pub const DEF_PRODUCTION: usize = 4;
}

impl MetaSyntax {
    fn new() -> Self {
        let mut table = SymbolTable::new();
        let deflist = table.intern("<def-list>");
        let def = table.intern("<def>");
        let altlist = table.intern("<alt-list>");
        let concat = table.intern("<concat>");
        let sym = table.intern("<sym>");
        let nt = table.intern("NT");
        let t = table.intern("T");
        let defop = table.intern("DEFOP");
        let pipe = table.intern("PIPE");
        let regex = table.intern("REGEX");
        let eor = table.intern("EOR");

        let mut builder = GrammarBuilder::new(Symbol::START);
        builder.rule(Symbol::START, [deflist, Symbol::EOI]);
        builder.rule(deflist, [deflist, def]);
        builder.rule(deflist, [def]);
        builder.rule(def, [t, defop, regex, eor]);
        builder.rule(def, [nt, defop, altlist, eor]);
        builder.rule(altlist, [altlist, pipe, concat]);
        builder.rule(altlist, [concat]);
        builder.rule(concat, [concat, sym]);
        builder.rule(concat, [sym]);
        builder.rule(sym, [nt]);
        builder.rule(sym, [t]);

        let grammar = builder.finish().expect("meta grammar has no empty rules");
        let tables = LrTables::build(&grammar).expect("meta grammar is SLR(1)");

        let mut lexer = LexerBuilder::new();
        lexer
            .token("<[-a-z0-9]+>", nt)
            .expect("NT pattern is well-formed");
        lexer
            .token("[-A-Z0-9]+", t)
            .expect("T pattern is well-formed");
        lexer
            .token("::=", defop)
            .expect("DEFOP pattern is well-formed");
        lexer
            .token("\\|", pipe)
            .expect("PIPE pattern is well-formed");
        lexer
            .token("/([^/]|(\\\\/))+/", regex)
            .expect("REGEX pattern is well-formed");
        lexer.token(".", eor).expect("EOR pattern is well-formed");
        lexer
            .skipper("([ \\n\\t\\r\\f]|(;[^;]*;))*")
            .expect("skipper pattern is well-formed");
        let lexer = lexer.build().expect("meta lexer compiles");

        Self {
            table,
            grammar,
            tables,
            lexer,
            sym_deflist: deflist,
            sym_altlist: altlist,
            sym_concat: concat,
        }
    }

    fn parse(&self, text: &str) -> Result<(TerminalDefs, ProductionRules), LoadError> {
        let mut stream = self.lexer.stream(CharInput::from_str(text))?;
        let mut handler = CollectingHandler::new();
        let tree = parse_to_tree(
            &self.tables,
            &self.grammar,
            &mut stream,
            &mut TreeBuilder,
            &mut handler,
        )?;

        let tree = match tree {
            Some(tree) if handler.is_empty() => tree,
            _ => return Err(LoadError::Syntax(self.describe_failure(&handler))),
        };

        let mut terminals = Vec::new();
        let mut rules = Vec::new();
        for def in left_list(&tree, self.sym_deflist) {
            match def.rule() {
                Some(meta_rules::DEF_TERMINAL) => {
                    let name = first_leaf(&def.children()[0]).to_owned();
                    let pattern = first_leaf(&def.children()[2]).to_owned();
                    terminals.push((name, pattern));
                }
                Some(meta_rules::DEF_PRODUCTION) => {
                    let lhs = first_leaf(&def.children()[0]).to_owned();
                    let alternatives = left_list(&def.children()[2], self.sym_altlist)
                        .into_iter()
                        .map(|concat| {
                            left_list(concat, self.sym_concat)
                                .into_iter()
                                .map(|sym| first_leaf(sym).to_owned())
                                .collect()
                        })
                        .collect();
                    rules.push((lhs, alternatives));
                }
                _ => return Err(LoadError::Syntax("unexpected rule shape".to_owned())),
            }
        }
        Ok((terminals, rules))
    }

    fn describe_failure(&self, handler: &CollectingHandler) -> String {
        let mut parts = Vec::new();
        for token in &handler.unknown {
            parts.push(format!(
                "unexpected `{}` at {}",
                token.lexeme, token.coordinates
            ));
        }
        for error in &handler.errors {
            let expected: Vec<&str> = error
                .expected
                .iter()
                .map(|&s| self.table.try_resolve(s).unwrap_or("?"))
                .collect();
            parts.push(format!(
                "unexpected `{}` at {}, expected one of: {}",
                error.token.lexeme,
                error.token.coordinates,
                expected.join(" ")
            ));
        }
        if parts.is_empty() {
            parts.push("invalid grammar file".to_owned());
        }
        parts.join("; ")
    }
}

/// Flatten a left-recursive list node (`L -> L … x | x`) into its elements
/// in source order. The separator, if any, sits between head and tail and
/// is skipped.
fn left_list(tree: &ParseTree, list_symbol: Symbol) -> Vec<&ParseTree> {
    let mut elements = Vec::new();
    let mut cursor = tree;
    loop {
        if cursor.symbol() != list_symbol {
            elements.push(cursor);
            break;
        }
        let children = cursor.children();
        match children.len() {
            1 => {
                elements.push(&children[0]);
                break;
            }
            _ => {
                elements.push(children.last().unwrap());
                cursor = &children[0];
            }
        }
    }
    elements.reverse();
    elements
}

/// The leftmost leaf lexeme under a node.
fn first_leaf(tree: &ParseTree) -> &str {
    match tree {
        ParseTree::Leaf { lexeme, .. } => lexeme,
        ParseTree::Node { children, .. } => first_leaf(&children[0]),
    }
}
