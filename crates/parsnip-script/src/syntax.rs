//! The script language's lexical specification and grammar.

use parsnip_core::{Grammar, GrammarBuilder, Symbol, SymbolTable};
use parsnip_lexer::{Lexer, LexerBuilder};
use parsnip_parser::LrTables;

/// Everything needed to turn script text into a parse tree: the symbol
/// table, the grammar, its SLR tables and the compiled lexer. Built once,
/// immutable afterwards.
pub struct ScriptSyntax {
    pub table: SymbolTable,
    pub grammar: Grammar,
    pub tables: LrTables,
    pub lexer: Lexer,

    pub sym_id: Symbol,
    pub sym_real: Symbol,
    pub sym_string: Symbol,
    pub sym_lp: Symbol,
    pub sym_rp: Symbol,
    pub sym_stmtlist: Symbol,
    pub sym_stmt: Symbol,
    pub sym_expr: Symbol,
    pub sym_exprlist: Symbol,
}

/// Production ids of the script grammar; the converter dispatches on them.
pub mod rules {
    pub const START: usize = 0;
    pub const STMTLIST_APPEND: usize = 1;
    pub const STMTLIST_SINGLE: usize = 2;
    pub const STMT_EXPR: usize = 3;
    pub const EXPR_ID: usize = 4;
    pub const EXPR_REAL: usize = 5;
    pub const EXPR_STRING: usize = 6;
    pub const EXPR_LIST: usize = 7;
    pub const EXPR_EMPTY_LIST: usize = 8;
    pub const EXPRLIST_CONS: usize = 9;
    pub const EXPRLIST_LAST: usize = 10;
}

impl ScriptSyntax {
    pub fn new() -> Self {
        let mut table = SymbolTable::new();
        let sym_stmtlist = table.intern("<stmt-list>");
        let sym_stmt = table.intern("<stmt>");
        let sym_expr = table.intern("<expr>");
        let sym_exprlist = table.intern("<expr-list>");
        let sym_id = table.intern("ID");
        let sym_real = table.intern("REAL");
        let sym_string = table.intern("STRING");
        let sym_lp = table.intern("LP");
        let sym_rp = table.intern("RP");

        let mut builder = GrammarBuilder::new(Symbol::START);
        builder.rule(Symbol::START, [sym_stmtlist, Symbol::EOI]);
        builder.rule(sym_stmtlist, [sym_stmtlist, sym_stmt]);
        builder.rule(sym_stmtlist, [sym_stmt]);
        builder.rule(sym_stmt, [sym_expr]);
        builder.rule(sym_expr, [sym_id]);
        builder.rule(sym_expr, [sym_real]);
        builder.rule(sym_expr, [sym_string]);
        builder.rule(sym_expr, [sym_lp, sym_exprlist, sym_rp]);
        builder.rule(sym_expr, [sym_lp, sym_rp]);
        builder.rule(sym_exprlist, [sym_expr, sym_exprlist]);
        builder.rule(sym_exprlist, [sym_expr]);

        let grammar = builder.finish().expect("script grammar has no empty rules");
        let tables = LrTables::build(&grammar).expect("script grammar is SLR(1)");

        let mut lexer = LexerBuilder::new();
        lexer
            .token("[-a-zA-Z_+*/][-a-zA-Z0-9_+*/]*", sym_id)
            .expect("ID pattern is well-formed");
        lexer
            .token("[0-9]+(\\.[0-9]+)?", sym_real)
            .expect("REAL pattern is well-formed");
        lexer
            .token("\"[^\"]*\"", sym_string)
            .expect("STRING pattern is well-formed");
        lexer
            .token("\\(", sym_lp)
            .expect("LP pattern is well-formed");
        lexer
            .token("\\)", sym_rp)
            .expect("RP pattern is well-formed");
        lexer
            .skipper("([ \\n\\t\\r\\f]|(;[^\\n]*\\n))*")
            .expect("skipper pattern is well-formed");
        let lexer = lexer.build().expect("script lexer compiles");

        Self {
            table,
            grammar,
            tables,
            lexer,
            sym_id,
            sym_real,
            sym_string,
            sym_lp,
            sym_rp,
            sym_stmtlist,
            sym_stmt,
            sym_expr,
            sym_exprlist,
        }
    }
}

impl Default for ScriptSyntax {
    fn default() -> Self {
        Self::new()
    }
}
