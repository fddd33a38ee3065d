use std::process::exit;

use parsnip_core::{Symbol, Token};
use parsnip_lexer::CharInput;
use parsnip_parser::TokenSource;

use crate::cli::{OutputFormat, TokenizeParams};
use crate::commands::grammar_loader::load_grammar;
use crate::util::{read_input, report_scan_error};

pub fn run(params: TokenizeParams) {
    let grammar_text = match read_input(Some(&params.grammar), None, "grammar") {
        Ok(text) => text,
        Err(msg) => {
            eprintln!("error: {msg}");
            exit(2);
        }
    };
    let loaded = match load_grammar(&grammar_text) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            exit(2);
        }
    };

    let source = match read_input(
        params.source_path.as_deref(),
        params.source_text.as_deref(),
        "source",
    ) {
        Ok(text) => text,
        Err(msg) => {
            eprintln!("error: {msg}");
            exit(2);
        }
    };
    let source_path = params.source_path.as_ref().map(|p| p.display().to_string());
    let colored = params.color.should_colorize();

    let mut tokens: Vec<Token> = Vec::new();
    let mut stream = match loaded.lexer.stream(CharInput::from_str(&source)) {
        Ok(stream) => stream,
        Err(e) => {
            report_scan_error(&source, source_path.as_deref(), &e, colored);
            exit(1);
        }
    };
    loop {
        let token = stream.current().clone();
        let done = token.symbol == Symbol::EOI;
        tokens.push(token);
        if done {
            break;
        }
        if let Err(e) = stream.advance() {
            report_scan_error(&source, source_path.as_deref(), &e, colored);
            exit(1);
        }
    }

    match params.format {
        OutputFormat::Json => {
            #[derive(serde::Serialize)]
            struct JsonToken<'a> {
                symbol: &'a str,
                lexeme: &'a str,
                line: usize,
                column: usize,
            }
            let rows: Vec<JsonToken<'_>> = tokens
                .iter()
                .map(|t| JsonToken {
                    symbol: loaded.table.try_resolve(t.symbol).unwrap_or("?"),
                    lexeme: &t.lexeme,
                    line: t.coordinates.line,
                    column: t.coordinates.column,
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).expect("token rows serialize")
            );
        }
        OutputFormat::Text => {
            for token in &tokens {
                let name = loaded.table.try_resolve(token.symbol).unwrap_or("?");
                println!("{name}: {}", token.lexeme);
            }
        }
    }
}
