use std::process::exit;

use parsnip_lexer::CharInput;
use parsnip_parser::{
    CollectingHandler, NoopTracer, PrintTracer, Tracer, TreeBuilder, parse_with,
};

use crate::cli::CheckParams;
use crate::commands::grammar_loader::load_grammar;
use crate::util::{read_input, render_syntax_error, report_scan_error};

pub fn run(params: CheckParams) {
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
    let mut stream = match loaded.lexer.stream(CharInput::from_str(&source)) {
        Ok(stream) => stream,
        Err(e) => {
            report_scan_error(&source, source_path.as_deref(), &e, colored);
            exit(1);
        }
    };

    let mut handler = CollectingHandler::new();
    let mut print_tracer;
    let mut noop_tracer = NoopTracer;
    let tracer: &mut dyn Tracer = if params.verbose {
        print_tracer = PrintTracer::new(&loaded.table);
        &mut print_tracer
    } else {
        &mut noop_tracer
    };

    let outcome = parse_with(
        &loaded.tables,
        &loaded.grammar,
        &mut stream,
        &mut TreeBuilder,
        &mut handler,
        tracer,
    );

    match outcome {
        Err(e) => {
            report_scan_error(&source, source_path.as_deref(), &e, colored);
            exit(1);
        }
        Ok(tree) => {
            for error in &handler.errors {
                eprintln!(
                    "{}",
                    render_syntax_error(
                        &source,
                        source_path.as_deref(),
                        error,
                        &loaded.table,
                        colored,
                    )
                );
            }
            for token in &handler.unknown {
                eprintln!(
                    "warning: token `{}` at {} is not part of this grammar",
                    token.lexeme, token.coordinates
                );
            }
            if tree.is_none() || !handler.errors.is_empty() {
                exit(1);
            }
        }
    }
    // Silent on success.
}
