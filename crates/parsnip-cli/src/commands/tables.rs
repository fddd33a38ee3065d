use std::process::exit;

use parsnip_parser::TablePrinter;

use crate::cli::TablesParams;
use crate::commands::grammar_loader::load_grammar;
use crate::util::read_input;

pub fn run(params: TablesParams) {
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

    let printer = TablePrinter::new(&loaded.tables, &loaded.grammar, &loaded.table);
    print!("{}", printer.render());
}
