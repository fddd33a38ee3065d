use std::process::exit;

use parsnip_script::Interpreter;

use crate::cli::{EvalParams, OutputFormat};
use crate::util::read_input;

pub fn run(params: EvalParams) {
    let source = match read_input(params.script_path.as_deref(), params.expr.as_deref(), "script")
    {
        Ok(text) => text,
        Err(msg) => {
            eprintln!("error: {msg}");
            exit(2);
        }
    };

    let mut interpreter = Interpreter::new();
    let values = match interpreter.eval_source(&source) {
        Ok(values) => values,
        Err(e) => {
            eprintln!("error: {e}");
            exit(1);
        }
    };

    match params.format {
        OutputFormat::Json => {
            let rows: Vec<&parsnip_script::Value> = values.iter().map(|v| &**v).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).expect("script values serialize")
            );
        }
        OutputFormat::Text => {
            for value in &values {
                println!("{value}");
            }
        }
    }
}
