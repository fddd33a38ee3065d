//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("parsnip")
        .about("Runtime parser generator, lexer generator, and script interpreter")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(tokenize_command())
        .subcommand(tables_command())
        .subcommand(eval_command())
}

/// Parse a source file against a grammar; exit 0 on success.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Parse a source file against a grammar")
        .after_help(
            r#"EXAMPLES:
  parsnip check -g lang.pg input.txt
  parsnip check -g lang.pg -s '1, 2, 3'
  parsnip check -g lang.pg input.txt -v"#,
        )
        .arg(grammar_arg())
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(verbose_arg())
        .arg(color_arg())
}

/// Tokenize a source file with the grammar's lexical rules.
pub fn tokenize_command() -> Command {
    Command::new("tokenize")
        .about("Tokenize a source file with the grammar's lexical rules")
        .after_help(
            r#"EXAMPLES:
  parsnip tokenize -g lang.pg input.txt
  parsnip tokenize -g lang.pg -s '1, 2' --format json"#,
        )
        .arg(grammar_arg())
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(format_arg())
        .arg(color_arg())
}

/// Print the generated parser tables.
pub fn tables_command() -> Command {
    Command::new("tables")
        .about("Print the grammar, item sets, ACTION/GOTO tables and FIRST/FOLLOW sets")
        .after_help(
            r#"EXAMPLES:
  parsnip tables -g lang.pg"#,
        )
        .arg(grammar_arg())
}

/// Evaluate a script.
pub fn eval_command() -> Command {
    Command::new("eval")
        .about("Evaluate an s-expression script")
        .after_help(
            r#"EXAMPLES:
  parsnip eval script.ps
  parsnip eval -e '(+ 1 2)'
  parsnip eval -e '(set a 5) (* a a)' --format json"#,
        )
        .arg(script_path_arg())
        .arg(expr_arg())
        .arg(format_arg())
}
