mod cli;
mod commands;
mod util;

use cli::{CheckParams, EvalParams, TablesParams, TokenizeParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            commands::check::run(CheckParams::from_matches(m));
        }
        Some(("tokenize", m)) => {
            commands::tokenize::run(TokenizeParams::from_matches(m));
        }
        Some(("tables", m)) => {
            commands::tables::run(TablesParams::from_matches(m));
        }
        Some(("eval", m)) => {
            commands::eval::run(EvalParams::from_matches(m));
        }
        _ => unreachable!("clap should have caught this"),
    }
}
