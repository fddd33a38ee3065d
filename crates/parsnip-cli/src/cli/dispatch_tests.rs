use std::path::PathBuf;

use super::commands::build_cli;
use super::dispatch::{CheckParams, ColorChoice, EvalParams, OutputFormat, TokenizeParams};

#[test]
fn check_params_parse() {
    let matches = build_cli()
        .try_get_matches_from(["parsnip", "check", "-g", "lang.pg", "input.txt", "-v"])
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    let params = CheckParams::from_matches(sub);

    assert_eq!(params.grammar, PathBuf::from("lang.pg"));
    assert_eq!(params.source_path, Some(PathBuf::from("input.txt")));
    assert_eq!(params.source_text, None);
    assert!(params.verbose);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn check_requires_a_grammar() {
    assert!(
        build_cli()
            .try_get_matches_from(["parsnip", "check", "input.txt"])
            .is_err()
    );
}

#[test]
fn tokenize_format_defaults_to_text() {
    let matches = build_cli()
        .try_get_matches_from(["parsnip", "tokenize", "-g", "lang.pg", "-s", "1, 2"])
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    let params = TokenizeParams::from_matches(sub);

    assert_eq!(params.format, OutputFormat::Text);
    assert_eq!(params.source_text.as_deref(), Some("1, 2"));
}

#[test]
fn eval_accepts_inline_expressions() {
    let matches = build_cli()
        .try_get_matches_from(["parsnip", "eval", "-e", "(+ 1 2)", "--format", "json"])
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    let params = EvalParams::from_matches(sub);

    assert_eq!(params.expr.as_deref(), Some("(+ 1 2)"));
    assert_eq!(params.format, OutputFormat::Json);
}

#[test]
fn color_never_disables_colorization() {
    let matches = build_cli()
        .try_get_matches_from(["parsnip", "check", "-g", "g.pg", "--color", "never", "x"])
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    let params = CheckParams::from_matches(sub);

    assert_eq!(params.color, ColorChoice::Never);
    assert!(!params.color.should_colorize());
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(
        build_cli()
            .try_get_matches_from(["parsnip", "frobnicate"])
            .is_err()
    );
}
