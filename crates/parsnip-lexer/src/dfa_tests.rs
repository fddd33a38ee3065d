use crate::dfa::Dfa;
use crate::input::CharInput;
use crate::syntax::RegexSyntax;

fn compile(pattern: &str) -> Dfa {
    let syntax = RegexSyntax::new();
    let mut ast = syntax.parse(pattern).unwrap();
    Dfa::compile(&mut ast)
}

/// Like [`compile`], with the root tagged as accept point `1` so the
/// longest-match scanner can report it.
fn compile_tagged(pattern: &str) -> Dfa {
    let syntax = RegexSyntax::new();
    let mut ast = syntax.parse(pattern).unwrap();
    ast.mark_accept(1);
    Dfa::compile(&mut ast)
}

#[test]
fn kleene_star_accepts_zero_or_more() {
    let dfa = compile("ab*");
    assert!(dfa.matches(b"a"));
    assert!(dfa.matches(b"ab"));
    assert!(dfa.matches(b"abbbb"));
    assert!(!dfa.matches(b"b"));
    assert!(!dfa.matches(b"aab"));
}

#[test]
fn plus_equals_self_then_star() {
    let sugar = compile("[0-9]+");
    let desugared = compile("[0-9][0-9]*");

    for input in ["", "7", "12", "00123", "1a", "a"] {
        assert_eq!(
            sugar.matches(input.as_bytes()),
            desugared.matches(input.as_bytes()),
            "disagreement on {input:?}"
        );
    }
    assert!(sugar.matches(b"12"));
    assert!(!sugar.matches(b""));
}

#[test]
fn question_accepts_zero_or_one() {
    let dfa = compile("ab?");
    assert!(dfa.matches(b"a"));
    assert!(dfa.matches(b"ab"));
    assert!(!dfa.matches(b"abb"));
    assert!(!dfa.matches(b"b"));
}

#[test]
fn optional_group_as_prefix() {
    let dfa = compile("(ab)?c");
    assert!(dfa.matches(b"c"));
    assert!(dfa.matches(b"abc"));
    assert!(!dfa.matches(b"ababc"));
    assert!(!dfa.matches(b""));
}

#[test]
fn nested_groups_and_stars() {
    let dfa = compile("(ab)*c");
    assert!(dfa.matches(b"c"));
    assert!(dfa.matches(b"abc"));
    assert!(dfa.matches(b"ababc"));
    assert!(!dfa.matches(b"abab"));
    assert!(!dfa.matches(b"aabc"));
}

#[test]
fn longest_match_stops_at_last_accept() {
    let dfa = compile_tagged("[0-9]+");
    let mut input = CharInput::from_str("12a");

    let (lexeme, id) = dfa.longest_match(&mut input).unwrap().unwrap();
    assert_eq!(lexeme, "12");
    assert_eq!(id, 1);
    assert_eq!(input.get(0).unwrap(), Some(b'a'));
}

#[test]
fn longest_match_scans_past_intermediate_accepts() {
    // "abcb" accepts at "a" and "abc"; the trailing "b" stalls the machine
    // and the match backs up to the last accept.
    let dfa = compile_tagged("a(bc)*");
    let mut input = CharInput::from_str("abcbx");

    let (lexeme, id) = dfa.longest_match(&mut input).unwrap().unwrap();
    assert_eq!(lexeme, "abc");
    assert_eq!(id, 1);
    assert_eq!(input.get(0).unwrap(), Some(b'b'));
}

#[test]
fn longest_match_without_accept_consumes_nothing() {
    let dfa = compile_tagged("abc");
    let mut input = CharInput::from_str("abx");

    assert!(dfa.longest_match(&mut input).unwrap().is_none());
    assert_eq!(input.get(0).unwrap(), Some(b'a'));
}

#[test]
fn longest_match_agrees_with_prefix_scan() {
    let dfa = compile_tagged("(ab)+");
    let full = compile("(ab)+");

    let text = "abababX";
    // Reference: try every prefix with the full matcher, keep the longest.
    let expected = (1..=text.len())
        .rev()
        .find(|&n| full.matches(&text.as_bytes()[..n]));

    let mut input = CharInput::from_str(text);
    let got = dfa
        .longest_match(&mut input)
        .unwrap()
        .map(|(lexeme, _)| lexeme.len());
    assert_eq!(got, expected);
    assert_eq!(got, Some(6));
}

#[test]
fn accepting_flag_lives_in_the_sentinel_slot() {
    let dfa = compile("a");
    assert!(dfa.matches(b"a"));
    assert!(!dfa.matches(b"aa"));
    assert!(dfa.state_count() >= 2);
}
