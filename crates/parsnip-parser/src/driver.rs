//! The table-driven parse loop.
//!
//! The driver owns nothing but its two stacks; tokens come from a
//! [`TokenSource`], tree nodes go through a [`TreeFactory`], and errors are
//! reported to an [`ErrorHandler`] before recovery is attempted. All three
//! seams are traits so the regex bootstrap parser, the script front end and
//! the demo tool can share one loop.

use std::collections::BTreeSet;

use parsnip_core::{Grammar, ScanError, Symbol, Token};

use crate::tables::LrTables;
use crate::trace::{NoopTracer, Tracer};

/// Pull-based token supply. `current` is stable until `advance` is called;
/// after exhaustion the source keeps returning its end-of-input token.
pub trait TokenSource {
    fn current(&self) -> &Token;
    fn advance(&mut self) -> Result<(), ScanError>;
}

/// Builds tree nodes on behalf of the driver.
pub trait TreeFactory {
    type Node;

    /// A terminal node for the token about to be shifted.
    fn leaf(&mut self, token: &Token) -> Self::Node;

    /// A production node over `children`. `rule` is `None` for synthetic
    /// nodes fabricated during recovery.
    fn node(&mut self, children: Vec<Self::Node>, rule: Option<usize>, lhs: Symbol) -> Self::Node;
}

/// An unexpected token together with the terminals the state accepts.
#[derive(Clone, Debug)]
pub struct SyntaxError {
    pub token: Token,
    pub expected: Vec<Symbol>,
}

/// Receives error reports before the driver attempts recovery.
pub trait ErrorHandler {
    /// The token is lexically valid but not a terminal of this grammar.
    fn unknown_token(&mut self, token: &Token);

    /// No action is defined for the current state and lookahead.
    fn syntax_error(&mut self, error: &SyntaxError);
}

/// Swallows all reports.
#[derive(Debug, Default)]
pub struct SilentHandler;

impl ErrorHandler for SilentHandler {
    fn unknown_token(&mut self, _token: &Token) {}
    fn syntax_error(&mut self, _error: &SyntaxError) {}
}

/// Accumulates all reports for later rendering.
#[derive(Debug, Default)]
pub struct CollectingHandler {
    pub unknown: Vec<Token>,
    pub errors: Vec<SyntaxError>,
}

impl CollectingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.unknown.is_empty() && self.errors.is_empty()
    }
}

impl ErrorHandler for CollectingHandler {
    fn unknown_token(&mut self, token: &Token) {
        self.unknown.push(token.clone());
    }

    fn syntax_error(&mut self, error: &SyntaxError) {
        self.errors.push(error.clone());
    }
}

/// A token source over a pre-lexed slice. Infallible; the slice must end
/// with an end-of-input token, which is then returned forever.
pub struct SliceTokenSource<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> SliceTokenSource<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        assert!(!tokens.is_empty(), "token slice must not be empty");
        Self { tokens, pos: 0 }
    }
}

impl TokenSource for SliceTokenSource<'_> {
    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Result<(), ScanError> {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        Ok(())
    }
}

/// Parse the token stream into a tree.
///
/// Returns `Ok(None)` when a syntax error could not be recovered from; scan
/// failures while advancing the source propagate as errors.
pub fn parse_to_tree<S, F, H>(
    tables: &LrTables,
    grammar: &Grammar,
    input: &mut S,
    factory: &mut F,
    handler: &mut H,
) -> Result<Option<F::Node>, ScanError>
where
    S: TokenSource,
    F: TreeFactory,
    H: ErrorHandler,
{
    parse_with(tables, grammar, input, factory, handler, &mut NoopTracer)
}

/// [`parse_to_tree`] with a tracer observing every iteration.
pub fn parse_with<S, F, H>(
    tables: &LrTables,
    grammar: &Grammar,
    input: &mut S,
    factory: &mut F,
    handler: &mut H,
    tracer: &mut dyn Tracer,
) -> Result<Option<F::Node>, ScanError>
where
    S: TokenSource,
    F: TreeFactory,
    H: ErrorHandler,
{
    let mut states: Vec<usize> = vec![0];
    let mut nodes: Vec<F::Node> = Vec::new();
    let mut symbols: Vec<Symbol> = Vec::new();

    while *states.last().unwrap() != tables.accepting_state {
        tracer.step(&states, &symbols, input.current());

        let Some(&terminal_id) = tables.terminal_index.get(&input.current().symbol) else {
            handler.unknown_token(input.current());
            input.advance()?;
            continue;
        };

        let action = tables.actions[*states.last().unwrap()][terminal_id];
        if action > 0 {
            nodes.push(factory.leaf(input.current()));
            symbols.push(input.current().symbol);
            states.push(action as usize - 1);
            input.advance()?;
        } else if action < 0 {
            let rule = (-action - 1) as usize;
            let len = tables.rule_len[rule];
            let lhs = tables.reduce_symbol[rule];

            let children = nodes.split_off(nodes.len() - len);
            nodes.push(factory.node(children, Some(rule), lhs));
            symbols.truncate(symbols.len() - len);
            symbols.push(lhs);

            states.truncate(states.len() - len);
            let goto = tables.gotos[*states.last().unwrap()][tables.non_terminal_index[&lhs]];
            states.push(goto as usize - 1);
        } else {
            handler.syntax_error(&SyntaxError {
                token: input.current().clone(),
                expected: tables.expected_terminals(*states.last().unwrap()),
            });
            if !recover(
                tables,
                grammar,
                terminal_id,
                &mut states,
                &mut nodes,
                &mut symbols,
                factory,
            ) {
                return Ok(None);
            }
        }
    }

    // The start reduction itself is never materialized, so the stack holds
    // the root plus the trailing end-of-input leaf. Drop the leaf.
    nodes.pop();
    Ok(nodes.into_iter().next())
}

/// Validate the token stream against the grammar without building a tree.
///
/// Returns false when any syntax error occurred, even if recovery allowed
/// the loop to finish.
pub fn validate<S, H>(
    tables: &LrTables,
    grammar: &Grammar,
    input: &mut S,
    handler: &mut H,
) -> Result<bool, ScanError>
where
    S: TokenSource,
    H: ErrorHandler,
{
    struct NoTree;
    impl TreeFactory for NoTree {
        type Node = ();
        fn leaf(&mut self, _token: &Token) {}
        fn node(&mut self, _children: Vec<()>, _rule: Option<usize>, _lhs: Symbol) {}
    }

    let mut clean = true;
    struct Watch<'h, H> {
        inner: &'h mut H,
        clean: &'h mut bool,
    }
    impl<H: ErrorHandler> ErrorHandler for Watch<'_, H> {
        fn unknown_token(&mut self, token: &Token) {
            self.inner.unknown_token(token);
        }
        fn syntax_error(&mut self, error: &SyntaxError) {
            *self.clean = false;
            self.inner.syntax_error(error);
        }
    }

    let mut watch = Watch {
        inner: handler,
        clean: &mut clean,
    };
    let tree = parse_to_tree(tables, grammar, input, &mut NoTree, &mut watch)?;
    Ok(tree.is_some() && clean)
}

/// Panic-mode reduction-goal recovery.
///
/// Walk the state stack from the top down. At each depth, a candidate is any
/// non-terminal whose GOTO is defined there and whose target state shifts
/// the current lookahead. The first depth with candidates wins: the smallest
/// candidate symbol id (the earliest-minted non-terminal, deterministic for
/// a fixed symbol table) is generalized through unit productions, the stacks
/// are popped to that depth, and a synthetic node adopting the popped nodes
/// is pushed in its place.
fn recover<F: TreeFactory>(
    tables: &LrTables,
    grammar: &Grammar,
    terminal_id: usize,
    states: &mut Vec<usize>,
    nodes: &mut Vec<F::Node>,
    symbols: &mut Vec<Symbol>,
    factory: &mut F,
) -> bool {
    for depth in (1..=states.len()).rev() {
        let state = states[depth - 1];
        let goto_row = &tables.gotos[state];

        let mut candidates = BTreeSet::new();
        for (&nt, &col) in &tables.non_terminal_index {
            if goto_row[col] > 0 {
                let target = goto_row[col] as usize - 1;
                if tables.actions[target][terminal_id] > 0 {
                    candidates.insert(nt);
                }
            }
        }

        let Some(&first) = candidates.iter().next() else {
            continue;
        };
        let goal = grammar.important_goal(first, &candidates);

        let popped = states.len() - depth;
        states.truncate(depth);
        let children = nodes.split_off(nodes.len() - popped);
        nodes.push(factory.node(children, None, goal));
        symbols.truncate(symbols.len() - popped);
        symbols.push(goal);

        let goto = tables.gotos[*states.last().unwrap()][tables.non_terminal_index[&goal]];
        states.push(goto as usize - 1);
        return true;
    }
    false
}
