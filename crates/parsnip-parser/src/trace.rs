//! Opt-in tracing of the driver's shift/reduce loop.

use parsnip_core::{Symbol, SymbolTable, Token};

/// Observes one driver iteration before the action is taken.
pub trait Tracer {
    fn step(&mut self, states: &[usize], symbols: &[Symbol], lookahead: &Token);
}

/// The default tracer. Does nothing.
#[derive(Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn step(&mut self, _states: &[usize], _symbols: &[Symbol], _lookahead: &Token) {}
}

/// Prints the state stack, symbol stack and lookahead to stderr each step.
pub struct PrintTracer<'a> {
    table: &'a SymbolTable,
}

impl<'a> PrintTracer<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    fn name(&self, s: Symbol) -> &str {
        self.table.try_resolve(s).unwrap_or("?")
    }
}

impl Tracer for PrintTracer<'_> {
    fn step(&mut self, states: &[usize], symbols: &[Symbol], lookahead: &Token) {
        let state_line = states
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let symbol_line = symbols
            .iter()
            .map(|&s| self.name(s).to_owned())
            .collect::<Vec<_>>()
            .join(" ");
        eprintln!("state stack: {state_line}");
        eprintln!("symbol stack: {symbol_line}");
        eprintln!("input symbol: {}", self.name(lookahead.symbol));
        eprintln!();
    }
}
