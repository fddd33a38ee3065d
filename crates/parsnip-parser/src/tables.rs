//! ACTION and GOTO table construction.
//!
//! The construction is SLR(1): reduce entries are written only under the
//! FOLLOW set of the reduced non-terminal. Any residual conflict is fatal
//! here, at build time, never at parse time.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use indexmap::{IndexMap, IndexSet};
use parsnip_core::{Grammar, Symbol};

use crate::item::{self, Item, ItemSet};

/// Errors detected while building the parser tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("no production rule rewrites the start symbol")]
    NoStartRule,

    /// The start symbol must have exactly one production so the accepting
    /// state is unambiguous.
    #[error("more than one production rule rewrites the start symbol")]
    DuplicateStartRule,

    #[error("shift-reduce conflict in state {state} on terminal #{}", terminal.as_u32())]
    ShiftReduce { state: usize, terminal: Symbol },

    #[error("reduce-reduce conflict in state {state}")]
    ReduceReduce { state: usize },
}

/// The tables driving an SLR(1) parser, built once from a grammar.
///
/// Action encoding per cell: `0` is a syntax error, `n > 0` shifts and
/// pushes state `n - 1`, `n < 0` reduces production `-n - 1`. GOTO cells are
/// `0` for undefined or `state + 1`.
#[derive(Debug)]
pub struct LrTables {
    /// All parser states, in discovery order. State 0 is the start state.
    /// Only needed for printing and debugging once the tables are filled.
    pub states: Vec<ItemSet>,

    /// `actions[state][terminal_index]`, encoded as described above.
    pub actions: Vec<Vec<i32>>,

    /// `gotos[state][non_terminal_index]`.
    pub gotos: Vec<Vec<i32>>,

    /// The state whose completed item rewrites the start symbol. Parsing
    /// stops when it surfaces on top of the state stack.
    pub accepting_state: usize,

    /// Right-hand side length of each production, by production id.
    pub rule_len: Vec<usize>,

    /// Left-hand side of each production, by production id.
    pub reduce_symbol: Vec<Symbol>,

    /// Column of each terminal in `actions`, in grammar terminal order.
    pub terminal_index: IndexMap<Symbol, usize>,

    /// Column of each non-terminal in `gotos`, in grammar non-terminal order.
    pub non_terminal_index: IndexMap<Symbol, usize>,

    /// Kept after construction for printing and debugging.
    pub firsts: BTreeMap<Symbol, BTreeSet<Symbol>>,
    pub follows: BTreeMap<Symbol, BTreeSet<Symbol>>,
}

impl LrTables {
    pub fn build(grammar: &Grammar) -> Result<Self, BuildError> {
        let rule_len = grammar.productions().iter().map(|p| p.rhs.len()).collect();
        let reduce_symbol = grammar.productions().iter().map(|p| p.lhs).collect();

        let terminal_index: IndexMap<Symbol, usize> = grammar
            .terminals()
            .iter()
            .enumerate()
            .map(|(i, &s)| (s, i))
            .collect();
        let non_terminal_index: IndexMap<Symbol, usize> = grammar
            .non_terminals()
            .iter()
            .enumerate()
            .map(|(i, &s)| (s, i))
            .collect();

        let firsts = first_sets(grammar);
        let follows = follow_sets(grammar, &firsts);
        let states = configuration_set(grammar)?;

        let mut tables = Self {
            states,
            actions: Vec::new(),
            gotos: Vec::new(),
            accepting_state: 0,
            rule_len,
            reduce_symbol,
            terminal_index,
            non_terminal_index,
            firsts,
            follows,
        };
        tables.fill(grammar)?;
        Ok(tables)
    }

    fn fill(&mut self, grammar: &Grammar) -> Result<(), BuildError> {
        let n_states = self.states.len();
        self.actions = vec![vec![0; self.terminal_index.len()]; n_states];
        self.gotos = vec![vec![0; self.non_terminal_index.len()]; n_states];

        for i in 0..n_states {
            if let Some(rule) = reducible_item(&self.states[i], grammar, i)? {
                let lhs = grammar.production(rule).lhs;
                if lhs == grammar.start() {
                    self.accepting_state = i;
                } else if let Some(follow) = self.follows.get(&lhs) {
                    for term in follow {
                        let col = self.terminal_index[term];
                        self.actions[i][col] = -(rule as i32) - 1;
                    }
                }
            }

            for (&term, &col) in &self.terminal_index {
                let succ = item::successor(&self.states[i], grammar, term);
                if succ.is_empty() {
                    continue;
                }
                let target = self.state_index(&succ);
                if self.actions[i][col] == 0 {
                    self.actions[i][col] = target as i32 + 1;
                } else {
                    return Err(BuildError::ShiftReduce {
                        state: i,
                        terminal: term,
                    });
                }
            }

            for (&nt, &col) in &self.non_terminal_index {
                let succ = item::successor(&self.states[i], grammar, nt);
                if !succ.is_empty() {
                    self.gotos[i][col] = self.state_index(&succ) as i32 + 1;
                }
            }
        }
        Ok(())
    }

    fn state_index(&self, state: &ItemSet) -> usize {
        self.states
            .iter()
            .position(|s| s == state)
            .expect("successor of a known state is a known state")
    }

    /// Terminals with a non-error action in `state`, for error reporting.
    pub fn expected_terminals(&self, state: usize) -> Vec<Symbol> {
        self.terminal_index
            .iter()
            .filter(|&(_, &col)| self.actions[state][col] != 0)
            .map(|(&term, _)| term)
            .collect()
    }
}

/// FIRST sets. Terminals map to themselves; with epsilon productions ruled
/// out, `FIRST(A)` accumulates `FIRST` of every leading right-hand symbol of
/// `A`'s rules until the fixpoint.
fn first_sets(grammar: &Grammar) -> BTreeMap<Symbol, BTreeSet<Symbol>> {
    let mut firsts: BTreeMap<Symbol, BTreeSet<Symbol>> = BTreeMap::new();
    for &t in grammar.terminals() {
        firsts.entry(t).or_default().insert(t);
    }

    let mut changed = true;
    while changed {
        changed = false;
        for p in grammar.productions() {
            let from_front: Vec<Symbol> = firsts
                .get(&p.rhs[0])
                .map(|s| s.iter().copied().collect())
                .unwrap_or_default();
            let entry = firsts.entry(p.lhs).or_default();
            for s in from_front {
                changed |= entry.insert(s);
            }
        }
    }
    firsts
}

/// FOLLOW sets. Every occurrence of a non-terminal in any right-hand side
/// contributes, not only the first one: `FIRST` of the next symbol, or
/// `FOLLOW` of the producing left-hand side at the end of a rule.
fn follow_sets(
    grammar: &Grammar,
    firsts: &BTreeMap<Symbol, BTreeSet<Symbol>>,
) -> BTreeMap<Symbol, BTreeSet<Symbol>> {
    let mut follows: BTreeMap<Symbol, BTreeSet<Symbol>> = BTreeMap::new();

    let mut changed = true;
    while changed {
        changed = false;
        for &current in grammar.non_terminals() {
            for p in grammar.productions() {
                for (pos, &s) in p.rhs.iter().enumerate() {
                    if s != current {
                        continue;
                    }
                    let contribution: Vec<Symbol> = match p.rhs.get(pos + 1) {
                        Some(next) => firsts
                            .get(next)
                            .map(|set| set.iter().copied().collect())
                            .unwrap_or_default(),
                        None => follows
                            .get(&p.lhs)
                            .map(|set| set.iter().copied().collect())
                            .unwrap_or_default(),
                    };
                    let entry = follows.entry(current).or_default();
                    for sym in contribution {
                        changed |= entry.insert(sym);
                    }
                }
            }
        }
    }
    follows
}

/// The canonical collection: breadth-first enumeration of unique states from
/// the closure of the start item.
fn configuration_set(grammar: &Grammar) -> Result<Vec<ItemSet>, BuildError> {
    let start_rule = start_production(grammar)?;

    let mut start_state = ItemSet::new();
    start_state.insert(Item::new(start_rule, 0));
    item::close(&mut start_state, grammar);

    let mut states: IndexSet<ItemSet> = IndexSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(start_state);

    while let Some(current) = queue.pop_front() {
        if states.contains(&current) {
            continue;
        }
        for &sym in grammar.symbols() {
            let succ = item::successor(&current, grammar, sym);
            if !succ.is_empty() {
                queue.push_back(succ);
            }
        }
        states.insert(current);
    }

    Ok(states.into_iter().collect())
}

/// The unique production rewriting the start symbol.
fn start_production(grammar: &Grammar) -> Result<usize, BuildError> {
    let mut found = None;
    for (id, p) in grammar.productions().iter().enumerate() {
        if p.lhs == grammar.start() {
            if found.is_some() {
                return Err(BuildError::DuplicateStartRule);
            }
            found = Some(id);
        }
    }
    found.ok_or(BuildError::NoStartRule)
}

/// The production of the completed item in `state`, if any. Two completed
/// items cannot be disambiguated without more lookahead than SLR carries, so
/// that is a reduce-reduce conflict.
fn reducible_item(
    state: &ItemSet,
    grammar: &Grammar,
    state_id: usize,
) -> Result<Option<usize>, BuildError> {
    let mut found = None;
    for item in state {
        if item.is_complete(grammar) {
            if found.is_some() {
                return Err(BuildError::ReduceReduce { state: state_id });
            }
            found = Some(item.production);
        }
    }
    Ok(found)
}
