//! Subset construction and the match loops.
//!
//! A DFA state is a configuration: the set of live AST positions plus one
//! trailing accept slot. The worklist construction enumerates every
//! configuration reachable from the seeded initial one over bytes `0..127`,
//! then the transition and accept-transition tables are filled in a second
//! pass. Table cells are `0` for reject, `state + 1` otherwise.

use parsnip_core::ScanError;

use crate::ast::RegexAst;
use crate::input::CharInput;

const BYTE_RANGE: usize = 127;

type Config = Vec<bool>;

#[derive(Debug)]
pub struct Dfa {
    /// All distinct configurations; index 0 is the initial one. The last
    /// slot of each configuration is the accept flag.
    configs: Vec<Config>,

    /// `transitions[state][byte] = next_state + 1`, or 0 to reject.
    transitions: Vec<Vec<usize>>,

    /// `accepts[from][to] = token_id` recognized on that edge, or 0. The
    /// first accept reported during the step wins, which makes the
    /// earliest-declared token rule the tiebreaker.
    accepts: Vec<Vec<usize>>,
}

impl Dfa {
    /// Compile the expression tree. Positions are (re)assigned here, so the
    /// tree must be final.
    pub fn compile(ast: &mut RegexAst) -> Self {
        let size = ast.assign_positions(0);
        let width = size + 1;

        let mut initial = vec![false; width];
        ast.seed(&mut initial);

        let mut configs: Vec<Config> = Vec::new();
        let mut work = vec![initial];
        while let Some(current) = work.pop() {
            if configs.contains(&current) {
                continue;
            }
            for byte in 0..BYTE_RANGE as u8 {
                let (succ, _) = step(ast, &current, width, size, byte);
                if succ.iter().any(|&b| b) {
                    work.push(succ);
                }
            }
            configs.push(current);
        }

        let n = configs.len();
        let mut transitions = vec![vec![0; BYTE_RANGE]; n];
        let mut accepts = vec![vec![0; n]; n];

        for i in 0..n {
            for byte in 0..BYTE_RANGE as u8 {
                let (succ, accept) = step(ast, &configs[i], width, size, byte);
                if !succ.iter().any(|&b| b) {
                    continue;
                }
                let j = configs
                    .iter()
                    .position(|c| *c == succ)
                    .expect("every successor was enumerated by the worklist");
                transitions[i][byte as usize] = j + 1;
                if let Some(&id) = accept.first() {
                    accepts[i][j] = id;
                }
            }
        }

        Self {
            configs,
            transitions,
            accepts,
        }
    }

    pub fn state_count(&self) -> usize {
        self.configs.len()
    }

    fn is_accepting(&self, state: usize) -> bool {
        *self.configs[state].last().unwrap()
    }

    /// Whether the DFA accepts `input` exactly.
    pub fn matches(&self, input: &[u8]) -> bool {
        let mut state = 0;
        let mut pos = 0;
        while pos < input.len() {
            let byte = input[pos];
            if byte as usize >= BYTE_RANGE {
                return false;
            }
            match self.transitions[state][byte as usize] {
                0 => break,
                next => {
                    state = next - 1;
                    pos += 1;
                }
            }
        }
        pos == input.len() && self.is_accepting(state)
    }

    /// Greedy longest match against the head of `input`.
    ///
    /// Scans while a transition exists, even past accepts, remembering the
    /// last position where an accept edge fired and the token id on that
    /// edge. On success the matched prefix is consumed and returned with
    /// the id; `None` consumes nothing.
    pub fn longest_match(&self, input: &mut CharInput) -> Result<Option<(String, usize)>, ScanError> {
        let mut matched = false;
        let mut last_position = 0;
        let mut last_token = 0;
        let mut state = 0;
        let mut offset = 0;

        loop {
            let Some(byte) = input.get(offset)? else {
                break;
            };
            if byte as usize >= BYTE_RANGE {
                break;
            }
            let next = self.transitions[state][byte as usize];
            if next == 0 {
                break;
            }
            if self.accepts[state][next - 1] != 0 {
                matched = true;
                last_position = offset;
                last_token = self.accepts[state][next - 1];
            }
            state = next - 1;
            offset += 1;
        }

        if matched {
            let lexeme = input.extract(last_position + 1)?;
            Ok(Some((lexeme, last_token)))
        } else {
            Ok(None)
        }
    }
}

fn step(ast: &RegexAst, current: &Config, width: usize, size: usize, byte: u8) -> (Config, Vec<usize>) {
    let mut succ = vec![false; width];
    let mut accept = Vec::new();
    let fired = ast.advance(current, &mut succ, &mut accept, byte);
    succ[size] = fired;
    (succ, accept)
}
