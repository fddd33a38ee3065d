//! The concrete syntax tree produced by the driver.

use parsnip_core::{Coordinates, Symbol, SymbolTable, Token};

use crate::driver::TreeFactory;

/// An owned parse tree node.
///
/// `Leaf` wraps one shifted token. `Node` wraps one reduction: its rule id,
/// its left-hand symbol, and the reduced children in order. A `Node` with
/// `rule: None` is synthetic: fabricated by panic-mode recovery rather than
/// by an actual reduction.
#[derive(Clone, PartialEq, Debug, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParseTree {
    Leaf {
        symbol: Symbol,
        lexeme: String,
        coordinates: Coordinates,
    },
    Node {
        symbol: Symbol,
        rule: Option<usize>,
        children: Vec<ParseTree>,
    },
}

impl ParseTree {
    /// The terminal symbol of a leaf, the left-hand symbol of a node.
    pub fn symbol(&self) -> Symbol {
        match self {
            ParseTree::Leaf { symbol, .. } | ParseTree::Node { symbol, .. } => *symbol,
        }
    }

    pub fn children(&self) -> &[ParseTree] {
        match self {
            ParseTree::Leaf { .. } => &[],
            ParseTree::Node { children, .. } => children,
        }
    }

    pub fn lexeme(&self) -> Option<&str> {
        match self {
            ParseTree::Leaf { lexeme, .. } => Some(lexeme),
            ParseTree::Node { .. } => None,
        }
    }

    pub fn rule(&self) -> Option<usize> {
        match self {
            ParseTree::Leaf { .. } => None,
            ParseTree::Node { rule, .. } => *rule,
        }
    }

    /// Whether this subtree contains a node fabricated by error recovery.
    pub fn has_synthetic(&self) -> bool {
        match self {
            ParseTree::Leaf { .. } => false,
            ParseTree::Node { rule, children, .. } => {
                rule.is_none() || children.iter().any(ParseTree::has_synthetic)
            }
        }
    }

    /// One-line rendering with symbol names: `name[lexeme]` for leaves,
    /// `name( child, child )` for nodes.
    pub fn render(&self, table: &SymbolTable) -> String {
        let mut out = String::new();
        self.render_into(table, &mut out);
        out
    }

    fn render_into(&self, table: &SymbolTable, out: &mut String) {
        let name = |s: Symbol| table.try_resolve(s).unwrap_or("?").to_owned();
        match self {
            ParseTree::Leaf { symbol, lexeme, .. } => {
                out.push_str(&name(*symbol));
                out.push('[');
                out.push_str(lexeme);
                out.push(']');
            }
            ParseTree::Node {
                symbol, children, ..
            } => {
                out.push_str(&name(*symbol));
                out.push('(');
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    child.render_into(table, out);
                }
                out.push(')');
            }
        }
    }
}

/// The default tree factory: builds [`ParseTree`] values.
#[derive(Debug, Default)]
pub struct TreeBuilder;

impl TreeFactory for TreeBuilder {
    type Node = ParseTree;

    fn leaf(&mut self, token: &Token) -> ParseTree {
        ParseTree::Leaf {
            symbol: token.symbol,
            lexeme: token.lexeme.clone(),
            coordinates: token.coordinates,
        }
    }

    fn node(&mut self, children: Vec<ParseTree>, rule: Option<usize>, lhs: Symbol) -> ParseTree {
        ParseTree::Node {
            symbol: lhs,
            rule,
            children,
        }
    }
}
