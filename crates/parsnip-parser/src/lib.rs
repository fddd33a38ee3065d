//! SLR(1) parser generation and driving.
//!
//! From a finalized [`parsnip_core::Grammar`] this crate builds the canonical
//! LR(0) item set collection, FIRST/FOLLOW sets, and ACTION/GOTO tables
//! ([`LrTables`]), then drives them over a token stream to produce a concrete
//! syntax tree ([`ParseTree`]) with panic-mode error recovery.
//!
//! - `item` - dotted items, closure, successor states
//! - `tables` - table construction and conflict detection
//! - `driver` - the shift/reduce loop, recovery, token source and tree
//!   factory seams
//! - `tree` - the owned two-variant parse tree
//! - `trace` - opt-in step-by-step stack tracing
//! - `print` - human-readable table and item set rendering

pub mod driver;
pub mod item;
pub mod print;
pub mod tables;
pub mod trace;
pub mod tree;

#[cfg(test)]
mod driver_tests;
#[cfg(test)]
mod tables_tests;

pub use driver::{
    CollectingHandler, ErrorHandler, SilentHandler, SliceTokenSource, SyntaxError, TokenSource,
    TreeFactory, parse_to_tree, parse_with, validate,
};
pub use item::{Item, ItemSet};
pub use print::TablePrinter;
pub use tables::{BuildError, LrTables};
pub use trace::{NoopTracer, PrintTracer, Tracer};
pub use tree::{ParseTree, TreeBuilder};
