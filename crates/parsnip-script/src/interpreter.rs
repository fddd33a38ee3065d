//! The interpreter facade.

use std::rc::Rc;

use parsnip_lexer::CharInput;
use parsnip_parser::{CollectingHandler, ParseTree, TreeBuilder, parse_to_tree};

use crate::ScriptError;
use crate::convert::expr_to_value;
use crate::eval::Evaluator;
use crate::syntax::ScriptSyntax;
use crate::value::Value;

/// Owns the script syntax and one evaluator. Bindings made by `set`
/// persist across [`Interpreter::eval_source`] calls.
pub struct Interpreter {
    syntax: ScriptSyntax,
    evaluator: Evaluator,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            syntax: ScriptSyntax::new(),
            evaluator: Evaluator::new(),
        }
    }

    pub fn evaluator(&mut self) -> &mut Evaluator {
        &mut self.evaluator
    }

    /// Parse a statement list and evaluate each expression in order,
    /// returning the resulting values.
    pub fn eval_source(&mut self, source: &str) -> Result<Vec<Rc<Value>>, ScriptError> {
        let mut stream = self.syntax.lexer.stream(CharInput::from_str(source))?;
        let mut handler = CollectingHandler::new();
        let tree = parse_to_tree(
            &self.syntax.tables,
            &self.syntax.grammar,
            &mut stream,
            &mut TreeBuilder,
            &mut handler,
        )?;

        // A recovered tree contains fabricated nodes; scripts are rejected
        // rather than evaluated over guesses.
        let tree = match tree {
            Some(tree) if handler.is_empty() => tree,
            _ => return Err(self.parse_failure(handler)),
        };

        let mut expressions = Vec::new();
        collect_expressions(&tree, &self.syntax, &mut expressions);

        let mut values = Vec::new();
        for expr in expressions {
            let value = expr_to_value(expr, &self.syntax)?;
            values.push(self.evaluator.eval(&value)?);
        }
        Ok(values)
    }

    fn parse_failure(&self, handler: CollectingHandler) -> ScriptError {
        let mut messages = Vec::new();
        for token in &handler.unknown {
            messages.push(format!(
                "unexpected token `{}` at {}",
                token.lexeme, token.coordinates
            ));
        }
        for error in &handler.errors {
            let expected: Vec<&str> = error
                .expected
                .iter()
                .map(|&s| self.syntax.table.try_resolve(s).unwrap_or("?"))
                .collect();
            messages.push(format!(
                "syntax error at {}: unexpected `{}`, expected one of: {}",
                error.token.coordinates,
                error.token.lexeme,
                expected.join(" ")
            ));
        }
        if messages.is_empty() {
            messages.push("syntax error".to_owned());
        }
        ScriptError::Parse { messages }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect every EXPR subtree that reduces to a statement, in source
/// order. EXPR nodes are not entered: nested expressions belong to their
/// enclosing statement.
fn collect_expressions<'t>(
    tree: &'t ParseTree,
    syntax: &ScriptSyntax,
    out: &mut Vec<&'t ParseTree>,
) {
    if let ParseTree::Node { symbol, children, .. } = tree {
        if *symbol == syntax.sym_expr {
            out.push(tree);
            return;
        }
        for child in children {
            collect_expressions(child, syntax, out);
        }
    }
}
