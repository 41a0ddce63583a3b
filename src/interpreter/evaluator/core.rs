use std::io::Write;

use tracing::debug;

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{environment::Environment, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Control continues with the next statement.
    Normal,
    /// A `return` ran. The value travels outward through every enclosing
    /// block until a function call boundary clears it.
    Return(Value),
}

/// Stores the runtime evaluation state.
///
/// This struct holds the global scope and the sink that `print` writes to.
///
/// ## Usage
///
/// An `Interpreter` is created once per program. [`Interpreter::run`]
/// executes the top-level statements in the global scope; every nested
/// scope is created on demand and handed down explicitly.
pub struct Interpreter<'out> {
    globals: Environment,
    out:     Box<dyn Write + 'out>,
}

#[allow(clippy::new_without_default)]
impl Interpreter<'_> {
    /// Creates an interpreter with an empty global scope that prints to
    /// standard output.
    #[must_use]
    pub fn new() -> Self {
        Interpreter::with_output(std::io::stdout())
    }
}

impl<'out> Interpreter<'out> {
    /// Creates an interpreter with an empty global scope that prints to
    /// `out`.
    ///
    /// # Example
    /// ```
    /// use quadra::interpreter::{evaluator::core::Interpreter, parser::core::parse_source};
    /// use quadra::error::Diagnostics;
    ///
    /// let mut diagnostics = Diagnostics::new();
    /// let program = parse_source("print(\"hi\")", &mut diagnostics);
    ///
    /// let mut buffer = Vec::new();
    /// Interpreter::with_output(&mut buffer).run(&program).unwrap();
    /// assert_eq!(buffer, b"hi\n");
    /// ```
    pub fn with_output(out: impl Write + 'out) -> Self {
        Self { globals: Environment::global(),
               out:     Box::new(out), }
    }
}

impl Interpreter<'_> {
    /// The global scope.
    #[must_use]
    pub const fn globals(&self) -> &Environment {
        &self.globals
    }

    /// The sink `print` writes to.
    pub(crate) fn output(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// Runs a program's top-level statements in the global scope.
    ///
    /// A `return` at top level stops the program early without error.
    ///
    /// # Errors
    /// Returns the first runtime error; evaluation stops there.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, program: &[Statement]) -> EvalResult<()> {
        let globals = self.globals.clone();
        if let Flow::Return(value) = self.exec_block(program, &globals)? {
            debug!(%value, "top-level return");
        }
        self.out
            .flush()
            .map_err(|source| RuntimeError::Output { source, line: 0 })
    }

    /// Executes statements in order in `env`, stopping at the first
    /// `return`.
    pub(crate) fn exec_block(&mut self, statements: &[Statement], env: &Environment) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.exec_statement(statement, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: literals, identifiers, array
    /// literals, unary and binary operations, calls and index reads.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: The scope names are resolved in.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, line } => env.lookup(name, *line),
            Expr::Array { elements, .. } => {
                let items = elements.iter()
                                    .map(|element| self.eval(element, env))
                                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(items.into())
            },
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, *line, env),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line, env),
            Expr::Call { callee, args, line } => self.eval_call(callee, args, *line, env),
            Expr::Index { array, index, line } => self.eval_index(array, index, *line, env),
            // Only produced inside argument lists, where calls splice it.
            Expr::Unpack { expr, .. } => self.eval(expr, env),
        }
    }
}
