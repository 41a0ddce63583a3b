use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::{Branch, Expr, Statement},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            utils::element_index,
        },
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Executes a single statement.
    ///
    /// Handles declarations and assignments, index assignment, function and
    /// lambda definitions, `return`, loops, conditionals and call
    /// statements.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `env`: The scope the statement runs in.
    ///
    /// # Returns
    /// [`Flow::Return`] if a `return` ran, directly or in a nested block;
    /// otherwise [`Flow::Normal`].
    pub(crate) fn exec_statement(&mut self, statement: &Statement, env: &Environment) -> EvalResult<Flow> {
        match statement {
            Statement::Assign { declared,
                                name,
                                value,
                                line, } => {
                let value = self.eval(value, env)?;
                match declared {
                    Some(ty) => env.add(ty.clone(), name, Some(value), *line)?,
                    None => env.add_or_update(name, value, *line)?,
                }
                Ok(Flow::Normal)
            },
            Statement::IndexAssign { array,
                                     index,
                                     value,
                                     line, } => {
                self.exec_index_assign(array, index, value, *line, env)?;
                Ok(Flow::Normal)
            },
            Statement::FunctionDef { name,
                                     return_type,
                                     params,
                                     body,
                                     line, } => {
                Self::define_function(name, return_type, params, Rc::clone(body), *line, env)?;
                Ok(Flow::Normal)
            },
            Statement::Lambda { name,
                                params,
                                body,
                                line, } => {
                Self::define_lambda(name, params, body, *line, env)?;
                Ok(Flow::Normal)
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            },
            Statement::While { condition, body, .. } => self.exec_while(condition, body, env),
            Statement::ForEach { ty,
                                 variable,
                                 iterable,
                                 body,
                                 line, } => self.exec_foreach(ty, variable, iterable, body, *line, env),
            Statement::Conditional { branches, otherwise, .. } => {
                self.exec_conditional(branches, otherwise.as_deref(), env)
            },
            Statement::If(branch) => self.exec_conditional(std::slice::from_ref(branch), None, env),
            Statement::Call { call, .. } => {
                self.eval(call, env)?;
                Ok(Flow::Normal)
            },
            // Folded into `Conditional` or reported by the block assembler;
            // a program containing them never reaches evaluation.
            Statement::ElseIf(_) | Statement::Else { .. } | Statement::Error { .. } => Ok(Flow::Normal),
        }
    }

    /// Runs `while condition` until the condition's truthiness is `false`.
    ///
    /// The condition is evaluated before every iteration, and each iteration
    /// runs the body in a fresh child scope of `env`.
    fn exec_while(&mut self, condition: &Expr, body: &[Statement], env: &Environment) -> EvalResult<Flow> {
        let mut iterations = 0usize;
        while self.eval(condition, env)?.truthy(condition.line())? {
            iterations += 1;
            if let Flow::Return(value) = self.exec_block(body, &env.child())? {
                return Ok(Flow::Return(value));
            }
        }
        trace!(iterations, "while loop finished");
        Ok(Flow::Normal)
    }

    /// Runs the body of the first branch whose condition is `true`, in a
    /// fresh child scope, or the `else` body if none is.
    ///
    /// Only the boolean `true` takes a branch. Any other value, `1` and
    /// `null` included, skips it without error. Conditions after the chosen
    /// branch are not evaluated.
    fn exec_conditional(&mut self,
                        branches: &[Branch],
                        otherwise: Option<&[Statement]>,
                        env: &Environment)
                        -> EvalResult<Flow> {
        for branch in branches {
            if matches!(self.eval(&branch.condition, env)?, Value::Bool(true)) {
                return self.exec_block(&branch.body, &env.child());
            }
        }
        match otherwise {
            Some(body) => self.exec_block(body, &env.child()),
            None => Ok(Flow::Normal),
        }
    }

    /// Reads `array[index]`.
    ///
    /// Negative indices count from the end.
    ///
    /// # Errors
    /// - `NotIndexable` if the target is not an array.
    /// - `IndexNotInteger` or `IndexOutOfBounds` for a bad index.
    pub(crate) fn eval_index(&mut self,
                             array: &Expr,
                             index: &Expr,
                             line: usize,
                             env: &Environment)
                             -> EvalResult<Value> {
        let target = self.eval(array, env)?;
        let index = self.eval(index, env)?;

        let Value::Array(items) = &target else {
            return Err(RuntimeError::NotIndexable { kind: target.type_name(),
                                                    line });
        };
        let items = items.borrow();
        let position = element_index(&index, items.len(), line)?;
        Ok(items[position].clone())
    }

    /// Executes `array[index] = value`, replacing the element in place.
    ///
    /// The change is visible through every name bound to the same array.
    fn exec_index_assign(&mut self,
                         array: &Expr,
                         index: &Expr,
                         value: &Expr,
                         line: usize,
                         env: &Environment)
                         -> EvalResult<()> {
        let target = self.eval(array, env)?;
        let index = self.eval(index, env)?;
        let value = self.eval(value, env)?;

        let Value::Array(items) = &target else {
            return Err(RuntimeError::NotIndexable { kind: target.type_name(),
                                                    line });
        };
        let mut items = items.borrow_mut();
        let position = element_index(&index, items.len(), line)?;
        items[position] = value;
        Ok(())
    }
}
