use crate::{
    ast::{Iterable, Statement, TypeName},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Executes a `foreach` statement.
    ///
    /// The iterable is turned into a sequence once, before the first
    /// iteration:
    ///
    /// 1. **Range form:** `foreach i in a..b`. Both bounds must be integers.
    ///    The sequence counts up from `a` when `a < b` and down from `a`
    ///    otherwise, never reaching `b`.
    ///
    /// 2. **Value form:** `foreach x in value`. Arrays yield their elements
    ///    as they were when the loop started, strings yield one-character
    ///    strings, and an integer `n` yields `0..n` (nothing when `n <= 0`).
    ///
    /// Each element is declared as the loop variable, with its declared
    /// type, in a fresh child scope of `env`, and the body runs there. A
    /// `return` in the body ends the loop and propagates outward.
    ///
    /// # Parameters
    /// - `ty`: Declared type of the loop variable.
    /// - `variable`: Name of the loop variable.
    /// - `iterable`: What to iterate.
    /// - `body`: Loop body.
    /// - `line`: Line number for error reporting.
    /// - `env`: The scope the loop runs in.
    ///
    /// # Errors
    /// - `NotIterable` for values of any other kind.
    /// - `Redeclaration` if the loop variable is already visible.
    pub(crate) fn exec_foreach(&mut self,
                               ty: &TypeName,
                               variable: &str,
                               iterable: &Iterable,
                               body: &[Statement],
                               line: usize,
                               env: &Environment)
                               -> EvalResult<Flow> {
        for item in self.iteration_values(iterable, line, env)? {
            let scope = env.child();
            scope.add(ty.clone(), variable, Some(item), line)?;

            if let Flow::Return(value) = self.exec_block(body, &scope)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Evaluates the iterable of a `foreach` into the sequence it yields.
    fn iteration_values(&mut self,
                        iterable: &Iterable,
                        line: usize,
                        env: &Environment)
                        -> EvalResult<Box<dyn Iterator<Item = Value>>> {
        match iterable {
            Iterable::Range { start, end } => {
                let start = self.eval(start, env)?;
                let end = self.eval(end, env)?;
                match (start.as_int(), end.as_int()) {
                    (Some(a), Some(b)) => Ok(range(a, b)),
                    _ => Err(RuntimeError::InvalidOperands { op: "..",
                                                             left: start.type_name(),
                                                             right: end.type_name(),
                                                             line }),
                }
            },
            Iterable::Expr(expr) => match self.eval(expr, env)? {
                Value::Array(items) => Ok(Box::new(items.borrow().clone().into_iter())),
                Value::Str(s) => {
                    let chars = s.chars()
                                 .map(|c| Value::Str(c.to_string()))
                                 .collect::<Vec<_>>();
                    Ok(Box::new(chars.into_iter()))
                },
                Value::Int(n) => Ok(range(0, n.max(0))),
                other => Err(RuntimeError::NotIterable { kind: other.type_name(),
                                                         line }),
            },
        }
    }
}

/// `start..end`, exclusive of `end`, counting down when `start > end`.
fn range(start: i64, end: i64) -> Box<dyn Iterator<Item = Value>> {
    if start <= end {
        Box::new((start..end).map(Value::Int))
    } else {
        Box::new((end + 1..=start).rev().map(Value::Int))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn collect(start: i64, end: i64) -> Vec<i64> {
        range(start, end).filter_map(|v| v.as_int()).collect()
    }

    #[test]
    fn ranges_exclude_the_end_in_both_directions() {
        assert_eq!(collect(0, 3), vec![0, 1, 2]);
        assert_eq!(collect(3, 0), vec![3, 2, 1]);
        assert_eq!(collect(2, 2), Vec::<i64>::new());
        assert_eq!(collect(-1, -3), vec![-1, -2]);
    }
}
