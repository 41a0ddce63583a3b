use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates the operand of a unary expression, then applies the
    /// operator.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                line: usize,
                                env: &Environment)
                                -> EvalResult<Value> {
        let value = self.eval(expr, env)?;
        Self::eval_unary(op, &value, line)
    }

    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: multiplies by `-1`. Numbers negate; strings and arrays come
    ///   back reversed.
    /// - `Not`: the negated truthiness of the operand.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use quadra::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Negate, &Value::Int(5), 1).unwrap();
    /// assert_eq!(v, Value::Int(-5));
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Negate, &"abc".into(), 1).unwrap();
    /// assert_eq!(v, Value::from("cba"));
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Not, &Value::Int(0), 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Int(_) | Value::Float(_) | Value::Str(_) | Value::Array(_) => {
                    Self::eval_mul(&Value::Int(-1), value, line)
                },
                _ => Err(RuntimeError::InvalidOperand { op: op.symbol(),
                                                        kind: value.type_name(),
                                                        line }),
            },
            UnaryOperator::Not => Self::eval_not(value, line),
        }
    }
}
