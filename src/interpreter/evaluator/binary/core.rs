use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates both operands of a binary expression, left first, then
    /// applies the operator.
    ///
    /// Both sides are always evaluated, including for `and` and `or`.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 line: usize,
                                 env: &Environment)
                                 -> EvalResult<Value> {
        let left = self.eval(left, env)?;
        let right = self.eval(right, env)?;
        Self::eval_binary(op, &left, &right, line)
    }

    /// Applies a binary operator to two evaluated values.
    ///
    /// Arithmetic operators go to `eval_add`, `eval_sub`, `eval_mul` and
    /// `eval_div`; comparisons to `eval_comparison`; logic operators to
    /// `eval_and` and `eval_or`. Operators are pure: operands are never
    /// modified, and array results are always new arrays.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use quadra::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let result = Interpreter::eval_binary(BinaryOperator::Mul, &"ab".into(), &Value::Int(3), 1);
    /// assert_eq!(result.unwrap(), Value::from("ababab"));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Sub,
        };

        match op {
            Add => Self::eval_add(left, right, line),
            Sub => Self::eval_sub(left, right, line),
            Mul => Self::eval_mul(left, right, line),
            Div => Self::eval_div(left, right, line),
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
                Self::eval_comparison(op, left, right, line)
            },
            And => Self::eval_and(left, right, line),
            Or => Self::eval_or(left, right, line),
        }
    }
}
