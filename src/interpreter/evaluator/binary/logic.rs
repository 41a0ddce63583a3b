use crate::interpreter::{
    evaluator::core::{EvalResult, Interpreter},
    value::core::Value,
};

impl Interpreter<'_> {
    /// Evaluates `left and right` on the truthiness of both operands.
    ///
    /// Both operands have already been evaluated by the time this runs;
    /// `and` never short-circuits.
    pub fn eval_and(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        let left = left.truthy(line)?;
        let right = right.truthy(line)?;
        Ok(Value::Bool(left && right))
    }

    /// Evaluates `left or right` on the truthiness of both operands.
    ///
    /// Like `and`, both operands are always evaluated.
    pub fn eval_or(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        let left = left.truthy(line)?;
        let right = right.truthy(line)?;
        Ok(Value::Bool(left || right))
    }

    /// Evaluates `!value`.
    pub fn eval_not(value: &Value, line: usize) -> EvalResult<Value> {
        Ok(Value::Bool(!value.truthy(line)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    #[test]
    fn logic_uses_truthiness() {
        assert_eq!(Interpreter::eval_and(&Value::Int(1), &"x".into(), 1).unwrap(),
                   Value::Bool(true));
        assert_eq!(Interpreter::eval_or(&Value::Float(0.0), &Vec::new().into(), 1).unwrap(),
                   Value::Bool(false));
        assert_eq!(Interpreter::eval_not(&Value::from(""), 1).unwrap(), Value::Bool(true));
    }

    #[test]
    fn right_operand_is_checked_even_when_left_decides() {
        assert!(matches!(Interpreter::eval_and(&Value::Bool(false), &Value::Null, 5),
                         Err(RuntimeError::Truthiness { line: 5, .. })));
    }
}
