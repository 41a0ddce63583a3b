use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    util::num::int_to_float,
};

impl Interpreter<'_> {
    /// Evaluates a comparison operator.
    ///
    /// Only `>` and `==` are primitive. The others are derived from them:
    /// - `a != b` is `!(a == b)`
    /// - `a < b` is `!(a > b) && !(a == b)`
    /// - `a >= b` is `!(a < b)`
    /// - `a <= b` is `!(a > b)`
    ///
    /// # Parameters
    /// - `op`: One of the six comparison operators.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// A `Value::Bool` with the result.
    ///
    /// # Example
    /// ```
    /// use quadra::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let v = Interpreter::eval_comparison(BinaryOperator::LessEqual,
    ///                                      &Value::Int(2),
    ///                                      &Value::Float(2.0),
    ///                                      1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let symbol = op.symbol();
        let less = || -> EvalResult<bool> {
            Ok(!greater(left, right, symbol, line)? && !equal(left, right, symbol, line)?)
        };

        let result = match op {
            Greater => greater(left, right, symbol, line)?,
            Equal => equal(left, right, symbol, line)?,
            NotEqual => !equal(left, right, symbol, line)?,
            Less => less()?,
            GreaterEqual => !less()?,
            LessEqual => !greater(left, right, symbol, line)?,
            _ => {
                return Err(RuntimeError::InvalidOperands { op:    symbol,
                                                           left:  left.type_name(),
                                                           right: right.type_name(),
                                                           line });
            },
        };
        Ok(Value::Bool(result))
    }
}

/// `a > b` for numbers (across `int` and `float`) and strings.
fn greater(left: &Value, right: &Value, op: &'static str, line: usize) -> EvalResult<bool> {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Float(b)) => int_to_float(*a).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&int_to_float(*b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => {
            return Err(RuntimeError::InvalidOperands { op,
                                                       left: left.type_name(),
                                                       right: right.type_name(),
                                                       line });
        },
    };
    Ok(ordering == Some(Ordering::Greater))
}

/// `a == b` for numbers (across `int` and `float`), strings, booleans and
/// `null`. `null` compares unequal to every other kind.
fn equal(left: &Value, right: &Value, op: &'static str, line: usize) -> EvalResult<bool> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
            Ok(int_to_float(*a) == *b)
        },
        (Value::Float(a), Value::Float(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Null, Value::Null) => Ok(true),
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        _ => Err(RuntimeError::InvalidOperands { op,
                                                 left: left.type_name(),
                                                 right: right.type_name(),
                                                 line }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        Interpreter::eval_comparison(op, &left, &right, 1)
    }

    #[test]
    fn numbers_compare_across_kinds() {
        assert_eq!(compare(BinaryOperator::Equal, Value::Int(2), Value::Float(2.0)).unwrap(),
                   Value::Bool(true));
        assert_eq!(compare(BinaryOperator::Less, Value::Float(1.5), Value::Int(2)).unwrap(),
                   Value::Bool(true));
        assert_eq!(compare(BinaryOperator::GreaterEqual, Value::Int(2), Value::Int(2)).unwrap(),
                   Value::Bool(true));
    }

    #[test]
    fn strings_compare_lexicographically() {
        assert_eq!(compare(BinaryOperator::Greater, "b".into(), "abc".into()).unwrap(),
                   Value::Bool(true));
        assert_eq!(compare(BinaryOperator::LessEqual, "b".into(), "abc".into()).unwrap(),
                   Value::Bool(false));
    }

    #[test]
    fn null_is_only_equal_to_itself() {
        assert_eq!(compare(BinaryOperator::NotEqual, Value::Null, Value::Int(0)).unwrap(),
                   Value::Bool(true));
        assert_eq!(compare(BinaryOperator::Equal, Value::Null, Value::Null).unwrap(),
                   Value::Bool(true));
    }

    #[test]
    fn mismatched_kinds_are_rejected() {
        assert!(matches!(compare(BinaryOperator::Equal, Value::Int(1), "1".into()),
                         Err(RuntimeError::InvalidOperands { op: "==", .. })));
        assert!(matches!(compare(BinaryOperator::Less, Value::Bool(true), Value::Bool(false)),
                         Err(RuntimeError::InvalidOperands { op: "<", .. })));
    }
}
