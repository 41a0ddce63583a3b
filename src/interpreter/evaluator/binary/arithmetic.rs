use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    util::num::{count_to_usize, int_to_float},
};

/// Two numeric operands, with mixed pairs already widened to `f64`.
enum Numbers {
    Ints(i64, i64),
    Floats(f64, f64),
}

fn numbers(left: &Value, right: &Value) -> Option<Numbers> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(Numbers::Ints(*a, *b)),
        (Value::Int(a), Value::Float(b)) => Some(Numbers::Floats(int_to_float(*a), *b)),
        (Value::Float(a), Value::Int(b)) => Some(Numbers::Floats(*a, int_to_float(*b))),
        (Value::Float(a), Value::Float(b)) => Some(Numbers::Floats(*a, *b)),
        _ => None,
    }
}

const fn invalid(op: &'static str, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::InvalidOperands { op,
                                    left: left.type_name(),
                                    right: right.type_name(),
                                    line }
}

impl Interpreter<'_> {
    /// Evaluates `left + right`.
    ///
    /// - numbers add, staying `int` only when both sides are;
    /// - a string and a number (either order) concatenate, with the number in
    ///   its printed form;
    /// - two strings concatenate;
    /// - two arrays produce a new array holding both element lists;
    /// - an array and any other value produce a new array with the value
    ///   appended.
    ///
    /// Neither operand is modified.
    ///
    /// # Example
    /// ```
    /// use quadra::interpreter::{evaluator::core::Interpreter, value::core::Value};
    ///
    /// let joined = Interpreter::eval_add(&Value::from("n="), &Value::Float(2.0), 1).unwrap();
    /// assert_eq!(joined, Value::from("n=2.0"));
    /// ```
    pub fn eval_add(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        if let Some(nums) = numbers(left, right) {
            return match nums {
                Numbers::Ints(a, b) => a.checked_add(b)
                                        .map(Value::Int)
                                        .ok_or(RuntimeError::Overflow { line }),
                Numbers::Floats(a, b) => Ok(Value::Float(a + b)),
            };
        }

        match (left, right) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            (Value::Str(s), n @ (Value::Int(_) | Value::Float(_))) => Ok(Value::Str(format!("{s}{n}"))),
            (n @ (Value::Int(_) | Value::Float(_)), Value::Str(s)) => Ok(Value::Str(format!("{n}{s}"))),
            (Value::Array(a), Value::Array(b)) => {
                let mut joined = a.borrow().clone();
                joined.extend(b.borrow().iter().cloned());
                Ok(joined.into())
            },
            (Value::Array(a), item) => {
                let mut joined = a.borrow().clone();
                joined.push(item.clone());
                Ok(joined.into())
            },
            _ => Err(invalid("+", left, right, line)),
        }
    }

    /// Evaluates `left - right`.
    ///
    /// Numbers subtract. A string or array minus an `int` `n` drops the last
    /// `n` characters or elements, leaving an empty value when `n` exceeds
    /// the length. A negative `n` is an error.
    pub fn eval_sub(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        if let Some(nums) = numbers(left, right) {
            return match nums {
                Numbers::Ints(a, b) => a.checked_sub(b)
                                        .map(Value::Int)
                                        .ok_or(RuntimeError::Overflow { line }),
                Numbers::Floats(a, b) => Ok(Value::Float(a - b)),
            };
        }

        match (left, right) {
            (Value::Str(s), Value::Int(n)) => {
                let cut = count_to_usize(*n, "-", line)?;
                let keep = s.chars().count().saturating_sub(cut);
                Ok(Value::Str(s.chars().take(keep).collect()))
            },
            (Value::Array(items), Value::Int(n)) => {
                let cut = count_to_usize(*n, "-", line)?;
                let items = items.borrow();
                let keep = items.len().saturating_sub(cut);
                Ok(items[..keep].to_vec().into())
            },
            _ => Err(invalid("-", left, right, line)),
        }
    }

    /// Evaluates `left * right`.
    ///
    /// - numbers multiply;
    /// - an `int` `n` and a string or array (either order) repeat the string
    ///   or the elements `|n|` times, reversed first when `n` is negative;
    /// - `false * x` yields the zero of `x`'s kind (`0`, `0.0`, `""`, `[]`,
    ///   `false`) and `true * x` yields `x`, in either order.
    ///
    /// # Example
    /// ```
    /// use quadra::interpreter::{evaluator::core::Interpreter, value::core::Value};
    ///
    /// let v = Interpreter::eval_mul(&Value::Int(-2), &Value::from("ab"), 1).unwrap();
    /// assert_eq!(v, Value::from("baba"));
    /// ```
    pub fn eval_mul(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        if let Some(nums) = numbers(left, right) {
            return match nums {
                Numbers::Ints(a, b) => a.checked_mul(b)
                                        .map(Value::Int)
                                        .ok_or(RuntimeError::Overflow { line }),
                Numbers::Floats(a, b) => Ok(Value::Float(a * b)),
            };
        }

        match (left, right) {
            (Value::Int(n), Value::Str(s)) | (Value::Str(s), Value::Int(n)) => {
                let times = repeat_count(*n, s.len(), line)?;
                let base: String = if *n < 0 { s.chars().rev().collect() } else { s.clone() };
                Ok(Value::Str(base.repeat(times)))
            },
            (Value::Int(n), Value::Array(items)) | (Value::Array(items), Value::Int(n)) => {
                let times = repeat_count(*n, items.borrow().len(), line)?;
                let mut base = items.borrow().clone();
                if *n < 0 {
                    base.reverse();
                }
                Ok(std::iter::repeat_n(&base, times).flatten()
                                                    .cloned()
                                                    .collect::<Vec<_>>()
                                                    .into())
            },
            (Value::Bool(flag), other) | (other, Value::Bool(flag)) if scales(other) => {
                Ok(if *flag { other.clone() } else { zero_of(other) })
            },
            _ => Err(invalid("*", left, right, line)),
        }
    }

    /// Evaluates `left / right`.
    ///
    /// Both operands must be numbers; the result is always a `float`.
    ///
    /// # Errors
    /// - `RuntimeError::DivisionByZero` if `right` is zero.
    /// - `RuntimeError::InvalidOperands` for non-numeric operands.
    pub fn eval_div(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        let (a, b) = match numbers(left, right) {
            Some(Numbers::Ints(a, b)) => (int_to_float(a), int_to_float(b)),
            Some(Numbers::Floats(a, b)) => (a, b),
            None => return Err(invalid("/", left, right, line)),
        };
        if b == 0.0 {
            return Err(RuntimeError::DivisionByZero { line });
        }
        Ok(Value::Float(a / b))
    }
}

/// Upper bound on the bytes of a repeated string or the elements of a
/// repeated array.
const MAX_REPEAT_LEN: usize = 1 << 28;

/// `|n|` as a repetition count for an operand of `base_len` bytes or
/// elements, checked against [`MAX_REPEAT_LEN`] before anything is
/// allocated. An empty operand repeats zero times.
fn repeat_count(n: i64, base_len: usize, line: usize) -> EvalResult<usize> {
    if base_len == 0 {
        return Ok(0);
    }
    let times = usize::try_from(n.unsigned_abs()).map_err(|_| RuntimeError::Overflow { line })?;
    match base_len.checked_mul(times) {
        Some(total) if total <= MAX_REPEAT_LEN => Ok(times),
        _ => Err(RuntimeError::Overflow { line }),
    }
}

/// Returns `true` for the kinds a boolean factor can scale.
const fn scales(value: &Value) -> bool {
    matches!(value,
             Value::Int(_) | Value::Float(_) | Value::Str(_) | Value::Array(_) | Value::Bool(_))
}

fn zero_of(value: &Value) -> Value {
    match value {
        Value::Int(_) => Value::Int(0),
        Value::Float(_) => Value::Float(0.0),
        Value::Str(_) => Value::Str(String::new()),
        Value::Array(_) => Vec::new().into(),
        _ => Value::Bool(false),
    }
}
