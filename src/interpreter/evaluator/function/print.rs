use std::io::Write;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::check_arity},
        value::core::Value,
    },
};

/// Writes a value to the interpreter's output, followed by a newline.
///
/// Accepts exactly one argument of any type. The value is formatted using
/// its `Display` implementation, so strings print without quotes while
/// strings inside arrays keep theirs.
///
/// # Parameters
/// - `args`: Slice containing one argument.
/// - `out`: The sink to write to.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `null`.
///
/// # Example
/// ```
/// use quadra::interpreter::{evaluator::function::print::print, value::core::Value};
///
/// let mut out = Vec::new();
/// let result = print(&[Value::Float(2.0)], &mut out, 1).unwrap();
///
/// assert_eq!(result, Value::Null);
/// assert_eq!(out, b"2.0\n");
/// ```
pub fn print(args: &[Value], out: &mut dyn Write, line: usize) -> EvalResult<Value> {
    check_arity(args, 1, "print", line)?;

    writeln!(out, "{}", args[0]).map_err(|source| RuntimeError::Output { source, line })?;
    Ok(Value::Null)
}
