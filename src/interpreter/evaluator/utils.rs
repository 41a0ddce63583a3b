use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::resolve_index,
};

/// Ensures a builtin received exactly `expected` arguments.
///
/// # Parameters
/// - `args`: The arguments received.
/// - `expected`: The required count.
/// - `name`: The builtin's name, for the error message.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `Ok(())` if the count matches, otherwise `ArgumentCountMismatch`.
///
/// # Example
/// ```
/// use quadra::{error::RuntimeError, interpreter::evaluator::utils::check_arity};
///
/// assert!(check_arity(&[1, 2], 2, "pair", 1).is_ok());
/// assert!(matches!(check_arity(&[1], 2, "pair", 3),
///                  Err(RuntimeError::ArgumentCountMismatch { found: 1, line: 3, .. })));
/// ```
pub fn check_arity<T>(args: &[T], expected: usize, name: &str, line: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                  expected: expected.to_string(),
                                                  found: args.len(),
                                                  line })
    }
}

/// Turns an index value into a position in an array of `length` elements.
///
/// The index must be an `int`. Negative indices count from the end, so `-1`
/// is the last element.
///
/// # Errors
/// - `IndexNotInteger` if the index is not an `int`.
/// - `IndexOutOfBounds`, reporting the index as written, if it falls outside
///   `-length..length`.
pub fn element_index(index: &Value, length: usize, line: usize) -> EvalResult<usize> {
    let Value::Int(index) = index else {
        return Err(RuntimeError::IndexNotInteger { kind: index.type_name(),
                                                   line });
    };
    resolve_index(*index, length).ok_or(RuntimeError::IndexOutOfBounds { index: *index,
                                                                          length,
                                                                          line })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_must_be_an_int() {
        assert!(matches!(element_index(&Value::Float(0.0), 3, 1),
                         Err(RuntimeError::IndexNotInteger { kind: "float", .. })));
    }

    #[test]
    fn out_of_bounds_reports_the_written_index() {
        assert!(matches!(element_index(&Value::Int(-4), 3, 2),
                         Err(RuntimeError::IndexOutOfBounds { index: -4,
                                                              length: 3,
                                                              line: 2 })));
        assert_eq!(element_index(&Value::Int(-3), 3, 2).unwrap(), 0);
    }
}
