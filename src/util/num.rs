use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts an `int` to a `float` for mixed arithmetic and type elevation.
///
/// Integers beyond `2^53` round to the nearest representable `f64`, as the
/// language defines int-to-float elevation to always succeed.
///
/// ## Example
/// ```
/// use quadra::util::num::int_to_float;
///
/// assert_eq!(int_to_float(-7), -7.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn int_to_float(value: i64) -> f64 {
    value as f64
}

/// Converts a length to an `int` value.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the length does not fit in an `i64`.
///
/// ## Parameters
/// - `length`: Length of a string or array.
/// - `line`: Source code line number for error reporting.
pub fn length_to_int(length: usize, line: usize) -> EvalResult<i64> {
    i64::try_from(length).map_err(|_| RuntimeError::Overflow { line })
}

/// Converts a repetition or truncation count to a `usize`.
///
/// ## Errors
/// - `RuntimeError::NegativeCount` if `count` is negative.
/// - `RuntimeError::Overflow` if `count` does not fit in a `usize`.
///
/// ## Parameters
/// - `count`: The requested count.
/// - `op`: Operator symbol used in the error message.
/// - `line`: Source code line number for error reporting.
///
/// ## Example
/// ```
/// use quadra::{error::RuntimeError, util::num::count_to_usize};
///
/// assert_eq!(count_to_usize(3, "*", 1).unwrap(), 3);
///
/// let err = count_to_usize(-2, "*", 4).unwrap_err();
/// assert!(matches!(err, RuntimeError::NegativeCount { count: -2, line: 4, .. }));
/// ```
pub fn count_to_usize(count: i64, op: &'static str, line: usize) -> EvalResult<usize> {
    if count < 0 {
        return Err(RuntimeError::NegativeCount { op, count, line });
    }
    usize::try_from(count).map_err(|_| RuntimeError::Overflow { line })
}

/// Resolves a possibly negative index against a length.
///
/// Non-negative indices count from the front; negative indices count from
/// the back, so `-1` is the last element.
///
/// ## Returns
/// - `Some(position)` if the index lies in `-length..length`.
/// - `None` otherwise.
///
/// ## Example
/// ```
/// use quadra::util::num::resolve_index;
///
/// assert_eq!(resolve_index(-1, 3), Some(2));
/// assert_eq!(resolve_index(3, 3), None);
/// assert_eq!(resolve_index(-4, 3), None);
/// ```
#[must_use]
pub fn resolve_index(index: i64, length: usize) -> Option<usize> {
    if index >= 0 {
        let index = usize::try_from(index).ok()?;
        (index < length).then_some(index)
    } else {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        length.checked_sub(back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_indices_count_from_the_back() {
        assert_eq!(resolve_index(-3, 3), Some(0));
        assert_eq!(resolve_index(0, 0), None);
        assert_eq!(resolve_index(i64::MIN, 3), None);
    }

    #[test]
    fn zero_count_is_allowed() {
        assert_eq!(count_to_usize(0, "-", 1).unwrap(), 0);
    }
}
