/// Numeric conversion helpers.
///
/// This module provides the conversions between `i64`, `usize` and `f64`
/// that the evaluator needs: int-to-float elevation, lengths, repetition
/// counts and negative array indices. Fallible conversions report a
/// `RuntimeError` instead of wrapping or truncating silently.
pub mod num;
