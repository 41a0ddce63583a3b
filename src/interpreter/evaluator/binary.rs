/// Arithmetic operators.
///
/// Implements `+`, `-`, `*` and `/` across numbers, strings, arrays and
/// booleans, with checked integer arithmetic.
pub mod arithmetic;

/// Comparison operators.
///
/// Implements `>` and `==` directly and derives `<`, `<=`, `>=` and `!=`
/// from them.
pub mod comparison;

/// Binary operator dispatch.
///
/// Evaluates both operands and routes the operator to its implementation.
pub mod core;

/// Logical operators.
///
/// Implements `and`, `or` and `!` on truthiness, without short-circuiting.
pub mod logic;
