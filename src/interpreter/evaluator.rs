/// Binary operator evaluation logic.
///
/// Handles arithmetic over mixed operand types, comparisons and the logical
/// operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation and logical NOT.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the interpreter state, the expression dispatcher and block
/// execution with `return` propagation.
pub mod core;

/// Statement execution.
///
/// Declarations, assignments, index writes, `while` loops, conditional
/// chains and function definitions.
pub mod statement;

/// Evaluation of `foreach` loops.
///
/// Turns ranges, arrays, strings and integers into iteration sequences and
/// runs the loop body once per element.
pub mod for_loop;

/// Utility functions for evaluation.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
