/// Entry points of the front end.
///
/// Contains the expression entry point, the per-line parser, and the driver
/// that runs tokenizing, line splitting, line parsing and block assembly in
/// order.
pub mod core;

/// Logical line splitting.
///
/// Groups tokens into lines, measures indentation depth, and splits inline
/// block bodies such as `while x: x = 0` into a header and a body line.
pub mod lines;

/// Statement parsing.
///
/// Parses a single line into a statement: assignments, calls, headers of
/// functions, loops and conditionals, lambdas, and returns.
pub mod statement;

/// Binary operator parsing.
///
/// Implements the precedence tiers from equality and logic down to
/// multiplication. Every tier is right-associative.
pub mod binary;

/// Unary operator parsing.
///
/// Handles prefix operators, postfix calls and indexing, and primary
/// expressions.
pub mod unary;

/// Block assembly.
///
/// Nests parsed lines into bodies by indentation depth, and folds
/// `if` / `else if` / `else` runs into conditional chains.
pub mod block;

/// Utility functions for the parser.
///
/// Provides token expectation helpers, comma-separated list parsing and type
/// annotation parsing.
pub mod utils;
