//! # quadra
//!
//! quadra is a small indentation-structured scripting language written in
//! Rust. Programs are parsed line by line, nested into blocks by indentation,
//! and run by a tree-walking evaluator with closures, variadic functions and
//! operators defined across numbers, strings, arrays and booleans.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::Statement,
    error::{Diagnostics, QuadraError},
    interpreter::{environment::Environment, evaluator::core::Interpreter, parser::core::parse_source},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` types that represent a
/// program as a tree, together with literals, declared types and parameter
/// lists. The tree is built by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source line numbers to nodes for error reporting.
pub mod ast;
/// Provides the error types for parsing and evaluation.
///
/// Syntax errors are collected across the front end so a single pass can
/// report several of them. Runtime errors stop evaluation immediately.
///
/// # Responsibilities
/// - Defines error enums for every failure mode.
/// - Attaches line numbers to every message.
/// - Maps failures to process exit codes.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, scopes, values and evaluation
/// into a complete runtime.
pub mod interpreter;
/// Opt-in diagnostic logging through `tracing`.
pub mod logging;
/// General utilities for safe numeric conversion.
///
/// Conversions between `i64`, `usize` and `f64` that report failure instead
/// of silently truncating, and index resolution shared by the evaluator.
pub mod util;

/// Parses a program.
///
/// # Errors
/// Returns every syntax error found, in line order.
///
/// # Examples
/// ```
/// use quadra::parse;
///
/// assert_eq!(parse("x = 1\nprint(x)").unwrap().len(), 2);
/// assert!(parse("x = (1").is_err());
/// ```
pub fn parse(source: &str) -> Result<Vec<Statement>, QuadraError> {
    let mut diagnostics = Diagnostics::new();
    let program = parse_source(source, &mut diagnostics);
    if diagnostics.has_errors() {
        return Err(QuadraError::Syntax(diagnostics.into_errors()));
    }
    Ok(program)
}

/// Parses and runs a program, writing everything it prints to `output`.
///
/// Nothing is evaluated if parsing reported any error.
///
/// # Returns
/// The global scope as the program left it.
///
/// # Examples
/// ```
/// use quadra::run;
///
/// let mut out = Vec::new();
/// let globals = run("x = 3\nx = x + 1\nprint(x)", &mut out).unwrap();
///
/// assert_eq!(out, b"4\n");
/// assert_eq!(globals.to_string(), "x: 4\n");
/// ```
pub fn run(source: &str, output: &mut dyn Write) -> Result<Environment, QuadraError> {
    let program = parse(source)?;
    let mut interpreter = Interpreter::with_output(output);
    interpreter.run(&program)?;
    Ok(interpreter.globals().clone())
}

/// Runs a program, printing to standard output.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use quadra::get_result;
///
/// assert!(get_result("result = 2 + 2").is_ok());
///
/// // 'x' is not defined
/// assert!(get_result("y = x + 1").is_err());
/// ```
pub fn get_result(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    run(source, &mut std::io::stdout())?;
    Ok(())
}
