use std::io::Write;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::print,
            utils::check_arity,
        },
        value::core::Value,
    },
    util::num::length_to_int,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values, the output sink
/// and the line number.
pub type BuiltinFn = fn(&[Value], &mut dyn Write, usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `AtLeast(n)` means the builtin accepts `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    #[must_use]
    pub const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (the metadata a `Value::Builtin` points at),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// A built-in function: its name, accepted argument count and
        /// implementation.
        pub struct BuiltinDef {
            pub name:  &'static str,
            pub arity: Arity,
            pub func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"    => { arity: Arity::Exact(1),   func: print::print },
    "type"     => { arity: Arity::Exact(1),   func: type_of },
    "len"      => { arity: Arity::Exact(1),   func: len },
    "sum"      => { arity: Arity::AtLeast(2), func: |args, _, line| fold("sum", args, line, Interpreter::eval_add) },
    "multiply" => { arity: Arity::AtLeast(2), func: |args, _, line| fold("multiply", args, line, Interpreter::eval_mul) },
    "subtract" => { arity: Arity::Exact(2),   func: |args, _, line| pair("subtract", args, line, Interpreter::eval_sub) },
    "divide"   => { arity: Arity::Exact(2),   func: |args, _, line| pair("divide", args, line, Interpreter::eval_div) },
    "AND"      => { arity: Arity::Exact(2),   func: |args, _, line| pair("AND", args, line, Interpreter::eval_and) },
    "OR"       => { arity: Arity::Exact(2),   func: |args, _, line| pair("OR", args, line, Interpreter::eval_or) },
    "NOT"      => { arity: Arity::Exact(1),   func: not },
    "truthy"   => { arity: Arity::Exact(1),   func: truthy },
}

/// Finds a builtin by name.
///
/// # Example
/// ```
/// use quadra::interpreter::evaluator::function::builtin::find;
///
/// assert_eq!(find("len").map(|def| def.name), Some("len"));
/// assert!(find("length").is_none());
/// ```
#[must_use]
pub fn find(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|def| def.name == name)
}

type Operator = fn(&Value, &Value, usize) -> EvalResult<Value>;

/// Left fold of an operator over two or more arguments.
fn fold(name: &str, args: &[Value], line: usize, op: Operator) -> EvalResult<Value> {
    let [first, rest @ ..] = args else {
        return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                         expected: Arity::AtLeast(2).to_string(),
                                                         found: 0,
                                                         line });
    };
    rest.iter().try_fold(first.clone(), |acc, value| op(&acc, value, line))
}

fn pair(name: &str, args: &[Value], line: usize, op: Operator) -> EvalResult<Value> {
    check_arity(args, 2, name, line)?;
    op(&args[0], &args[1], line)
}

/// Returns the name of the argument's type as a string.
///
/// # Example
/// ```
/// use quadra::interpreter::{evaluator::function::builtin::type_of, value::core::Value};
///
/// let mut sink = Vec::new();
/// let name = type_of(&[Value::Null], &mut sink, 1).unwrap();
/// assert_eq!(name, Value::from("null"));
/// ```
pub fn type_of(args: &[Value], _: &mut dyn Write, line: usize) -> EvalResult<Value> {
    check_arity(args, 1, "type", line)?;
    Ok(Value::from(args[0].type_name()))
}

/// Returns the number of characters in a string or elements in an array.
pub fn len(args: &[Value], _: &mut dyn Write, line: usize) -> EvalResult<Value> {
    check_arity(args, 1, "len", line)?;

    let length = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.borrow().len(),
        other => {
            return Err(RuntimeError::InvalidOperand { op: "len",
                                                      kind: other.type_name(),
                                                      line });
        },
    };
    Ok(Value::Int(length_to_int(length, line)?))
}

/// The negated truthiness of the argument.
pub fn not(args: &[Value], _: &mut dyn Write, line: usize) -> EvalResult<Value> {
    check_arity(args, 1, "NOT", line)?;
    Interpreter::eval_not(&args[0], line)
}

/// The truthiness of the argument as a `bool`.
pub fn truthy(args: &[Value], _: &mut dyn Write, line: usize) -> EvalResult<Value> {
    check_arity(args, 1, "truthy", line)?;
    Ok(Value::Bool(args[0].truthy(line)?))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn call(name: &str, args: &[Value]) -> EvalResult<Value> {
        let def = find(name).unwrap();
        assert!(def.arity.check(args.len()));
        (def.func)(args, &mut std::io::sink(), 1)
    }

    #[test]
    fn every_name_is_listed() {
        assert_eq!(BUILTIN_FUNCTIONS.len(), BUILTIN_TABLE.len());
        assert!(BUILTIN_FUNCTIONS.iter().all(|name| find(name).is_some()));
    }

    #[test]
    fn folds_apply_operators_left_to_right() {
        assert_eq!(call("sum", &["a".into(), Value::Int(1), Value::Int(2)]).unwrap(),
                   Value::from("a12"));
        assert_eq!(call("multiply", &[Value::Int(2), Value::Int(3), Value::Int(4)]).unwrap(),
                   Value::Int(24));
    }

    #[test]
    fn pairs_and_logic() {
        assert_eq!(call("divide", &[Value::Int(1), Value::Int(4)]).unwrap(), Value::Float(0.25));
        assert_eq!(call("OR", &[Value::Int(0), "x".into()]).unwrap(), Value::Bool(true));
        assert_eq!(call("NOT", &[Value::Bool(true)]).unwrap(), Value::Bool(false));
    }

    #[test]
    fn len_counts_characters() {
        assert_eq!(call("len", &["héllo".into()]).unwrap(), Value::Int(5));
        assert!(call("len", &[Value::Int(5)]).is_err());
    }

    #[test]
    fn arity_is_described() {
        assert!(!Arity::AtLeast(2).check(1));
        assert_eq!(Arity::AtLeast(2).to_string(), "at least 2");
    }
}
