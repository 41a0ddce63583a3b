//! Property-based tests for the operator library and the evaluator.
//!
//! Operators are exercised directly on values; scoping and indexing are
//! exercised through whole programs.

use proptest::prelude::*;
use quadra::{
    error::{QuadraError, RuntimeError},
    interpreter::{evaluator::core::Interpreter, value::core::Value},
    run,
};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Strategy for short strings without quotes or escapes
fn arb_text() -> impl Strategy<Value = String> {
    "[a-z0-9 ]{0,8}"
}

/// Strategy for identifiers that never collide with keywords or builtins
fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_map(|s| format!("v_{s}"))
}

/// Strategy for small int arrays
fn arb_ints() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-100i64..100, 0..8)
}

fn array(items: &[i64]) -> Value {
    items.iter().copied().map(Value::Int).collect::<Vec<_>>().into()
}

fn source_array(items: &[i64]) -> String {
    let items = items.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!("[{}]", items.join(", "))
}

fn output_of(src: &str) -> Result<String, QuadraError> {
    let mut out = Vec::new();
    run(src, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

// ============================================================================
// Operators
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn division_is_true_division(a in -10_000i64..10_000, b in -10_000i64..10_000) {
        prop_assume!(b != 0);
        #[allow(clippy::cast_precision_loss)]
        let expected = a as f64 / b as f64;
        let result = Interpreter::eval_div(&Value::Int(a), &Value::Int(b), 1).unwrap();
        prop_assert_eq!(result, Value::Float(expected));
    }

    #[test]
    fn division_rejects_non_numbers(a in -100i64..100, s in arb_text()) {
        prop_assert!(Interpreter::eval_div(&Value::Int(a), &Value::from(s.as_str()), 1).is_err());
    }

    #[test]
    fn multiplying_a_string_repeats_it(s in arb_text(), n in 1i64..6) {
        let times = usize::try_from(n).unwrap();
        let reversed: String = s.chars().rev().collect();

        let forward = Interpreter::eval_mul(&Value::Int(n), &Value::from(s.as_str()), 1).unwrap();
        let backward = Interpreter::eval_mul(&Value::Int(-n), &Value::from(s.as_str()), 1).unwrap();

        prop_assert_eq!(forward, Value::Str(s.repeat(times)));
        prop_assert_eq!(backward, Value::Str(reversed.repeat(times)));
    }

    #[test]
    fn subtracting_more_than_the_length_empties_an_array(items in arb_ints(), extra in 1i64..5) {
        let n = i64::try_from(items.len()).unwrap() + extra;
        let result = Interpreter::eval_sub(&array(&items), &Value::Int(n), 1).unwrap();
        prop_assert_eq!(result, array(&[]));
    }

    #[test]
    fn array_addition_leaves_operands_alone(left in arb_ints(), right in arb_ints()) {
        let (a, b) = (array(&left), array(&right));
        let sum = Interpreter::eval_add(&a, &b, 1).unwrap();

        prop_assert_eq!(a, array(&left));
        prop_assert_eq!(b, array(&right));
        prop_assert_eq!(sum, array(&[left, right].concat()));
    }
}

// ============================================================================
// Programs
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn minus_one_is_the_last_element(items in prop::collection::vec(-100i64..100, 1..8)) {
        let src = format!("a = {}\nprint(a[-1])", source_array(&items));
        let last = items[items.len() - 1];
        prop_assert_eq!(output_of(&src).unwrap(), format!("{last}\n"));
    }

    #[test]
    fn one_past_the_front_is_out_of_bounds(items in arb_ints()) {
        let src = format!("a = {}\nprint(a[-{}])", source_array(&items), items.len() + 1);
        let is_out_of_bounds = matches!(output_of(&src),
                                        Err(QuadraError::Runtime(RuntimeError::IndexOutOfBounds { .. })));
        prop_assert!(is_out_of_bounds);
    }

    #[test]
    fn untyped_assignment_updates(name in arb_ident(), a in -1000i64..1000, b in -1000i64..1000) {
        let src = format!("{name} = {a}\n{name} = {b}\nprint({name})");
        prop_assert_eq!(output_of(&src).unwrap(), format!("{b}\n"));
    }

    #[test]
    fn typed_redeclaration_fails(name in arb_ident(), a in 0i64..1000) {
        let src = format!("{name} = {a}\nint {name} = {a}");
        let is_redeclaration = matches!(output_of(&src),
                                        Err(QuadraError::Runtime(RuntimeError::Redeclaration { line: 2, .. })));
        prop_assert!(is_redeclaration);
    }

    #[test]
    fn ranges_count_towards_the_end(start in -5i64..5, end in -5i64..5) {
        let src = format!("foreach i in {start}..{end}: print(i)");
        let expected: Vec<i64> = if start <= end {
            (start..end).collect()
        } else {
            (end + 1..=start).rev().collect()
        };
        let expected: String = expected.iter().map(|i| format!("{i}\n")).collect();
        prop_assert_eq!(output_of(&src).unwrap(), expected);
    }
}
