use std::fs;

use pretty_assertions::assert_eq;
use quadra::{
    error::{QuadraError, RuntimeError, SyntaxError},
    get_result, run,
};
use walkdir::WalkDir;

#[test]
fn sample_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "qd"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run(&source, &mut std::io::sink()) {
            panic!("Script {path:?} failed:\n{source}\nError: {e}");
        }
    }

    assert!(count > 0, "No sample scripts found in scripts/");
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

/// Runs a script and returns everything it printed.
fn output_of(src: &str) -> String {
    let mut out = Vec::new();
    if let Err(e) = run(src, &mut out) {
        panic!("Script failed: {e}");
    }
    String::from_utf8(out).expect("output is UTF-8")
}

fn runtime_error(src: &str) -> RuntimeError {
    match run(src, &mut std::io::sink()) {
        Err(QuadraError::Runtime(e)) => e,
        Err(e) => panic!("expected a runtime error, got {e}"),
        Ok(_) => panic!("Script succeeded but was expected to fail"),
    }
}

fn syntax_errors(src: &str) -> Vec<SyntaxError> {
    match run(src, &mut std::io::sink()) {
        Err(QuadraError::Syntax(errors)) => errors,
        Err(e) => panic!("expected syntax errors, got {e}"),
        Ok(_) => panic!("Script succeeded but was expected to fail"),
    }
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_eq!(output_of("x = 3\nx = x + 1\nprint(x)"), "4\n");
    assert_eq!(output_of("print(7 * 9)\nprint(8 - 5)\nprint(10 / 4)"), "63\n3\n2.5\n");
    assert_eq!(output_of("print(10 / 2)"), "5.0\n");
    assert_eq!(output_of("print(10 - 2 - 3)"), "11\n");
}

#[test]
fn strings_and_cross_type_operators() {
    assert_eq!(output_of("y = \"ab\" * 3\nprint(y)"), "ababab\n");
    assert_eq!(output_of("print(\"abc\" * -2)"), "cbacba\n");
    assert_eq!(output_of("print(\"v\" + 1 + 2.5)"), "v3.5\n");
    assert_eq!(output_of("print((\"v\" + 1) + 2.5)"), "v12.5\n");
    assert_eq!(output_of("print(\"hello\" - 2)"), "hel\n");
    assert_eq!(output_of("print(false * \"x\")\nprint(true * 4)"), "\n4\n");
}

#[test]
fn arrays_and_indexing() {
    assert_eq!(output_of("arr = [1, 2, 3]\narr[-1] = 9\nprint(arr)"), "[1, 2, 9]\n");
    assert_eq!(output_of("a = [1, 2] + [3]\nprint(a)\nprint(a[0])"), "[1, 2, 3]\n1\n");
    assert_eq!(output_of("grid = [[1, 2], [3, 4]]\ngrid[0][1] = 5\nprint(grid)"),
               "[[1, 5], [3, 4]]\n");
    assert_eq!(output_of("print([\"a\", 1] * 2)"), "[\"a\", 1, \"a\", 1]\n");
    assert_eq!(output_of("print([1, 2, 3] - 5)"), "[]\n");
}

#[test]
fn arrays_are_shared_between_names() {
    assert_eq!(output_of("a = [1, 2]\nb = a\nb[0] = 7\nprint(a)"), "[7, 2]\n");
    assert_eq!(output_of("a = [1]\nb = a + [2]\nprint(a)\nprint(b)"), "[1]\n[1, 2]\n");
}

#[test]
fn typed_declarations_elevate_values() {
    assert_eq!(output_of("float f = 2\nprint(f)"), "2.0\n");
    assert_eq!(output_of("str s = 12\nprint(s + 1)"), "121\n");
    assert_eq!(output_of("int[] xs = [1]\nprint(type(xs))"), "arr\n");
    assert!(matches!(runtime_error("int x = \"no\""), RuntimeError::TypeMismatch { line: 1, .. }));
    assert!(matches!(runtime_error("int x = 1\nx = 2.5"), RuntimeError::TypeMismatch { line: 2, .. }));
}

#[test]
fn redeclaration_rules() {
    assert!(matches!(runtime_error("x = 1\nint x = 1"), RuntimeError::Redeclaration { line: 2, .. }));
    assert_success("x = 1\nx = 2");
    assert!(matches!(runtime_error("len = 3"), RuntimeError::Redeclaration { .. }));
}

#[test]
fn conditionals_pick_one_branch() {
    let src = "
x = 5
if x > 10
    print(\"big\")
else if x > 3
    print(\"medium\")
else
    print(\"small\")
";
    assert_eq!(output_of(src), "medium\n");
    assert_eq!(output_of("if 0\n    print(1)\nelse\n    print(2)"), "2\n");
    assert_eq!(output_of("if \"\": print(1)\nprint(3)"), "3\n");
}

#[test]
fn only_true_takes_a_branch() {
    assert_eq!(output_of("if 1: print(\"taken\")\nprint(\"end\")"), "end\n");
    assert_eq!(output_of("if null: print(\"taken\")\nprint(\"end\")"), "end\n");
    assert_eq!(output_of("if [1]\n    print(1)\nelse if \"x\"\n    print(2)\nelse\n    print(3)"),
               "3\n");
    assert_eq!(output_of("if truthy(1): print(\"taken\")"), "taken\n");
}

#[test]
fn while_loops() {
    let src = "
i = 0
total = 0
while i < 4
    total = total + i
    i = i + 1
print(total)
";
    assert_eq!(output_of(src), "6\n");
}

#[test]
fn foreach_loops() {
    assert_eq!(output_of("foreach i in 0..3: print(i)"), "0\n1\n2\n");
    assert_eq!(output_of("foreach i in 3..0: print(i)"), "3\n2\n1\n");
    assert_eq!(output_of("foreach c in \"hi\": print(c)"), "h\ni\n");
    assert_eq!(output_of("foreach n in 2: print(n)"), "0\n1\n");
    assert_eq!(output_of("foreach float x in [1, 2]: print(x)"), "1.0\n2.0\n");
    assert!(matches!(runtime_error("foreach x in 1.5: print(x)"),
                     RuntimeError::NotIterable { kind: "float", .. }));
}

#[test]
fn loop_bodies_get_fresh_scopes() {
    let src = "
foreach i in 0..2
    int doubled = i * 2
    print(doubled)
";
    assert_eq!(output_of(src), "0\n2\n");
    assert!(matches!(runtime_error("foreach i in 0..1: inner = 1\nprint(inner)"),
                     RuntimeError::UndefinedIdentifier { .. }));
}

#[test]
fn functions_and_returns() {
    let src = "
func add(a, b)
    return a + b
print(add(2, 5))
";
    assert_eq!(output_of(src), "7\n");
    assert_eq!(output_of("func f()\n    x = 1\nprint(f())"), "null\n");
    assert_eq!(output_of("func float half(int n)\n    return n / 2\nprint(half(3))"), "1.5\n");
    assert_eq!(output_of("func str label(n)\n    return n\nprint(label(4) + 1)"), "41\n");
}

#[test]
fn return_unwinds_nested_blocks() {
    let src = "
func first_over(limit)
    i = 0
    while true
        if i > limit
            return i
        i = i + 1
    print(\"unreachable\")
print(first_over(2))
";
    assert_eq!(output_of(src), "3\n");
}

#[test]
fn top_level_return_stops_the_program() {
    assert_eq!(output_of("print(1)\nreturn\nprint(2)"), "1\n");
}

#[test]
fn global_functions_see_later_globals() {
    let src = "
func first()
    return second()
func second()
    return 2
print(first())
";
    assert_eq!(output_of(src), "2\n");
}

#[test]
fn global_functions_do_not_see_global_variables() {
    let src = "
x = 1
func f()
    return x
f()
";
    assert!(matches!(runtime_error(src), RuntimeError::UndefinedIdentifier { line: 4, .. }));
}

#[test]
fn nested_functions_capture_a_snapshot() {
    let src = "
func outer()
    n = 1
    func inner()
        return n
    n = 2
    return inner()
print(outer())
";
    assert_eq!(output_of(src), "1\n");
}

#[test]
fn nested_functions_recurse() {
    let src = "
func outer(n)
    func fact(k)
        if k < 2
            return 1
        return k * fact(k - 1)
    return fact(n)
print(outer(5))
";
    assert_eq!(output_of(src), "120\n");
}

#[test]
fn closures_can_be_returned() {
    let src = "
func adder(n)
    lambda add = (x) => x + n
    return add
plus2 = adder(2)
print(plus2(3))
print(adder(10)(1))
";
    assert_eq!(output_of(src), "5\n11\n");
}

#[test]
fn variadic_parameters_and_unpacking() {
    let src = "
func count(first, *rest)
    return len(rest)
print(count(1))
print(count(1, 2, 3))
args = [4, 5]
print(count(*args, 6))
";
    assert_eq!(output_of(src), "0\n2\n2\n");
    assert!(matches!(runtime_error("print(*3)"), RuntimeError::UnpackNonArray { kind: "int", .. }));
}

#[test]
fn builtins() {
    assert_eq!(output_of("print(sum(1, 2, 3))\nprint(multiply(2, \"ab\"))"), "6\nabab\n");
    assert_eq!(output_of("print(divide(1, 4))\nprint(subtract(\"abc\", 1))"), "0.25\nab\n");
    assert_eq!(output_of("print(AND(1, 0))\nprint(OR(1, 0))\nprint(NOT(\"\"))"),
               "false\ntrue\ntrue\n");
    assert_eq!(output_of("print(type(print))\nprint(type(null))\nprint(truthy([0]))"),
               "bltIn\nnull\ntrue\n");
    assert_eq!(output_of("p = print\np(\"via alias\")"), "via alias\n");
}

#[test]
fn logic_does_not_short_circuit() {
    let src = "
func noisy(v)
    print(v)
    return v
x = noisy(false) and noisy(true)
print(x)
";
    assert_eq!(output_of(src), "false\ntrue\nfalse\n");
}

#[test]
fn runtime_errors_carry_lines() {
    assert!(matches!(runtime_error("x = 1\ny = x / 0"), RuntimeError::DivisionByZero { line: 2 }));
    assert!(matches!(runtime_error("a = [1]\nprint(a[1])"),
                     RuntimeError::IndexOutOfBounds { index: 1,
                                                      length: 1,
                                                      line: 2 }));
    assert!(matches!(runtime_error("a = [1, 2]\nprint(a[-3])"),
                     RuntimeError::IndexOutOfBounds { index: -3, .. }));
    assert!(matches!(runtime_error("x = 3\nx(1)"), RuntimeError::NotCallable { kind: "int", .. }));
    assert!(matches!(runtime_error("print(1, 2)"),
                     RuntimeError::ArgumentCountMismatch { found: 2, .. }));
    assert!(matches!(runtime_error("x = 9223372036854775807 + 1"),
                     RuntimeError::Overflow { line: 1 }));
    assert!(matches!(runtime_error("x = 1\ny = \"ab\" * 9223372036854775807"),
                     RuntimeError::Overflow { line: 2 }));
    assert!(matches!(runtime_error("while null: print(1)"), RuntimeError::Truthiness { .. }));
}

#[test]
fn every_syntax_error_is_reported() {
    let errors = syntax_errors("x = (1\ny = 2\nz = ]\n");
    let lines: Vec<_> = errors.iter().map(SyntaxError::line).collect();
    assert_eq!(lines, vec![1, 3]);
}

#[test]
fn syntax_errors_prevent_evaluation() {
    let mut out = Vec::new();
    assert!(run("print(1)\nelse\n    print(2)", &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn orphan_else_is_a_syntax_error() {
    assert!(syntax_errors("else\n    print(1)").iter()
                                              .any(|e| matches!(e, SyntaxError::OrphanElse { .. })));
}

#[test]
fn unknown_variable_is_error() {
    assert_failure("print(foo)");
}

#[test]
fn final_globals_are_returned() {
    let globals = run("a = 1\nb = \"two\"\nc = [a]", &mut std::io::sink()).unwrap();
    assert_eq!(globals.to_string(), "a: 1\nb: two\nc: [1]\n");
}
