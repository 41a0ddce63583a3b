/// The built-in function table.
///
/// Declares every built-in with its arity and implementation, and provides
/// lookup by name.
pub mod builtin;
/// The `print` builtin.
///
/// Writes a value to the interpreter's output sink.
pub mod print;
/// User-defined functions.
///
/// Definition and closure capture, argument evaluation and unpacking, and
/// dispatch of calls to user functions and builtins.
pub mod core;
