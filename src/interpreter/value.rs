/// Function values.
///
/// Defines the `Function` type produced by `func` and `lambda` statements:
/// parameters, body, declared return type and the captured environment.
pub mod function;

/// The runtime value type.
///
/// Defines `Value`, its printed form, truthiness, deep copying and type
/// elevation.
pub mod core;
