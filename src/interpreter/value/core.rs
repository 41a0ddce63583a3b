use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{LiteralValue, TypeName},
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::builtin::BuiltinDef},
        value::function::Function,
    },
    util::num::int_to_float,
};

/// A shared, mutable list of values.
///
/// Cloning an `ArrayRef` shares the list, so every name bound to the same
/// array observes index assignments made through any of them.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible values that can be bound to names,
/// passed to functions, and produced by expressions.
///
/// Scalars are copied on clone. Arrays are reference-shared handles, and
/// are the only values ever mutated in place.
#[derive(Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// The absence of a value. Uninitialised bindings and functions that end
    /// without `return` produce it.
    Null,
    /// A shared array of values.
    Array(ArrayRef),
    /// A user-defined function or lambda.
    Function(Rc<Function>),
    /// A built-in function.
    Builtin(&'static BuiltinDef),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Int(n) => (*n).into(),
            LiteralValue::Float(x) => (*x).into(),
            LiteralValue::Str(s) => s.as_str().into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Null => Self::Null,
        }
    }
}

impl Value {
    /// Returns the language-level name of this value's type, as reported by
    /// the `type` builtin and in error messages.
    ///
    /// # Example
    /// ```
    /// use quadra::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(vec![Value::Null]).type_name(), "arr");
    /// assert_eq!(Value::from(1.5).type_name(), "float");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bool(_) => "bool",
            Self::Null => "null",
            Self::Array(_) => "arr",
            Self::Function(_) => "func",
            Self::Builtin(_) => "bltIn",
        }
    }

    /// Converts the value to a boolean for conditions and logic operators.
    ///
    /// - numbers are truthy when nonzero,
    /// - strings and arrays are truthy when non-empty,
    /// - booleans are themselves.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: The truthiness of the value.
    /// - `Err(RuntimeError::Truthiness)`: For `null` and functions, which have
    ///   none.
    pub fn truthy(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Int(n) => Ok(*n != 0),
            Self::Float(x) => Ok(*x != 0.0),
            Self::Str(s) => Ok(!s.is_empty()),
            Self::Bool(b) => Ok(*b),
            Self::Array(items) => Ok(!items.borrow().is_empty()),
            Self::Null | Self::Function(_) | Self::Builtin(_) => {
                Err(RuntimeError::Truthiness { kind: self.type_name(),
                                               line })
            },
        }
    }

    /// Returns a copy that shares no array storage with `self`.
    ///
    /// Nested arrays are copied recursively; every other kind is cloned.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        match self {
            Self::Array(items) => items.borrow()
                                       .iter()
                                       .map(Self::deep_copy)
                                       .collect::<Vec<_>>()
                                       .into(),
            other => other.clone(),
        }
    }

    /// Applies type elevation so the value fits a declared type.
    ///
    /// A value that already has the declared kind is returned unchanged, and
    /// `null` fits every type. Otherwise the value is widened along
    /// `int -> float -> str`: an `int` stored in a `float` becomes a float,
    /// and a number stored in a `str` becomes its printed form. Typed arrays
    /// check only that the value is an array.
    ///
    /// # Parameters
    /// - `declared`: The binding's declared type.
    /// - `name`: The binding's name, for the error message.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(Value)`: The value, elevated if needed.
    /// - `Err(RuntimeError::TypeMismatch)`: If no elevation applies.
    ///
    /// # Example
    /// ```
    /// use quadra::{ast::TypeName, interpreter::value::core::Value};
    ///
    /// let v = Value::Int(2).elevate(&TypeName::Str, "label", 1).unwrap();
    /// assert_eq!(v, Value::from("2"));
    ///
    /// assert!(Value::Float(2.5).elevate(&TypeName::Int, "n", 1).is_err());
    /// ```
    pub fn elevate(self, declared: &TypeName, name: &str, line: usize) -> EvalResult<Self> {
        match (declared, self) {
            (TypeName::Any, v)
            | (_, v @ Self::Null)
            | (TypeName::Int, v @ Self::Int(_))
            | (TypeName::Float, v @ Self::Float(_))
            | (TypeName::Str, v @ Self::Str(_))
            | (TypeName::Bool, v @ Self::Bool(_))
            | (TypeName::Array(_), v @ Self::Array(_)) => Ok(v),
            (TypeName::Float, Self::Int(n)) => Ok(Self::Float(int_to_float(n))),
            (TypeName::Str, v @ (Self::Int(_) | Self::Float(_))) => Ok(Self::Str(v.to_string())),
            (_, v) => Err(RuntimeError::TypeMismatch { name: name.to_string(),
                                                       declared: declared.to_string(),
                                                       found: v.type_name(),
                                                       line }),
        }
    }

    /// Returns the integer inside the value, if it is an `int`.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Writes the value as an array element: like `Display`, except that
    /// strings are quoted.
    fn fmt_element(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "\"{s}\""),
            other => write!(f, "{other}"),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
            Self::Array(items) => {
                write!(f, "[")?;

                for (index, value) in items.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    value.fmt_element(f)?;
                }

                write!(f, "]")
            },
            Self::Function(func) => write!(f, "<func {}>", func.name),
            Self::Builtin(def) => write!(f, "<bltIn {}>", def.name),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Null => f.write_str("Null"),
            Self::Array(items) => f.debug_tuple("Array").field(&items.borrow()).finish(),
            Self::Function(func) => f.debug_tuple("Function").field(&func.name).finish(),
            Self::Builtin(def) => f.debug_tuple("Builtin").field(&def.name).finish(),
        }
    }
}

/// Structural equality, used by tests and by the host, not by the `==`
/// operator.
///
/// Arrays compare by contents, functions by identity and built-ins by name.
/// No cross-kind comparison is made: `Int(1) != Float(1.0)`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}
