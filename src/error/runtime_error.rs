#[derive(Debug, thiserror::Error)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use a name that no visible scope binds.
    #[error("Error on line {line}: '{name}' is undefined.")]
    UndefinedIdentifier {
        /// The name that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to declare a name that is already visible.
    #[error("Error on line {line}: '{name}' is already defined and cannot be re-declared.")]
    Redeclaration {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to a function seen through a global capture.
    #[error("Error on line {line}: Captured function '{name}' cannot be reassigned.")]
    CapturedBinding {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: '{name}' expects {expected} argument(s), but received {found}.")]
    ArgumentCountMismatch {
        /// The name of the called function.
        name:     String,
        /// A description of the accepted count, such as `2` or `at least 2`.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Tried to call something that is not a function.
    #[error("Error on line {line}: Cannot call a value of type '{kind}' as a function.")]
    NotCallable {
        /// The type of the callee.
        kind: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to index into something that is not an array.
    #[error("Error on line {line}: Cannot index into a value of type '{kind}'.")]
    NotIndexable {
        /// The type of the indexed value.
        kind: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array index was not an integer.
    #[error("Error on line {line}: Array indices must be 'int', found '{kind}'.")]
    IndexNotInteger {
        /// The type of the index.
        kind: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access an array element outside the allowed bounds.
    #[error("Error on line {line}: Index {index} out of bounds for array of length {length}.")]
    IndexOutOfBounds {
        /// The index that was actually requested.
        index:  i64,
        /// The length of the array.
        length: usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A binary operator does not support this pair of operand types.
    #[error("Error on line {line}: Cannot apply '{op}' to '{left}' and '{right}'.")]
    InvalidOperands {
        /// The operator symbol.
        op:    &'static str,
        /// The type of the left operand.
        left:  &'static str,
        /// The type of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A unary operator does not support this operand type.
    #[error("Error on line {line}: Cannot apply '{op}' to '{kind}'.")]
    InvalidOperand {
        /// The operator symbol.
        op:   &'static str,
        /// The type of the operand.
        kind: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A repetition or truncation count was negative.
    #[error("Error on line {line}: '{op}' needs a non-negative count, found {count}.")]
    NegativeCount {
        /// The operator symbol.
        op:    &'static str,
        /// The count supplied.
        count: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A value could not be elevated to a binding's declared type.
    #[error("Error on line {line}: Cannot store a value of type '{found}' in '{name}' of type '{declared}'.")]
    TypeMismatch {
        /// The name of the binding.
        name:     String,
        /// The declared type of the binding.
        declared: String,
        /// The type of the value.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A value has no truthiness.
    #[error("Error on line {line}: A value of type '{kind}' has no truthiness.")]
    Truthiness {
        /// The type of the value.
        kind: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `foreach` was given something it cannot iterate.
    #[error("Error on line {line}: Cannot iterate over a value of type '{kind}'.")]
    NotIterable {
        /// The type of the value.
        kind: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The `*` splice was applied to something other than an array.
    #[error("Error on line {line}: Can only unpack arrays, found '{kind}'.")]
    UnpackNonArray {
        /// The type of the value.
        kind: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    #[error("Error on line {line}: Integer overflow.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing program output failed.
    #[error("Error on line {line}: Failed to write output: {source}")]
    Output {
        /// The underlying I/O failure.
        source: std::io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
}

impl RuntimeError {
    /// Returns the source line the error is attached to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedIdentifier { line, .. }
            | Self::Redeclaration { line, .. }
            | Self::CapturedBinding { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::NotCallable { line, .. }
            | Self::NotIndexable { line, .. }
            | Self::IndexNotInteger { line, .. }
            | Self::IndexOutOfBounds { line, .. }
            | Self::InvalidOperands { line, .. }
            | Self::InvalidOperand { line, .. }
            | Self::NegativeCount { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::Truthiness { line, .. }
            | Self::NotIterable { line, .. }
            | Self::UnpackNonArray { line, .. }
            | Self::Overflow { line }
            | Self::DivisionByZero { line }
            | Self::Output { line, .. } => *line,
        }
    }
}
