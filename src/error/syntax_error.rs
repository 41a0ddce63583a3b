#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur during lexing or parsing.
pub enum SyntaxError {
    /// The lexer met input that starts no token.
    #[error("Error on line {line}: Unrecognised input '{text}'.")]
    UnrecognisedInput {
        /// The offending source text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal was opened but never closed.
    #[error("Error on line {line}: Unterminated string literal.")]
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A block comment was opened but never closed.
    #[error("Error on line {line}: Unterminated block comment.")]
    UnterminatedComment {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// The token encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The line ended while the parser still expected more.
    #[error("Error on line {line}: Expected {expected}, but the line ended.")]
    UnexpectedEndOfLine {
        /// What the parser was looking for.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Found extra tokens after a complete statement.
    #[error("Error on line {line}: Unexpected trailing {token}.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The line is an expression but not a call, so it cannot stand alone.
    #[error("Error on line {line}: Only a function call can be used as a statement.")]
    ExpressionStatement {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left side of `=` is not something that can be assigned to.
    #[error("Error on line {line}: Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A variadic parameter was followed by more parameters.
    #[error("Error on line {line}: Variadic parameter '*{name}' must be the last parameter.")]
    VariadicNotLast {
        /// The variadic parameter's name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The indentation increased where no block was opened, or by more than
    /// one level.
    #[error("Error on line {line}: Unexpected indentation (depth {found}, expected at most {expected}).")]
    UnexpectedIndent {
        /// The deepest depth allowed on this line.
        expected: usize,
        /// The depth found.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An `else` or `else if` that does not follow an `if` chain.
    #[error("Error on line {line}: '{keyword}' without a preceding 'if'.")]
    OrphanElse {
        /// Either `else` or `else if`.
        keyword: &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl SyntaxError {
    /// Fills in the line of an error raised where only the line parser knew
    /// it, such as running off the end of a line's tokens.
    #[must_use]
    pub fn or_line(mut self, fallback: usize) -> Self {
        if let Self::UnexpectedEndOfLine { line, .. } = &mut self
           && *line == 0
        {
            *line = fallback;
        }
        self
    }

    /// Returns the source line the error is attached to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnrecognisedInput { line, .. }
            | Self::UnterminatedString { line }
            | Self::UnterminatedComment { line }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfLine { line, .. }
            | Self::UnexpectedTrailingTokens { line, .. }
            | Self::ExpressionStatement { line }
            | Self::InvalidAssignmentTarget { line }
            | Self::VariadicNotLast { line, .. }
            | Self::UnexpectedIndent { line, .. }
            | Self::OrphanElse { line, .. } => *line,
        }
    }
}
