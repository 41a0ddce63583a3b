/// Syntax errors.
///
/// Defines all error types that can occur while tokenizing, splitting lines,
/// parsing a single line, or assembling lines into blocks. Syntax errors are
/// collected rather than returned, so one pass can surface several of them.
pub mod syntax_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. A runtime
/// error is fatal: evaluation stops at the first one.
pub mod runtime_error;
/// The syntax error collector.
///
/// Threaded explicitly through every front-end phase and flushed once at the
/// top level.
pub mod diagnostics;

pub use diagnostics::Diagnostics;
pub use runtime_error::RuntimeError;
pub use syntax_error::SyntaxError;

/// Any error that ends a run.
///
/// A run fails either in the front end, with one or more collected syntax
/// errors, or during evaluation, with exactly one runtime error.
#[derive(Debug, thiserror::Error)]
pub enum QuadraError {
    /// Parsing produced at least one syntax error; evaluation never started.
    #[error("{}", render_all(.0))]
    Syntax(Vec<SyntaxError>),
    /// Evaluation stopped at a runtime error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl QuadraError {
    /// Returns the process exit status conventionally used for this error.
    ///
    /// Syntax errors map to `65` (`EX_DATAERR`), runtime errors to `70`
    /// (`EX_SOFTWARE`).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Syntax(_) => 65,
            Self::Runtime(_) => 70,
        }
    }
}

fn render_all(errors: &[SyntaxError]) -> String {
    errors.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join("\n")
}
