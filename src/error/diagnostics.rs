use tracing::debug;

use crate::error::SyntaxError;

/// Collects syntax errors across the front-end phases.
///
/// The lexer, the line splitter, the line parser and the block assembler each
/// take `&mut Diagnostics` and report into it instead of stopping. The caller
/// checks [`Diagnostics::has_errors`] once parsing is complete and refuses to
/// evaluate a program that produced any.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<SyntaxError>,
}

impl Diagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a syntax error.
    pub fn report(&mut self, error: SyntaxError) {
        debug!(line = error.line(), %error, "syntax error");
        self.errors.push(error);
    }

    /// Returns `true` if at least one error was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The errors reported so far, in report order.
    #[must_use]
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Consumes the collector, returning the errors sorted by line.
    ///
    /// Errors are reported phase by phase, so a lexer error on line 9 is
    /// reported before a parser error on line 2. Sorting restores source
    /// order; the sort is stable, so errors on the same line keep their
    /// report order.
    #[must_use]
    pub fn into_errors(mut self) -> Vec<SyntaxError> {
        self.errors.sort_by_key(SyntaxError::line);
        self.errors
    }
}
