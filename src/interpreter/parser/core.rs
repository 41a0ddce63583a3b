use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::{Expr, Statement},
    error::{Diagnostics, SyntaxError},
    interpreter::{
        lexer::{Token, tokenize},
        parser::{
            binary::parse_equality,
            block::assemble,
            lines::split_lines,
            statement::{finish_line, parse_statement},
        },
    },
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence tier and recursively descends through
/// the precedence hierarchy.
///
/// Grammar: `expression := equality`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_equality(tokens)
}

/// Parses the tokens of one logical line into a statement.
///
/// A line that fails to parse is reported into `diagnostics` and replaced by
/// [`Statement::Error`], so that the block assembler still sees the line and
/// parsing of later lines continues.
///
/// # Parameters
/// - `tokens`: The line's tokens, without indentation or newline.
/// - `line`: Line number used for errors that carry no token position.
/// - `diagnostics`: Collector for syntax errors.
///
/// # Returns
/// The parsed statement, or an error placeholder.
pub fn parse_line(tokens: &[(Token, usize)], line: usize, diagnostics: &mut Diagnostics) -> Statement {
    let mut iter = tokens.iter().peekable();

    let parsed = parse_statement(&mut iter).and_then(|statement| {
                                               finish_line(&mut iter, &statement)?;
                                               Ok(statement)
                                           });

    match parsed {
        Ok(statement) => statement,
        Err(err) => {
            diagnostics.report(err.or_line(line));
            Statement::Error { line }
        },
    }
}

/// Runs the whole front end over a source string.
///
/// The source is tokenized, split into logical lines, each line is parsed on
/// its own, and the lines are assembled into nested blocks. Every phase
/// reports into the same `diagnostics`; the returned program is only
/// meaningful when no error was reported.
///
/// # Parameters
/// - `source`: The program text.
/// - `diagnostics`: Collector for syntax errors.
///
/// # Returns
/// The top-level statements of the program.
///
/// # Example
/// ```
/// use quadra::{error::Diagnostics, interpreter::parser::core::parse_source};
///
/// let mut diagnostics = Diagnostics::new();
/// let program = parse_source("x = 1\nwhile x < 3:\n    x = x + 1\n", &mut diagnostics);
///
/// assert!(!diagnostics.has_errors());
/// assert_eq!(program.len(), 2);
/// ```
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_source(source: &str, diagnostics: &mut Diagnostics) -> Vec<Statement> {
    let tokens = tokenize(source, diagnostics);
    let lines = split_lines(&tokens);

    let parsed = lines.into_iter()
                      .map(|l| (l.depth, parse_line(&l.tokens, l.line, diagnostics)))
                      .collect::<Vec<_>>();

    let program = assemble(parsed, diagnostics);
    debug!(statements = program.len(),
           errors = diagnostics.errors().len(),
           "parsed program");
    program
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn failed_lines_become_placeholders() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("x = (1", &mut diagnostics);
        let statement = parse_line(&tokens[..tokens.len() - 1], 4, &mut diagnostics);

        assert_eq!(statement, Statement::Error { line: 4 });
        assert_eq!(diagnostics.errors(),
                   &[SyntaxError::UnexpectedEndOfLine { expected: "')'".into(),
                                                        line:     4, }]);
    }

    #[test]
    fn errors_on_several_lines_are_all_reported() {
        let mut diagnostics = Diagnostics::new();
        parse_source("x = \ny = 1\n1 + 2\nz = ]", &mut diagnostics);

        let lines: Vec<_> = diagnostics.into_errors().iter().map(SyntaxError::line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }

    #[test]
    fn inline_bodies_parse_like_indented_ones() {
        let mut inline = Diagnostics::new();
        let mut indented = Diagnostics::new();
        let a = parse_source("while x: x = 0", &mut inline);
        let b = parse_source("while x:\n    x = 0", &mut indented);

        assert!(!inline.has_errors() && !indented.has_errors());
        let strip = |program: &[Statement]| match &program[0] {
            Statement::While { body, .. } => body.len(),
            _ => 0,
        };
        assert_eq!(strip(&a), 1);
        assert_eq!(strip(&b), 1);
    }
}
