use tracing::trace;

use crate::interpreter::lexer::Token;

/// One logical line of source, ready for the line parser.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    /// Number of leading indentation units.
    pub depth:  usize,
    /// Line number of the first token.
    pub line:   usize,
    /// The line's tokens, with every indentation unit removed.
    pub tokens: Vec<(Token, usize)>,
}

/// Groups a token stream into logical lines.
///
/// - Lines are separated by [`Token::NewLine`].
/// - Leading [`Token::Indent`] units are counted as the depth; indentation
///   units anywhere else on the line carry no meaning and are dropped.
/// - Lines with no remaining tokens (blank or comment-only) are skipped.
/// - A block header followed by `:` and more tokens, such as
///   `foreach i in 0..3: print(i)`, is split in two: the header up to and
///   including the colon at `depth`, and the rest as its body at
///   `depth + 1`. The split repeats, so `if a: if b: f()` nests twice.
///
/// # Parameters
/// - `tokens`: Output of the lexer.
///
/// # Returns
/// The logical lines in source order.
///
/// # Example
/// ```
/// use quadra::{
///     error::Diagnostics,
///     interpreter::{lexer::tokenize, parser::lines::split_lines},
/// };
///
/// let mut diagnostics = Diagnostics::new();
/// let tokens = tokenize("while x:\n    x = 0\n\n", &mut diagnostics);
/// let lines = split_lines(&tokens);
///
/// assert_eq!(lines.len(), 2);
/// assert_eq!((lines[0].depth, lines[1].depth), (0, 1));
/// ```
#[must_use]
pub fn split_lines(tokens: &[(Token, usize)]) -> Vec<SourceLine> {
    let mut lines = Vec::new();

    for raw in tokens.split(|(tok, _)| *tok == Token::NewLine) {
        let depth = raw.iter()
                       .take_while(|(tok, _)| *tok == Token::Indent)
                       .count();
        let content: Vec<_> = raw.iter()
                                 .filter(|(tok, _)| *tok != Token::Indent)
                                 .cloned()
                                 .collect();
        push_line(&mut lines, depth, content);
    }

    trace!(count = lines.len(), "split source into lines");
    lines
}

fn push_line(lines: &mut Vec<SourceLine>, depth: usize, mut tokens: Vec<(Token, usize)>) {
    let Some((first, line)) = tokens.first() else {
        return;
    };
    let line = *line;

    if first.opens_block()
       && let Some(colon) = top_level_colon(&tokens)
       && colon + 1 < tokens.len()
    {
        let body = tokens.split_off(colon + 1);
        lines.push(SourceLine { depth, line, tokens });
        push_line(lines, depth + 1, body);
        return;
    }

    lines.push(SourceLine { depth, line, tokens });
}

/// Finds the first `:` not nested inside parentheses or brackets.
fn top_level_colon(tokens: &[(Token, usize)]) -> Option<usize> {
    let mut nesting = 0usize;
    for (index, (tok, _)) in tokens.iter().enumerate() {
        match tok {
            Token::LParen | Token::LBracket => nesting += 1,
            Token::RParen | Token::RBracket => nesting = nesting.saturating_sub(1),
            Token::Colon if nesting == 0 => return Some(index),
            _ => {},
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{error::Diagnostics, interpreter::lexer::tokenize};

    fn shape(source: &str) -> Vec<(usize, usize, usize)> {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        split_lines(&tokens).iter()
                            .map(|l| (l.depth, l.line, l.tokens.len()))
                            .collect()
    }

    #[test]
    fn blank_and_comment_lines_are_dropped() {
        assert_eq!(shape("a = 1\n\n// note\n        \nb = 2"),
                   vec![(0, 1, 3), (0, 5, 3)]);
    }

    #[test]
    fn depth_counts_leading_units_only() {
        assert_eq!(shape("while x\n    y = 1    + 2"), vec![(0, 1, 2), (1, 2, 5)]);
    }

    #[test]
    fn inline_body_becomes_its_own_line() {
        assert_eq!(shape("foreach i in 0..3: print(i)"), vec![(0, 1, 7), (1, 1, 4)]);
    }

    #[test]
    fn inline_bodies_nest() {
        assert_eq!(shape("if a: if b: f()"), vec![(0, 1, 3), (1, 1, 3), (2, 1, 3)]);
    }

    #[test]
    fn trailing_colon_stays_on_the_header() {
        assert_eq!(shape("else:"), vec![(0, 1, 2)]);
    }
}
