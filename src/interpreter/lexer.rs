use std::fmt;

use logos::Logos;
use tracing::debug;

use crate::error::{Diagnostics, SyntaxError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Float literal tokens, such as `3.14`. Both sides of the point need a
    /// digit, so `1..5` is an integer, a range and another integer.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Int(i64),
    /// String literal tokens. The contents are kept raw; `\"` does not end
    /// the literal.
    #[regex(r#""([^"\\]|\\[^\n]|\\\n)*""#, parse_string)]
    Str(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `null`
    #[token("null")]
    Null,
    /// `func`
    #[token("func")]
    Func,
    /// `return`
    #[token("return")]
    Return,
    /// `while`
    #[token("while")]
    While,
    /// `foreach`
    #[token("foreach")]
    Foreach,
    /// `in`
    #[token("in")]
    In,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `lambda`
    #[token("lambda")]
    Lambda,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `int`
    #[token("int")]
    IntType,
    /// `float`
    #[token("float")]
    FloatType,
    /// `str`
    #[token("str")]
    StrType,
    /// `bool`
    #[token("bool")]
    BoolType,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    MultiLineComment,
    /// `..`
    #[token("..")]
    DotDot,
    /// `=>`
    #[token("=>")]
    Arrow,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// One indentation unit: exactly four spaces.
    #[token("    ")]
    Indent,
    /// Statement terminator.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        Token::NewLine
    })]
    NewLine,
    /// Tabs, carriage returns, feeds, and spaces left over after indentation
    /// units are taken.
    #[regex(r"[ \t\f\r]", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Token {
    /// Returns `true` for tokens that open an indented block when they start
    /// a line.
    #[must_use]
    pub const fn opens_block(&self) -> bool {
        matches!(self, Self::Func | Self::While | Self::Foreach | Self::If | Self::Else)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(x) => write!(f, "float literal {x}"),
            Self::Int(n) => write!(f, "integer literal {n}"),
            Self::Str(s) => write!(f, "string literal \"{s}\""),
            Self::Bool(b) => write!(f, "'{b}'"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::NewLine => write!(f, "end of line"),
            Self::Indent => write!(f, "indentation"),
            other => write!(f, "'{}'", other.symbol()),
        }
    }
}

impl Token {
    const fn symbol(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Func => "func",
            Self::Return => "return",
            Self::While => "while",
            Self::Foreach => "foreach",
            Self::In => "in",
            Self::If => "if",
            Self::Else => "else",
            Self::Lambda => "lambda",
            Self::And => "and",
            Self::Or => "or",
            Self::IntType => "int",
            Self::FloatType => "float",
            Self::StrType => "str",
            Self::BoolType => "bool",
            Self::DotDot => "..",
            Self::Arrow => "=>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Equals => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Bang => "!",
            _ => "?",
        }
    }
}

/// Converts source text into `(Token, line)` pairs.
///
/// Input that starts no token is reported to `diagnostics` and skipped, so a
/// single bad character does not hide later errors. The returned sequence
/// always ends with a [`Token::NewLine`], which lets the line splitter treat
/// the last line like every other.
///
/// # Parameters
/// - `source`: The program text.
/// - `diagnostics`: Collector for lexical errors.
///
/// # Returns
/// The token stream, each token tagged with the line it starts on.
///
/// # Example
/// ```
/// use quadra::{
///     error::Diagnostics,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let mut diagnostics = Diagnostics::new();
/// let tokens = tokenize("x = 1", &mut diagnostics);
///
/// assert!(!diagnostics.has_errors());
/// assert_eq!(tokens[0], (Token::Identifier("x".into()), 1));
/// assert_eq!(tokens[2], (Token::Int(1), 1));
/// ```
#[tracing::instrument(level = "debug", skip_all)]
pub fn tokenize(source: &str, diagnostics: &mut Diagnostics) -> Vec<(Token, usize)> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        match token {
            // The newline callback has already advanced the counter.
            Ok(Token::NewLine) => tokens.push((Token::NewLine, line - 1)),
            Ok(Token::Str(text)) => {
                let start = line - text.chars().filter(|&c| c == '\n').count();
                tokens.push((Token::Str(text), start));
            },
            Ok(tok) => tokens.push((tok, line)),
            Err(()) => diagnostics.report(classify_error(lexer.slice(), line)),
        }
    }

    if !matches!(tokens.last(), Some((Token::NewLine, _)) | None) {
        tokens.push((Token::NewLine, lexer.extras.line));
    }

    debug!(count = tokens.len(), "tokenized source");
    tokens
}

fn classify_error(slice: &str, line: usize) -> SyntaxError {
    if slice.starts_with('"') {
        SyntaxError::UnterminatedString { line }
    } else if slice.starts_with("/*") {
        SyntaxError::UnterminatedComment { line }
    } else {
        SyntaxError::UnrecognisedInput { text: slice.to_string(),
                                         line }
    }
}

/// Parses a floating-point literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
/// Parses an integer literal from the current token slice.
///
/// Literals that do not fit in an `i64` fail here and surface as
/// unrecognised input.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
/// Strips the quotes from a string literal and keeps line numbers in step
/// with any newlines inside it.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.chars().filter(|&c| c == '\n').count();
    slice[1..slice.len() - 1].to_string()
}
/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        assert!(!diagnostics.has_errors(), "{:?}", diagnostics.errors());
        tokens.into_iter().map(|(tok, _)| tok).collect()
    }

    #[test]
    fn range_is_not_a_float() {
        assert_eq!(kinds("1..5"),
                   vec![Token::Int(1), Token::DotDot, Token::Int(5), Token::NewLine]);
        assert_eq!(kinds("1.5"), vec![Token::Float(1.5), Token::NewLine]);
    }

    #[test]
    fn indentation_is_counted_in_units_of_four() {
        assert_eq!(kinds("        x"),
                   vec![Token::Indent,
                        Token::Indent,
                        Token::Identifier("x".into()),
                        Token::NewLine]);
        // Six spaces: one unit, the remainder is skipped.
        assert_eq!(kinds("      x"),
                   vec![Token::Indent, Token::Identifier("x".into()), Token::NewLine]);
        assert_eq!(kinds("\tx"), vec![Token::Identifier("x".into()), Token::NewLine]);
    }

    #[test]
    fn keywords_and_type_names() {
        assert_eq!(kinds("func int f"),
                   vec![Token::Func,
                        Token::IntType,
                        Token::Identifier("f".into()),
                        Token::NewLine]);
        assert_eq!(kinds("foreach_x"),
                   vec![Token::Identifier("foreach_x".into()), Token::NewLine]);
    }

    #[test]
    fn operators_prefer_the_longest_match() {
        assert_eq!(kinds("a => b == c != d"),
                   vec![Token::Identifier("a".into()),
                        Token::Arrow,
                        Token::Identifier("b".into()),
                        Token::EqualEqual,
                        Token::Identifier("c".into()),
                        Token::BangEqual,
                        Token::Identifier("d".into()),
                        Token::NewLine]);
    }

    #[test]
    fn strings_are_raw() {
        assert_eq!(kinds(r#""say \"hi\"""#),
                   vec![Token::Str(r#"say \"hi\""#.into()), Token::NewLine]);
    }

    #[test]
    fn comments_are_skipped_and_lines_tracked() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("a // note\n/* one\ntwo */ b", &mut diagnostics);

        assert_eq!(tokens,
                   vec![(Token::Identifier("a".into()), 1),
                        (Token::NewLine, 1),
                        (Token::Identifier("b".into()), 3),
                        (Token::NewLine, 3)]);
    }

    #[test]
    fn bad_input_is_reported_and_skipped() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("x = 1 $ 2\ny = \"open", &mut diagnostics);

        assert!(tokens.contains(&(Token::Int(2), 1)));
        assert!(matches!(diagnostics.errors(),
                         [SyntaxError::UnrecognisedInput { line: 1, .. },
                          SyntaxError::UnterminatedString { line: 2 }, ..]));
    }
}
