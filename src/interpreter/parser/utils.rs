use std::iter::Peekable;

use crate::{
    ast::TypeName,
    error::SyntaxError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Builds the error for a line that ended too early.
///
/// The line number is left as `0`; [`parse_line`] fills it in, since it is
/// the only caller that knows which line ran out.
///
/// [`parse_line`]: crate::interpreter::parser::core::parse_line
pub(in crate::interpreter::parser) fn end_of_line(expected: &str) -> SyntaxError {
    SyntaxError::UnexpectedEndOfLine { expected: expected.to_string(),
                                       line:     0, }
}

/// Builds the error for a token that is not the one the grammar requires.
pub(in crate::interpreter::parser) fn unexpected(expected: &str,
                                                 found: &Token,
                                                 line: usize)
                                                 -> SyntaxError {
    SyntaxError::UnexpectedToken { expected: expected.to_string(),
                                   found: found.to_string(),
                                   line }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `expected`: The required token.
/// - `what`: Human-readable name of the token for the error message.
///
/// # Returns
/// The line of the consumed token.
///
/// # Errors
/// Returns a `SyntaxError` if the next token differs or the line ended.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    what: &str)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok == expected => Ok(*line),
        Some((tok, line)) => Err(unexpected(what, tok, *line)),
        None => Err(end_of_line(what)),
    }
}

/// Consumes the next token if it equals `expected`.
///
/// # Returns
/// `true` if a token was consumed.
pub(in crate::interpreter::parser) fn eat<'a, I>(tokens: &mut Peekable<I>, expected: &Token) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    if let Some((tok, _)) = tokens.peek()
       && tok == expected
    {
        tokens.next();
        return true;
    }
    false
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, argument lists and parameter
/// lists. It repeatedly calls `parse_item` to parse one element, expecting
/// either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `SyntaxError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the line ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if eat(tokens, closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, line)) => {
                return Err(unexpected(&format!("',' or {closing}"), tok, *line));
            },
            None => return Err(end_of_line(&closing.to_string())),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `SyntaxError` if the next token is not an identifier or the line
/// ended.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, line)) => Err(unexpected("an identifier", tok, *line)),
        None => Err(end_of_line("an identifier")),
    }
}

/// Returns `true` if the next token starts a type such as `int` or `str[]`.
pub(in crate::interpreter::parser) fn type_pending<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    matches!(tokens.peek(),
             Some((Token::IntType | Token::FloatType | Token::StrType | Token::BoolType, _)))
}

/// Parses a type, optionally followed by `[]` for a typed array.
///
/// Grammar: `type := ("int" | "float" | "str" | "bool") ("[" "]")*`
///
/// # Errors
/// Returns a `SyntaxError` if no type keyword is present or the brackets are
/// unbalanced.
pub(in crate::interpreter::parser) fn parse_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<TypeName>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut ty = match tokens.next() {
        Some((Token::IntType, _)) => TypeName::Int,
        Some((Token::FloatType, _)) => TypeName::Float,
        Some((Token::StrType, _)) => TypeName::Str,
        Some((Token::BoolType, _)) => TypeName::Bool,
        Some((tok, line)) => return Err(unexpected("a type", tok, *line)),
        None => return Err(end_of_line("a type")),
    };
    while eat(tokens, &Token::LBracket) {
        expect(tokens, &Token::RBracket, "']'")?;
        ty = TypeName::Array(Box::new(ty));
    }
    Ok(ty)
}

/// Parses an optional type, returning [`TypeName::Any`] when none is written.
pub(in crate::interpreter::parser) fn parse_optional_type<'a, I>(tokens: &mut Peekable<I>)
                                                                 -> ParseResult<TypeName>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if type_pending(tokens) { parse_type(tokens) } else { Ok(TypeName::Any) }
}
