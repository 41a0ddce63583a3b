use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{end_of_line, expect, parse_comma_separated, unexpected},
        },
    },
};

/// Parses prefix unary operators: `-` and `!`.
///
/// Unary operators nest, so `--x` and `!!flag` are accepted.
///
/// The rule is: `unary := ("-" | "!") unary | postfix`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An `Expr::UnaryOp`, or the postfix expression if no operator is present.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Bang, _)) => UnaryOperator::Not,
        _ => return parse_postfix(tokens),
    };
    let line = tokens.next().map_or(0, |(_, line)| *line);
    let expr = parse_unary(tokens)?;

    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       line })
}

/// Parses a primary expression followed by any number of calls and index
/// operations.
///
/// Calls chain, so `f(x)(y)` is a call whose callee is the call `f(x)`, and
/// indexing nests, so `grid[1][0]` indexes the result of `grid[1]`.
///
/// The rule is: `postfix := primary ("(" arguments ")" | "[" expression "]")*`
///
/// # Errors
/// Returns a `SyntaxError` if a bracket is not closed or an argument fails to
/// parse.
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut node = parse_primary(tokens)?;
    loop {
        match tokens.peek() {
            Some((Token::LParen, line)) => {
                let line = *line;
                tokens.next();
                let args = parse_comma_separated(tokens, parse_argument, &Token::RParen)?;
                node = Expr::Call { callee: Box::new(node),
                                    args,
                                    line };
            },
            Some((Token::LBracket, line)) => {
                let line = *line;
                tokens.next();
                let index = parse_expression(tokens)?;
                expect(tokens, &Token::RBracket, "']' after array index")?;
                node = Expr::Index { array: Box::new(node),
                                     index: Box::new(index),
                                     line };
            },
            _ => break,
        }
    }
    Ok(node)
}

/// Parses one call argument, which may carry the `*` splice prefix.
///
/// The rule is: `argument := "*" expression | expression`
fn parse_argument<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Star, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_expression(tokens)?;
        return Ok(Expr::Unpack { expr: Box::new(expr),
                                 line });
    }
    parse_expression(tokens)
}

/// Parses a terminal expression.
///
/// Supported forms:
/// - literals: integers, floats, strings, `true`, `false`, `null`
/// - identifiers
/// - parenthesized expressions
/// - array literals, possibly empty
///
/// # Errors
/// Returns a `SyntaxError` if the next token cannot start an expression.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.next() else {
        return Err(end_of_line("an expression"));
    };
    let line = *line;

    let literal = |value: LiteralValue| -> ParseResult<Expr> { Ok(Expr::Literal { value, line }) };

    match token {
        Token::Int(n) => literal(LiteralValue::Int(*n)),
        Token::Float(x) => literal(LiteralValue::Float(*x)),
        Token::Str(s) => literal(LiteralValue::Str(s.clone())),
        Token::Bool(b) => literal(LiteralValue::Bool(*b)),
        Token::Null => literal(LiteralValue::Null),
        Token::Identifier(name) => Ok(Expr::Identifier { name: name.clone(),
                                                         line }),
        Token::LParen => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')'")?;
            Ok(expr)
        },
        Token::LBracket => {
            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            Ok(Expr::Array { elements, line })
        },
        other => Err(unexpected("an expression", other, line)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{error::Diagnostics, interpreter::lexer::tokenize};

    fn parse(source: &str) -> Expr {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        let body = &tokens[..tokens.len() - 1];
        parse_unary(&mut body.iter().peekable()).unwrap()
    }

    fn ident(name: &str) -> Box<Expr> {
        Box::new(Expr::Identifier { name: name.into(),
                                    line: 1, })
    }

    #[test]
    fn chained_calls_nest() {
        let inner = Expr::Call { callee: ident("f"),
                                 args:   vec![*ident("x")],
                                 line:   1, };
        let expected = Expr::Call { callee: Box::new(inner),
                                    args:   vec![*ident("y")],
                                    line:   1, };
        assert_eq!(parse("f(x)(y)"), expected);
    }

    #[test]
    fn splice_arguments_are_wrapped() {
        let Expr::Call { args, .. } = parse("f(1, *rest)") else {
            panic!("expected a call");
        };
        assert_eq!(args[1],
                   Expr::Unpack { expr: ident("rest"),
                                  line: 1, });
    }

    #[test]
    fn unary_operators_nest() {
        let expected = Expr::UnaryOp { op:   UnaryOperator::Not,
                                       expr: Box::new(Expr::UnaryOp { op:   UnaryOperator::Not,
                                                                      expr: ident("done"),
                                                                      line: 1, }),
                                       line: 1, };
        assert_eq!(parse("!!done"), expected);
    }

    #[test]
    fn empty_array_literal() {
        assert_eq!(parse("[]"),
                   Expr::Array { elements: vec![],
                                 line:     1, });
    }

    #[test]
    fn nested_indexing() {
        let Expr::Index { array, .. } = parse("grid[1][0]") else {
            panic!("expected an index");
        };
        assert!(matches!(*array, Expr::Index { .. }));
    }
}
