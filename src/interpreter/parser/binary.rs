use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses the lowest-precedence tier: `and`, `or`, `==` and `!=`.
///
/// Like every binary tier, the right operand is parsed by recursing into the
/// same tier, so operators associate to the right:
/// `a == b and c` parses as `a == (b and c)`.
///
/// The rule is: `equality := relational (("and" | "or" | "==" | "!=")
/// equality)?`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_tier(tokens,
               parse_relational,
               parse_equality,
               &[BinaryOperator::And,
                 BinaryOperator::Or,
                 BinaryOperator::Equal,
                 BinaryOperator::NotEqual])
}

/// Parses relational operators: `>`, `>=`, `<` and `<=`.
///
/// The rule is: `relational := additive ((">" | ">=" | "<" | "<=")
/// relational)?`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_tier(tokens,
               parse_additive,
               parse_relational,
               &[BinaryOperator::Greater,
                 BinaryOperator::GreaterEqual,
                 BinaryOperator::Less,
                 BinaryOperator::LessEqual])
}

/// Parses addition and subtraction expressions.
///
/// Right-associative: `10 - 2 - 3` parses as `10 - (2 - 3)`.
///
/// The rule is: `additive := multiplicative (("+" | "-") additive)?`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_tier(tokens,
               parse_multiplicative,
               parse_additive,
               &[BinaryOperator::Add, BinaryOperator::Sub])
}

/// Parses multiplication and division expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/") multiplicative)?`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_tier(tokens,
               parse_unary,
               parse_multiplicative,
               &[BinaryOperator::Mul, BinaryOperator::Div])
}

/// Parses one precedence tier.
///
/// The left operand comes from the next-higher tier; if one of `operators`
/// follows, the right operand comes from `same_tier`, which is the calling
/// tier itself.
fn parse_tier<'a, I>(tokens: &mut Peekable<I>,
                     higher_tier: fn(&mut Peekable<I>) -> ParseResult<Expr>,
                     same_tier: fn(&mut Peekable<I>) -> ParseResult<Expr>,
                     operators: &[BinaryOperator])
                     -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = higher_tier(tokens)?;

    if let Some((token, line)) = tokens.peek()
       && let Some(op) = token_to_binary_operator(token)
       && operators.contains(&op)
    {
        let line = *line;
        tokens.next();
        let right = same_tier(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(left),
                                   op,
                                   right: Box::new(right),
                                   line });
    }

    Ok(left)
}

/// Maps a token to the binary operator it spells, if any.
///
/// # Parameters
/// - `token`: The token to inspect.
///
/// # Returns
/// `Some(BinaryOperator)` for operator tokens, otherwise `None`.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ast::LiteralValue, error::Diagnostics, interpreter::lexer::tokenize};

    fn parse(source: &str) -> Expr {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        let body = &tokens[..tokens.len() - 1];
        let mut iter = body.iter().peekable();
        let expr = parse_equality(&mut iter).unwrap();
        assert!(iter.next().is_none());
        expr
    }

    fn int(value: i64) -> Box<Expr> {
        Box::new(Expr::Literal { value: LiteralValue::Int(value),
                                 line:  1, })
    }

    #[test]
    fn tiers_are_right_associative() {
        let expected = Expr::BinaryOp { left:  int(10),
                                        op:    BinaryOperator::Sub,
                                        right: Box::new(Expr::BinaryOp { left:  int(2),
                                                                         op:    BinaryOperator::Sub,
                                                                         right: int(3),
                                                                         line:  1, }),
                                        line:  1, };
        assert_eq!(parse("10 - 2 - 3"), expected);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expected = Expr::BinaryOp { left:  Box::new(Expr::BinaryOp { left:  int(1),
                                                                         op:    BinaryOperator::Mul,
                                                                         right: int(2),
                                                                         line:  1, }),
                                        op:    BinaryOperator::Add,
                                        right: int(3),
                                        line:  1, };
        assert_eq!(parse("1 * 2 + 3"), expected);
    }

    #[test]
    fn comparison_binds_tighter_than_and() {
        let Expr::BinaryOp { op, left, .. } = parse("1 < 2 and 3 > 2") else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinaryOperator::And);
        assert!(matches!(*left, Expr::BinaryOp { op: BinaryOperator::Less, .. }));
    }
}
