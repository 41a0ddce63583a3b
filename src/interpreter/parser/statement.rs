use std::iter::Peekable;

use crate::{
    ast::{Branch, Expr, Iterable, Param, Params, Statement},
    error::SyntaxError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{
                eat, end_of_line, expect, parse_comma_separated, parse_identifier,
                parse_optional_type, parse_type, type_pending, unexpected,
            },
        },
    },
};

/// Parses a single statement from one line's tokens.
///
/// The statement kind is chosen by looking at the leading token:
/// - `func`, `lambda`, `return`, `while`, `foreach`, `if` and `else` start
///   their own forms.
/// - a type keyword starts a typed declaration, `int x = 1`.
/// - anything else is parsed as an expression. If `=` follows, the
///   expression is the target of an assignment; otherwise it must be a call.
///
/// # Parameters
/// - `tokens`: Token iterator over one line, indentation already removed.
///
/// # Returns
/// A parsed [`Statement`] node. Block-opening statements come back with
/// empty bodies for the block assembler to fill in.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek().copied() else {
        return Err(end_of_line("a statement"));
    };
    let line = *line;

    match token {
        Token::Func => parse_function_definition(tokens),
        Token::Lambda => parse_lambda(tokens),
        Token::Return => parse_return(tokens),
        Token::While => parse_while(tokens),
        Token::Foreach => parse_foreach(tokens),
        Token::If => {
            tokens.next();
            Ok(Statement::If(parse_branch(tokens, line)?))
        },
        Token::Else => parse_else(tokens),
        _ if type_pending(tokens) => parse_typed_assignment(tokens),
        _ => parse_assignment_or_call(tokens, line),
    }
}

/// Parses `T name = expr`.
fn parse_typed_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let ty = parse_type(tokens)?;
    let line = tokens.peek().map_or(0, |(_, line)| *line);
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::Equals, "'='")?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Assign { declared: Some(ty),
                           name,
                           value,
                           line })
}

/// Parses `target = expr`, `target[index] = expr` or a bare call.
///
/// The left side is parsed as an ordinary expression first; only then is it
/// checked to be something assignable. This lets `grid[i][j] = 0` and
/// `f(x)(y)` share one code path with plain names.
fn parse_assignment_or_call<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let target = parse_expression(tokens)?;

    if !eat(tokens, &Token::Equals) {
        return match target {
            Expr::Call { .. } => Ok(Statement::Call { call: target,
                                                      line }),
            _ => Err(SyntaxError::ExpressionStatement { line }),
        };
    }

    let value = parse_expression(tokens)?;
    match target {
        Expr::Identifier { name, .. } => Ok(Statement::Assign { declared: None,
                                                                name,
                                                                value,
                                                                line }),
        Expr::Index { array, index, .. } => Ok(Statement::IndexAssign { array: *array,
                                                                        index: *index,
                                                                        value,
                                                                        line }),
        _ => Err(SyntaxError::InvalidAssignmentTarget { line }),
    }
}

/// Parses a function definition header.
///
/// Syntax:
/// ```text
///     func [type] name(params)
/// ```
/// The body is supplied by the indented lines that follow.
///
/// # Errors
/// Returns a `SyntaxError` if the name or parameter list is malformed.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Func, "'func'")?;
    let return_type = parse_optional_type(tokens)?;
    let name = parse_identifier(tokens)?;
    let params = parse_params(tokens)?;

    Ok(Statement::FunctionDef { name,
                                return_type,
                                params,
                                body: Vec::new().into(),
                                line })
}

/// Parses a lambda definition.
///
/// Syntax:
/// ```text
///     lambda name = (params) => expression
/// ```
fn parse_lambda<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Lambda, "'lambda'")?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::Equals, "'='")?;
    let params = parse_params(tokens)?;
    expect(tokens, &Token::Arrow, "'=>'")?;
    let body = parse_expression(tokens)?;

    Ok(Statement::Lambda { name,
                           params,
                           body,
                           line })
}

/// Parses a parenthesized parameter list.
///
/// Each parameter is `[type] name`; the last may instead be `*name`, which
/// collects the remaining arguments.
///
/// Grammar: `params := "(" (param ("," param)*)? ")"`
///
/// # Errors
/// Returns a `SyntaxError` if the list is malformed or a variadic parameter
/// is not last.
fn parse_params<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Params>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    enum Item {
        Positional(Param),
        Variadic(String),
    }

    let parse_item = |tokens: &mut Peekable<I>| -> ParseResult<(Item, usize)> {
        let line = tokens.peek().map_or(0, |(_, line)| *line);
        if eat(tokens, &Token::Star) {
            return Ok((Item::Variadic(parse_identifier(tokens)?), line));
        }
        let ty = parse_optional_type(tokens)?;
        let name = parse_identifier(tokens)?;
        Ok((Item::Positional(Param { ty, name }), line))
    };

    expect(tokens, &Token::LParen, "'('")?;
    let items = parse_comma_separated(tokens, parse_item, &Token::RParen)?;

    let mut params = Params::default();
    for (item, line) in items {
        if let Some(name) = params.variadic.take() {
            return Err(SyntaxError::VariadicNotLast { name, line });
        }
        match item {
            Item::Positional(param) => params.positional.push(param),
            Item::Variadic(name) => params.variadic = Some(name),
        }
    }
    Ok(params)
}

/// Parses `return` with an optional value.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Return, "'return'")?;
    let value = if tokens.peek().is_some() { Some(parse_expression(tokens)?) } else { None };

    Ok(Statement::Return { value, line })
}

/// Parses a `while` header.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::While, "'while'")?;
    let condition = parse_expression(tokens)?;

    Ok(Statement::While { condition,
                          body: Vec::new(),
                          line })
}

/// Parses a `foreach` header.
///
/// Syntax:
/// ```text
///     foreach [type] name in expression
///     foreach [type] name in expression .. expression
/// ```
fn parse_foreach<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Foreach, "'foreach'")?;
    let ty = parse_optional_type(tokens)?;
    let variable = parse_identifier(tokens)?;
    expect(tokens, &Token::In, "'in'")?;

    let start = parse_expression(tokens)?;
    let iterable = if eat(tokens, &Token::DotDot) {
        Iterable::Range { start,
                          end: parse_expression(tokens)? }
    } else {
        Iterable::Expr(start)
    };

    Ok(Statement::ForEach { ty,
                            variable,
                            iterable,
                            body: Vec::new(),
                            line })
}

/// Parses the guard of an `if` or `else if`, after its keywords.
fn parse_branch<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Branch>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_expression(tokens)?;

    Ok(Branch { condition,
                body: Vec::new(),
                line })
}

/// Parses `else` or `else if expr`.
fn parse_else<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Else, "'else'")?;
    if eat(tokens, &Token::If) {
        return Ok(Statement::ElseIf(parse_branch(tokens, line)?));
    }

    Ok(Statement::Else { body: Vec::new(),
                         line })
}

/// Ensures nothing but an optional block colon is left on the line.
///
/// # Errors
/// Returns `UnexpectedTrailingTokens` naming the first extra token.
pub(in crate::interpreter::parser) fn finish_line<'a, I>(tokens: &mut Peekable<I>,
                                                         statement: &Statement)
                                                         -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if statement.opens_block() {
        eat(tokens, &Token::Colon);
    }
    match tokens.next() {
        None => Ok(()),
        Some((Token::Colon, line)) => Err(unexpected("end of line", &Token::Colon, *line)),
        Some((tok, line)) => Err(SyntaxError::UnexpectedTrailingTokens { token: tok.to_string(),
                                                                         line:  *line, }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ast::TypeName, error::Diagnostics, interpreter::lexer::tokenize};

    fn parse(source: &str) -> ParseResult<Statement> {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        let body = &tokens[..tokens.len() - 1];
        let mut iter = body.iter().peekable();
        let statement = parse_statement(&mut iter)?;
        finish_line(&mut iter, &statement)?;
        Ok(statement)
    }

    #[test]
    fn typed_and_untyped_assignment() {
        let Statement::Assign { declared, name, .. } = parse("float x = 1").unwrap() else {
            panic!("expected an assignment");
        };
        assert_eq!(declared, Some(TypeName::Float));
        assert_eq!(name, "x");

        let Statement::Assign { declared, .. } = parse("x = 1").unwrap() else {
            panic!("expected an assignment");
        };
        assert_eq!(declared, None);
    }

    #[test]
    fn typed_array_declaration() {
        let Statement::Assign { declared, .. } = parse("int[] xs = [1, 2]").unwrap() else {
            panic!("expected an assignment");
        };
        assert_eq!(declared, Some(TypeName::Array(Box::new(TypeName::Int))));
    }

    #[test]
    fn index_assignment_targets_nest() {
        assert!(matches!(parse("grid[0][1] = 5").unwrap(),
                         Statement::IndexAssign { array: Expr::Index { .. }, .. }));
    }

    #[test]
    fn function_header_with_variadic_tail() {
        let Statement::FunctionDef { name,
                                     return_type,
                                     params,
                                     .. } = parse("func int add(int a, *rest):").unwrap()
        else {
            panic!("expected a function definition");
        };
        assert_eq!(name, "add");
        assert_eq!(return_type, TypeName::Int);
        assert_eq!(params.positional,
                   vec![Param { ty:   TypeName::Int,
                                name: "a".into(), }]);
        assert_eq!(params.variadic.as_deref(), Some("rest"));
    }

    #[test]
    fn variadic_must_be_last() {
        assert!(matches!(parse("func f(*rest, x)"),
                         Err(SyntaxError::VariadicNotLast { .. })));
    }

    #[test]
    fn lambda_header() {
        let Statement::Lambda { name, params, .. } = parse("lambda sq = (x) => x * x").unwrap()
        else {
            panic!("expected a lambda");
        };
        assert_eq!(name, "sq");
        assert_eq!(params.positional.len(), 1);
    }

    #[test]
    fn foreach_over_a_range() {
        let Statement::ForEach { iterable, .. } = parse("foreach i in 0..3").unwrap() else {
            panic!("expected a foreach");
        };
        assert!(matches!(iterable, Iterable::Range { .. }));
    }

    #[test]
    fn else_if_and_else() {
        assert!(matches!(parse("else if x > 1:").unwrap(), Statement::ElseIf(_)));
        assert!(matches!(parse("else").unwrap(), Statement::Else { .. }));
    }

    #[test]
    fn bare_return() {
        assert!(matches!(parse("return").unwrap(), Statement::Return { value: None, .. }));
    }

    #[test]
    fn only_calls_stand_alone() {
        assert!(matches!(parse("print(1)").unwrap(), Statement::Call { .. }));
        assert!(matches!(parse("1 + 2"), Err(SyntaxError::ExpressionStatement { line: 1 })));
        assert!(matches!(parse("f(x) = 2"),
                         Err(SyntaxError::InvalidAssignmentTarget { line: 1 })));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert!(matches!(parse("x = 1 2"),
                         Err(SyntaxError::UnexpectedTrailingTokens { .. })));
        assert!(matches!(parse("x = 1:"), Err(SyntaxError::UnexpectedToken { .. })));
    }
}
