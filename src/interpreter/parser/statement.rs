use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{CommandSequence, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{parse_expression, ParseResult},
            utils::{expect_token, parse_identifier},
        },
    },
};

/// Parses statements until a closing `}` or the end of input.
///
/// Semicolons between statements are skipped; they are optional
/// terminators, not separators. Keyword statements are dispatched to their
/// own parsers and anything else is parsed as an expression statement.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first statement.
///
/// # Returns
/// The parsed statements, in source order.
///
/// # Errors
/// Returns a `ParseError` if:
/// - any statement fails to parse,
/// - an `else` appears without a matching `if`.
pub fn parse_command_sequence<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<CommandSequence>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut commands = Vec::new();

    while let Some((token, line)) = tokens.peek() {
        let line = *line;
        match token {
            Token::RBrace => break,
            Token::Semicolon => {
                tokens.next();
            },
            Token::Fn => commands.push(parse_function_declaration(tokens)?),
            Token::If => commands.push(parse_if_statement(tokens)?),
            Token::While => commands.push(parse_while_statement(tokens)?),
            Token::For => commands.push(parse_for_statement(tokens)?),
            Token::Foreach => commands.push(parse_foreach_statement(tokens)?),
            Token::Return => commands.push(parse_return_statement(tokens)?),
            Token::Break => {
                tokens.next();
                commands.push(Expr::Break { line });
            },
            Token::Continue => {
                tokens.next();
                commands.push(Expr::Continue { line });
            },
            Token::Else => {
                return Err(ParseError::UnexpectedToken { token: "'else' without a matching 'if'".to_string(),
                                                         line });
            },
            _ => commands.push(parse_expression(tokens, 0)?),
        }
    }

    Ok(commands)
}

/// Parses a braced statement block: `{ ... }`.
///
/// # Errors
/// Returns a `ParseError` if either brace is missing or the body fails to
/// parse.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<CommandSequence>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect_token(tokens, &Token::LBrace, "'{'")?;
    let body = parse_command_sequence(tokens)?;
    expect_token(tokens, &Token::RBrace, "'}'")?;

    Ok(body)
}

/// Parses `if (cond) { ... }` with an optional `else { ... }`.
///
/// The condition must be parenthesised and both bodies must be braced;
/// there is no single-statement shorthand. `else if` chains are not
/// supported, the alternative is always a plain block.
fn parse_if_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::If, "'if'")?;
    expect_token(tokens, &Token::LParen, "'('")?;
    let condition = parse_expression(tokens, 0)?;
    expect_token(tokens, &Token::RParen, "')'")?;
    let if_body = parse_block(tokens)?;

    if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        let else_body = parse_block(tokens)?;

        Ok(Expr::IfElse { condition: Box::new(condition),
                          if_body,
                          else_body,
                          line })
    } else {
        Ok(Expr::If { condition: Box::new(condition),
                      body: if_body,
                      line })
    }
}

/// Parses `while (cond) { ... }`.
fn parse_while_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::While, "'while'")?;
    expect_token(tokens, &Token::LParen, "'('")?;
    let condition = parse_expression(tokens, 0)?;
    expect_token(tokens, &Token::RParen, "')'")?;
    let body = parse_block(tokens)?;

    Ok(Expr::While { condition: Box::new(condition),
                     body,
                     line })
}

/// Parses `for (init; cond; incr) { ... }`.
///
/// Each of the three clauses may be left empty; `for (;;)` loops until a
/// `break` or `return`.
fn parse_for_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::For, "'for'")?;
    expect_token(tokens, &Token::LParen, "'('")?;

    let initialization = if matches!(tokens.peek(), Some((Token::Semicolon, _))) {
        None
    } else {
        Some(Box::new(parse_expression(tokens, 0)?))
    };
    expect_token(tokens, &Token::Semicolon, "';'")?;

    let condition = if matches!(tokens.peek(), Some((Token::Semicolon, _))) {
        None
    } else {
        Some(Box::new(parse_expression(tokens, 0)?))
    };
    expect_token(tokens, &Token::Semicolon, "';'")?;

    let increment = if matches!(tokens.peek(), Some((Token::RParen, _))) {
        None
    } else {
        Some(Box::new(parse_expression(tokens, 0)?))
    };
    expect_token(tokens, &Token::RParen, "')'")?;

    let body = parse_block(tokens)?;

    Ok(Expr::For { initialization,
                   condition,
                   increment,
                   body,
                   line })
}

/// Parses `foreach (name in collection) { ... }`.
fn parse_foreach_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Foreach, "'foreach'")?;
    expect_token(tokens, &Token::LParen, "'('")?;
    let variable = parse_identifier(tokens)?;
    expect_token(tokens, &Token::In, "'in'")?;
    let collection = parse_expression(tokens, 0)?;
    expect_token(tokens, &Token::RParen, "')'")?;
    let body = parse_block(tokens)?;

    Ok(Expr::ForEach { variable,
                       collection: Box::new(collection),
                       body,
                       line })
}

/// Parses `fn name(a, b) { ... }`.
///
/// A trailing comma in the parameter list is tolerated.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Fn, "'fn'")?;
    let name = parse_identifier(tokens)?;
    expect_token(tokens, &Token::LParen, "'('")?;

    let mut parameters = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::RParen, _)) => {
                tokens.next();
                break;
            },
            Some(_) => {
                parameters.push(parse_identifier(tokens)?);
                if let Some((Token::Comma, _)) = tokens.peek() {
                    tokens.next();
                }
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    let body = parse_block(tokens)?;

    Ok(Expr::FunctionDeclaration { name,
                                   parameters: Rc::new(parameters),
                                   body: Rc::new(body),
                                   line })
}

/// Parses `return` with an optional value.
///
/// The value is omitted when the statement ends immediately: the next
/// token is `;`, `}` or the input is exhausted.
fn parse_return_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Return, "'return'")?;

    let value = match tokens.peek() {
        None | Some((Token::Semicolon | Token::RBrace, _)) => None,
        Some(_) => Some(Box::new(parse_expression(tokens, 0)?)),
    };

    Ok(Expr::Return { value, line })
}
