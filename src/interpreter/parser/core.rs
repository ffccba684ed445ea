use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::utils::{expect_token, parse_comma_separated},
        value::Value,
    },
};

/// The result type shared by all parsing functions.
pub type ParseResult<T> = Result<T, ParseError>;

/// Returns the binding power of an infix token, or `None` for tokens that
/// are not infix operators.
///
/// Higher powers bind tighter: comparisons sit below addition, addition
/// below multiplication, and indexing binds tightest of all so chained
/// index expressions fold before any arithmetic.
const fn binding_power(token: &Token) -> Option<u8> {
    match token {
        Token::EqualEqual
        | Token::BangEqual
        | Token::Less
        | Token::Greater
        | Token::LessEqual
        | Token::GreaterEqual => Some(0),
        Token::Plus | Token::Minus => Some(1),
        Token::Star | Token::Slash => Some(2),
        Token::LBracket => Some(10),
        _ => None,
    }
}

/// Maps an infix token to its `BinaryOperator`, or `None` for tokens that
/// are not binary operators.
const fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

/// Parses an expression by precedence climbing.
///
/// A primary expression is parsed first, followed by at most one index
/// suffix (so results of calls can be indexed directly) and an optional
/// postfix `++`/`--`. The operator loop then folds infix operators whose
/// binding power is at least `min_power`, recursing at the consumed
/// operator's power. The loop stops at `]`, `)`, `}`, `;`, `,` or the end
/// of input.
///
/// An `=` in operator position turns the expression parsed so far into an
/// assignment: a variable becomes a variable assignment and an index
/// expression becomes an array element assignment. Anything else on the
/// left side of `=` is rejected.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first token of the
///   expression.
/// - `min_power`: The minimum binding power an operator must have to be
///   consumed by this call.
///
/// # Returns
/// The parsed expression tree.
///
/// # Errors
/// Returns a `ParseError` if:
/// - no valid primary expression starts the input,
/// - a bracket or parenthesis is left unclosed,
/// - the left side of `=` is not assignable,
/// - a token that is neither an operator nor a terminator follows the
///   expression.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, min_power: u8) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lhs = parse_primary(tokens)?;

    if let Some((Token::LBracket, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let index = parse_expression(tokens, 0)?;
        expect_token(tokens, &Token::RBracket, "']'")?;
        lhs = Expr::ArrayIndex { array: Box::new(lhs),
                                 index: Box::new(index),
                                 line };
    }

    lhs = parse_postfix(tokens, lhs)?;

    loop {
        let (token, line) = match tokens.peek() {
            Some((token, line)) => (token, *line),
            None => break,
        };

        match token {
            Token::RBracket
            | Token::RParen
            | Token::RBrace
            | Token::Semicolon
            | Token::Comma => break,

            Token::Equals => {
                tokens.next();
                let value = parse_expression(tokens, 0)?;
                lhs = into_assignment(lhs, value, line)?;
                break;
            },

            Token::LBracket => {
                tokens.next();
                let index = parse_expression(tokens, 0)?;
                expect_token(tokens, &Token::RBracket, "']'")?;
                lhs = Expr::ArrayIndex { array: Box::new(lhs),
                                         index: Box::new(index),
                                         line };
            },

            _ => {
                let Some(power) = binding_power(token) else {
                    return Err(ParseError::UnexpectedToken { token: format!("{token:?}"),
                                                             line });
                };
                if power < min_power {
                    break;
                }
                // binding_power and binary_operator cover the same infix set
                let Some(op) = binary_operator(token) else {
                    return Err(ParseError::UnexpectedToken { token: format!("{token:?}"),
                                                             line });
                };
                tokens.next();
                let rhs = parse_expression(tokens, power)?;
                lhs = Expr::Binary { op,
                                     left: Box::new(lhs),
                                     right: Box::new(rhs),
                                     line };
            },
        }
    }

    Ok(lhs)
}

/// Reinterprets the left side of an `=` as an assignment target.
fn into_assignment(target: Expr, value: Expr, line: usize) -> ParseResult<Expr> {
    match target {
        Expr::Variable { name, .. } => {
            Ok(Expr::Assignment { name,
                                  value: Box::new(value),
                                  line })
        },
        Expr::ArrayIndex { array, index, .. } => {
            Ok(Expr::ArrayAssignment { array,
                                       index,
                                       value: Box::new(value),
                                       line })
        },
        _ => Err(ParseError::InvalidAssignmentTarget { line }),
    }
}

/// Wraps the expression in a postfix increment or decrement node when one
/// follows. The operand check happens at evaluation time.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, operand: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::PlusPlus, line)) => {
            let line = *line;
            tokens.next();
            Ok(Expr::PostfixIncrement { operand: Box::new(operand),
                                        line })
        },
        Some((Token::MinusMinus, line)) => {
            let line = *line;
            tokens.next();
            Ok(Expr::PostfixDecrement { operand: Box::new(operand),
                                        line })
        },
        _ => Ok(operand),
    }
}

/// Parses a primary expression: a literal, a parenthesised expression, an
/// array literal, or an identifier used as a call, an indexed element or a
/// plain variable.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token cannot start an expression,
/// - the input ends unexpectedly.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Integer(value), line)) => {
            Ok(Expr::Constant { value: Value::Integer(*value),
                                line:  *line, })
        },
        Some((Token::Float(value), line)) => {
            Ok(Expr::Constant { value: Value::Double(*value),
                                line:  *line, })
        },
        Some((Token::Str(value), line)) => {
            Ok(Expr::Constant { value: Value::Str(value.clone()),
                                line:  *line, })
        },
        Some((Token::Char(value), line)) => {
            Ok(Expr::Constant { value: Value::Char(*value),
                                line:  *line, })
        },

        Some((Token::LParen, _)) => {
            let expr = parse_expression(tokens, 0)?;
            expect_token(tokens, &Token::RParen, "')'")?;
            Ok(expr)
        },

        Some((Token::LBracket, line)) => {
            let elements =
                parse_comma_separated(tokens, |t| parse_expression(t, 0), &Token::RBracket)?;
            Ok(Expr::ArrayCreation { elements,
                                     line: *line })
        },

        Some((Token::Identifier(name), line)) => match tokens.peek() {
            Some((Token::LParen, _)) => {
                tokens.next();
                let arguments = parse_argument_list(tokens, *line)?;
                Ok(Expr::FunctionCall { name: name.clone(),
                                        arguments,
                                        line: *line })
            },
            Some((Token::LBracket, _)) => {
                tokens.next();
                let index = parse_expression(tokens, 0)?;
                expect_token(tokens, &Token::RBracket, "']'")?;
                Ok(Expr::ArrayIndex { array: Box::new(Expr::Variable { name: name.clone(),
                                                                       line: *line, }),
                                      index: Box::new(index),
                                      line:  *line, })
            },
            _ => {
                Ok(Expr::Variable { name: name.clone(),
                                    line: *line, })
            },
        },

        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a call argument list. The opening `(` has already been consumed.
///
/// An empty list is allowed, but a comma directly before the closing `)`
/// is rejected.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an argument fails to parse,
/// - a comma dangles before `)`,
/// - the list is never closed.
fn parse_argument_list<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut arguments = Vec::new();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(arguments);
    }

    loop {
        arguments.push(parse_expression(tokens, 0)?);
        match tokens.next() {
            Some((Token::Comma, line)) => {
                if let Some((Token::RParen, _)) = tokens.peek() {
                    return Err(ParseError::DanglingComma { line: *line });
                }
            },
            Some((Token::RParen, _)) => break,
            Some((tok, line)) => {
                return Err(ParseError::ExpectedToken { expected: "',' or ')'",
                                                       found:    format!("{tok:?}"),
                                                       line:     *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(arguments)
}
