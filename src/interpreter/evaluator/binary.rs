use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

/// Wraps a comparison result as a script boolean: `1` or `0`.
const fn bool_value(value: bool) -> Value {
    Value::Integer(value as i64)
}

/// Applies a relational operator to two ordered operands.
fn relation<T: PartialOrd>(op: BinaryOperator, left: &T, right: &T) -> bool {
    match op {
        BinaryOperator::Less => left < right,
        BinaryOperator::Greater => left > right,
        BinaryOperator::LessEqual => left <= right,
        BinaryOperator::GreaterEqual => left >= right,
        _ => unreachable!("relation used with non relational operator"),
    }
}

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// Addition covers both numbers and string/char concatenation;
    /// `-`, `*` and `/` are numeric only. Equality is type-strict and
    /// structural, so operands of different kinds are simply unequal.
    /// Relational operators order numbers (with integer-to-double
    /// promotion), strings and chars.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result. Comparison
    /// results are the integers `1` and `0`.
    ///
    /// # Errors
    /// Returns a `RuntimeError` for operand kinds the operator does not
    /// accept, and for division by zero.
    ///
    /// # Example
    /// ```
    /// use skit::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Value},
    /// };
    ///
    /// let left = Value::Integer(3);
    /// let right = Value::Integer(4);
    /// let line = 1;
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, &left, &right, line);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul,
                             NotEqual, Sub};

        match op {
            Add => Self::eval_add(left, right, line),
            Sub | Mul | Div => Self::eval_arithmetic(op, left, right, line),

            Equal => Ok(bool_value(left == right)),
            NotEqual => Ok(bool_value(left != right)),

            Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_relational(op, left, right, line)
            },
        }
    }

    /// Evaluates `+`: numeric addition or string/char concatenation.
    fn eval_add(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        use Value::{Char, Double, Integer, Str};

        match (left, right) {
            (Integer(a), Integer(b)) => Ok(Integer(a + b)),
            (Double(_) | Integer(_), Double(_) | Integer(_)) => {
                Ok(Double(left.as_double("addition", line)?
                          + right.as_double("addition", line)?))
            },

            (Str(a), Str(b)) => Ok(Str(format!("{a}{b}"))),
            (Str(a), Char(b)) => Ok(Str(format!("{a}{b}"))),
            (Char(a), Str(b)) => Ok(Str(format!("{a}{b}"))),

            _ => {
                Err(RuntimeError::TypeError { details: format!("Cannot use + on {} and {}",
                                                               left.kind(),
                                                               right.kind()),
                                              line })
            },
        }
    }

    /// Evaluates `-`, `*` and `/` on numeric operands.
    ///
    /// Two integers stay integral, with truncating division; any double
    /// promotes the whole operation to doubles. Division by zero is checked
    /// in both domains.
    fn eval_arithmetic(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{Div, Mul, Sub};
        use Value::{Double, Integer};

        match (left, right) {
            (Integer(a), Integer(b)) => Ok(Integer(match op {
                                               Sub => a - b,
                                               Mul => a * b,
                                               Div => {
                                                   if *b == 0 {
                                                       return Err(RuntimeError::DivisionByZero { line });
                                                   }
                                                   a / b
                                               },
                                               _ => unreachable!(),
                                           })),

            (Double(_) | Integer(_), Double(_) | Integer(_)) => {
                let a = left.as_double("arithmetic", line)?;
                let b = right.as_double("arithmetic", line)?;

                Ok(Double(match op {
                              Sub => a - b,
                              Mul => a * b,
                              Div => {
                                  if b == 0.0 {
                                      return Err(RuntimeError::DivisionByZero { line });
                                  }
                                  a / b
                              },
                              _ => unreachable!(),
                          }))
            },

            _ => {
                Err(RuntimeError::TypeError { details: format!("Cannot use {op} on {} and {}",
                                                               left.kind(),
                                                               right.kind()),
                                              line })
            },
        }
    }

    /// Evaluates `<`, `>`, `<=` and `>=`.
    ///
    /// Numbers compare with promotion; strings and chars compare
    /// lexicographically within their own kind. Anything else is a type
    /// error.
    fn eval_relational(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use Value::{Char, Double, Integer, Str};

        match (left, right) {
            (Integer(a), Integer(b)) => Ok(bool_value(relation(op, a, b))),
            (Double(_) | Integer(_), Double(_) | Integer(_)) => {
                let a = left.as_double("comparison", line)?;
                let b = right.as_double("comparison", line)?;
                Ok(bool_value(relation(op, &a, &b)))
            },

            (Str(a), Str(b)) => Ok(bool_value(relation(op, a, b))),
            (Char(a), Char(b)) => Ok(bool_value(relation(op, a, b))),

            _ => {
                Err(RuntimeError::TypeError { details: format!("Cannot use {op} on {} and {}",
                                                               left.kind(),
                                                               right.kind()),
                                              line })
            },
        }
    }
}
