use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{array::Array, function::Function},
        value::Value,
    },
};

/// The result type shared by all evaluation functions.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// Control flow is threaded through evaluation results instead of flags on
/// the context: a sequence stops at the first non-normal flow and the
/// enclosing construct decides what happens next. Loops consume `Break` and
/// `Continue`, function calls consume `Return`, everything else passes the
/// flow upward unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// The statement ran to completion and produced a value.
    Normal(Value),
    /// A `return` is unwinding to the nearest function call.
    Return(Value),
    /// A `break` is unwinding to the nearest enclosing loop.
    Break,
    /// A `continue` is unwinding to the nearest enclosing loop.
    Continue,
}

/// Holds all state a running script can touch.
///
/// There is a single flat variable scope; function calls swap it out for
/// the duration of the call rather than nesting. Functions and arrays are
/// global and survive across calls.
#[derive(Default)]
pub struct Context {
    /// The current variable scope.
    pub variables: HashMap<String, Value>,
    /// All registered functions, native and user-defined alike.
    pub functions: HashMap<String, Function>,
    /// All live arrays, addressed by the name inside their handle.
    pub arrays:    HashMap<String, Rc<RefCell<Array>>>,
}

impl Context {
    /// Creates an empty context with no variables, functions or arrays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates a single expression or statement.
    ///
    /// This is the heart of the interpreter: one exhaustive match over
    /// every node kind. Value-producing nodes come back as `Flow::Normal`;
    /// `break`, `continue` and `return` come back as their own flows and
    /// are consumed by the enclosing loop or call.
    ///
    /// # Parameters
    /// - `expr`: The node to evaluate.
    ///
    /// # Returns
    /// An `EvalResult<Flow>` describing how the node finished.
    ///
    /// # Errors
    /// Returns a `RuntimeError` for unknown names, type mismatches, bad
    /// indices, arity mismatches and division by zero.
    ///
    /// # Example
    /// ```
    /// use skit::{
    ///     ast::Expr,
    ///     interpreter::{
    ///         evaluator::core::{Context, Flow},
    ///         value::Value,
    ///     },
    /// };
    ///
    /// let mut context = Context::new();
    /// let expr = Expr::Constant { value: Value::Integer(42),
    ///                             line:  1, };
    ///
    /// assert_eq!(context.eval(&expr).unwrap(), Flow::Normal(Value::Integer(42)));
    /// ```
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Flow> {
        match expr {
            Expr::Constant { value, .. } => Ok(Flow::Normal(value.clone())),

            Expr::Variable { name, line } => {
                self.variables
                    .get(name)
                    .cloned()
                    .map(Flow::Normal)
                    .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                   line: *line, })
            },

            Expr::Assignment { name, value, .. } => {
                let value = self.eval_value(value)?;
                self.variables.insert(name.clone(), value.clone());
                Ok(Flow::Normal(value))
            },

            Expr::Binary { op,
                           left,
                           right,
                           line, } => {
                let left = self.eval_value(left)?;
                let right = self.eval_value(right)?;
                Self::eval_binary(*op, &left, &right, *line).map(Flow::Normal)
            },

            Expr::FunctionCall { name, arguments, line } => {
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.eval_value(argument)?);
                }
                self.call_function(name, args, *line).map(Flow::Normal)
            },

            Expr::FunctionDeclaration { name,
                                        parameters,
                                        body,
                                        .. } => {
                // redeclaration silently replaces the previous function
                self.functions.insert(name.clone(),
                                      Function::User { parameters: Rc::clone(parameters),
                                                       body:       Rc::clone(body), });
                Ok(Flow::Normal(Value::Void))
            },

            Expr::If { condition, body, line } => {
                if self.eval_condition(condition, *line)? {
                    self.exec(body)
                } else {
                    Ok(Flow::Normal(Value::Void))
                }
            },

            Expr::IfElse { condition,
                           if_body,
                           else_body,
                           line, } => {
                if self.eval_condition(condition, *line)? {
                    self.exec(if_body)
                } else {
                    self.exec(else_body)
                }
            },

            Expr::While { condition, body, line } => self.eval_while(condition, body, *line),

            Expr::For { initialization,
                        condition,
                        increment,
                        body,
                        line, } => {
                self.eval_for(initialization.as_deref(),
                              condition.as_deref(),
                              increment.as_deref(),
                              body,
                              *line)
            },

            Expr::ForEach { variable,
                            collection,
                            body,
                            line, } => self.eval_foreach(variable, collection, body, *line),

            Expr::ArrayCreation { elements, .. } => {
                self.eval_array_creation(elements).map(Flow::Normal)
            },

            Expr::ArrayIndex { array, index, line } => {
                self.eval_array_index(array, index, *line).map(Flow::Normal)
            },

            Expr::ArrayAssignment { array,
                                    index,
                                    value,
                                    line, } => {
                self.eval_array_assignment(array, index, value, *line)
                    .map(Flow::Normal)
            },

            Expr::PostfixIncrement { operand, line } => {
                self.eval_postfix(operand, 1, *line).map(Flow::Normal)
            },

            Expr::PostfixDecrement { operand, line } => {
                self.eval_postfix(operand, -1, *line).map(Flow::Normal)
            },

            Expr::Break { .. } => Ok(Flow::Break),

            Expr::Continue { .. } => Ok(Flow::Continue),

            Expr::Return { value, .. } => {
                let result = match value {
                    Some(expr) => self.eval_value(expr)?,
                    None => Value::Void,
                };
                Ok(Flow::Return(result))
            },
        }
    }

    /// Evaluates an expression in value position.
    ///
    /// The parser only places value-producing nodes here, so a non-normal
    /// flow cannot actually occur; it degrades to `Void` rather than being
    /// an error.
    ///
    /// # Errors
    /// Propagates any `RuntimeError` from evaluation.
    pub fn eval_value(&mut self, expr: &Expr) -> EvalResult<Value> {
        Ok(match self.eval(expr)? {
               Flow::Normal(value) => value,
               _ => Value::Void,
           })
    }

    /// Evaluates a loop or conditional condition down to a boolean.
    ///
    /// Integers are truthy when non-zero and doubles truncate first;
    /// strings, chars and void are type errors.
    ///
    /// # Errors
    /// Propagates any `RuntimeError` from evaluation or coercion.
    pub fn eval_condition(&mut self, condition: &Expr, line: usize) -> EvalResult<bool> {
        Ok(self.eval_value(condition)?.as_int("condition", line)? != 0)
    }

    /// Runs a statement sequence in order.
    ///
    /// Execution stops at the first non-normal flow, which is handed to the
    /// caller: the enclosing loop for `Break`/`Continue`, the enclosing
    /// call for `Return`. A sequence that runs to the end yields
    /// `Flow::Normal(Void)`.
    ///
    /// # Errors
    /// Propagates the first `RuntimeError` raised by a statement.
    pub fn exec(&mut self, commands: &[Expr]) -> EvalResult<Flow> {
        for command in commands {
            match self.eval(command)? {
                Flow::Normal(_) => {},
                flow => return Ok(flow),
            }
        }

        Ok(Flow::Normal(Value::Void))
    }

    /// Applies a postfix `++` or `--` and yields the value before the
    /// update.
    ///
    /// The operand must syntactically be a variable or an array element,
    /// and its current value must be an integer. Array operands re-resolve
    /// their handle and index for the write-back.
    fn eval_postfix(&mut self, operand: &Expr, delta: i64, line: usize) -> EvalResult<Value> {
        let current = self.eval_value(operand)?;
        let Value::Integer(value) = current else {
            return Err(RuntimeError::TypeError { details: format!("Postfix operators require an integer, got {}",
                                                                  current.kind()),
                                                 line });
        };

        let updated = Value::Integer(value + delta);
        match operand {
            Expr::Variable { name, .. } => {
                self.variables.insert(name.clone(), updated);
            },
            Expr::ArrayIndex { array, index, .. } => {
                let handle = self.eval_value(array)?;
                let index = self.eval_value(index)?;
                self.store_element(&handle, &index, updated, line)?;
            },
            _ => {
                return Err(RuntimeError::TypeError { details: "Postfix operators require a variable or array element".to_string(),
                                                     line });
            },
        }

        Ok(Value::Integer(value))
    }
}
