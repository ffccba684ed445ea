use crate::{
    ast::Expr,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::Value,
    },
};

impl Context {
    /// Runs a `while` loop.
    ///
    /// The condition is checked before every iteration. A `Break` flow from
    /// the body ends the loop, a `Continue` starts the next iteration and a
    /// `Return` propagates to the enclosing call.
    pub(in crate::interpreter::evaluator) fn eval_while(&mut self,
                                                        condition: &Expr,
                                                        body: &[Expr],
                                                        line: usize)
                                                        -> EvalResult<Flow> {
        while self.eval_condition(condition, line)? {
            match self.exec(body)? {
                Flow::Normal(_) | Flow::Continue => {},
                Flow::Break => break,
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }

        Ok(Flow::Normal(Value::Void))
    }

    /// Runs a `for` loop.
    ///
    /// A missing condition loops until a `break` or `return`. The increment
    /// clause runs after every iteration, including ones the body cut short
    /// with `continue`, so counted loops stay finite.
    pub(in crate::interpreter::evaluator) fn eval_for(&mut self,
                                                      initialization: Option<&Expr>,
                                                      condition: Option<&Expr>,
                                                      increment: Option<&Expr>,
                                                      body: &[Expr],
                                                      line: usize)
                                                      -> EvalResult<Flow> {
        if let Some(initialization) = initialization {
            self.eval_value(initialization)?;
        }

        loop {
            if let Some(condition) = condition {
                if !self.eval_condition(condition, line)? {
                    break;
                }
            }

            match self.exec(body)? {
                Flow::Normal(_) | Flow::Continue => {},
                Flow::Break => break,
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }

            if let Some(increment) = increment {
                self.eval_value(increment)?;
            }
        }

        Ok(Flow::Normal(Value::Void))
    }

    /// Runs a `foreach` loop over an array.
    ///
    /// Elements are visited by position and the length is re-checked every
    /// pass, so a body that pushes or pops sees the array's current state
    /// instead of a stale snapshot. The loop variable is an ordinary
    /// context variable and survives the loop.
    pub(in crate::interpreter::evaluator) fn eval_foreach(&mut self,
                                                          variable: &str,
                                                          collection: &Expr,
                                                          body: &[Expr],
                                                          line: usize)
                                                          -> EvalResult<Flow> {
        let handle = self.eval_value(collection)?;
        let array = self.lookup_array(&handle, line)?;

        let mut position = 0;
        loop {
            let element = {
                let array = array.borrow();
                if position >= array.elements.len() {
                    break;
                }
                array.elements[position].clone()
            };
            self.variables.insert(variable.to_string(), element);

            match self.exec(body)? {
                Flow::Normal(_) | Flow::Continue => {},
                Flow::Break => break,
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }

            position += 1;
        }

        Ok(Flow::Normal(Value::Void))
    }
}
