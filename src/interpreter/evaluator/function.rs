use std::{mem, rc::Rc};

use crate::{
    ast::CommandSequence,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::Value,
    },
};

/// A function implemented in Rust.
///
/// Receives the context, the already-evaluated arguments and the call-site
/// line for error reporting. Natives check their own arity.
pub type NativeFunction = fn(&mut Context, &[Value], usize) -> EvalResult<Value>;

/// A callable registered in the context's function table.
///
/// Native and user-defined functions share one table and one call syntax,
/// so a script can shadow a native by declaring a function with the same
/// name.
#[derive(Clone)]
pub enum Function {
    /// Implemented in Rust; see [`NativeFunction`].
    Native(NativeFunction),
    /// Declared in the script. Parameters and body are shared with the
    /// declaration node, so every call walks the same tree.
    User {
        /// The parameter names, bound in order.
        parameters: Rc<Vec<String>>,
        /// The statements making up the body.
        body:       Rc<CommandSequence>,
    },
}

impl Context {
    /// Registers a native function under `name`, replacing any previous
    /// registration.
    pub fn register_native(&mut self, name: &str, function: NativeFunction) {
        self.functions
            .insert(name.to_string(), Function::Native(function));
    }

    /// Calls a function with already-evaluated arguments.
    ///
    /// User functions run with a fresh variable scope containing only their
    /// bound parameters; the caller's variables are swapped out for the
    /// duration of the call and restored afterwards, error or not. Arrays
    /// and functions are global and stay untouched. A `Return` flow from
    /// the body supplies the result; a body that falls off the end, or a
    /// stray `break`/`continue` escaping it, yields `Void`.
    ///
    /// # Parameters
    /// - `name`: The function name to look up.
    /// - `args`: The evaluated arguments, in order.
    /// - `line`: Line number of the call site.
    ///
    /// # Returns
    /// The function's result value.
    ///
    /// # Errors
    /// Returns a `RuntimeError` if:
    /// - no function is registered under `name`,
    /// - the argument count differs from the parameter count,
    /// - the body raises an error.
    pub fn call_function(&mut self,
                         name: &str,
                         args: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        let function = self.functions
                           .get(name)
                           .cloned()
                           .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                                          line })?;

        match function {
            Function::Native(native) => native(self, &args, line),

            Function::User { parameters, body } => {
                if args.len() != parameters.len() {
                    return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                                     expected: parameters.len(),
                                                                     found:    args.len(),
                                                                     line });
                }

                let saved = mem::take(&mut self.variables);
                for (parameter, argument) in parameters.iter().zip(args) {
                    self.variables.insert(parameter.clone(), argument);
                }

                let flow = self.exec(&body);
                self.variables = saved;

                match flow? {
                    Flow::Return(value) => Ok(value),
                    _ => Ok(Value::Void),
                }
            },
        }
    }
}
