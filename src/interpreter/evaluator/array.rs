use std::{
    cell::RefCell,
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

/// Counter behind fresh array names; process-wide so handles never collide,
/// even across contexts.
static NEXT_ARRAY_ID: AtomicUsize = AtomicUsize::new(0);

/// A mutable array stored in the context's array table.
///
/// Arrays are not first-class values. Scripts hold string handles naming a
/// table entry, and the same `Rc` is shared by everything that resolved the
/// handle, so mutations are visible through every copy of it.
#[derive(Debug)]
pub struct Array {
    /// The name this array is registered under.
    pub name:     String,
    /// The elements, in order. Elements of mixed kinds are allowed.
    pub elements: Vec<Value>,
}

impl Context {
    /// Registers a new array holding `elements` under a fresh name and
    /// returns the handle value for it.
    pub fn create_array(&mut self, elements: Vec<Value>) -> Value {
        let name = format!("__array_{}", NEXT_ARRAY_ID.fetch_add(1, Ordering::Relaxed));
        self.arrays.insert(name.clone(),
                           Rc::new(RefCell::new(Array { name: name.clone(),
                                                        elements })));

        Value::Str(name)
    }

    /// Resolves an array handle to the array it names.
    ///
    /// # Parameters
    /// - `handle`: The handle value; must be a string.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// A shared reference to the live array.
    ///
    /// # Errors
    /// Returns a `RuntimeError` if:
    /// - the handle is not a string,
    /// - no array is registered under the name.
    pub fn lookup_array(&self, handle: &Value, line: usize) -> EvalResult<Rc<RefCell<Array>>> {
        let Value::Str(name) = handle else {
            return Err(RuntimeError::TypeError { details: format!("Expected an array handle, got {}",
                                                                  handle.kind()),
                                                 line });
        };

        self.arrays
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownArray { name: name.clone(),
                                                        line })
    }

    /// Overwrites an existing element through a handle and index value.
    ///
    /// # Errors
    /// Returns a `RuntimeError` if the handle does not resolve or the index
    /// is not an integer within bounds.
    pub fn store_element(&mut self,
                         handle: &Value,
                         index: &Value,
                         value: Value,
                         line: usize)
                         -> EvalResult<()> {
        let array = self.lookup_array(handle, line)?;
        let mut array = array.borrow_mut();
        let position = element_position(index, array.elements.len(), line)?;
        array.elements[position] = value;

        Ok(())
    }

    /// Evaluates an array literal: elements left to right, then a fresh
    /// registration. Yields the handle.
    pub(in crate::interpreter::evaluator) fn eval_array_creation(&mut self,
                                                                 elements: &[Expr])
                                                                 -> EvalResult<Value> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(self.eval_value(element)?);
        }

        Ok(self.create_array(values))
    }

    /// Evaluates `array[index]`.
    pub(in crate::interpreter::evaluator) fn eval_array_index(&mut self,
                                                              array: &Expr,
                                                              index: &Expr,
                                                              line: usize)
                                                              -> EvalResult<Value> {
        let handle = self.eval_value(array)?;
        let index = self.eval_value(index)?;

        let array = self.lookup_array(&handle, line)?;
        let array = array.borrow();
        let position = element_position(&index, array.elements.len(), line)?;

        Ok(array.elements[position].clone())
    }

    /// Evaluates `array[index] = value`; yields the assigned value.
    pub(in crate::interpreter::evaluator) fn eval_array_assignment(&mut self,
                                                                   array: &Expr,
                                                                   index: &Expr,
                                                                   value: &Expr,
                                                                   line: usize)
                                                                   -> EvalResult<Value> {
        let handle = self.eval_value(array)?;
        let index = self.eval_value(index)?;
        let value = self.eval_value(value)?;
        self.store_element(&handle, &index, value.clone(), line)?;

        Ok(value)
    }
}

/// Checks that an index value is an integer within `[0, len)` and converts
/// it to a vector position.
fn element_position(index: &Value, len: usize, line: usize) -> EvalResult<usize> {
    let Value::Integer(index) = index else {
        return Err(RuntimeError::TypeError { details: format!("Array index must be an integer, got {}",
                                                              index.kind()),
                                             line });
    };

    usize::try_from(*index)
        .ok()
        .filter(|position| *position < len)
        .ok_or(RuntimeError::IndexOutOfBounds { index: *index,
                                                len,
                                                line })
}
