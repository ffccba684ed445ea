#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called an unknown function.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array handle named an array that does not exist.
    UnknownArray {
        /// The name the handle refers to.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// The number of parameters the function declares.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Tried to access an array element outside the allowed bounds.
    IndexOutOfBounds {
        /// The index that was actually requested.
        index: i64,
        /// The number of elements in the array.
        len:   usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to remove an element from an empty array.
    EmptyArray {
        /// The name of the array.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An assertion failed during execution.
    AssertionFailed {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            },

            Self::UnknownFunction { name, line } => {
                write!(f, "Error on line {line}: Unknown function '{name}'.")
            },

            Self::UnknownArray { name, line } => {
                write!(f, "Error on line {line}: Array not found: {name}.")
            },

            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: {details}.")
            },

            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          line, } => {
                write!(f,
                       "Error on line {line}: Function '{name}' expects {expected} arguments, got {found}.")
            },

            Self::IndexOutOfBounds { index, len, line } => {
                write!(f,
                       "Error on line {line}: Array index {index} out of bounds, valid range is [0, {len}).")
            },

            Self::DivisionByZero { line } => {
                write!(f, "Error on line {line}: Division by zero.")
            },

            Self::EmptyArray { name, line } => {
                write!(f, "Error on line {line}: Cannot pop from empty array '{name}'.")
            },

            Self::AssertionFailed { line } => {
                write!(f, "Error on line {line}: Assertion failed.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
