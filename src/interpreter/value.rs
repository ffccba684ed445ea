use crate::error::RuntimeError;

/// Represents any value a script expression can produce.
///
/// Equality between values is type-strict and structural: comparing two
/// values of different kinds is simply `false`, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value; produced by declarations and bare `return`.
    Void,
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Double(f64),
    /// A string. Also serves as an array handle naming an entry in the
    /// context's array table.
    Str(String),
    /// A single character.
    Char(char),
}

impl Value {
    /// Returns a short name for the value's kind, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::Str(_) => "string",
            Self::Char(_) => "char",
        }
    }

    /// Coerces the value to an integer.
    ///
    /// Integers pass through unchanged and doubles truncate toward zero.
    /// All other kinds are rejected.
    ///
    /// # Parameters
    /// - `what`: A short description of the place the integer is needed,
    ///   used in the error message.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// The coerced `i64`.
    ///
    /// # Errors
    /// Returns a `RuntimeError::TypeError` for `Void`, `Str` and `Char`
    /// values.
    ///
    /// # Example
    /// ```
    /// use skit::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Integer(7).as_int("test", 1).unwrap(), 7);
    /// assert_eq!(Value::Double(2.9).as_int("test", 1).unwrap(), 2);
    /// assert!(Value::Str("7".to_string()).as_int("test", 1).is_err());
    /// ```
    pub fn as_int(&self, what: &str, line: usize) -> Result<i64, RuntimeError> {
        match self {
            Self::Integer(value) => Ok(*value),
            #[allow(clippy::cast_possible_truncation)]
            Self::Double(value) => Ok(*value as i64),
            other => {
                Err(RuntimeError::TypeError { details: format!("Expected a number for {what}, got {}",
                                                               other.kind()),
                                              line })
            },
        }
    }

    /// Coerces the value to a double.
    ///
    /// Integers are promoted and doubles pass through unchanged. All other
    /// kinds are rejected.
    ///
    /// # Parameters
    /// - `what`: A short description of the place the double is needed,
    ///   used in the error message.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// The coerced `f64`.
    ///
    /// # Errors
    /// Returns a `RuntimeError::TypeError` for `Void`, `Str` and `Char`
    /// values.
    pub fn as_double(&self, what: &str, line: usize) -> Result<f64, RuntimeError> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Integer(value) => Ok(*value as f64),
            Self::Double(value) => Ok(*value),
            other => {
                Err(RuntimeError::TypeError { details: format!("Expected a number for {what}, got {}",
                                                               other.kind()),
                                              line })
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Void => write!(f, "<void>"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Double(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value}"),
            Self::Char(value) => write!(f, "{value}"),
        }
    }
}
