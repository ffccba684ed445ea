#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer hit a character that starts no token.
    UnexpectedCharacter {
        /// The offending character(s).
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A string or character literal was opened but never closed.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// A description of the token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A specific token was expected but something else was found.
    ExpectedToken {
        /// A description of the expected token.
        expected: &'static str,
        /// A description of the token actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The left side of `=` was neither a variable nor an array element.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A comma directly before the closing `)` of an argument list.
    DanglingComma {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { found, line } => {
                write!(f, "Error on line {line}: Unexpected character: {found}.")
            },

            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            },

            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::ExpectedToken { expected, found, line } => {
                write!(f, "Error on line {line}: Expected {expected}, found {found}.")
            },

            Self::InvalidAssignmentTarget { line } => {
                write!(f,
                       "Error on line {line}: Expected variable or array element on left side of assignment.")
            },

            Self::DanglingComma { line } => {
                write!(f, "Error on line {line}: Dangling comma in argument list.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
