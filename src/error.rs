mod parse_error;
mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
