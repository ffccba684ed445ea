//! # skit
//!
//! skit is a small, embeddable scripting language written in Rust.
//! Scripts get variables, functions, three loop forms, arrays behind string
//! handles and a native standard library; the host gets a reusable
//! evaluation context it can inspect and extend with its own natives.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{
    evaluator::core::{Context, Flow},
    lexer::tokenize,
    parser::statement::parse_command_sequence,
};
use crate::error::ParseError;

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and
/// source locations.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of script execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and error handling to provide a complete runtime for
/// script execution.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Installs the native standard library into a context.
///
/// # Responsibilities
/// - Registers I/O, conversion, array and math natives.
/// - Defines the predefined constants such as `true`, `pi` and `endl`.
pub mod stdlib;

/// Runs a whole script against the given context.
///
/// The source is tokenized and parsed as one command sequence, then
/// executed statement by statement. A top-level `return` stops the script
/// normally; a stray `break` or `continue` at the top level is absorbed.
/// The first error aborts the run, and whatever the script changed before
/// the error stays changed.
///
/// The context is not reset between runs, so several scripts can share
/// variables, functions and arrays by running against the same context.
///
/// # Errors
/// Returns an error if lexing or parsing fails, or if any runtime error
/// occurs.
///
/// # Examples
/// ```
/// use skit::{interpreter::evaluator::core::Context, run, stdlib};
///
/// let mut context = Context::new();
/// stdlib::install(&mut context);
///
/// // Simple script: runs to completion without errors.
/// assert!(run("a = 2 + 2; assert(a == 4);", &mut context).is_ok());
///
/// // An intentional error: 'x' is not defined.
/// assert!(run("b = x + 1;", &mut context).is_err());
/// ```
pub fn run(source: &str, context: &mut Context) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let commands = parse_command_sequence(&mut iter)?;
    if let Some((token, line)) = iter.peek() {
        return Err(Box::new(ParseError::UnexpectedToken { token: format!("{token:?}"),
                                                          line:  *line, }));
    }

    // a top-level Return (or a stray Break/Continue) just ends the script
    let _flow: Flow = context.exec(&commands)?;

    Ok(())
}
