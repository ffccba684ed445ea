/// Walks the syntax tree and computes values.
///
/// The evaluator owns the execution context (variables, functions, arrays)
/// and threads control flow through explicit results rather than flags.
///
/// # Responsibilities
/// - Evaluates expressions and executes statement sequences.
/// - Manages the flat variable scope and the global function and array
///   tables.
/// - Implements the calling convention for native and user functions.
pub mod evaluator;
/// Turns source text into a stream of tokens.
///
/// # Responsibilities
/// - Defines all recognized tokens.
/// - Tracks line numbers across newlines, comments and multi-line strings.
/// - Reports unterminated literals and unrecognized characters.
pub mod lexer;
/// Builds the abstract syntax tree from the token stream.
///
/// # Responsibilities
/// - Parses statements and expressions with correct precedence.
/// - Recognizes assignments and validates their targets.
/// - Attaches source lines to every node for error reporting.
pub mod parser;
/// Defines the runtime value representation.
///
/// # Responsibilities
/// - Declares the `Value` enum and its display form.
/// - Provides checked numeric coercions used across the evaluator.
pub mod value;
