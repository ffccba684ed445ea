/// Expression parsing.
///
/// Implements precedence climbing over the token stream: a primary
/// expression, optional index and postfix suffixes, then a loop folding
/// binary operators by binding power. Assignments are recognized here and
/// the left side is reclassified into an assignment node.
pub mod core;
/// Statement parsing.
///
/// Parses command sequences and the keyword statements: `fn`, `if`/`else`,
/// `while`, `for`, `foreach`, `return`, `break` and `continue`. Everything
/// else is handed to the expression parser.
pub mod statement;
/// Shared parsing helpers for token expectation, identifiers and
/// comma-separated lists.
pub mod utils;
