/// Array creation, indexing and element assignment, plus the array table
/// behind string handles.
pub mod array;
/// Binary operator dispatch: arithmetic, concatenation, equality and
/// relational comparisons.
pub mod binary;
/// The execution context, the control-flow result type and the main
/// evaluation loop.
pub mod core;
/// The function table, the native-function bridge and the calling
/// convention for user functions.
pub mod function;
/// The three loop forms: `while`, `for` and `foreach`.
pub mod loops;
