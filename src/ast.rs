use std::rc::Rc;

use crate::interpreter::value::Value;

/// A sequence of statements executed in order, such as a function body,
/// a loop body or the whole script.
pub type CommandSequence = Vec<Expr>;

/// Represents a node of the abstract syntax tree.
///
/// Every variant carries the source line it started on, so that runtime
/// errors can point back at the offending statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value, such as `42`, `3.5`, `"text"` or `'c'`.
    Constant {
        /// The literal value.
        value: Value,
        /// The source line of the expression.
        line:  usize,
    },
    /// A read of a named variable.
    Variable {
        /// The variable name.
        name: String,
        /// The source line of the expression.
        line: usize,
    },
    /// An assignment of the form `name = value`.
    Assignment {
        /// The variable name.
        name:  String,
        /// The assigned expression.
        value: Box<Expr>,
        /// The source line of the expression.
        line:  usize,
    },
    /// A binary operation of the form `left <op> right`.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// The left operand.
        left:  Box<Expr>,
        /// The right operand.
        right: Box<Expr>,
        /// The source line of the expression.
        line:  usize,
    },
    /// A call of the form `name(arg1, arg2, ...)`.
    FunctionCall {
        /// The function name.
        name:      String,
        /// The argument expressions, evaluated left to right.
        arguments: Vec<Expr>,
        /// The source line of the expression.
        line:      usize,
    },
    /// A declaration of the form `fn name(a, b) { ... }`.
    ///
    /// Parameters and body are shared so that registering the function and
    /// every later call reuse the same parsed tree.
    FunctionDeclaration {
        /// The function name.
        name:       String,
        /// The parameter names.
        parameters: Rc<Vec<String>>,
        /// The function body.
        body:       Rc<CommandSequence>,
        /// The source line of the declaration.
        line:       usize,
    },
    /// A conditional without an alternative: `if (cond) { ... }`.
    If {
        /// The condition expression.
        condition: Box<Expr>,
        /// The statements executed when the condition holds.
        body:      CommandSequence,
        /// The source line of the statement.
        line:      usize,
    },
    /// A conditional with an alternative: `if (cond) { ... } else { ... }`.
    IfElse {
        /// The condition expression.
        condition: Box<Expr>,
        /// The statements executed when the condition holds.
        if_body:   CommandSequence,
        /// The statements executed otherwise.
        else_body: CommandSequence,
        /// The source line of the statement.
        line:      usize,
    },
    /// A loop of the form `while (cond) { ... }`.
    While {
        /// The condition, checked before every iteration.
        condition: Box<Expr>,
        /// The loop body.
        body:      CommandSequence,
        /// The source line of the statement.
        line:      usize,
    },
    /// A loop of the form `for (init; cond; incr) { ... }`.
    ///
    /// All three clauses are optional; a missing condition loops forever.
    For {
        /// Runs once before the first iteration.
        initialization: Option<Box<Expr>>,
        /// Checked before every iteration.
        condition:      Option<Box<Expr>>,
        /// Runs after every iteration, including ones cut short by
        /// `continue`.
        increment:      Option<Box<Expr>>,
        /// The loop body.
        body:           CommandSequence,
        /// The source line of the statement.
        line:           usize,
    },
    /// A loop of the form `foreach (name in collection) { ... }`.
    ForEach {
        /// The loop variable, bound to each element in turn.
        variable:   String,
        /// An expression yielding an array handle.
        collection: Box<Expr>,
        /// The loop body.
        body:       CommandSequence,
        /// The source line of the statement.
        line:       usize,
    },
    /// An array literal of the form `[e1, e2, ...]`.
    ///
    /// Evaluates to a handle naming the freshly created array.
    ArrayCreation {
        /// The element expressions, evaluated left to right.
        elements: Vec<Expr>,
        /// The source line of the expression.
        line:     usize,
    },
    /// A read of the form `array[index]`.
    ArrayIndex {
        /// An expression yielding an array handle.
        array: Box<Expr>,
        /// The index expression; must evaluate to an integer.
        index: Box<Expr>,
        /// The source line of the expression.
        line:  usize,
    },
    /// A write of the form `array[index] = value`.
    ArrayAssignment {
        /// An expression yielding an array handle.
        array: Box<Expr>,
        /// The index expression; must evaluate to an integer.
        index: Box<Expr>,
        /// The assigned expression.
        value: Box<Expr>,
        /// The source line of the expression.
        line:  usize,
    },
    /// A postfix increment, `operand++`. Yields the value before the update.
    PostfixIncrement {
        /// The target; must be a variable or an array element.
        operand: Box<Expr>,
        /// The source line of the expression.
        line:    usize,
    },
    /// A postfix decrement, `operand--`. Yields the value before the update.
    PostfixDecrement {
        /// The target; must be a variable or an array element.
        operand: Box<Expr>,
        /// The source line of the expression.
        line:    usize,
    },
    /// A `break` statement, ending the innermost enclosing loop.
    Break {
        /// The source line of the statement.
        line: usize,
    },
    /// A `continue` statement, skipping to the next iteration of the
    /// innermost enclosing loop.
    Continue {
        /// The source line of the statement.
        line: usize,
    },
    /// A `return` statement, with or without a value.
    Return {
        /// The returned expression, if any.
        value: Option<Box<Expr>>,
        /// The source line of the statement.
        line:  usize,
    },
}

impl Expr {
    /// Returns the source line this node started on.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Constant { line, .. }
            | Self::Variable { line, .. }
            | Self::Assignment { line, .. }
            | Self::Binary { line, .. }
            | Self::FunctionCall { line, .. }
            | Self::FunctionDeclaration { line, .. }
            | Self::If { line, .. }
            | Self::IfElse { line, .. }
            | Self::While { line, .. }
            | Self::For { line, .. }
            | Self::ForEach { line, .. }
            | Self::ArrayCreation { line, .. }
            | Self::ArrayIndex { line, .. }
            | Self::ArrayAssignment { line, .. }
            | Self::PostfixIncrement { line, .. }
            | Self::PostfixDecrement { line, .. }
            | Self::Break { line }
            | Self::Continue { line }
            | Self::Return { line, .. } => *line,
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
        };
        write!(f, "{symbol}")
    }
}
