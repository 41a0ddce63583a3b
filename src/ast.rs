use std::rc::Rc;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw constants that can appear directly in source
/// code. Array literals are expressions, since their elements are evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Int(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// A string literal, stored without its quotes.
    Str(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// The `null` literal.
    Null,
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// A declared type, written before a binding, parameter, loop variable or
/// function name.
///
/// Untyped bindings carry [`TypeName::Any`], which accepts every value
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    /// No declared type.
    Any,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `str`
    Str,
    /// `bool`
    Bool,
    /// `T[]`. Only the array kind is checked, not the element type.
    Array(Box<Self>),
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Str => write!(f, "str"),
            Self::Bool => write!(f, "bool"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean or null).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a binding by name.
    Identifier {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// An array literal such as `[1, x, "a"]`.
    Array {
        /// Element expressions, in order.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A unary operation such as `-x` or `!done`.
    UnaryOp {
        /// The operator.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation such as `a + b`.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A call. The callee is usually an identifier, or another call for
    /// chained calls like `f(x)(y)`.
    Call {
        /// Expression producing the function to call.
        callee: Box<Self>,
        /// Argument expressions, possibly containing [`Expr::Unpack`].
        args:   Vec<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// An index read such as `xs[-1]`.
    Index {
        /// Expression producing the array.
        array: Box<Self>,
        /// Expression producing the index.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A `*expr` call argument whose array elements are spliced into the
    /// argument list.
    Unpack {
        /// Expression producing the array to splice.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Returns the source line of this expression.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Identifier { line, .. }
            | Self::Array { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Call { line, .. }
            | Self::Index { line, .. }
            | Self::Unpack { line, .. } => *line,
        }
    }
}

/// A single function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The declared type, [`TypeName::Any`] when omitted.
    pub ty:   TypeName,
    /// The parameter name.
    pub name: String,
}

/// The parameter list of a function or lambda.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params {
    /// Parameters bound one argument each.
    pub positional: Vec<Param>,
    /// A trailing `*name` collecting the remaining arguments as an array.
    pub variadic:   Option<String>,
}

/// The right-hand side of `foreach name in ...`.
#[derive(Debug, Clone, PartialEq)]
pub enum Iterable {
    /// Any expression producing an array, a string or an integer.
    Expr(Expr),
    /// `start..end`, exclusive of `end`, counting down when `start > end`.
    Range {
        /// First value produced.
        start: Expr,
        /// Bound that is never produced.
        end:   Expr,
    },
}

/// One `if` or `else if` arm of a [`Statement::Conditional`].
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// The guard.
    pub condition: Expr,
    /// The statements run when the guard is truthy.
    pub body:      Vec<Statement>,
    /// Line of the `if` or `else if`.
    pub line:      usize,
}

/// Represents a statement in the language.
///
/// The line parser produces block-opening statements (`while`, `foreach`,
/// `func`, `if`, `else if`, `else`) with empty bodies; the block assembler
/// fills the bodies in from the indented lines that follow, then folds
/// `If`/`ElseIf`/`Else` runs into a single [`Statement::Conditional`].
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `name = expr` or `T name = expr`.
    Assign {
        /// `Some` for typed declarations, which may not redeclare a name.
        declared: Option<TypeName>,
        /// The target name.
        name:     String,
        /// The value.
        value:    Expr,
        /// Line number in the source code.
        line:     usize,
    },
    /// `array[index] = expr`.
    IndexAssign {
        /// Expression producing the array.
        array: Expr,
        /// Expression producing the index.
        index: Expr,
        /// The value.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `func [T] name(params)` and its indented body.
    FunctionDef {
        /// The function name.
        name:        String,
        /// Declared return type.
        return_type: TypeName,
        /// Parameter list.
        params:      Params,
        /// The body, shared with every function value created from it.
        body:        Rc<[Statement]>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `lambda name = (params) => expr`.
    Lambda {
        /// The function name.
        name:   String,
        /// Parameter list.
        params: Params,
        /// The returned expression.
        body:   Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// `return [expr]`.
    Return {
        /// The returned value; `None` returns `null`.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `while expr` and its indented body.
    While {
        /// The loop guard.
        condition: Expr,
        /// The loop body.
        body:      Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `foreach [T] name in iterable` and its indented body.
    ForEach {
        /// Declared type of the loop variable.
        ty:       TypeName,
        /// The loop variable.
        variable: String,
        /// What to iterate.
        iterable: Iterable,
        /// The loop body.
        body:     Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `if expr`, before folding.
    If(Branch),
    /// `else if expr`, before folding.
    ElseIf(Branch),
    /// `else`, before folding.
    Else {
        /// The statements run when no guard matched.
        body: Vec<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A folded `if` / `else if` / `else` chain.
    Conditional {
        /// The `if` arm followed by each `else if` arm, in source order.
        branches:  Vec<Branch>,
        /// The `else` body, if any.
        otherwise: Option<Vec<Self>>,
        /// Line of the `if`.
        line:      usize,
    },
    /// A call used as a statement; its value is discarded.
    Call {
        /// The [`Expr::Call`] node.
        call: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// Placeholder for a line that failed to parse.
    Error {
        /// Line number in the source code.
        line: usize,
    },
}

impl Statement {
    /// Returns the source line of this statement.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::If(branch) | Self::ElseIf(branch) => branch.line,
            Self::Assign { line, .. }
            | Self::IndexAssign { line, .. }
            | Self::FunctionDef { line, .. }
            | Self::Lambda { line, .. }
            | Self::Return { line, .. }
            | Self::While { line, .. }
            | Self::ForEach { line, .. }
            | Self::Else { line, .. }
            | Self::Conditional { line, .. }
            | Self::Call { line, .. }
            | Self::Error { line } => *line,
        }
    }

    /// Returns `true` if this statement owns the indented lines that follow
    /// it.
    #[must_use]
    pub const fn opens_block(&self) -> bool {
        matches!(self,
                 Self::While { .. }
                 | Self::ForEach { .. }
                 | Self::FunctionDef { .. }
                 | Self::If(_)
                 | Self::ElseIf(_)
                 | Self::Else { .. })
    }

    /// Installs the statements collected for this block-opening statement.
    ///
    /// Statements that do not open a block ignore the call.
    pub fn attach_body(&mut self, statements: Vec<Self>) {
        match self {
            Self::While { body, .. }
            | Self::ForEach { body, .. }
            | Self::Else { body, .. }
            | Self::If(Branch { body, .. })
            | Self::ElseIf(Branch { body, .. }) => *body = statements,
            Self::FunctionDef { body, .. } => *body = statements.into(),
            _ => {},
        }
    }
}

/// Operators that take two operands.
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
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `and`
    And,
    /// `or`
    Or,
}

/// Operators that take one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-`
    Negate,
    /// `!`
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl BinaryOperator {
    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl UnaryOperator {
    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
        }
    }
}
