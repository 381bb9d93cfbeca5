use super::*;

/// A node of the query expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Binary operation: comparison, logical connective, or arithmetic
    BinaryOp(ExprBinaryOp),

    /// A method call in extension-call form (`args[0]` is the source)
    Call(ExprCall),

    /// A variable closed over by the query, evaluated by the caller
    Captured(ExprCaptured),

    /// Type conversion
    Convert(ExprConvert),

    /// A lambda passed to a chained call
    Lambda(ExprLambda),

    /// Field or association access
    Member(ExprMember),

    /// Object construction inside a projection
    New(ExprNew),

    /// A lambda parameter
    Param(ExprParam),

    /// A quoted lambda. Quoting carries no meaning for translation.
    Quote(Box<Expr>),

    /// Reference to a relation: the start of a chain
    Table(ExprTable),

    /// Unary operation
    UnaryOp(ExprUnaryOp),

    /// A literal value
    Value(Value),
}

impl Expr {
    pub fn table(relation: impl Into<String>) -> Expr {
        ExprTable {
            relation: relation.into(),
        }
        .into()
    }

    pub fn param(name: impl Into<String>) -> Expr {
        ExprParam { name: name.into() }.into()
    }

    pub fn captured(name: impl Into<String>) -> Expr {
        ExprCaptured { name: name.into() }.into()
    }

    pub fn value(value: impl Into<Value>) -> Expr {
        Expr::Value(value.into())
    }

    pub fn quote(expr: impl Into<Expr>) -> Expr {
        Expr::Quote(Box::new(expr.into()))
    }

    /// Returns `true` if the expression is a literal or a captured variable.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Expr::Value(_) | Expr::Captured(_))
    }

    pub fn as_lambda(&self) -> Option<&ExprLambda> {
        match self {
            Expr::Lambda(lambda) => Some(lambda),
            _ => None,
        }
    }
}

impl From<ExprTable> for Expr {
    fn from(value: ExprTable) -> Self {
        Expr::Table(value)
    }
}

impl From<ExprParam> for Expr {
    fn from(value: ExprParam) -> Self {
        Expr::Param(value)
    }
}

impl From<ExprCaptured> for Expr {
    fn from(value: ExprCaptured) -> Self {
        Expr::Captured(value)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Value(value.into())
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Value(value.into())
    }
}
