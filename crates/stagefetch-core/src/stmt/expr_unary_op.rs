use super::{Expr, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnaryOp {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
}

impl Expr {
    pub fn unary_op(op: UnaryOp, expr: impl Into<Self>) -> Self {
        ExprUnaryOp {
            op,
            expr: Box::new(expr.into()),
        }
        .into()
    }

    pub fn not(expr: impl Into<Self>) -> Self {
        Expr::unary_op(UnaryOp::Not, expr)
    }

    pub fn negate(expr: impl Into<Self>) -> Self {
        Expr::unary_op(UnaryOp::Negate, expr)
    }
}

impl From<ExprUnaryOp> for Expr {
    fn from(value: ExprUnaryOp) -> Self {
        Self::UnaryOp(value)
    }
}
