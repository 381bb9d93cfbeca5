use super::Expr;

/// A lambda passed to a chained call. `params[0]` binds to the rows of the
/// call's source.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLambda {
    pub params: Vec<String>,
    pub body: Box<Expr>,
}

impl Expr {
    pub fn lambda<I>(params: I, body: impl Into<Expr>) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        ExprLambda {
            params: params.into_iter().map(Into::into).collect(),
            body: Box::new(body.into()),
        }
        .into()
    }
}

impl From<ExprLambda> for Expr {
    fn from(value: ExprLambda) -> Self {
        Expr::Lambda(value)
    }
}
