use super::Expr;

/// Object construction inside a projection: `new { Name = c.Name, ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprNew {
    pub fields: Vec<(String, Expr)>,
}

impl Expr {
    pub fn new_object<I, S>(fields: I) -> Expr
    where
        I: IntoIterator<Item = (S, Expr)>,
        S: Into<String>,
    {
        ExprNew {
            fields: fields
                .into_iter()
                .map(|(name, expr)| (name.into(), expr))
                .collect(),
        }
        .into()
    }
}

impl From<ExprNew> for Expr {
    fn from(value: ExprNew) -> Self {
        Expr::New(value)
    }
}
