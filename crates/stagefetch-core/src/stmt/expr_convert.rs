use super::Expr;

/// A type conversion.
///
/// Conversions are transparent to translation unless they go through a
/// user-defined conversion operator, named by `method`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprConvert {
    pub expr: Box<Expr>,
    pub method: Option<String>,
}

impl Expr {
    pub fn convert(expr: impl Into<Expr>) -> Expr {
        ExprConvert {
            expr: Box::new(expr.into()),
            method: None,
        }
        .into()
    }

    pub fn convert_with(expr: impl Into<Expr>, method: impl Into<String>) -> Expr {
        ExprConvert {
            expr: Box::new(expr.into()),
            method: Some(method.into()),
        }
        .into()
    }
}

impl From<ExprConvert> for Expr {
    fn from(value: ExprConvert) -> Self {
        Expr::Convert(value)
    }
}
