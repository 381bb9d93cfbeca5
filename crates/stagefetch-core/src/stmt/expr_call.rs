use super::Expr;

/// Declaring type of the query operators over remote sources.
pub const QUERYABLE: &str = "Queryable";

/// Declaring type of the query operators over in-memory sequences, used for
/// collection navigation inside lambdas.
pub const ENUMERABLE: &str = "Enumerable";

/// A method call in extension-call form.
///
/// `args[0]` is the source the call is chained on; remaining arguments are
/// usually lambdas. The translator recognizes the declaring type and method
/// by name and rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCall {
    pub declaring_type: String,
    pub method: String,
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn call<I>(declaring_type: impl Into<String>, method: impl Into<String>, args: I) -> Expr
    where
        I: IntoIterator<Item = Expr>,
    {
        ExprCall {
            declaring_type: declaring_type.into(),
            method: method.into(),
            args: args.into_iter().collect(),
        }
        .into()
    }

    /// `source.Where(lambda)` over a queryable source. The lambda is quoted.
    pub fn filter(self, lambda: Expr) -> Expr {
        Expr::call(QUERYABLE, "Where", [self, Expr::quote(lambda)])
    }

    /// `source.Any(lambda)` over a collection.
    pub fn any(self, lambda: Expr) -> Expr {
        Expr::call(ENUMERABLE, "Any", [self, lambda])
    }

    /// `source.Single(lambda)` over a collection.
    pub fn single(self, lambda: Expr) -> Expr {
        Expr::call(ENUMERABLE, "Single", [self, lambda])
    }

    /// `source.Select(lambda)` over a queryable source.
    pub fn select(self, lambda: Expr) -> Expr {
        Expr::call(QUERYABLE, "Select", [self, Expr::quote(lambda)])
    }

    /// `source.SelectMany(lambda)` over a queryable source.
    pub fn select_many(self, lambda: Expr) -> Expr {
        Expr::call(QUERYABLE, "SelectMany", [self, Expr::quote(lambda)])
    }
}

impl From<ExprCall> for Expr {
    fn from(value: ExprCall) -> Self {
        Expr::Call(value)
    }
}
