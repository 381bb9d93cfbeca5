
use stagefetch_core::{
    stmt::{BinaryOp, Expr, ExprCall, ExprLambda, Member, UnaryOp, ENUMERABLE, QUERYABLE},
    Error, Result,
};

/// A query expression flattened into the shape the IR builder consumes.
#[derive(Debug)]
pub(crate) enum Normalized<'a> {
    /// Left-to-right sequence of steps starting at a relation or parameter.
    Chain(Vec<Step<'a>>),

    /// A predicate or arithmetic node whose operands are normalized
    /// separately.
    Tree(Tree<'a>),

    /// A literal or closed-over variable.
    Fixed,
}

#[derive(Debug)]
pub(crate) enum Step<'a> {
    Table(&'a str),
    Param(&'a str),
    Member(&'a Member),
    Call(ChainCall<'a>),
}

#[derive(Debug)]
pub(crate) struct ChainCall<'a> {
    pub(crate) op: ChainOp,
    pub(crate) lambda: Option<&'a ExprLambda>,
}

/// Chained operations the translator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainOp {
    Filter,
    Any,
    Single,
    Select,
    SelectMany,
}

#[derive(Debug)]
pub(crate) enum Tree<'a> {
    Binary {
        op: BinaryOp,
        lhs: &'a Expr,
        rhs: &'a Expr,
    },
    Unary {
        op: UnaryOp,
        operand: &'a Expr,
    },
}

/// Normalizes `expr` into a chain, a tree, or a fixed value.
///
/// Fails on the first construct outside the accepted vocabulary; no partial
/// chain is ever returned.
pub(crate) fn apply(expr: &Expr) -> Result<Normalized<'_>> {
    let expr = unwrap(expr)?;

    match expr {
        Expr::Value(_) | Expr::Captured(_) => Ok(Normalized::Fixed),
        Expr::BinaryOp(expr) => {
            if !is_supported_binary_op(expr.op) {
                return Err(Error::unsupported_expression(format!(
                    "binary operator `{}`",
                    expr.op
                )));
            }

            Ok(Normalized::Tree(Tree::Binary {
                op: expr.op,
                lhs: &expr.lhs,
                rhs: &expr.rhs,
            }))
        }
        Expr::UnaryOp(expr) => match expr.op {
            UnaryOp::Not | UnaryOp::Negate => Ok(Normalized::Tree(Tree::Unary {
                op: expr.op,
                operand: &expr.expr,
            })),
            op => Err(Error::unsupported_expression(format!(
                "unary operator `{op}`"
            ))),
        },
        Expr::Table(_) | Expr::Param(_) | Expr::Member(_) | Expr::Call(_) => {
            let mut steps = vec![];
            chain(expr, &mut steps)?;
            Ok(Normalized::Chain(steps))
        }
        Expr::Lambda(_) => Err(Error::unsupported_expression(
            "lambda outside of a chained call",
        )),
        Expr::New(_) => Err(Error::unsupported_expression(
            "object construction outside of a projection",
        )),
        Expr::Quote(_) | Expr::Convert(_) => unreachable!("unwrapped above"),
    }
}

/// Strips quotes and plain conversions.
pub(crate) fn unwrap(mut expr: &Expr) -> Result<&Expr> {
    loop {
        match expr {
            Expr::Quote(inner) => expr = &**inner,
            Expr::Convert(convert) => {
                if let Some(method) = &convert.method {
                    return Err(Error::unsupported_expression(format!(
                        "conversion through custom operator `{method}`"
                    )));
                }
                expr = &*convert.expr;
            }
            _ => return Ok(expr),
        }
    }
}

/// Recurses down the source side first so steps are pushed in left-to-right
/// order. Stops at a relation or parameter.
fn chain<'a>(expr: &'a Expr, steps: &mut Vec<Step<'a>>) -> Result<()> {
    match unwrap(expr)? {
        Expr::Table(table) => steps.push(Step::Table(&table.relation)),
        Expr::Param(param) => steps.push(Step::Param(&param.name)),
        Expr::Member(member) => {
            chain(&member.base, steps)?;
            steps.push(Step::Member(&member.member));
        }
        Expr::Call(call) => {
            let op = ChainOp::from_call(call)?;

            let [source, rest @ ..] = &call.args[..] else {
                return Err(Error::unsupported_expression(format!(
                    "call to `{}` without a source",
                    call.method
                )));
            };

            chain(source, steps)?;

            let lambda = match rest {
                [] if op.predicate_optional() => None,
                [] => {
                    return Err(Error::unsupported_expression(format!(
                        "call to `{}` without a lambda",
                        call.method
                    )))
                }
                [lambda] => Some(as_lambda(lambda, &call.method)?),
                _ => {
                    return Err(Error::unsupported_expression(format!(
                        "overload of `{}` with {} arguments",
                        call.method,
                        call.args.len()
                    )))
                }
            };

            steps.push(Step::Call(ChainCall { op, lambda }));
        }
        other => {
            return Err(Error::unsupported_expression(format!(
                "chain must start at a relation or a parameter, found {}",
                describe(other)
            )))
        }
    }

    Ok(())
}

fn as_lambda<'a>(expr: &'a Expr, method: &str) -> Result<&'a ExprLambda> {
    let Some(lambda) = unwrap(expr)?.as_lambda() else {
        return Err(Error::unsupported_expression(format!(
            "argument of `{method}` is not a lambda"
        )));
    };

    if lambda.params.len() != 1 {
        return Err(Error::unsupported_expression(format!(
            "lambda passed to `{method}` takes {} parameters",
            lambda.params.len()
        )));
    }

    Ok(lambda)
}

fn is_supported_binary_op(op: BinaryOp) -> bool {
    op.is_logical() || op.is_comparison() || op.is_arithmetic()
}

fn describe(expr: &Expr) -> &'static str {
    match expr {
        Expr::BinaryOp(_) => "a binary operation",
        Expr::Call(_) => "a call",
        Expr::Captured(_) => "a captured variable",
        Expr::Convert(_) => "a conversion",
        Expr::Lambda(_) => "a lambda",
        Expr::Member(_) => "a member access",
        Expr::New(_) => "an object construction",
        Expr::Param(_) => "a parameter",
        Expr::Quote(_) => "a quoted expression",
        Expr::Table(_) => "a relation",
        Expr::UnaryOp(_) => "a unary operation",
        Expr::Value(_) => "a literal",
    }
}

impl ChainOp {
    fn from_call(call: &ExprCall) -> Result<ChainOp> {
        if call.declaring_type != QUERYABLE && call.declaring_type != ENUMERABLE {
            return Err(Error::unsupported_expression(format!(
                "method `{}` declared on `{}`",
                call.method, call.declaring_type
            )));
        }

        match &call.method[..] {
            "Where" => Ok(ChainOp::Filter),
            "Any" => Ok(ChainOp::Any),
            "Single" => Ok(ChainOp::Single),
            "Select" => Ok(ChainOp::Select),
            "SelectMany" => Ok(ChainOp::SelectMany),
            method => Err(Error::unsupported_expression(format!(
                "method `{method}` on `{}`",
                call.declaring_type
            ))),
        }
    }

    /// Existence checks may be called without a predicate.
    fn predicate_optional(self) -> bool {
        matches!(self, ChainOp::Any | ChainOp::Single)
    }

    pub(crate) fn is_projection(self) -> bool {
        matches!(self, ChainOp::Select | ChainOp::SelectMany)
    }
}
