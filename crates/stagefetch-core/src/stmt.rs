//! The query expression handed over by the front-end query builder.
//!
//! Expressions are right-nested: each chained call wraps its predecessor as
//! its first argument, and lambdas close over parameters bound to the row
//! source they are applied to.

mod expr;
pub use expr::Expr;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_call;
pub use expr_call::{ExprCall, ENUMERABLE, QUERYABLE};

mod expr_convert;
pub use expr_convert::ExprConvert;

mod expr_lambda;
pub use expr_lambda::ExprLambda;

mod expr_member;
pub use expr_member::{ExprMember, Member};

mod expr_new;
pub use expr_new::ExprNew;

mod expr_ref;
pub use expr_ref::{ExprCaptured, ExprParam, ExprTable};

mod expr_unary_op;
pub use expr_unary_op::ExprUnaryOp;

mod op_binary;
pub use op_binary::BinaryOp;

mod op_unary;
pub use op_unary::UnaryOp;

mod value;
pub use value::Value;
