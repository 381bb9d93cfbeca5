use super::Expr;
use crate::schema::Association;

/// Access to a member of the rows produced by `base`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprMember {
    pub base: Box<Expr>,
    pub member: Member,
}

/// What a member access resolved to in the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// A mapped column
    Column(String),

    /// A foreign-key hop to another relation
    Association(Association),

    /// A named output of an earlier projection
    Projected(String),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Column(name) | Member::Projected(name) => name,
            Member::Association(assoc) => &assoc.name,
        }
    }
}

impl Expr {
    pub fn member(self, member: Member) -> Expr {
        ExprMember {
            base: Box::new(self),
            member,
        }
        .into()
    }

    pub fn column(self, name: impl Into<String>) -> Expr {
        self.member(Member::Column(name.into()))
    }

    pub fn association(self, association: &Association) -> Expr {
        self.member(Member::Association(association.clone()))
    }

    pub fn projected(self, name: impl Into<String>) -> Expr {
        self.member(Member::Projected(name.into()))
    }
}

impl From<ExprMember> for Expr {
    fn from(value: ExprMember) -> Self {
        Expr::Member(value)
    }
}
