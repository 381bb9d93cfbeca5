use super::{DeclareTable, InsertSelect, SelectAll, Statement};

/// The full staged fetch: table variable declarations followed by one
/// `INSERT ... SELECT` / `SELECT *` pair per relation, in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub declarations: Vec<DeclareTable>,
    pub fetches: Vec<InsertSelect>,
}

impl Batch {
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.fetches.is_empty()
    }

    /// Statements in execution order.
    ///
    /// Each fetch is followed by the `SELECT *` that reads its rows back, so
    /// result sets arrive in the same order as `fetches`.
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        let declarations = self.declarations.iter().cloned().map(Statement::from);
        let fetches = self.fetches.iter().flat_map(|fetch| {
            [
                Statement::from(fetch.clone()),
                Statement::from(SelectAll {
                    var: fetch.target.clone(),
                }),
            ]
        });

        declarations.chain(fetches)
    }
}
