use super::{Statement, TableVar};

/// `SELECT * FROM <var>`: hands the staged rows back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectAll {
    pub var: TableVar,
}

impl Statement {
    pub fn select_all(var: TableVar) -> Statement {
        SelectAll { var }.into()
    }
}
