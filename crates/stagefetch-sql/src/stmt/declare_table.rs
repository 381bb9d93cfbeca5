use super::{ColumnDef, Statement, TableVar};

/// `DECLARE <var> TABLE(<columns>)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareTable {
    pub var: TableVar,
    pub columns: Vec<ColumnDef>,
}

impl Statement {
    pub fn declare_table(var: TableVar, columns: Vec<ColumnDef>) -> Statement {
        DeclareTable { var, columns }.into()
    }
}
