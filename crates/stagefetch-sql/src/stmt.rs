mod batch;
pub use batch::Batch;

mod column_def;
pub use column_def::ColumnDef;

mod declare_table;
pub use declare_table::DeclareTable;

mod insert_select;
pub use insert_select::{InsertSelect, JoinSource, KeyFilter, Previous, Source};

mod select_all;
pub use select_all::SelectAll;

mod table_var;
pub use table_var::TableVar;

/// A single SQL statement of a staged fetch batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    DeclareTable(DeclareTable),
    InsertSelect(InsertSelect),
    SelectAll(SelectAll),
}

impl From<DeclareTable> for Statement {
    fn from(value: DeclareTable) -> Self {
        Statement::DeclareTable(value)
    }
}

impl From<InsertSelect> for Statement {
    fn from(value: InsertSelect) -> Self {
        Statement::InsertSelect(value)
    }
}

impl From<SelectAll> for Statement {
    fn from(value: SelectAll) -> Self {
        Statement::SelectAll(value)
    }
}
