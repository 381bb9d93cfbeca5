use serde::{Deserialize, Serialize};

/// A column of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The SQL type used when the column is staged in a table variable, e.g.
    /// `int` or `nvarchar(100)`.
    pub sql_type: String,
}
