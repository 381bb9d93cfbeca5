use super::{Statement, TableVar};

/// `INSERT INTO <target> SELECT <columns> FROM <relation> AS current ...`
///
/// Stages the rows of one relation into a table variable, either by key (the
/// root of the fetch) or by joining the table variable of the previous hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertSelect {
    pub target: TableVar,
    pub columns: Vec<String>,
    pub relation: String,
    pub source: Source,
}

/// How the rows of an [`InsertSelect`] are narrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `WHERE current.<key> = <param> AND ...`
    Key(Vec<KeyFilter>),

    /// `INNER JOIN <previous> AS previous ON ...`
    Join(JoinSource),
}

/// One primary-key column compared against a batch parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFilter {
    pub column: String,
    pub param: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSource {
    pub previous: Previous,

    /// `(current column, previous column)` pairs, compared for equality.
    pub on: Vec<(String, String)>,
}

/// Rows of the previous hop that a join reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Previous {
    /// The table variable itself
    Var(TableVar),

    /// `(SELECT DISTINCT <columns> FROM <var>)`
    Distinct { var: TableVar, columns: Vec<String> },
}

impl Previous {
    pub fn var(&self) -> &TableVar {
        match self {
            Previous::Var(var) | Previous::Distinct { var, .. } => var,
        }
    }
}

impl Statement {
    pub fn insert_select(
        target: TableVar,
        columns: Vec<String>,
        relation: impl Into<String>,
        source: Source,
    ) -> Statement {
        InsertSelect {
            target,
            columns,
            relation: relation.into(),
            source,
        }
        .into()
    }
}
