use super::{Association, Column};

use serde::{Deserialize, Serialize};

/// A relation (table) known to the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Name of the relation, possibly schema-qualified (`dbo.Customer`).
    pub name: String,

    /// The relation's columns
    pub columns: Vec<Column>,

    /// Columns composing the primary key, in key order
    pub primary_key: Vec<String>,

    #[serde(default)]
    pub associations: Vec<Association>,
}

impl Relation {
    pub fn new(name: impl Into<String>) -> Relation {
        Relation {
            name: name.into(),
            columns: vec![],
            primary_key: vec![],
            associations: vec![],
        }
    }

    pub fn column(mut self, name: impl Into<String>, sql_type: impl Into<String>) -> Relation {
        self.columns.push(Column {
            name: name.into(),
            sql_type: sql_type.into(),
        });
        self
    }

    pub fn primary_key<I>(mut self, fields: I) -> Relation
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.primary_key = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn association(
        mut self,
        name: impl Into<String>,
        this_key: impl Into<String>,
        other_relation: impl Into<String>,
        other_key: impl Into<String>,
    ) -> Relation {
        self.associations
            .push(Association::new(name, this_key, other_relation, other_key));
        self
    }

    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn find_association(&self, name: &str) -> Option<&Association> {
        self.associations.iter().find(|assoc| assoc.name == name)
    }
}
