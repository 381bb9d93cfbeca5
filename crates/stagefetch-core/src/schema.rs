mod association;
pub use association::Association;

mod catalog;
pub use catalog::Catalog;

mod column;
pub use column::Column;

mod relation;
pub use relation::Relation;

mod verify;

use crate::{stmt, Error, Result};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Statically typed description of the relations a query may touch.
///
/// The schema is verified once when it is constructed. Translation only ever
/// reads from it.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    relations: IndexMap<String, Relation>,
}

/// Serialized form of a [`Schema`].
#[derive(Debug, Serialize, Deserialize)]
struct SchemaDef {
    relations: Vec<Relation>,
}

impl Schema {
    /// Builds a schema from relation descriptions, verifying it.
    pub fn new(relations: impl IntoIterator<Item = Relation>) -> Result<Schema> {
        let mut schema = Schema::default();

        for relation in relations {
            if schema.relations.contains_key(&relation.name) {
                return Err(Error::invalid_schema(format!(
                    "relation `{}` is declared more than once",
                    relation.name
                )));
            }

            schema.relations.insert(relation.name.clone(), relation);
        }

        verify::apply(&schema)?;
        Ok(schema)
    }

    /// Loads a schema from its JSON description.
    ///
    /// ```json
    /// { "relations": [
    ///     { "name": "Customer",
    ///       "columns": [{ "name": "Id", "sql_type": "int" }],
    ///       "primary_key": ["Id"],
    ///       "associations": [] } ] }
    /// ```
    pub fn from_json(src: &str) -> Result<Schema> {
        let def: SchemaDef = serde_json::from_str(src)?;
        Schema::new(def.relations)
    }

    /// Serializes the schema back to its JSON description.
    pub fn to_json(&self) -> Result<String> {
        let def = SchemaDef {
            relations: self.relations.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&def)?)
    }

    pub fn relations(&self) -> impl ExactSizeIterator<Item = &Relation> + '_ {
        self.relations.values()
    }

    pub fn relation(&self, name: &str) -> Result<&Relation> {
        self.relations
            .get(name)
            .ok_or_else(|| Error::unknown_relation(name))
    }

    /// Resolves a named association of `relation` into a member that can be
    /// used when building query expressions.
    pub fn association(&self, relation: &str, name: &str) -> Result<stmt::Member> {
        let association = self
            .relation(relation)?
            .find_association(name)
            .ok_or_else(|| {
                Error::unresolved_reference(format!(
                    "relation `{relation}` has no association `{name}`"
                ))
            })?;

        Ok(stmt::Member::Association(association.clone()))
    }
}

impl Catalog for Schema {
    fn primary_key(&self, relation: &str) -> Result<&[String]> {
        Ok(&self.relation(relation)?.primary_key)
    }

    fn sql_type(&self, relation: &str, field: &str) -> Result<&str> {
        let column = self
            .relation(relation)?
            .find_column(field)
            .ok_or_else(|| Error::unknown_column(relation, field))?;

        Ok(&column.sql_type)
    }
}
