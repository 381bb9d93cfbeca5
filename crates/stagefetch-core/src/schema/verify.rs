use super::{Relation, Schema};
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

pub(super) fn apply(schema: &Schema) -> Result<()> {
    Verify { schema }.verify()
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for relation in self.schema.relations() {
            self.verify_columns_are_unique(relation)?;
            self.verify_primary_key(relation)?;
            self.verify_associations(relation)?;
        }

        Ok(())
    }

    fn verify_columns_are_unique(&self, relation: &Relation) -> Result<()> {
        let mut seen = HashSet::new();

        for column in &relation.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "column `{}.{}` is declared more than once",
                    relation.name, column.name
                )));
            }
        }

        Ok(())
    }

    fn verify_primary_key(&self, relation: &Relation) -> Result<()> {
        if relation.primary_key.is_empty() {
            return Err(Error::invalid_schema(format!(
                "relation `{}` has no primary key",
                relation.name
            )));
        }

        let mut seen = HashSet::new();

        for field in &relation.primary_key {
            if relation.find_column(field).is_none() {
                return Err(Error::invalid_schema(format!(
                    "primary key of `{}` references undeclared column `{field}`",
                    relation.name
                )));
            }

            if !seen.insert(field.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "primary key of `{}` lists `{field}` more than once",
                    relation.name
                )));
            }
        }

        Ok(())
    }

    fn verify_associations(&self, relation: &Relation) -> Result<()> {
        for assoc in &relation.associations {
            if relation.find_column(&assoc.this_key).is_none() {
                return Err(Error::invalid_schema(format!(
                    "association `{}.{}` joins on undeclared column `{}`",
                    relation.name, assoc.name, assoc.this_key
                )));
            }

            let target = self.schema.relation(&assoc.other_relation).map_err(|err| {
                err.context(Error::invalid_schema(format!(
                    "association `{}.{}` targets an unknown relation",
                    relation.name, assoc.name
                )))
            })?;

            if target.find_column(&assoc.other_key).is_none() {
                return Err(Error::invalid_schema(format!(
                    "association `{}.{}` joins on undeclared column `{}.{}`",
                    relation.name, assoc.name, target.name, assoc.other_key
                )));
            }
        }

        Ok(())
    }
}
