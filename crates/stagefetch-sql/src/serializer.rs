#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited, Period};

mod ident;
use ident::Ident;

// Fragment serializers
mod statement;

use crate::stmt::{Batch, Statement};

/// Alias of the relation being staged in an `INSERT ... SELECT`.
pub const CURRENT: &str = "current";

/// Alias of the previous hop's rows in an `INSERT ... SELECT`.
pub const PREVIOUS: &str = "previous";

/// Serialize a statement or a staged fetch batch to a SQL string
#[derive(Debug, Default)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a> {
    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer::default()
    }

    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter { dst: &mut ret };
        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// Serializes a batch: declarations one per line, a blank line, then one
    /// paragraph per fetch holding the `INSERT ... SELECT` and the `SELECT *`
    /// reading it back.
    pub fn serialize_batch(&self, batch: &Batch) -> String {
        let declarations = batch
            .declarations
            .iter()
            .map(|decl| self.serialize(&Statement::from(decl.clone())))
            .collect::<Vec<_>>()
            .join("\n");

        let fetches = batch
            .fetches
            .iter()
            .map(|fetch| {
                let insert = self.serialize(&Statement::from(fetch.clone()));
                let select = self.serialize(&Statement::select_all(fetch.target.clone()));
                format!("{insert}\n{select}")
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        if fetches.is_empty() {
            declarations
        } else {
            format!("{declarations}\n\n{fetches}")
        }
    }
}
