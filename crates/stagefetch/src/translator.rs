mod builder;
pub use builder::Builder;

use crate::engine::{self, Config};

use stagefetch_core::{stmt::Expr, Catalog, Result, Schema};
use stagefetch_sql::{Batch, Serializer};

/// Translates query expressions into staged fetch batches against one
/// catalog.
///
/// A translator holds no per-query state, so a single instance can translate
/// any number of queries, from any number of threads if the catalog allows.
#[derive(Debug)]
pub struct Translator<C = Schema> {
    catalog: C,
    config: Config,
}

impl Translator<Schema> {
    /// Returns a builder to customize table variable naming, parameter
    /// naming, or to turn off the optimizer.
    pub fn builder() -> Builder {
        Builder::default()
    }
}

impl<C: Catalog> Translator<C> {
    /// Creates a translator with the default configuration.
    pub fn new(catalog: C) -> Translator<C> {
        Translator {
            catalog,
            config: Config::default(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Translates `query` into the SQL text of its staged fetch batch.
    ///
    /// The root relation is fetched by primary key; the key values are bound
    /// to `@p0`, `@p1`, ... (with the default parameter prefix) in key order.
    pub fn translate(&self, query: &Expr) -> Result<String> {
        let batch = self.plan(query)?;
        Ok(Serializer::new().serialize_batch(&batch))
    }

    /// Translates `query` into the statements of its staged fetch batch
    /// without serializing them.
    pub fn plan(&self, query: &Expr) -> Result<Batch> {
        engine::plan(&self.catalog, &self.config, query)
    }
}
