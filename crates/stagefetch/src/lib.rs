//! Translates a query expression into a staged, multi-statement SQL batch
//! that fetches the entity graph reachable from one root row.
//!
//! Rather than one wide join, each relation touched by the query is staged
//! into its own table variable and joined into the next hop, which keeps a
//! root that fans out into several collections from multiplying rows.
//!
//! ```ignore
//! let translator = Translator::new(schema);
//! let sql = translator.translate(&query)?;
//! ```

mod engine;

pub mod translator;
pub use translator::{Builder, Translator};

pub use stagefetch_core::{bail, err, schema, stmt, Catalog, Error, Result, Schema};
pub use stagefetch_sql::{stmt as sql, Batch};
