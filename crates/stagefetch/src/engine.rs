mod emit;
mod graph;
mod ir;
mod normalize;
mod optimize;

#[cfg(test)]
mod fixture;

use stagefetch_core::{stmt::Expr, Catalog, Result};
use stagefetch_sql::Batch;

/// Knobs that shape the emitted batch.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    /// Prepended to every table variable name
    pub(crate) table_variable_prefix: String,

    /// Prepended to the index of each root primary-key parameter
    pub(crate) parameter_prefix: String,

    /// Run the graph optimizer before emitting
    pub(crate) optimize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            table_variable_prefix: "@table".to_string(),
            parameter_prefix: "@p".to_string(),
            optimize: true,
        }
    }
}

/// Runs the translation pipeline. Stages run strictly in order and the first
/// failure aborts the whole translation.
pub(crate) fn plan(catalog: &dyn Catalog, config: &Config, expr: &Expr) -> Result<Batch> {
    let ir = ir::build(expr)?;
    log::debug!("built IR; nodes={}", ir.nodes.len());

    if cfg!(debug_assertions) {
        ir.verify();
    }

    let mut graph = graph::build(&ir, catalog)?;
    log::debug!(
        "built join graph; root={} nodes={} connections={}",
        graph[graph.root].relation,
        graph.nodes.len(),
        graph.connection_count()
    );

    if config.optimize {
        optimize::apply(&mut graph);
    }

    let batch = emit::apply(&graph, catalog, config)?;
    log::debug!(
        "emitted batch; declarations={} fetches={}",
        batch.declarations.len(),
        batch.fetches.len()
    );

    Ok(batch)
}
