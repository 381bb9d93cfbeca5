use super::Translator;
use crate::engine::Config;

use stagefetch_core::Catalog;

#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Set the prefix of table variable names. Defaults to `@table`.
    pub fn table_variable_prefix(&mut self, prefix: &str) -> &mut Self {
        self.config.table_variable_prefix = prefix.to_string();
        self
    }

    /// Set the prefix of the root key parameters. Defaults to `@p`.
    pub fn parameter_prefix(&mut self, prefix: &str) -> &mut Self {
        self.config.parameter_prefix = prefix.to_string();
        self
    }

    /// Enable or disable the join graph optimizer. Enabled by default.
    pub fn optimize(&mut self, optimize: bool) -> &mut Self {
        self.config.optimize = optimize;
        self
    }

    pub fn build<C: Catalog>(&self, catalog: C) -> Translator<C> {
        Translator {
            catalog,
            config: self.config.clone(),
        }
    }
}
