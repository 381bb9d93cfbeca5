use super::{
    graph::{Connection, Graph, NodeId},
    Config,
};

use indexmap::IndexMap;
use stagefetch_core::{Catalog, Error, Result};
use stagefetch_sql::stmt::{
    Batch, ColumnDef, DeclareTable, InsertSelect, JoinSource, KeyFilter, Previous, Source,
    TableVar,
};
use std::collections::HashSet;

/// Lowers the join graph to a staged fetch batch.
///
/// The root is fetched by primary key. Every other node is fetched by
/// joining the table variable of the node it was reached from, walking the
/// connections depth-first. A node reached a second time is not fetched
/// again.
pub(crate) fn apply(graph: &Graph, catalog: &dyn Catalog, config: &Config) -> Result<Batch> {
    let mut emit = Emit {
        graph,
        catalog,
        config,
        vars: IndexMap::new(),
        names: HashSet::new(),
        batch: Batch::default(),
    };

    emit.root()?;
    emit.connections(graph.root)?;

    Ok(emit.batch)
}

struct Emit<'a> {
    graph: &'a Graph,
    catalog: &'a dyn Catalog,
    config: &'a Config,

    /// Table variable assigned to each emitted node, in discovery order
    vars: IndexMap<NodeId, TableVar>,

    /// Table variable names already taken
    names: HashSet<String>,

    batch: Batch,
}

impl Emit<'_> {
    fn root(&mut self) -> Result<()> {
        let graph = self.graph;
        let root = graph.root;
        let relation = &graph[root].relation;
        let target = self.declare(root)?;

        let filters = self
            .catalog
            .primary_key(relation)?
            .iter()
            .enumerate()
            .map(|(index, column)| KeyFilter {
                column: column.clone(),
                param: format!("{}{index}", self.config.parameter_prefix),
            })
            .collect();

        self.batch.fetches.push(InsertSelect {
            target,
            columns: graph.select_fields(root, self.catalog)?,
            relation: relation.clone(),
            source: Source::Key(filters),
        });

        Ok(())
    }

    fn connections(&mut self, id: NodeId) -> Result<()> {
        let graph = self.graph;

        for connection in &graph[id].connections {
            let from_is_pk = self.check_join(id, connection)?;

            if self.vars.contains_key(&connection.to) {
                log::trace!(
                    "{}#{} already fetched; skipping connection from {}#{}",
                    graph[connection.to].relation,
                    connection.to.index(),
                    graph[id].relation,
                    id.index()
                );
                continue;
            }

            self.join(id, connection, from_is_pk)?;
            self.connections(connection.to)?;
        }

        Ok(())
    }

    /// Each hop must be keyed on at least one side or the staged rows cannot
    /// be matched back up. Returns `true` if the `from` side is keyed.
    fn check_join(&self, from: NodeId, connection: &Connection) -> Result<bool> {
        let graph = self.graph;
        let from_relation = &graph[from].relation;
        let to_relation = &graph[connection.to].relation;
        let from_fields = connection.fields.from_set();
        let to_fields = connection.fields.to_set();

        let from_is_pk = self.catalog.is_primary_key(from_relation, &from_fields)?;

        if !from_is_pk && !self.catalog.is_primary_key(to_relation, &to_fields)? {
            return Err(Error::invalid_join(
                from_relation,
                &from_fields[..],
                to_relation,
                &to_fields[..],
            ));
        }

        Ok(from_is_pk)
    }

    fn join(&mut self, from: NodeId, connection: &Connection, from_is_pk: bool) -> Result<()> {
        let graph = self.graph;
        let to = connection.to;

        let var = self.vars[&from].clone();
        let previous = if from_is_pk {
            Previous::Distinct {
                var,
                columns: connection.fields.from_set(),
            }
        } else {
            Previous::Var(var)
        };

        let on = connection
            .fields
            .pairs()
            .map(|(from_field, to_field)| (to_field.to_string(), from_field.to_string()))
            .collect();

        let target = self.declare(to)?;

        self.batch.fetches.push(InsertSelect {
            target,
            columns: graph.select_fields(to, self.catalog)?,
            relation: graph[to].relation.clone(),
            source: Source::Join(JoinSource { previous, on }),
        });

        Ok(())
    }

    /// Assigns `id` a table variable and declares it with the node's fields.
    fn declare(&mut self, id: NodeId) -> Result<TableVar> {
        let graph = self.graph;
        let relation = &graph[id].relation;

        let columns = graph
            .select_fields(id, self.catalog)?
            .into_iter()
            .map(|name| {
                let ty = self.catalog.sql_type(relation, &name)?.to_string();
                Ok(ColumnDef { name, ty })
            })
            .collect::<Result<Vec<_>>>()?;

        let var = self.var_name(relation);
        log::trace!("declare {var} for {relation}#{}", id.index());

        self.vars.insert(id, var.clone());
        self.batch.declarations.push(DeclareTable {
            var: var.clone(),
            columns,
        });

        Ok(var)
    }

    /// `<prefix><relation>`, with `.` replaced by `_`. Collisions get a
    /// counter suffix starting at 1.
    fn var_name(&mut self, relation: &str) -> TableVar {
        let base = format!(
            "{}{}",
            self.config.table_variable_prefix,
            relation.replace('.', "_")
        );

        let mut name = base.clone();
        let mut counter = 1;

        while self.names.contains(&name) {
            name = format!("{base}{counter}");
            counter += 1;
        }

        self.names.insert(name.clone());
        TableVar(name)
    }
}
