use super::{Graph, NodeId};
use crate::engine::ir::{Ir, IrId, IrKind};

use indexmap::IndexMap;
use stagefetch_core::{stmt::BinaryOp, Catalog, Error, Result};

/// Builds the join graph for a query's IR.
///
/// Every relation the query touches becomes a node. Associations and
/// equality predicates between two row sources become connections. Fails if
/// a node ends up unreachable from the root.
pub(crate) fn build(ir: &Ir, catalog: &dyn Catalog) -> Result<Graph> {
    let IrKind::Table { relation } = &ir[ir.root].kind else {
        return Err(Error::unsupported_expression(
            "query must be a chain starting at a relation",
        ));
    };

    catalog.primary_key(relation)?;

    let mut builder = Builder {
        ir,
        catalog,
        graph: Graph::new(relation),
        sources: IndexMap::new(),
    };

    builder.chain(ir.root)?;
    builder.graph.orient();
    builder.graph.validate()?;

    Ok(builder.graph)
}

struct Builder<'a> {
    ir: &'a Ir,
    catalog: &'a dyn Catalog,
    graph: Graph,

    /// What each walked IR step resolved to. Parameter references look their
    /// target up here.
    sources: IndexMap<IrId, Resolved>,
}

/// What a chain, or a prefix of one, evaluates to.
#[derive(Debug, Clone)]
enum Resolved {
    /// Rows of a graph node.
    Node { id: NodeId, hop: Option<Hop> },

    /// A field of a graph node's rows.
    Field {
        node: NodeId,
        field: String,
        hop: Option<Hop>,
    },

    /// Named outputs of a projection whose members have not been accessed
    /// yet.
    Projection(Vec<(String, Resolved)>),

    /// A computed value, a literal, or a predicate.
    Scalar,
}

/// The association step a node was reached through.
#[derive(Debug, Clone)]
struct Hop {
    from: NodeId,
    column: String,
    next_column: String,
}

impl Builder<'_> {
    fn operand(&mut self, id: IrId) -> Result<Resolved> {
        if self.ir[id].kind.is_tree() {
            self.tree(id)?;
            Ok(Resolved::Scalar)
        } else {
            self.chain(id)
        }
    }

    fn chain(&mut self, head: IrId) -> Result<Resolved> {
        let ir = self.ir;
        let mut current = Resolved::Scalar;

        for (id, node) in ir.chain(head) {
            current = match &node.kind {
                IrKind::Table { relation } => {
                    let node = if id == ir.root {
                        self.graph.root
                    } else {
                        self.catalog.primary_key(relation)?;
                        self.graph.add_node(relation)
                    };

                    Resolved::Node { id: node, hop: None }
                }
                IrKind::ReferenceRowSource { target } => match self.sources.get(target) {
                    // A parameter names the row itself, not the hop that led
                    // to it.
                    Some(Resolved::Node { id, .. }) => Resolved::Node { id: *id, hop: None },
                    Some(resolved) => resolved.clone(),
                    None => {
                        return Err(Error::unresolved_reference(
                            "parameter refers to a row source that was never built",
                        ))
                    }
                },
                IrKind::Association {
                    column,
                    next_relation,
                    next_column,
                } => self.association(current, column, next_relation, next_column)?,
                IrKind::ColumnAccess { column } => self.column(current, column)?,
                IrKind::Select { outputs } => {
                    let mut resolved = Vec::with_capacity(outputs.len());

                    for output in outputs {
                        let value = self.operand(output.inner)?;
                        resolved.push((output.name.clone().unwrap_or_default(), value));
                    }

                    // A single-value projection stands for its value.
                    match &outputs[..] {
                        [single] if single.name.is_none() => resolved.swap_remove(0).1,
                        _ => Resolved::Projection(resolved),
                    }
                }
                IrKind::Filter { inner } => {
                    self.operand(*inner)?;
                    current
                }
                IrKind::FilterBinary { .. } | IrKind::FilterUnary { .. } | IrKind::FixedValue => {
                    unreachable!("predicate node inside a chain; kind={:?}", node.kind)
                }
            };

            self.sources.insert(id, current.clone());
        }

        Ok(current)
    }

    fn association(
        &mut self,
        current: Resolved,
        column: &str,
        next_relation: &str,
        next_column: &str,
    ) -> Result<Resolved> {
        let Resolved::Node { id: from, .. } = current else {
            return Err(Error::unresolved_reference(format!(
                "association to `{next_relation}` is not navigated from a row"
            )));
        };

        self.catalog.sql_type(&self.graph[from].relation, column)?;
        self.catalog.sql_type(next_relation, next_column)?;

        let to = self.graph.add_node(next_relation);
        self.graph.add_connection(
            from,
            &[column.to_string()],
            to,
            &[next_column.to_string()],
        );

        Ok(Resolved::Node {
            id: to,
            hop: Some(Hop {
                from,
                column: column.to_string(),
                next_column: next_column.to_string(),
            }),
        })
    }

    fn column(&mut self, current: Resolved, column: &str) -> Result<Resolved> {
        match current {
            Resolved::Node { id, hop } => {
                self.catalog.sql_type(&self.graph[id].relation, column)?;
                self.graph[id].used.insert(column.to_string());

                Ok(Resolved::Field {
                    node: id,
                    field: column.to_string(),
                    hop,
                })
            }
            Resolved::Projection(outputs) => outputs
                .into_iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| value)
                .ok_or_else(|| {
                    Error::unresolved_reference(format!("projection has no member `{column}`"))
                }),
            Resolved::Field { .. } | Resolved::Scalar => Err(Error::unresolved_reference(
                format!("member `{column}` accessed on a scalar"),
            )),
        }
    }

    fn tree(&mut self, id: IrId) -> Result<()> {
        let ir = self.ir;

        match &ir[id].kind {
            IrKind::FilterBinary { op, lhs, rhs } => {
                let joins = *op == BinaryOp::Eq && !ir.is_fixed(*lhs) && !ir.is_fixed(*rhs);

                if joins {
                    let lhs = self.operand(*lhs)?;
                    let rhs = self.operand(*rhs)?;
                    self.detect_connections(lhs, rhs)?;
                } else {
                    // Comparisons against a constant only record the fields
                    // they read.
                    for side in [*lhs, *rhs] {
                        if !ir.is_fixed(side) {
                            self.operand(side)?;
                        }
                    }
                }
            }
            IrKind::FilterUnary { operand, .. } => {
                self.operand(*operand)?;
            }
            IrKind::FixedValue => {}
            kind => unreachable!("not a predicate node; kind={kind:?}"),
        }

        Ok(())
    }

    /// Turns `lhs == rhs` between two row sources into a connection.
    fn detect_connections(&mut self, lhs: Resolved, rhs: Resolved) -> Result<()> {
        let (lhs_node, lhs_fields) = self.join_side(lhs)?;
        let (rhs_node, rhs_fields) = self.join_side(rhs)?;

        if lhs_fields.len() != rhs_fields.len() {
            return Err(Error::unsupported_expression(format!(
                "comparison between {} field(s) of `{}` and {} field(s) of `{}`",
                lhs_fields.len(),
                self.graph[lhs_node].relation,
                rhs_fields.len(),
                self.graph[rhs_node].relation,
            )));
        }

        if lhs_node == rhs_node {
            log::trace!(
                "comparison within {}#{}; no connection",
                self.graph[lhs_node].relation,
                lhs_node.index()
            );
            let node = &mut self.graph[lhs_node];
            node.used.extend(lhs_fields);
            node.used.extend(rhs_fields);
            return Ok(());
        }

        if let Some((owner, index)) = self.graph.connection_between(lhs_node, rhs_node) {
            for (lhs_field, rhs_field) in lhs_fields.iter().zip(&rhs_fields) {
                self.graph
                    .extend_connection(owner, index, lhs_node, lhs_field, rhs_field);
            }
            return Ok(());
        }

        // Hang the new edge off whichever side the root already reaches.
        let lhs_reachable = self.graph.is_reachable(lhs_node);
        let rhs_reachable = self.graph.is_reachable(rhs_node);

        if rhs_reachable && !lhs_reachable {
            self.graph
                .add_connection(rhs_node, &rhs_fields, lhs_node, &lhs_fields);
        } else {
            self.graph
                .add_connection(lhs_node, &lhs_fields, rhs_node, &rhs_fields);
        }

        Ok(())
    }

    /// Resolves one side of a join comparison to a node and the fields it
    /// contributes.
    ///
    /// * a row alone stands for its primary key,
    /// * `row.field` is that field,
    /// * `row.association` is the association's join column,
    /// * `row.association.key` is the join column too, provided `key` is the
    ///   associated relation's whole primary key.
    fn join_side(&self, resolved: Resolved) -> Result<(NodeId, Vec<String>)> {
        match resolved {
            Resolved::Node { hop: Some(hop), .. } => Ok((hop.from, vec![hop.column])),
            Resolved::Node { id, hop: None } => {
                let pk = self.catalog.primary_key(&self.graph[id].relation)?;
                Ok((id, pk.to_vec()))
            }
            Resolved::Field {
                node,
                field,
                hop: Some(hop),
            } if field == hop.next_column
                && self
                    .catalog
                    .is_primary_key(&self.graph[node].relation, &[field.clone()])? =>
            {
                Ok((hop.from, vec![hop.column]))
            }
            Resolved::Field { node, field, .. } => Ok((node, vec![field])),
            Resolved::Projection(_) | Resolved::Scalar => Err(Error::unsupported_expression(
                "equality between expressions that are neither rows nor fields",
            )),
        }
    }
}
