mod build;
pub(crate) use build::build;

mod connection;
pub(crate) use connection::{Connection, MappedFields};

mod node;
pub(crate) use node::RelationNode;

#[cfg(test)]
mod tests;

use index_vec::IndexVec;
use indexmap::IndexSet;
use stagefetch_core::{Catalog, Error, Result};
use std::ops;

/// Relations touched by a query and the foreign-key connections between them.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. The same
/// relation may appear as several nodes (self-joins, repeated navigation).
/// Nodes dropped by the optimizer stay in the arena but are no longer
/// reachable from the root.
#[derive(Debug)]
pub(crate) struct Graph {
    pub(crate) nodes: IndexVec<NodeId, RelationNode>,
    pub(crate) root: NodeId,
}

index_vec::define_index_type! {
    pub(crate) struct NodeId = u32;
}

impl Graph {
    pub(crate) fn new(root_relation: impl Into<String>) -> Graph {
        let mut nodes = IndexVec::new();
        let root = nodes.push(RelationNode::new(root_relation));
        Graph { nodes, root }
    }

    pub(crate) fn add_node(&mut self, relation: impl Into<String>) -> NodeId {
        self.nodes.push(RelationNode::new(relation))
    }

    /// Adds the edge `from(from_fields) -> to(to_fields)` and registers the
    /// fields on both endpoints.
    ///
    /// Adding an edge that already exists, in either orientation, is a no-op.
    /// Returns `true` if an edge was added.
    pub(crate) fn add_connection(
        &mut self,
        from: NodeId,
        from_fields: &[String],
        to: NodeId,
        to_fields: &[String],
    ) -> bool {
        let fields = MappedFields::new(from_fields, to_fields);
        self.insert_connection(from, Connection { to, fields })
    }

    pub(crate) fn insert_connection(&mut self, from: NodeId, connection: Connection) -> bool {
        let to = connection.to;

        if self.has_connection(from, to, &connection.fields) {
            return false;
        }

        log::trace!(
            "connect {}#{} -> {}#{} on {:?}",
            self[from].relation,
            from.index(),
            self[to].relation,
            to.index(),
            connection.fields
        );

        self.nodes[from]
            .used
            .extend(connection.fields.from_fields().map(str::to_string));
        self.nodes[to]
            .used
            .extend(connection.fields.to_fields().map(str::to_string));
        self.nodes[from].connections.push(connection);
        true
    }

    /// Returns `true` if `from` and `to` are already joined on `fields`, in
    /// either orientation.
    pub(crate) fn has_connection(&self, from: NodeId, to: NodeId, fields: &MappedFields) -> bool {
        let forward = self[from]
            .connections
            .iter()
            .any(|conn| conn.to == to && conn.fields == *fields);

        let backward = self[to]
            .connections
            .iter()
            .any(|conn| conn.to == from && conn.fields == fields.reversed());

        forward || backward
    }

    /// Locates a connection between `a` and `b` in either direction. Returns
    /// the owning node and the connection's index in its list.
    pub(crate) fn connection_between(&self, a: NodeId, b: NodeId) -> Option<(NodeId, usize)> {
        let find = |from: NodeId, to: NodeId| {
            self[from]
                .connections
                .iter()
                .position(|conn| conn.to == to)
                .map(|index| (from, index))
        };

        find(a, b).or_else(|| find(b, a))
    }

    /// Adds the pair `a.a_field = b.b_field` to the connection between `a`
    /// and `b`, orienting it to match the existing connection.
    pub(crate) fn extend_connection(
        &mut self,
        owner: NodeId,
        index: usize,
        a: NodeId,
        a_field: &str,
        b_field: &str,
    ) {
        let (from_field, to_field) = if owner == a {
            (a_field, b_field)
        } else {
            (b_field, a_field)
        };

        let to = self.nodes[owner].connections[index].to;

        if self.nodes[owner].connections[index]
            .fields
            .insert(from_field, to_field)
        {
            log::trace!(
                "extend {}#{} -> {}#{} with {from_field} = {to_field}",
                self[owner].relation,
                owner.index(),
                self[to].relation,
                to.index()
            );
            self.nodes[owner].used.insert(from_field.to_string());
            self.nodes[to].used.insert(to_field.to_string());
        }
    }

    /// Nodes reachable from the root, in depth-first discovery order.
    pub(crate) fn reachable(&self) -> IndexSet<NodeId> {
        let mut visited = IndexSet::new();
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }

            // Push in reverse so the first connection is visited first.
            for conn in self[id].connections.iter().rev() {
                if !visited.contains(&conn.to) {
                    stack.push(conn.to);
                }
            }
        }

        visited
    }

    pub(crate) fn is_reachable(&self, id: NodeId) -> bool {
        self.reachable().contains(&id)
    }

    /// Flips connections so every node joined to the root, in either
    /// direction, is reachable from it.
    ///
    /// Equality predicates fix an edge's direction when the edge is first
    /// seen, which may be before either endpoint is linked to the root.
    /// Connections are flipped one at a time, lowest node first, and only
    /// when they lead from an unreachable node into the reachable part.
    pub(crate) fn orient(&mut self) {
        loop {
            let reachable = self.reachable();

            let found = self.nodes.iter_enumerated().find_map(|(owner, node)| {
                if reachable.contains(&owner) {
                    return None;
                }

                node.connections
                    .iter()
                    .position(|conn| reachable.contains(&conn.to))
                    .map(|index| (owner, index))
            });

            let Some((owner, index)) = found else {
                break;
            };

            let connection = self.nodes[owner].connections.remove(index);
            let to = connection.to;

            log::trace!(
                "reorient {}#{} -> {}#{} on {:?}",
                self[owner].relation,
                owner.index(),
                self[to].relation,
                to.index(),
                connection.fields
            );

            self.nodes[to].connections.push(Connection {
                to: owner,
                fields: connection.fields.reversed(),
            });
        }
    }

    /// Fails if any node cannot be reached from the root.
    pub(crate) fn validate(&self) -> Result<()> {
        let reachable = self.reachable();

        for (id, node) in self.nodes.iter_enumerated() {
            if !reachable.contains(&id) {
                return Err(Error::disconnected_relation(&node.relation));
            }
        }

        Ok(())
    }

    /// Number of connections among the nodes reachable from the root.
    pub(crate) fn connection_count(&self) -> usize {
        self.reachable()
            .iter()
            .map(|id| self[*id].connections.len())
            .sum()
    }

    /// Fields staged for `id`, sorted. A leaf always includes its relation's
    /// primary key so its parent can join into it.
    pub(crate) fn select_fields(&self, id: NodeId, catalog: &dyn Catalog) -> Result<Vec<String>> {
        let node = &self[id];
        let mut fields = node.used.clone();

        if node.is_leaf() {
            fields.extend(catalog.primary_key(&node.relation)?.iter().cloned());
        }

        Ok(fields.into_iter().collect())
    }
}

impl ops::Index<NodeId> for Graph {
    type Output = RelationNode;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index]
    }
}

impl ops::IndexMut<NodeId> for Graph {
    fn index_mut(&mut self, index: NodeId) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}
