use super::Connection;

use std::collections::BTreeSet;

/// One occurrence of a relation in the join graph.
#[derive(Debug)]
pub(crate) struct RelationNode {
    pub(crate) relation: String,

    /// Fields the query reads or joins on, kept sorted and deduplicated.
    pub(crate) used: BTreeSet<String>,

    /// Outgoing connections, in discovery order.
    pub(crate) connections: Vec<Connection>,
}

impl RelationNode {
    pub(super) fn new(relation: impl Into<String>) -> RelationNode {
        RelationNode {
            relation: relation.into(),
            used: BTreeSet::new(),
            connections: vec![],
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.connections.is_empty()
    }
}
