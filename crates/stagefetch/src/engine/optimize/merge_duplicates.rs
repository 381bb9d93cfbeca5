use super::Optimize;
use crate::engine::graph::NodeId;

impl Optimize<'_> {
    /// Two connections out of `id` that reach the same relation on the same
    /// fields fetch the same rows. The second target is folded into the
    /// first and its connection removed.
    ///
    /// The root is never folded away; if the duplicate target is the root,
    /// the other target is folded into it instead.
    pub(super) fn merge_duplicates(&mut self, id: NodeId) -> bool {
        let Some((index, keep, drop)) = self.find_duplicate(id) else {
            return false;
        };

        log::trace!(
            "merge duplicate {}#{} into #{} (via {}#{})",
            self.graph[drop].relation,
            drop.index(),
            keep.index(),
            self.graph[id].relation,
            id.index()
        );

        self.graph[id].connections.remove(index);

        if keep != drop {
            self.merge_node(keep, drop);
        }

        true
    }

    /// Returns the index of the connection to remove, the node to keep, and
    /// the node to fold into it.
    fn find_duplicate(&self, id: NodeId) -> Option<(usize, NodeId, NodeId)> {
        let graph = &*self.graph;
        let connections = &graph[id].connections;

        for (i, first) in connections.iter().enumerate() {
            for (j, second) in connections.iter().enumerate().skip(i + 1) {
                if graph[first.to].relation != graph[second.to].relation
                    || first.fields != second.fields
                {
                    continue;
                }

                return Some(if second.to == graph.root {
                    (i, second.to, first.to)
                } else {
                    (j, first.to, second.to)
                });
            }
        }

        None
    }
}
