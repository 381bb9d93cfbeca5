use super::Optimize;
use crate::engine::graph::NodeId;

impl Optimize<'_> {
    /// Collapses `X -> Y -> X'` where the second hop walks the first one
    /// backwards and `X'` is the same relation as `X`: the rows of `X'` are
    /// the rows of `X`. The back edge is removed and `X'` is folded into `X`,
    /// so whatever hung off `X'` now hangs off `X` as a sibling of `Y`.
    ///
    /// A back edge owned by `X'` and pointing at `Y` is flipped into
    /// `Y -> X'` by `Graph::orient` before optimizing, so only the reversed
    /// form needs matching here. A back edge with the *same* mapped fields as
    /// the forward one is not a round trip: `Customer.ReferrerId -> Id` twice
    /// reaches the referrer's referrer. Symmetric keys (`Id = Id`) are their
    /// own reverse and match either way.
    ///
    /// Candidates are tried in connection order; the first match wins.
    pub(super) fn lift_round_trip(&mut self, id: NodeId) -> bool {
        let Some((via, index, back)) = self.find_round_trip(id) else {
            return false;
        };

        log::trace!(
            "lift {}#{} -> {}#{} -> {}#{}",
            self.graph[id].relation,
            id.index(),
            self.graph[via].relation,
            via.index(),
            self.graph[back].relation,
            back.index()
        );

        self.graph[via].connections.remove(index);

        if back == id {
            // Plain two-node cycle.
        } else if back == self.graph.root {
            self.merge_node(back, id);
        } else {
            self.merge_node(id, back);
        }

        true
    }

    /// Returns the middle node, the index of the back edge in its
    /// connections, and the node the back edge reaches.
    fn find_round_trip(&self, id: NodeId) -> Option<(NodeId, usize, NodeId)> {
        let graph = &*self.graph;

        for forward in &graph[id].connections {
            let via = forward.to;

            for (index, back) in graph[via].connections.iter().enumerate() {
                if graph[back.to].relation == graph[id].relation
                    && back.fields.is_reverse_of(&forward.fields)
                {
                    return Some((via, index, back.to));
                }
            }
        }

        None
    }
}
