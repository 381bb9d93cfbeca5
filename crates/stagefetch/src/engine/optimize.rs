// Rewrites
mod lift_round_trip;
mod merge_duplicates;


use super::graph::{Graph, NodeId};

/// Rewrites the graph until no rule applies. Returns the number of rewrites
/// performed, so running it on its own output returns `0`.
///
/// Every rewrite removes at least one connection, which bounds the number of
/// sweeps.
pub(crate) fn apply(graph: &mut Graph) -> usize {
    let mut optimize = Optimize { graph, rewrites: 0 };
    let mut sweeps = 0;

    loop {
        sweeps += 1;

        if !optimize.sweep() {
            break;
        }
    }

    log::debug!(
        "optimized join graph; rewrites={} sweeps={sweeps}",
        optimize.rewrites
    );

    optimize.rewrites
}

struct Optimize<'a> {
    graph: &'a mut Graph,
    rewrites: usize,
}

impl Optimize<'_> {
    /// One pass over the reachable nodes in depth-first order. Returns `true`
    /// if anything changed.
    fn sweep(&mut self) -> bool {
        let before = self.rewrites;

        for id in self.graph.reachable() {
            // An earlier rewrite in this sweep may have dropped the node.
            if !self.graph.is_reachable(id) {
                continue;
            }

            while self.merge_duplicates(id) || self.lift_round_trip(id) {
                self.rewrites += 1;
            }
        }

        self.rewrites != before
    }

    /// Folds `drop` into `keep`: `drop`'s fields and outgoing connections move
    /// to `keep` and every connection into `drop` now points at `keep`.
    /// `drop` is left in the arena, detached.
    fn merge_node(&mut self, keep: NodeId, drop: NodeId) {
        debug_assert_ne!(keep, drop);
        debug_assert_ne!(drop, self.graph.root);

        let used = std::mem::take(&mut self.graph[drop].used);
        self.graph[keep].used.extend(used);

        for connection in std::mem::take(&mut self.graph[drop].connections) {
            if connection.to != keep && connection.to != drop {
                self.graph.insert_connection(keep, connection);
            }
        }

        self.retarget(drop, keep);
    }

    /// Points every connection into `from` at `to`, dropping connections that
    /// become self-loops or duplicates.
    fn retarget(&mut self, from: NodeId, to: NodeId) {
        for id in self.graph.nodes.indices() {
            let mut index = 0;

            while index < self.graph[id].connections.len() {
                if self.graph[id].connections[index].to != from {
                    index += 1;
                    continue;
                }

                let fields = self.graph[id].connections[index].fields.clone();

                if id == to || self.graph.has_connection(id, to, &fields) {
                    self.graph[id].connections.remove(index);
                } else {
                    self.graph[id].connections[index].to = to;
                    index += 1;
                }
            }
        }
    }
}
