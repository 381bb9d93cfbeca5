mod build;
pub(crate) use build::build;

mod scope;
use scope::Scope;


use index_vec::IndexVec;
use stagefetch_core::stmt::{BinaryOp, UnaryOp};
use std::ops;

/// Intermediate form of a query: chains of row-source and field steps plus
/// predicate trees, stored in one arena.
///
/// Chains are singly linked through `next` (with `prev` back-links); tree
/// nodes point down to their operands and operands point back up through
/// `parent`. Links are written once while the IR is built and never change
/// afterwards.
#[derive(Debug)]
pub(crate) struct Ir {
    pub(crate) nodes: IndexVec<IrId, IrNode>,

    /// Head of the root chain. Always a [`IrKind::Table`].
    pub(crate) root: IrId,
}

index_vec::define_index_type! {
    pub(crate) struct IrId = u32;
}

#[derive(Debug)]
pub(crate) struct IrNode {
    pub(crate) kind: IrKind,

    /// Previous element of the chain this node belongs to
    pub(crate) prev: Option<IrId>,

    /// Next element of the chain this node belongs to
    pub(crate) next: Option<IrId>,

    /// The tree node or filter this chain or tree node hangs off
    pub(crate) parent: Option<IrId>,
}

#[derive(Debug)]
pub(crate) enum IrKind {
    /// Reads the rows of a relation. Starts the root chain, or a nested chain
    /// over an unrelated relation.
    Table { relation: String },

    /// Foreign-key hop: `column` of the current relation maps to
    /// `next_relation.next_column`.
    Association {
        column: String,
        next_relation: String,
        next_column: String,
    },

    /// Scalar field read, or a named output of a pending projection.
    ColumnAccess { column: String },

    /// Re-anchors a chain on an earlier row source through a bound lambda
    /// parameter.
    ReferenceRowSource { target: IrId },

    /// Projection producing one or more sub-chains. `name` is `None` for a
    /// single-value projection.
    Select { outputs: Vec<SelectOutput> },

    /// Wraps a nested chain or a predicate tree.
    Filter { inner: IrId },

    /// Binary node of a predicate tree.
    FilterBinary { op: BinaryOp, lhs: IrId, rhs: IrId },

    /// Unary node of a predicate tree.
    FilterUnary { op: UnaryOp, operand: IrId },

    /// A literal or closed-over variable.
    FixedValue,
}

#[derive(Debug)]
pub(crate) struct SelectOutput {
    pub(crate) name: Option<String>,
    pub(crate) inner: IrId,
}

impl Ir {
    /// Iterates a chain starting at `head`.
    pub(crate) fn chain(&self, head: IrId) -> impl Iterator<Item = (IrId, &IrNode)> + '_ {
        let mut cursor = Some(head);

        std::iter::from_fn(move || {
            let id = cursor?;
            let node = &self.nodes[id];
            cursor = node.next;
            Some((id, node))
        })
    }

    /// Returns `true` if the subtree at `id` only involves fixed values.
    pub(crate) fn is_fixed(&self, id: IrId) -> bool {
        match &self[id].kind {
            IrKind::FixedValue => true,
            IrKind::FilterBinary { lhs, rhs, .. } => self.is_fixed(*lhs) && self.is_fixed(*rhs),
            IrKind::FilterUnary { operand, .. } => self.is_fixed(*operand),
            _ => false,
        }
    }

    /// Checks that chain links and parent links agree. Only used in debug
    /// builds.
    pub(crate) fn verify(&self) {
        for (id, node) in self.nodes.iter_enumerated() {
            if let Some(next) = node.next {
                assert_eq!(self[next].prev, Some(id), "broken chain link; node={id:?}");
            }

            let children: Vec<IrId> = match &node.kind {
                IrKind::Filter { inner } => vec![*inner],
                IrKind::FilterBinary { lhs, rhs, .. } => vec![*lhs, *rhs],
                IrKind::FilterUnary { operand, .. } => vec![*operand],
                IrKind::Select { outputs } => outputs.iter().map(|output| output.inner).collect(),
                _ => vec![],
            };

            for child in children {
                assert_eq!(self[child].parent, Some(id), "broken parent link; node={id:?}");
            }
        }

        assert!(self[self.root].prev.is_none() && self[self.root].parent.is_none());
    }
}

impl IrKind {
    pub(crate) fn is_tree(&self) -> bool {
        matches!(
            self,
            IrKind::FilterBinary { .. } | IrKind::FilterUnary { .. } | IrKind::FixedValue
        )
    }
}

impl ops::Index<IrId> for Ir {
    type Output = IrNode;

    fn index(&self, index: IrId) -> &Self::Output {
        &self.nodes[index]
    }
}
