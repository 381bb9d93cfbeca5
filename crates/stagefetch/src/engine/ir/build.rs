use super::{Ir, IrId, IrKind, IrNode, Scope, SelectOutput};
use crate::engine::normalize::{self, ChainCall, Normalized, Step, Tree};

use index_vec::IndexVec;
use stagefetch_core::{
    stmt::{Expr, Member},
    Error, Result,
};

/// Builds the IR for a query. The query must be a chain led by a relation.
pub(crate) fn build(expr: &Expr) -> Result<Ir> {
    let Normalized::Chain(steps) = normalize::apply(expr)? else {
        return Err(Error::unsupported_expression(
            "query must be a chain starting at a relation",
        ));
    };

    if !matches!(steps.first(), Some(Step::Table(_))) {
        return Err(Error::unsupported_expression(
            "query must be a chain starting at a relation",
        ));
    }

    let mut builder = Builder {
        nodes: IndexVec::new(),
    };

    let root = builder.chain(steps, &Scope::root())?;

    Ok(Ir {
        nodes: builder.nodes,
        root,
    })
}

struct Builder {
    nodes: IndexVec<IrId, IrNode>,
}

/// Position within the chain currently being built.
#[derive(Default)]
struct Cursor {
    head: Option<IrId>,
    tail: Option<IrId>,

    /// The step a following call or member access applies to. `None` once
    /// the chain has narrowed to a scalar.
    row_source: Option<IrId>,
}

impl Builder {
    fn push(&mut self, kind: IrKind) -> IrId {
        self.nodes.push(IrNode {
            kind,
            prev: None,
            next: None,
            parent: None,
        })
    }

    fn append(&mut self, cursor: &mut Cursor, kind: IrKind) -> IrId {
        let id = self.push(kind);

        match cursor.tail {
            Some(tail) => {
                self.nodes[tail].next = Some(id);
                self.nodes[id].prev = Some(tail);
            }
            None => cursor.head = Some(id),
        }

        cursor.tail = Some(id);
        id
    }

    fn set_parent(&mut self, child: IrId, parent: IrId) {
        debug_assert!(self.nodes[child].parent.is_none());
        self.nodes[child].parent = Some(parent);
    }

    /// Builds a chain, a tree, or a fixed value, whichever `expr` is.
    fn operand(&mut self, expr: &Expr, scope: &Scope<'_>) -> Result<IrId> {
        match normalize::apply(expr)? {
            Normalized::Chain(steps) => self.chain(steps, scope),
            Normalized::Tree(tree) => self.tree(tree, scope),
            Normalized::Fixed => Ok(self.push(IrKind::FixedValue)),
        }
    }

    fn tree(&mut self, tree: Tree<'_>, scope: &Scope<'_>) -> Result<IrId> {
        match tree {
            Tree::Binary { op, lhs, rhs } => {
                let lhs = self.operand(lhs, scope)?;
                let rhs = self.operand(rhs, scope)?;
                let id = self.push(IrKind::FilterBinary { op, lhs, rhs });
                self.set_parent(lhs, id);
                self.set_parent(rhs, id);
                Ok(id)
            }
            Tree::Unary { op, operand } => {
                let operand = self.operand(operand, scope)?;
                let id = self.push(IrKind::FilterUnary { op, operand });
                self.set_parent(operand, id);
                Ok(id)
            }
        }
    }

    fn chain(&mut self, steps: Vec<Step<'_>>, scope: &Scope<'_>) -> Result<IrId> {
        let mut cursor = Cursor::default();

        for step in steps {
            match step {
                Step::Table(relation) => {
                    if cursor.head.is_some() {
                        return Err(Error::unsupported_expression(format!(
                            "relation `{relation}` in the middle of a chain"
                        )));
                    }

                    let id = self.append(
                        &mut cursor,
                        IrKind::Table {
                            relation: relation.to_string(),
                        },
                    );
                    cursor.row_source = Some(id);
                }
                Step::Param(name) => {
                    let target = scope.resolve(name).ok_or_else(|| {
                        Error::unresolved_reference(format!("parameter `{name}` is not bound"))
                    })?;

                    let id = self.append(&mut cursor, IrKind::ReferenceRowSource { target });
                    cursor.row_source = Some(id);
                }
                Step::Member(member) => {
                    if cursor.row_source.is_none() {
                        return Err(Error::unresolved_reference(format!(
                            "member `{}` accessed on a scalar",
                            member.name()
                        )));
                    }

                    let (kind, row_source) = match member {
                        Member::Column(column) => (
                            IrKind::ColumnAccess {
                                column: column.clone(),
                            },
                            false,
                        ),
                        // A projected member may name a row-source output;
                        // the graph builder decides.
                        Member::Projected(name) => (
                            IrKind::ColumnAccess {
                                column: name.clone(),
                            },
                            true,
                        ),
                        Member::Association(assoc) => (
                            IrKind::Association {
                                column: assoc.this_key.clone(),
                                next_relation: assoc.other_relation.clone(),
                                next_column: assoc.other_key.clone(),
                            },
                            true,
                        ),
                    };

                    let id = self.append(&mut cursor, kind);
                    cursor.row_source = row_source.then_some(id);
                }
                Step::Call(call) => self.call(&mut cursor, call, scope)?,
            }
        }

        cursor
            .head
            .ok_or_else(|| Error::unsupported_expression("empty chain"))
    }

    fn call(&mut self, cursor: &mut Cursor, call: ChainCall<'_>, scope: &Scope<'_>) -> Result<()> {
        // `Any()` / `Single()` without a predicate do not narrow anything.
        let Some(lambda) = call.lambda else {
            return Ok(());
        };

        let Some(source) = cursor.row_source else {
            return Err(Error::unresolved_reference(format!(
                "`{:?}` applied to a scalar",
                call.op
            )));
        };

        let [param] = &lambda.params[..] else {
            return Err(Error::unsupported_expression(format!(
                "lambda passed to `{:?}` must take one parameter",
                call.op
            )));
        };

        let scope = scope.bind(param, self.resolve_source(source))?;

        if call.op.is_projection() {
            let outputs = self.outputs(&lambda.body, &scope)?;
            let inner: Vec<_> = outputs.iter().map(|output| output.inner).collect();

            let id = self.append(cursor, IrKind::Select { outputs });
            for child in inner {
                self.set_parent(child, id);
            }

            cursor.row_source = Some(id);
        } else {
            let inner = self.operand(&lambda.body, &scope)?;
            let id = self.append(cursor, IrKind::Filter { inner });
            self.set_parent(inner, id);
        }

        Ok(())
    }

    /// One output per constructed field, or a single unnamed output.
    fn outputs(&mut self, body: &Expr, scope: &Scope<'_>) -> Result<Vec<SelectOutput>> {
        let Expr::New(new) = normalize::unwrap(body)? else {
            return Ok(vec![SelectOutput {
                name: None,
                inner: self.operand(body, scope)?,
            }]);
        };

        let mut outputs = Vec::with_capacity(new.fields.len());

        for (name, expr) in &new.fields {
            outputs.push(SelectOutput {
                name: Some(name.clone()),
                inner: self.operand(expr, scope)?,
            });
        }

        Ok(outputs)
    }

    /// Parameters bind to the row source a reference points at, never to
    /// the reference itself.
    fn resolve_source(&self, id: IrId) -> IrId {
        match self.nodes[id].kind {
            IrKind::ReferenceRowSource { target } => target,
            _ => id,
        }
    }
}
