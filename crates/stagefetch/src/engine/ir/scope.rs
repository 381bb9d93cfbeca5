use super::IrId;
use stagefetch_core::{Error, Result};

/// Lambda parameters visible at a point of the query, innermost first.
///
/// Each lambda extends its enclosing scope on the stack; nothing is mutated
/// and bindings disappear when the lambda's body has been built.
#[derive(Debug, Clone, Copy)]
pub(super) struct Scope<'a> {
    binding: Option<(&'a str, IrId)>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub(super) fn root() -> Scope<'static> {
        Scope {
            binding: None,
            parent: None,
        }
    }

    /// Binds `name` to the row source `target`. A parameter already bound in
    /// an enclosing scope cannot be bound again.
    pub(super) fn bind(&'a self, name: &'a str, target: IrId) -> Result<Scope<'a>> {
        if self.resolve(name).is_some() {
            return Err(Error::unsupported_expression(format!(
                "parameter `{name}` is already bound"
            )));
        }

        Ok(Scope {
            binding: Some((name, target)),
            parent: Some(self),
        })
    }

    pub(super) fn resolve(&self, name: &str) -> Option<IrId> {
        let mut scope = Some(self);

        while let Some(current) = scope {
            if let Some((bound, target)) = current.binding {
                if bound == name {
                    return Some(target);
                }
            }
            scope = current.parent;
        }

        None
    }
}
