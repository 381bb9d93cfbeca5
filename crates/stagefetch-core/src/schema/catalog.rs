use crate::Result;

/// Read-only metadata consulted while translating a query.
///
/// [`Schema`](super::Schema) is the stock implementation. Callers that keep
/// their metadata elsewhere can implement this trait directly.
pub trait Catalog {
    /// Primary-key field names of `relation`, in key order. Never empty.
    fn primary_key(&self, relation: &str) -> Result<&[String]>;

    /// SQL type of `relation.field`, as it should appear in a table variable
    /// declaration.
    fn sql_type(&self, relation: &str, field: &str) -> Result<&str>;

    /// Returns `true` if `fields` is exactly the primary-key field set of
    /// `relation`, ignoring order.
    fn is_primary_key(&self, relation: &str, fields: &[String]) -> Result<bool> {
        let pk = self.primary_key(relation)?;

        if pk.len() != fields.len() {
            return Ok(false);
        }

        Ok(fields.iter().all(|field| pk.contains(field))
            && pk.iter().all(|pk_field| fields.contains(pk_field)))
    }
}

impl<T: Catalog + ?Sized> Catalog for &T {
    fn primary_key(&self, relation: &str) -> Result<&[String]> {
        (**self).primary_key(relation)
    }

    fn sql_type(&self, relation: &str, field: &str) -> Result<&str> {
        (**self).sql_type(relation, field)
    }
}
