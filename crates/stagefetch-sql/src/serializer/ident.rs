use super::{Formatter, ToSql};

/// A relation, column, or table variable name.
///
/// Names come from the schema catalog and are written as-is, so
/// schema-qualified relations (`dbo.Customer`) keep their dots.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self.0.as_ref());
    }
}
