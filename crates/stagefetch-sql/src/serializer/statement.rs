use super::{Comma, Delimited, Formatter, Ident, Period, ToSql, CURRENT, PREVIOUS};

use crate::stmt::{self, Statement};

/// `current.<column>`
struct Current<'a>(&'a str);

/// `previous.<column>`
struct Prev<'a>(&'a str);

impl ToSql for Current<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        Period([Ident(CURRENT), Ident(self.0)]).to_sql(f);
    }
}

impl ToSql for Prev<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        Period([Ident(PREVIOUS), Ident(self.0)]).to_sql(f);
    }
}

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Statement::DeclareTable(stmt) => stmt.to_sql(f),
            Statement::InsertSelect(stmt) => stmt.to_sql(f),
            Statement::SelectAll(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::TableVar {
    fn to_sql(self, f: &mut Formatter<'_>) {
        Ident(self.as_str()).to_sql(f);
    }
}

impl ToSql for &stmt::ColumnDef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let ty = &self.ty;
        fmt!(f, Ident(&self.name) " " ty);
    }
}

impl ToSql for &stmt::DeclareTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let var = &self.var;
        let columns = Comma(&self.columns);
        fmt!(f, "DECLARE " var " TABLE(" columns ")");
    }
}

impl ToSql for &stmt::SelectAll {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let var = &self.var;
        fmt!(f, "SELECT * FROM " var);
    }
}

impl ToSql for &stmt::InsertSelect {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let target = &self.target;
        let columns = Comma(self.columns.iter().map(|column| Current(column)));

        fmt!(
            f, "INSERT INTO " target " SELECT " columns " FROM " Ident(&self.relation) " AS " CURRENT
        );

        match &self.source {
            stmt::Source::Key(filters) => {
                let filters = Delimited(
                    filters
                        .iter()
                        .map(|filter| (Current(&filter.column), &filter.param)),
                    " AND ",
                );
                fmt!(f, " WHERE " filters);
            }
            stmt::Source::Join(join) => {
                let on = Delimited(
                    join.on
                        .iter()
                        .map(|(current, previous)| (Current(current), Prev(previous))),
                    " AND ",
                );
                let previous = &join.previous;
                fmt!(f, " INNER JOIN " previous " AS " PREVIOUS " ON " on);
            }
        }
    }
}

impl ToSql for &stmt::Previous {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            stmt::Previous::Var(var) => var.to_sql(f),
            stmt::Previous::Distinct { var, columns } => {
                let columns = Comma(columns.iter().map(Ident));
                fmt!(f, "(SELECT DISTINCT " columns " FROM " var ")");
            }
        }
    }
}

/// Equality between a `current` column and a parameter or `previous` column.
impl<L: ToSql, R: ToSql> ToSql for (L, R) {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, self.0 " = " self.1);
    }
}
