use std::fmt;

/// Name of a table variable, including its `@` sigil.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableVar(pub String);

impl TableVar {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TableVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TableVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
