use super::Error;

/// Error when the catalog has no entry for a referenced relation or column.
#[derive(Debug)]
pub(super) enum UnknownMetadata {
    Relation(Box<str>),
    Column { relation: Box<str>, column: Box<str> },
}

impl std::error::Error for UnknownMetadata {}

impl core::fmt::Display for UnknownMetadata {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            UnknownMetadata::Relation(relation) => write!(f, "unknown relation `{relation}`"),
            UnknownMetadata::Column { relation, column } => {
                write!(f, "unknown column `{relation}.{column}`")
            }
        }
    }
}

impl Error {
    /// Creates an error for a relation missing from the catalog.
    pub fn unknown_relation(relation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownMetadata(UnknownMetadata::Relation(
            relation.into().into(),
        )))
    }

    /// Creates an error for a column missing from the catalog.
    pub fn unknown_column(relation: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownMetadata(UnknownMetadata::Column {
            relation: relation.into().into(),
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown relation or column error.
    pub fn is_unknown_metadata(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownMetadata(_)))
    }
}
