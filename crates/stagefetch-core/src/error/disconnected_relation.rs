use super::Error;

/// Error when a relation discovered while walking the query is never
/// connected to the root relation.
#[derive(Debug)]
pub(super) struct DisconnectedRelation {
    relation: Box<str>,
}

impl std::error::Error for DisconnectedRelation {}

impl core::fmt::Display for DisconnectedRelation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "no connection condition found for relation {}",
            self.relation
        )
    }
}

impl Error {
    /// Creates a disconnected relation error.
    pub fn disconnected_relation(relation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DisconnectedRelation(DisconnectedRelation {
            relation: relation.into().into(),
        }))
    }

    /// Returns `true` if this error is a disconnected relation error.
    pub fn is_disconnected_relation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::DisconnectedRelation(_)))
    }
}
