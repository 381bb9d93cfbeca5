use super::Error;

/// Error when a field, association, or parameter reference cannot be traced
/// back to a row source.
#[derive(Debug)]
pub(super) struct UnresolvedReference {
    message: Box<str>,
}

impl std::error::Error for UnresolvedReference {}

impl core::fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unresolved reference: {}", self.message)
    }
}

impl Error {
    /// Creates an unresolved reference error.
    pub fn unresolved_reference(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnresolvedReference(UnresolvedReference {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an unresolved reference error.
    pub fn is_unresolved_reference(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnresolvedReference(_)))
    }
}
