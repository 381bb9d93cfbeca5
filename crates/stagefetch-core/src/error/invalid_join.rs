use super::Error;

/// Error when a connection is keyed on a primary key on neither side.
///
/// The staged fetch joins each table variable into the next one. A hop that
/// is not anchored on a primary key cannot be fetched this way.
#[derive(Debug)]
pub(super) struct InvalidJoin {
    from: Box<str>,
    from_fields: Box<str>,
    to: Box<str>,
    to_fields: Box<str>,
}

impl std::error::Error for InvalidJoin {}

impl core::fmt::Display for InvalidJoin {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid join: neither side is a primary-key join ({}({}) -> {}({}))",
            self.from, self.from_fields, self.to, self.to_fields
        )
    }
}

impl Error {
    /// Creates an invalid join error for the connection
    /// `from(from_fields) -> to(to_fields)`.
    pub fn invalid_join<S: AsRef<str>>(
        from: &str,
        from_fields: &[S],
        to: &str,
        to_fields: &[S],
    ) -> Error {
        fn join<S: AsRef<str>>(fields: &[S]) -> Box<str> {
            fields
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", ")
                .into()
        }

        Error::from(super::ErrorKind::InvalidJoin(InvalidJoin {
            from: from.into(),
            from_fields: join(from_fields),
            to: to.into(),
            to_fields: join(to_fields),
        }))
    }

    /// Returns `true` if this error is an invalid join error.
    pub fn is_invalid_join(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidJoin(_)))
    }
}
