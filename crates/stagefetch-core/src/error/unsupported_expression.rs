use super::Error;

/// Error when the query expression contains a construct outside the accepted
/// vocabulary.
///
/// This occurs when:
/// - A call targets a method or declaring type the translator does not know
/// - A predicate uses an operator outside the allow-list
/// - A conversion carries a custom conversion operator
/// - A lambda parameter is bound twice
/// - An equality does not match one of the recognized join shapes
#[derive(Debug)]
pub(super) struct UnsupportedExpression {
    message: Box<str>,
}

impl std::error::Error for UnsupportedExpression {}

impl core::fmt::Display for UnsupportedExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported expression: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported expression error.
    pub fn unsupported_expression(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedExpression(
            UnsupportedExpression {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported expression error.
    pub fn is_unsupported_expression(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnsupportedExpression(_)))
    }
}
