use serde::{Deserialize, Serialize};

/// A foreign-key hop from one relation to another.
///
/// Following the association maps `this_key` on the source relation to
/// `other_relation.other_key`. Both single-valued references and collections
/// are described this way; the direction of the key decides which.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    /// Name of the association on the source relation.
    pub name: String,

    /// Join column on the source relation.
    pub this_key: String,

    /// The relation the association leads to.
    pub other_relation: String,

    /// Join column on the target relation.
    pub other_key: String,
}

impl Association {
    pub fn new(
        name: impl Into<String>,
        this_key: impl Into<String>,
        other_relation: impl Into<String>,
        other_key: impl Into<String>,
    ) -> Association {
        Association {
            name: name.into(),
            this_key: this_key.into(),
            other_relation: other_relation.into(),
            other_key: other_key.into(),
        }
    }
}
