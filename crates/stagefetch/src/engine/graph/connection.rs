use super::NodeId;

use std::fmt;

/// A foreign-key edge from the node owning it to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Connection {
    pub(crate) to: NodeId,
    pub(crate) fields: MappedFields,
}

/// `(from, to)` field pairs of a connection, sorted by the `from` field so
/// that comparison and emission are deterministic.
#[derive(Clone, PartialEq, Eq, Default)]
pub(crate) struct MappedFields(Vec<(String, String)>);

impl MappedFields {
    pub(crate) fn new(from: &[String], to: &[String]) -> MappedFields {
        debug_assert_eq!(from.len(), to.len(), "mismatched connection fields");

        let mut fields = MappedFields::default();

        for (from, to) in from.iter().zip(to) {
            fields.insert(from, to);
        }

        fields
    }

    /// Adds a pair unless it is already present. Returns `true` if added.
    pub(crate) fn insert(&mut self, from: &str, to: &str) -> bool {
        let pair = (from.to_string(), to.to_string());

        match self.0.binary_search(&pair) {
            Ok(_) => false,
            Err(index) => {
                self.0.insert(index, pair);
                true
            }
        }
    }

    /// The same pairs seen from the other endpoint.
    pub(crate) fn reversed(&self) -> MappedFields {
        let mut pairs: Vec<_> = self
            .0
            .iter()
            .map(|(from, to)| (to.clone(), from.clone()))
            .collect();
        pairs.sort();
        MappedFields(pairs)
    }

    /// `true` if `other` walks the same pairs back the other way.
    pub(crate) fn is_reverse_of(&self, other: &MappedFields) -> bool {
        *self == other.reversed()
    }

    pub(crate) fn pairs(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }

    pub(crate) fn from_fields(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.0.iter().map(|(from, _)| from.as_str())
    }

    pub(crate) fn to_fields(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.0.iter().map(|(_, to)| to.as_str())
    }

    /// Distinct `from` fields, sorted.
    pub(crate) fn from_set(&self) -> Vec<String> {
        let mut fields: Vec<_> = self.from_fields().map(str::to_string).collect();
        fields.dedup();
        fields
    }

    /// Distinct `to` fields, sorted.
    pub(crate) fn to_set(&self) -> Vec<String> {
        let mut fields: Vec<_> = self.to_fields().map(str::to_string).collect();
        fields.sort();
        fields.dedup();
        fields
    }
}

impl fmt::Debug for MappedFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for (from, to) in self.pairs() {
            list.entry(&format_args!("{from} = {to}"));
        }
        list.finish()
    }
}
