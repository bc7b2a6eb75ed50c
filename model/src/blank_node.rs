use rand::random;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// [`BlankNode::default`] creates a fresh, process-unique identifier. Use
/// [`BlankNode::new`] when the caller needs stable identity across calls
/// (e.g. a parser that must reuse `_:b1` within one document).
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlankNode {
    id: String,
}

impl BlankNode {
    /// Builds a blank node from an explicit local identifier.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.id
    }
}

impl Default for BlankNode {
    /// Generates a process-unique identifier with a random hex suffix.
    fn default() -> Self {
        Self {
            id: format!("b{:032x}", random::<u128>()),
        }
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ids_are_distinct() {
        assert_ne!(BlankNode::default(), BlankNode::default());
    }

    #[test]
    fn explicit_id_round_trips() {
        let b = BlankNode::new("a122");
        assert_eq!(b.to_string(), "_:a122");
    }
}
