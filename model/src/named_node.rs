use oxiri::{Iri, IriParseError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// An RDF [named node](https://www.w3.org/TR/rdf11-concepts/#dfn-iri): an absolute IRI.
///
/// The `Display` implementation returns the N-Triples representation (`<uri>`).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamedNode {
    iri: String,
}

impl NamedNode {
    /// Builds and validates an absolute IRI.
    pub fn new(iri: impl Into<String>) -> Result<Self, IriParseError> {
        let iri = Iri::parse(iri.into())?;
        Ok(Self::new_unchecked(iri.into_inner()))
    }

    /// Builds a named node from a string without validating it.
    ///
    /// It is the caller's responsibility to ensure `iri` is a valid absolute IRI.
    /// [`NamedNode::new`] is the safe constructor and should be used for untrusted input.
    #[inline]
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.iri
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.iri
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

impl PartialEq<str> for NamedNode {
    fn eq(&self, other: &str) -> bool {
        self.iri == other
    }
}

impl PartialEq<&str> for NamedNode {
    fn eq(&self, other: &&str) -> bool {
        self.iri == *other
    }
}
