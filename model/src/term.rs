use crate::blank_node::BlankNode;
use crate::error::ModelError;
use crate::literal::Literal;
use crate::named_node::NamedNode;
use oxiri::IriParseError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of RDF term kinds this crate works with, plus the
/// default-graph sentinel (so a single type can occupy any quad position).
///
/// This is deliberately a single tagged variant rather than oxrdf's split of
/// `Subject`/`Term`/`GraphName` with borrowed twins: the temporal store only
/// ever needs owned terms, and positional legality is checked once, at
/// [`Quad::new`], rather than encoded in the type system.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Term {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    /// The single inhabitant of the default graph. Only ever legal in the
    /// graph position of a [`Quad`](crate::Quad).
    DefaultGraph,
}

/// Disambiguates an unlabeled [`Term::literal`] call between a language tag
/// and an explicit datatype.
#[derive(Debug, Clone)]
pub enum LiteralHint {
    Language(String),
    Datatype(NamedNode),
}

impl Term {
    /// Builds a named node, validating the IRI.
    pub fn named(uri: impl Into<String>) -> Result<Self, IriParseError> {
        Ok(Self::NamedNode(NamedNode::new(uri)?))
    }

    /// Builds a blank node. With `id: None`, assigns a process-unique identifier.
    pub fn blank(id: Option<impl Into<String>>) -> Self {
        Self::BlankNode(match id {
            Some(id) => BlankNode::new(id),
            None => BlankNode::default(),
        })
    }

    /// Builds a simple literal (`xsd:string`).
    pub fn literal(lex: impl Into<String>) -> Self {
        Self::Literal(Literal::new(lex))
    }

    /// Builds a literal with an explicit language tag or datatype.
    pub fn literal_with(lex: impl Into<String>, hint: LiteralHint) -> Result<Self, ModelError> {
        Ok(Self::Literal(match hint {
            LiteralHint::Language(lang) => Literal::new_language_tagged(lex, lang)?,
            LiteralHint::Datatype(dt) => Literal::new_typed(lex, dt)?,
        }))
    }

    #[inline]
    pub fn default_graph() -> Self {
        Self::DefaultGraph
    }

    #[inline]
    pub fn is_named_node(&self) -> bool {
        matches!(self, Self::NamedNode(_))
    }

    #[inline]
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    #[inline]
    pub fn is_default_graph(&self) -> bool {
        matches!(self, Self::DefaultGraph)
    }

    /// A stable string key for this term, suitable for index lookups.
    /// Two terms with the same `index_key` are value-equal.
    pub fn index_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(n) => n.fmt(f),
            Self::BlankNode(b) => b.fmt(f),
            Self::Literal(l) => l.fmt(f),
            Self::DefaultGraph => f.write_str("_:default-graph"),
        }
    }
}

impl From<NamedNode> for Term {
    fn from(n: NamedNode) -> Self {
        Self::NamedNode(n)
    }
}

impl From<BlankNode> for Term {
    fn from(b: BlankNode) -> Self {
        Self::BlankNode(b)
    }
}

impl From<Literal> for Term {
    fn from(l: Literal) -> Self {
        Self::Literal(l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        let a = Term::named("http://example.com/a").unwrap();
        let b = Term::named("http://example.com/a").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn literal_with_language_hint() {
        let t = Term::literal_with("bonjour", LiteralHint::Language("fr".into())).unwrap();
        assert!(t.is_literal());
        assert_eq!(t.to_string(), "\"bonjour\"@fr");
    }

    #[test]
    fn blank_without_id_is_unique_each_call() {
        let a = Term::blank(None::<String>);
        let b = Term::blank(None::<String>);
        assert_ne!(a, b);
    }
}
