//! Ready-to-use [`NamedNode`]s for the small set of vocabularies this crate needs.
//!
//! Unlike `oxrdf::vocab`, these are plain functions rather than `const`
//! values: `NamedNode` owns a `String`, so a `const` item would need a
//! borrowed `NamedNodeRef` twin this crate does not carry (see DESIGN.md).

use crate::NamedNode;

pub mod xsd {
    use super::NamedNode;

    /// `http://www.w3.org/2001/XMLSchema#string`, the default literal datatype.
    pub fn string() -> NamedNode {
        NamedNode::new_unchecked("http://www.w3.org/2001/XMLSchema#string")
    }
}

pub mod rdf {
    use super::NamedNode;

    /// `http://www.w3.org/1999/02/22-rdf-syntax-ns#langString`, the datatype
    /// of a language-tagged literal.
    pub fn lang_string() -> NamedNode {
        NamedNode::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString")
    }

    /// `http://www.w3.org/1999/02/22-rdf-syntax-ns#type`
    pub fn type_() -> NamedNode {
        NamedNode::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")
    }
}
