use crate::error::ModelError;
use crate::term::Term;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject-predicate-object-graph 4-tuple.
///
/// Construction enforces the positional constraints: subject is named
/// or blank, predicate is named, object is named, blank, or a literal, and
/// graph is named, blank, or the default-graph sentinel.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quad {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    pub graph: Term,
}

impl Quad {
    /// Builds a quad in the default graph.
    pub fn new(subject: Term, predicate: Term, object: Term) -> Result<Self, ModelError> {
        Self::new_in_graph(subject, predicate, object, Term::DefaultGraph)
    }

    /// Builds a quad in an explicit named graph.
    pub fn new_in_graph(
        subject: Term,
        predicate: Term,
        object: Term,
        graph: Term,
    ) -> Result<Self, ModelError> {
        if !matches!(subject, Term::NamedNode(_) | Term::BlankNode(_)) {
            return Err(ModelError::invalid_quad(format!(
                "subject must be a named or blank node, got {subject}"
            )));
        }
        if !matches!(predicate, Term::NamedNode(_)) {
            return Err(ModelError::invalid_quad(format!(
                "predicate must be a named node, got {predicate}"
            )));
        }
        if matches!(object, Term::DefaultGraph) {
            return Err(ModelError::invalid_quad(
                "object cannot be the default-graph sentinel".to_owned(),
            ));
        }
        if !matches!(
            graph,
            Term::NamedNode(_) | Term::BlankNode(_) | Term::DefaultGraph
        ) {
            return Err(ModelError::invalid_quad(format!(
                "graph must be a named node, blank node, or the default graph, got {graph}"
            )));
        }
        Ok(Self {
            subject,
            predicate,
            object,
            graph,
        })
    }

    /// Returns a copy of this quad rewritten into `graph`.
    #[must_use]
    pub fn with_graph(&self, graph: Term) -> Self {
        Self {
            subject: self.subject.clone(),
            predicate: self.predicate.clone(),
            object: self.object.clone(),
            graph,
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.subject, self.predicate, self.object, self.graph
        )
    }
}
