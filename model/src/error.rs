use thiserror::Error;

/// Errors raised while constructing terms and quads.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A literal's language tag conflicted with an explicit datatype, or the
    /// language tag itself was malformed.
    #[error("invalid term: {message}")]
    InvalidTerm { message: String },
    /// A quad violated the positional constraints (e.g. a literal used
    /// as a predicate, or the default-graph sentinel used as an object).
    #[error("invalid quad: {message}")]
    InvalidQuad { message: String },
}

impl ModelError {
    pub(crate) fn invalid_term(message: impl Into<String>) -> Self {
        Self::InvalidTerm {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_quad(message: impl Into<String>) -> Self {
        Self::InvalidQuad {
            message: message.into(),
        }
    }

    /// Short machine-readable kind, for callers that want to branch without
    /// matching on the full error payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidTerm { .. } => "InvalidTerm",
            Self::InvalidQuad { .. } => "InvalidQuad",
        }
    }
}
