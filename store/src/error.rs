use thiserror::Error;

/// Errors raised by [`crate::TemporalStore`] operations.
///
/// "Nothing here" outcomes (an unknown version, an agent with no history)
/// are never represented here — they return `None` or an empty collection,
/// never as an error. Everything in this enum is either a
/// structural input error or an internal invariant failure that should not
/// be recovered from in-process.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// A term or quad failed construction (language-tag/datatype conflict,
    /// a positional constraint violated).
    #[error(transparent)]
    Model(#[from] tq_model::ModelError),

    /// Reserved for operations that signal on a missing agent rather than
    /// returning `None`. `get_snapshot` never emits this.
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    /// Reserved for implementations distinguishing missing-graph from
    /// empty-result; this store's `get_graph_quads` returns an empty `Vec`
    /// instead.
    #[error("unknown graph: {0}")]
    UnknownGraph(String),

    /// Internal: a snapshot insertion would have broken one of the store's
    /// temporal invariants. Fatal — should not be recovered from in-process.
    #[error("temporal invariant violated for agent {agent_id}: {message}")]
    TemporalInvariantViolated { agent_id: String, message: String },

    /// Internal: index state disagreed with the graph table. Fatal.
    #[error("index corrupted: {0}")]
    IndexCorrupted(String),

    /// An event handler attempted to mutate the store while a mutating
    /// operation was already in flight.
    #[error("reentrant mutation: {0} was called from inside an event handler")]
    ReentrantMutation(&'static str),
}

impl StoreError {
    /// Short machine-readable kind, for callers that want to branch without
    /// matching on the full error payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Model(e) => e.kind(),
            Self::UnknownAgent(_) => "UnknownAgent",
            Self::UnknownGraph(_) => "UnknownGraph",
            Self::TemporalInvariantViolated { .. } => "TemporalInvariantViolated",
            Self::IndexCorrupted(_) => "IndexCorrupted",
            Self::ReentrantMutation(_) => "ReentrantMutation",
        }
    }
}
