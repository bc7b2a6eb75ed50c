use time::OffsetDateTime;
use tq_model::Quad;

/// A read-only, owned view of one version of an agent's named graph.
/// Mutating the store never mutates a `Snapshot` already handed to a
/// caller — every accessor returns a fresh copy of current state instead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub agent_id: String,
    pub graph_uri: String,
    pub version: u64,
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub valid_from: OffsetDateTime,
    #[cfg_attr(
        feature = "serde",
        serde(with = "time::serde::rfc3339::option")
    )]
    pub valid_to: Option<OffsetDateTime>,
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub transaction_time: OffsetDateTime,
    pub quads: Vec<Quad>,
    pub source_format: Option<String>,
    pub fidelity_score: Option<f64>,
}

impl Snapshot {
    /// `true` iff this is the currently open version (`valid_to` unset).
    #[inline]
    pub fn is_open(&self) -> bool {
        self.valid_to.is_none()
    }
}

/// Options for [`crate::TemporalStore::create_snapshot`].
#[derive(Debug, Clone, Default)]
pub struct CreateSnapshotOptions {
    pub source_format: Option<String>,
    pub fidelity_score: Option<f64>,
    pub valid_from: Option<OffsetDateTime>,
}

/// Temporal scoping shared by [`crate::TemporalStore::get_snapshot`] and
/// every query-engine entry point.
#[derive(Debug, Clone, Default)]
pub struct TemporalOptions {
    /// Selects one specific version; `None` found under this version returns
    /// `None`/empty, never an error.
    pub version: Option<u64>,
    /// Valid-time scoping: the version whose `[valid_from, valid_to)`
    /// contains this instant.
    pub as_of: Option<OffsetDateTime>,
    /// Transaction-time scoping: the latest version with
    /// `transaction_time <= as_recorded`.
    pub as_recorded: Option<OffsetDateTime>,
    /// When set, a `version` request that is not open returns `None`.
    pub current_only: bool,
}

impl TemporalOptions {
    pub fn version(version: u64) -> Self {
        Self {
            version: Some(version),
            ..Self::default()
        }
    }

    pub fn as_of(instant: OffsetDateTime) -> Self {
        Self {
            as_of: Some(instant),
            ..Self::default()
        }
    }

    pub fn as_recorded(instant: OffsetDateTime) -> Self {
        Self {
            as_recorded: Some(instant),
            ..Self::default()
        }
    }
}
