use rustc_hash::FxHashMap;
use time::OffsetDateTime;

/// Aggregate totals returned by [`crate::TemporalStore::get_stats`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreStats {
    pub graph_count: usize,
    pub quad_count: usize,
    pub agent_count: usize,
    pub snapshot_count: usize,
    pub oldest_valid_from: Option<OffsetDateTime>,
    pub newest_valid_from: Option<OffsetDateTime>,
    /// A coarse estimate of in-memory size: the length of each term's
    /// N-Triples rendering summed across every stored quad. Not meant to be
    /// precise, only to give callers an order of magnitude.
    pub approx_bytes: usize,
    /// Snapshot count by `source_format` tag (`[ADDED]` — costs nothing to
    /// aggregate since the field is already carried per snapshot).
    pub snapshots_by_source_format: FxHashMap<String, usize>,
}
