use crate::error::StoreError;
use crate::events::{EventNotifier, StoreEvent};
use crate::graph_uri::snapshot_graph_uri;
use crate::index::TermIndex;
use crate::snapshot::{CreateSnapshotOptions, Snapshot, TemporalOptions};
use crate::stats::StoreStats;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use time::OffsetDateTime;
use tq_model::{NamedNode, Quad, Term};

const DEFAULT_BASE_URI: &str = "https://agents.invalid";
const DEFAULT_NAMESPACE: &str = "https://agents.invalid/vocab#";

/// Per-graph temporal metadata, keyed by graph URI.
#[derive(Debug, Clone)]
pub(crate) struct GraphMeta {
    pub agent_id: String,
    pub version: u64,
    pub valid_from: OffsetDateTime,
    pub valid_to: Option<OffsetDateTime>,
    pub transaction_time: OffsetDateTime,
    pub source_format: Option<String>,
    pub fidelity_score: Option<f64>,
}

#[derive(Default)]
pub(crate) struct StoreState {
    /// Graph creation order, global across agents. Entries are removed on
    /// agent deletion / clear but never reordered otherwise.
    pub(crate) graph_order: Vec<String>,
    pub(crate) graphs: FxHashMap<String, Vec<Quad>>,
    pub(crate) graph_meta: FxHashMap<String, GraphMeta>,
    /// agent id -> graph URIs in ascending version order; `version == index + 1`.
    pub(crate) agents: FxHashMap<String, Vec<String>>,
    pub(crate) subject_index: TermIndex,
    pub(crate) predicate_index: TermIndex,
    pub(crate) object_index: TermIndex,
}

/// Releases the reentrancy guard on drop, including on an early `?` return,
/// so a failed mutation never leaves the store permanently locked out.
struct MutationGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> MutationGuard<'a> {
    fn enter(flag: &'a AtomicBool, operation: &'static str) -> Result<Self, StoreError> {
        if flag.swap(true, Ordering::AcqRel) {
            tracing::warn!(operation, "reentrant mutation rejected");
            return Err(StoreError::ReentrantMutation(operation));
        }
        Ok(Self { flag })
    }
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A bitemporal, versioned, named-graph store of RDF-like quads, with a
/// versioned snapshot lifecycle per agent.
///
/// Concurrency: one `RwLock` around the whole body gives unlimited
/// concurrent readers and a single writer at a time, which is sufficient
/// for a consistent read cut and atomic index updates without the MVCC
/// machinery a store built for many concurrent writers would need.
pub struct TemporalStore {
    base_uri: String,
    namespace: String,
    state: RwLock<StoreState>,
    events: EventNotifier,
    mutating: AtomicBool,
}

impl Default for TemporalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemporalStore {
    pub fn new() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_owned(),
            namespace: DEFAULT_NAMESPACE.to_owned(),
            state: RwLock::new(StoreState::default()),
            events: EventNotifier::new(),
            mutating: AtomicBool::new(false),
        }
    }

    /// Overrides the `<base>` used when synthesizing graph URIs.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Overrides the `<ns>` vocabulary prefix used for discovery's
    /// well-known predicates.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub(crate) fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub(crate) fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Registers a handler for [`StoreEvent`]s. See [`EventNotifier`] for
    /// delivery semantics.
    pub fn subscribe(&self, handler: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.events.subscribe(handler);
    }

    /// Inserts a new version of an agent's graph.
    ///
    /// Back-dating `valid_from` before the previous version's `valid_from`
    /// is allowed; the previous version's `valid_to` is still closed at
    /// `now`, not at the new `valid_from`, which can leave the two versions'
    /// valid-time intervals overlapping. That is tolerated deliberately: it
    /// only affects historical interval disjointness, not the invariant
    /// that at most one version per agent is ever open at a time.
    pub fn create_snapshot(
        &self,
        agent_id: &str,
        quads: Vec<Quad>,
        options: CreateSnapshotOptions,
    ) -> Result<Snapshot, StoreError> {
        let _guard = MutationGuard::enter(&self.mutating, "create_snapshot")?;
        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            let now = OffsetDateTime::now_utc();

            let previous_uri = state
                .agents
                .get(agent_id)
                .and_then(|versions| versions.last())
                .cloned();
            let previous_transaction_time = previous_uri
                .as_ref()
                .and_then(|uri| state.graph_meta.get(uri))
                .map(|previous| previous.transaction_time);
            let version = state.agents.get(agent_id).map_or(0, Vec::len) as u64 + 1;
            let graph_uri = snapshot_graph_uri(&self.base_uri, agent_id, version);

            if let Some(previous_uri) = &previous_uri {
                if let Some(previous) = state.graph_meta.get_mut(previous_uri) {
                    if previous.valid_to.is_none() {
                        previous.valid_to = Some(now);
                    }
                }
            }

            let transaction_time = previous_transaction_time.map_or(now, |t| t.max(now));
            let valid_from = options.valid_from.unwrap_or(now);
            let graph_term = Term::NamedNode(NamedNode::new_unchecked(graph_uri.clone()));
            let rewritten: Vec<Quad> = quads
                .into_iter()
                .map(|q| q.with_graph(graph_term.clone()))
                .collect();

            for quad in &rewritten {
                state
                    .subject_index
                    .insert(&quad.subject.index_key(), &graph_uri);
                state
                    .predicate_index
                    .insert(&quad.predicate.index_key(), &graph_uri);
                if !quad.object.is_literal() {
                    state.object_index.insert(&quad.object.index_key(), &graph_uri);
                }
            }

            state.graph_order.push(graph_uri.clone());
            state.graphs.insert(graph_uri.clone(), rewritten.clone());
            state.graph_meta.insert(
                graph_uri.clone(),
                GraphMeta {
                    agent_id: agent_id.to_owned(),
                    version,
                    valid_from,
                    valid_to: None,
                    transaction_time,
                    source_format: options.source_format.clone(),
                    fidelity_score: options.fidelity_score,
                },
            );
            state
                .agents
                .entry(agent_id.to_owned())
                .or_default()
                .push(graph_uri.clone());

            Snapshot {
                agent_id: agent_id.to_owned(),
                graph_uri,
                version,
                valid_from,
                valid_to: None,
                transaction_time,
                quads: rewritten,
                source_format: options.source_format,
                fidelity_score: options.fidelity_score,
            }
        };

        tracing::debug!(agent_id, version = snapshot.version, "snapshot created");
        self.events
            .notify(&StoreEvent::SnapshotCreated(snapshot.clone()));
        Ok(snapshot)
    }

    /// Retrieves a snapshot per the version/as-of/as-recorded selection rules.
    /// Returns `None`
    /// for every "nothing here" outcome — an unknown agent, a version that
    /// does not exist, an `as_of`/`as_recorded` instant with no match.
    pub fn get_snapshot(&self, agent_id: &str, options: &TemporalOptions) -> Option<Snapshot> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        let versions = state.agents.get(agent_id)?;

        let selected_uri = if let Some(version) = options.version {
            let index = usize::try_from(version).ok()?.checked_sub(1)?;
            versions.get(index)?
        } else if let Some(as_of) = options.as_of {
            versions.iter().find(|uri| {
                let meta = &state.graph_meta[*uri];
                meta.valid_from <= as_of && meta.valid_to.map_or(true, |vt| as_of < vt)
            })?
        } else if let Some(as_recorded) = options.as_recorded {
            versions
                .iter()
                .filter(|uri| state.graph_meta[*uri].transaction_time <= as_recorded)
                .next_back()?
        } else {
            versions.last()?
        };

        let meta = &state.graph_meta[selected_uri];
        if options.current_only && meta.valid_to.is_some() {
            return None;
        }
        Some(build_snapshot(agent_id, selected_uri, meta, &state.graphs))
    }

    /// All of an agent's snapshots, oldest first. Empty if the agent is unknown.
    pub fn get_agent_history(&self, agent_id: &str) -> Vec<Snapshot> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .agents
            .get(agent_id)
            .into_iter()
            .flatten()
            .map(|uri| build_snapshot(agent_id, uri, &state.graph_meta[uri], &state.graphs))
            .collect()
    }

    /// The quads of one graph, in insertion order. Empty if the graph is unknown.
    pub fn get_graph_quads(&self, graph_uri: &str) -> Vec<Quad> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.graphs.get(graph_uri).cloned().unwrap_or_default()
    }

    /// Removes every graph, snapshot record, and index entry belonging to
    /// `agent_id`. Returns `false`, leaving state unchanged, if the agent is
    /// unknown.
    pub fn delete_agent(&self, agent_id: &str) -> Result<bool, StoreError> {
        let _guard = MutationGuard::enter(&self.mutating, "delete_agent")?;
        let deleted = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            let Some(graph_uris) = state.agents.remove(agent_id) else {
                return Ok(false);
            };
            for uri in &graph_uris {
                state.graphs.remove(uri);
                state.graph_meta.remove(uri);
                state.graph_order.retain(|g| g != uri);
                state.subject_index.remove_graph(uri);
                state.predicate_index.remove_graph(uri);
                state.object_index.remove_graph(uri);
            }
            true
        };
        tracing::debug!(agent_id, "agent deleted");
        self.events
            .notify(&StoreEvent::AgentDeleted(agent_id.to_owned()));
        Ok(deleted)
    }

    /// Wipes every table.
    pub fn clear(&self) -> Result<(), StoreError> {
        let _guard = MutationGuard::enter(&self.mutating, "clear")?;
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            *state = StoreState::default();
        }
        tracing::debug!("store cleared");
        self.events.notify(&StoreEvent::Cleared);
        Ok(())
    }

    pub fn get_stats(&self) -> StoreStats {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        let mut stats = StoreStats {
            graph_count: state.graphs.len(),
            agent_count: state.agents.len(),
            snapshot_count: state.graph_meta.len(),
            ..StoreStats::default()
        };
        for (uri, quads) in &state.graphs {
            stats.quad_count += quads.len();
            for q in quads {
                stats.approx_bytes += q.subject.to_string().len()
                    + q.predicate.to_string().len()
                    + q.object.to_string().len();
            }
            if let Some(meta) = state.graph_meta.get(uri) {
                stats.oldest_valid_from = Some(
                    stats
                        .oldest_valid_from
                        .map_or(meta.valid_from, |o| o.min(meta.valid_from)),
                );
                stats.newest_valid_from = Some(
                    stats
                        .newest_valid_from
                        .map_or(meta.valid_from, |n| n.max(meta.valid_from)),
                );
                if let Some(format) = &meta.source_format {
                    *stats
                        .snapshots_by_source_format
                        .entry(format.clone())
                        .or_insert(0) += 1;
                }
            }
        }
        stats
    }

    pub(crate) fn read_state(&self) -> std::sync::RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }
}

pub(crate) fn build_snapshot(
    agent_id: &str,
    graph_uri: &str,
    meta: &GraphMeta,
    graphs: &FxHashMap<String, Vec<Quad>>,
) -> Snapshot {
    Snapshot {
        agent_id: agent_id.to_owned(),
        graph_uri: graph_uri.to_owned(),
        version: meta.version,
        valid_from: meta.valid_from,
        valid_to: meta.valid_to,
        transaction_time: meta.transaction_time,
        quads: graphs.get(graph_uri).cloned().unwrap_or_default(),
        source_format: meta.source_format.clone(),
        fidelity_score: meta.fidelity_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::CreateSnapshotOptions;
    use std::sync::{Arc, Mutex};
    use tq_model::Quad;

    fn quad(s: &str, p: &str, o: &str) -> Quad {
        Quad::new(
            Term::named(s).unwrap(),
            Term::named(p).unwrap(),
            Term::literal(o),
        )
        .unwrap()
    }

    #[test]
    fn versions_are_consecutive_and_supersede() {
        let store = TemporalStore::new();
        let v1 = store
            .create_snapshot(
                "agent-1",
                vec![quad("ex:a", "ex:name", "A")],
                CreateSnapshotOptions::default(),
            )
            .unwrap();
        assert_eq!(v1.version, 1);
        assert!(v1.is_open());

        let v2 = store
            .create_snapshot(
                "agent-1",
                vec![quad("ex:a", "ex:name", "A'")],
                CreateSnapshotOptions::default(),
            )
            .unwrap();
        assert_eq!(v2.version, 2);

        let history = store.get_agent_history("agent-1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].valid_to, Some(history[1].transaction_time));
        assert!(!history[0].is_open());
        assert!(history[1].is_open());

        let current = store.get_snapshot("agent-1", &TemporalOptions::default()).unwrap();
        assert_eq!(current.version, 2);
    }

    #[test]
    fn unknown_agent_returns_none_or_false() {
        let store = TemporalStore::new();
        assert!(store.get_snapshot("nope", &TemporalOptions::default()).is_none());
        assert!(store.get_agent_history("nope").is_empty());
        assert_eq!(store.delete_agent("nope").unwrap(), false);
    }

    #[test]
    fn delete_agent_removes_indexes() {
        let store = TemporalStore::new();
        store
            .create_snapshot(
                "agent-1",
                vec![quad("ex:a", "ex:p", "x")],
                CreateSnapshotOptions::default(),
            )
            .unwrap();
        assert_eq!(store.delete_agent("agent-1").unwrap(), true);
        assert!(store.get_agent_history("agent-1").is_empty());
        let state = store.read_state();
        assert!(state
            .subject_index
            .graphs_for("<ex:a>")
            .map_or(true, |g| g.is_empty()));
    }

    #[test]
    fn reentrant_mutation_is_rejected() {
        let store = Arc::new(TemporalStore::new());
        let reentrant_result = Arc::new(Mutex::new(None));
        let store_in_handler = Arc::clone(&store);
        let reentrant_result_in_handler = Arc::clone(&reentrant_result);
        store.subscribe(move |event| {
            if let StoreEvent::SnapshotCreated(_) = event {
                let result = store_in_handler.create_snapshot(
                    "agent-2",
                    vec![quad("ex:b", "ex:p", "y")],
                    CreateSnapshotOptions::default(),
                );
                *reentrant_result_in_handler.lock().unwrap() = Some(result.is_err());
            }
        });
        store
            .create_snapshot(
                "agent-1",
                vec![quad("ex:a", "ex:p", "x")],
                CreateSnapshotOptions::default(),
            )
            .unwrap();
        assert_eq!(*reentrant_result.lock().unwrap(), Some(true));
        // The guard is released once the outer call returns, so the store is
        // usable again afterwards.
        assert!(store
            .create_snapshot("agent-2", vec![], CreateSnapshotOptions::default())
            .is_ok());
    }

    #[test]
    fn clear_wipes_everything() {
        let store = TemporalStore::new();
        store
            .create_snapshot(
                "agent-1",
                vec![quad("ex:a", "ex:p", "x")],
                CreateSnapshotOptions::default(),
            )
            .unwrap();
        store.clear().unwrap();
        assert_eq!(store.get_stats().agent_count, 0);
    }
}
