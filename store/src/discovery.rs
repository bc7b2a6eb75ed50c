use crate::graph_uri::agent_uri;
use crate::snapshot::Snapshot;
use crate::store::TemporalStore;
use time::OffsetDateTime;
use tq_model::{Quad, Term};

/// A lightweight view of one agent's current snapshot, returned by
/// [`TemporalStore::discover_agents`] and [`TemporalStore::list_agents`]
/// — only the well-known predicates, never the full quad set.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSummary {
    pub agent_id: String,
    pub name: Option<String>,
    /// `[ADDED]` From the well-known `<ns>description` predicate, when present.
    pub description: Option<String>,
    pub capabilities: Vec<String>,
    pub protocols: Vec<String>,
    pub created_at: OffsetDateTime,
}

/// Selection criteria for [`TemporalStore::discover_agents`]. Every
/// field left `None`/empty is treated as "no constraint"; all supplied
/// constraints are ANDed together.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryCriteria {
    /// Case-insensitive substring match against `name`. Agents with no name
    /// never match a non-empty filter.
    pub name_contains: Option<String>,
    pub required_capabilities: Vec<String>,
    pub required_protocols: Vec<String>,
    pub created_after: Option<OffsetDateTime>,
    pub created_before: Option<OffsetDateTime>,
}

impl DiscoveryCriteria {
    fn matches(&self, summary: &AgentSummary) -> bool {
        if let Some(needle) = &self.name_contains {
            let matched = summary
                .name
                .as_ref()
                .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase()));
            if !matched {
                return false;
            }
        }
        if !self
            .required_capabilities
            .iter()
            .all(|c| summary.capabilities.iter().any(|x| x == c))
        {
            return false;
        }
        if !self
            .required_protocols
            .iter()
            .all(|p| summary.protocols.iter().any(|x| x == p))
        {
            return false;
        }
        if let Some(after) = self.created_after {
            if summary.created_at < after {
                return false;
            }
        }
        if let Some(before) = self.created_before {
            if summary.created_at >= before {
                return false;
            }
        }
        true
    }
}

/// The native wire format a snapshot is assumed to carry when the caller
/// never recorded one — this store's own N-Triples codec.
const NATIVE_SOURCE_FORMAT: &str = "ntriples";

/// A protocol-agnostic rendering of one agent snapshot, meant to be
/// re-serialized into whatever wire format a downstream agent protocol
/// needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    /// Synthesized the same way graph URIs are (`<base>/agent/<agent_id>`),
    /// since the canonical record needs a single stable identifier for the
    /// agent rather than a per-version one.
    pub agent_uri: String,
    pub agent_id: String,
    pub version: u64,
    /// The snapshot's quads, carried through unchanged.
    pub quads: Vec<Quad>,
    /// The snapshot's `source_format`, defaulting to the native format
    /// (`"ntriples"`) when the snapshot did not record one.
    pub source_format: String,
    pub metadata: CanonicalMetadata,
    pub extensions: Vec<CanonicalExtension>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub capabilities: Vec<String>,
    pub protocols: Vec<String>,
    pub fidelity_score: f64,
    pub translated_at: OffsetDateTime,
    pub warning_count: u32,
    pub error_count: u32,
}

/// Reserved for protocol-specific data the canonical model doesn't capture
/// — this module never interprets extension content.
/// Always empty: `snapshot_to_canonical` has nothing to put here yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalExtension {
    pub namespace: String,
    pub payload: String,
}

fn literal_values(snapshot: &Snapshot, predicate: &str) -> Vec<String> {
    snapshot
        .quads
        .iter()
        .filter_map(|q| match (&q.predicate, &q.object) {
            (Term::NamedNode(p), Term::Literal(value)) if p.as_str() == predicate => {
                Some(value.value().to_owned())
            }
            _ => None,
        })
        .collect()
}

fn single_literal(snapshot: &Snapshot, predicate: &str) -> Option<String> {
    literal_values(snapshot, predicate).into_iter().next()
}

/// The part of an IRI after its last `/` or `#`, used to match `rdf:type`
/// objects against `"Protocol"`/`"Binding"` per §4.5/§6 without requiring a
/// dedicated protocol-binding predicate.
fn local_name(iri: &str) -> &str {
    let cut = iri.rfind(['/', '#']).map_or(0, |i| i + 1);
    &iri[cut..]
}

/// `rdf:type` objects whose local name contains `"Protocol"` or `"Binding"`,
/// taken as protocol-binding declarations.
fn protocol_bindings(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .quads
        .iter()
        .filter_map(|q| match (&q.predicate, &q.object) {
            (Term::NamedNode(p), Term::NamedNode(object))
                if p.as_str() == tq_model::vocab::rdf::type_().as_str() =>
            {
                let local = local_name(object.as_str());
                (local.contains("Protocol") || local.contains("Binding")).then(|| local.to_owned())
            }
            _ => None,
        })
        .collect()
}

fn summarize(namespace: &str, snapshot: &Snapshot) -> AgentSummary {
    AgentSummary {
        agent_id: snapshot.agent_id.clone(),
        name: single_literal(snapshot, &format!("{namespace}name")),
        description: single_literal(snapshot, &format!("{namespace}description")),
        capabilities: literal_values(snapshot, &format!("{namespace}tool-name")),
        protocols: protocol_bindings(snapshot),
        created_at: snapshot.valid_from,
    }
}

impl TemporalStore {
    /// Current snapshots of every agent matching `criteria`. Agents
    /// with no current snapshot (deleted, or never created) never appear.
    pub fn discover_agents(&self, criteria: &DiscoveryCriteria) -> Vec<AgentSummary> {
        self.list_agents(0, usize::MAX)
            .into_iter()
            .filter(|summary| criteria.matches(summary))
            .collect()
    }

    /// Every agent's current snapshot, paged by `skip`/`take`, in
    /// agent-insertion order, with stable pagination.
    pub fn list_agents(&self, skip: usize, take: usize) -> Vec<AgentSummary> {
        let namespace = self.namespace().to_owned();
        let state = self.read_state();
        state
            .agents
            .keys()
            .filter_map(|agent_id| {
                let uri = state.agents[agent_id].last()?;
                let meta = state.graph_meta.get(uri)?;
                Some(crate::store::build_snapshot(
                    agent_id,
                    uri,
                    meta,
                    &state.graphs,
                ))
            })
            .map(|snapshot| summarize(&namespace, &snapshot))
            .skip(skip)
            .take(take)
            .collect()
    }

    /// Projects a snapshot into a [`CanonicalRecord`]: a synthesized agent
    /// URI, the snapshot's quads, its source-format tag (defaulting to the
    /// native format when unrecorded), and a metadata block. Fidelity
    /// defaults to `1.0` when the snapshot did not record one; extensions
    /// are always empty (see [`CanonicalExtension`]).
    pub fn snapshot_to_canonical(&self, snapshot: &Snapshot) -> CanonicalRecord {
        let namespace = self.namespace().to_owned();
        CanonicalRecord {
            agent_uri: agent_uri(self.base_uri(), &snapshot.agent_id),
            agent_id: snapshot.agent_id.clone(),
            version: snapshot.version,
            quads: snapshot.quads.clone(),
            source_format: snapshot
                .source_format
                .clone()
                .unwrap_or_else(|| NATIVE_SOURCE_FORMAT.to_owned()),
            metadata: CanonicalMetadata {
                name: single_literal(snapshot, &format!("{namespace}name")),
                description: single_literal(snapshot, &format!("{namespace}description")),
                capabilities: literal_values(snapshot, &format!("{namespace}tool-name")),
                protocols: protocol_bindings(snapshot),
                fidelity_score: snapshot.fidelity_score.unwrap_or(1.0),
                translated_at: snapshot.valid_from,
                warning_count: 0,
                error_count: 0,
            },
            extensions: Vec::new(),
        }
    }
}
