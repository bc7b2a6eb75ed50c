use rustc_hash::FxHashMap;
use std::collections::HashSet;

/// Maps a term's string key to the set of graph URIs that currently contain
/// at least one quad with that term at the indexed position.
///
/// Three of these cover subject, predicate, and non-literal object — the
/// query patterns this engine supports never need more than that.
#[derive(Default)]
pub struct TermIndex {
    by_term: FxHashMap<String, HashSet<String>>,
}

impl TermIndex {
    pub fn insert(&mut self, term_key: &str, graph_uri: &str) {
        self.by_term
            .entry(term_key.to_owned())
            .or_default()
            .insert(graph_uri.to_owned());
    }

    pub fn graphs_for(&self, term_key: &str) -> Option<&HashSet<String>> {
        self.by_term.get(term_key)
    }

    /// Removes `graph_uri` from every entry it appears under. Leaves the
    /// term key in place with an empty set rather than pruning it — the
    /// empty set is harmless and pruning on every deletion is not worth the
    /// bookkeeping for a store of this scale.
    pub fn remove_graph(&mut self, graph_uri: &str) {
        for graphs in self.by_term.values_mut() {
            graphs.remove(graph_uri);
        }
    }
}
