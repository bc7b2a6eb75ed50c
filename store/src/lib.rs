//! A bitemporal, named-graph temporal quad store with a pattern-join query
//! engine and a discovery layer over agent snapshots.
//!
//! Storage, query evaluation, and the wire layer are kept as separate
//! crates but collapsed into a single store crate here, since this store's
//! concurrency model (a single `RwLock`) doesn't need a separate
//! transaction/snapshot machinery layer.
#![deny(future_incompatible, nonstandard_style, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

mod discovery;
mod error;
mod events;
mod graph_uri;
mod index;
mod query;
mod snapshot;
mod stats;
mod store;

pub use crate::discovery::{
    AgentSummary, CanonicalExtension, CanonicalMetadata, CanonicalRecord, DiscoveryCriteria,
};
pub use crate::error::StoreError;
pub use crate::events::{EventNotifier, StoreEvent};
pub use crate::query::{
    Binding, PatternElement, ScanPattern, SelectResult, TemplateElement, TemplateTriple,
    TriplePattern,
};
pub use crate::snapshot::{CreateSnapshotOptions, Snapshot, TemporalOptions};
pub use crate::stats::StoreStats;
pub use crate::store::TemporalStore;
