use crate::snapshot::Snapshot;
use std::sync::Mutex;

/// The three notifications the store emits.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    SnapshotCreated(Snapshot),
    AgentDeleted(String),
    Cleared,
}

type Handler = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// A synchronous, in-process, multicast notifier.
///
/// Subscribers are invoked in the same scheduling context as the mutation
/// that produced the event, before the mutating operation returns — there
/// is no async or out-of-process delivery in this crate. Subscribers must
/// not mutate the store from inside a handler; [`crate::TemporalStore`]
/// detects that and fails with [`crate::StoreError::ReentrantMutation`].
#[derive(Default)]
pub struct EventNotifier {
    handlers: Mutex<Vec<Handler>>,
}

impl EventNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler. There is no way to unsubscribe a specific
    /// handler; this mirrors the store's scope (one process, one store).
    pub fn subscribe(&self, handler: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.handlers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(Box::new(handler));
    }

    pub(crate) fn notify(&self, event: &StoreEvent) {
        for handler in self
            .handlers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
        {
            handler(event);
        }
    }
}
