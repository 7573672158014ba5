// ── Wholesale-replaced reactive list ──
//
// Each entity list is a single `watch` channel holding the latest
// server snapshot. Replacement swaps the whole `Arc<Vec<_>>`, so readers
// always see one complete response, never a mix of two.

use std::sync::Arc;

use tokio::sync::watch;

/// One complete server response for a list, shared between readers.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// A reactive list for a single entity type.
///
/// Every replacement is broadcast to subscribers, even when the contents
/// are unchanged.
pub(crate) struct EntityList<T: Send + Sync + 'static> {
    /// Full snapshot, in server order.
    snapshot: watch::Sender<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> EntityList<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self { snapshot }
    }

    /// Replace the whole list with `items`, preserving their order.
    pub(crate) fn replace(&self, items: Vec<T>) {
        let values: Vec<Arc<T>> = items.into_iter().map(Arc::new).collect();
        // `send_replace` updates unconditionally, even with zero receivers.
        self.snapshot.send_replace(Arc::new(values));
    }

    /// Current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// First entity matching `predicate`, scanning in list order.
    pub(crate) fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<Arc<T>> {
        self.snapshot
            .borrow()
            .iter()
            .find(|item| predicate(item))
            .map(Arc::clone)
    }

    /// All entities matching `predicate`, in list order.
    pub(crate) fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<Arc<T>> {
        self.snapshot
            .borrow()
            .iter()
            .filter(|item| predicate(item))
            .map(Arc::clone)
            .collect()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }
}
