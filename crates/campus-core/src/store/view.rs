// ── Subscriber view of one list ──
//
// Pairs a list's channel with the store-wide `loading` flag, so a screen
// renders its rows and its spinner from a single handle.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

use super::list::Snapshot;

/// What a subscriber renders: the rows and whether any fetch is in flight.
#[derive(Debug)]
pub struct ListState<T> {
    pub items: Snapshot<T>,
    pub loading: bool,
}

impl<T> Clone for ListState<T> {
    fn clone(&self) -> Self {
        Self {
            items: Snapshot::clone(&self.items),
            loading: self.loading,
        }
    }
}

/// Handle returned by the store's `subscribe_*` methods.
pub struct ListView<T: Send + Sync + 'static> {
    items: watch::Receiver<Snapshot<T>>,
    loading: watch::Receiver<bool>,
}

impl<T: Send + Sync + 'static> ListView<T> {
    pub(crate) fn new(
        items: watch::Receiver<Snapshot<T>>,
        loading: watch::Receiver<bool>,
    ) -> Self {
        Self { items, loading }
    }

    pub fn items(&self) -> Snapshot<T> {
        self.items.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn state(&self) -> ListState<T> {
        ListState {
            items: self.items(),
            loading: self.is_loading(),
        }
    }

    /// Wait for the next replacement of this list.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.items.changed().await.ok()?;
        Some(self.items.borrow_and_update().clone())
    }

    /// Wait until no fetch is in flight, then return the list as it stands.
    /// Returns immediately when the store is idle.
    pub async fn settled(&mut self) -> Option<Snapshot<T>> {
        self.loading.wait_for(|busy| !*busy).await.ok()?;
        Some(self.items())
    }

    /// Every replacement of the list and every flip of `loading`, as a
    /// `Stream` of [`ListState`]. The first item is the state at conversion.
    pub fn into_stream(self) -> ListStateStream<T> {
        let items = self.items.clone();
        let loading = self.loading.clone();
        let ticks = WatchStream::new(self.items)
            .map(|_| ())
            .merge(WatchStream::from_changes(self.loading).map(|_| ()));
        ListStateStream {
            ticks: Box::pin(ticks),
            items,
            loading,
        }
    }
}

/// `Stream` of [`ListState`] built by [`ListView::into_stream`].
///
/// Several changes landing between polls collapse into one item carrying
/// the newest state.
pub struct ListStateStream<T: Send + Sync + 'static> {
    ticks: Pin<Box<dyn Stream<Item = ()> + Send>>,
    items: watch::Receiver<Snapshot<T>>,
    loading: watch::Receiver<bool>,
}

impl<T: Send + Sync + 'static> Stream for ListStateStream<T> {
    type Item = ListState<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.ticks.as_mut().poll_next(cx) {
            Poll::Ready(Some(())) => Poll::Ready(Some(ListState {
                items: self.items.borrow().clone(),
                loading: *self.loading.borrow(),
            })),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
