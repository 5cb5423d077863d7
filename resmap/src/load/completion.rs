//! One-shot load completion future.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::sync::{oneshot, watch};

use crate::layer::{LayerId, SlotKey};

/// Successful settlement of a layer load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A feature collection was fetched and parsed in full.
    Features { count: usize },
    /// Every requested tile finished loading.
    Tiles { count: usize },
    /// The layer requested nothing within the fallback window.
    ///
    /// Not an error: invisible or zero-extent layers never issue a tile
    /// request and would otherwise hold up the aggregate wait forever.
    NothingRequested,
}

/// Failure of a layer load. Terminal for that layer instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The request never produced a usable response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response arrived but could not be parsed.
    #[error("parse failure: {0}")]
    Parse(String),

    /// A tile request failed.
    #[error("tile failure: {0}")]
    Tile(String),

    /// The producer was dropped without settling.
    #[error("load abandoned before completion")]
    Abandoned,
}

/// Result a [`LoadCompletion`] resolves to.
pub type LoadResult = Result<LoadOutcome, LoadError>;

/// Coarse load state of a layer instance, readable without awaiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed,
}

/// Shared cell holding a layer's [`LoadState`].
///
/// The layer reads it, the signal writes it exactly once on settlement.
/// Unlike the one-shot [`LoadCompletion`], settlement can be awaited by any
/// number of waiters through [`LoadStateCell::settled`].
#[derive(Debug, Clone)]
pub struct LoadStateCell(Arc<watch::Sender<LoadState>>);

impl Default for LoadStateCell {
    fn default() -> Self {
        let (tx, _) = watch::channel(LoadState::Pending);
        Self(Arc::new(tx))
    }
}

impl LoadStateCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> LoadState {
        *self.0.borrow()
    }

    /// Resolve once the state is no longer `Pending`.
    pub async fn settled(&self) -> LoadState {
        let mut rx = self.0.subscribe();
        let state = match rx.wait_for(|state| *state != LoadState::Pending).await {
            Ok(state) => *state,
            Err(_) => self.get(),
        };
        state
    }

    fn set(&self, state: LoadState) {
        self.0.send_replace(state);
    }
}

/// Producer half of a load completion.
///
/// Consumed on settlement, so a layer can settle at most once.
#[derive(Debug)]
pub struct LoadSignal {
    key: SlotKey,
    layer_id: LayerId,
    state: LoadStateCell,
    tx: Option<oneshot::Sender<LoadResult>>,
}

impl LoadSignal {
    pub fn key(&self) -> SlotKey {
        self.key
    }

    pub fn layer_id(&self) -> LayerId {
        self.layer_id
    }

    /// Settle the completion. A dropped receiver is not an error: nobody
    /// was waiting, but the layer state is still recorded.
    pub fn settle(mut self, result: LoadResult) {
        if let Some(tx) = self.tx.take() {
            self.state.set(if result.is_ok() {
                LoadState::Ready
            } else {
                LoadState::Failed
            });
            let _ = tx.send(result);
        }
    }
}

impl Drop for LoadSignal {
    fn drop(&mut self) {
        // Unsettled drop: the completion resolves as abandoned.
        if self.tx.take().is_some() {
            self.state.set(LoadState::Failed);
        }
    }
}

/// Consumer half: a future resolving to the layer's [`LoadResult`].
#[derive(Debug)]
pub struct LoadCompletion {
    key: SlotKey,
    layer_id: LayerId,
    rx: oneshot::Receiver<LoadResult>,
}

impl LoadCompletion {
    pub fn key(&self) -> SlotKey {
        self.key
    }

    pub fn layer_id(&self) -> LayerId {
        self.layer_id
    }
}

impl Future for LoadCompletion {
    type Output = LoadResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(LoadError::Abandoned)))
    }
}

/// Create the signal/completion pair for one layer instance.
///
/// `state` must be the same cell the layer was constructed with.
pub fn load_channel(
    key: SlotKey,
    layer_id: LayerId,
    state: LoadStateCell,
) -> (LoadSignal, LoadCompletion) {
    let (tx, rx) = oneshot::channel();
    (
        LoadSignal {
            key,
            layer_id,
            state,
            tx: Some(tx),
        },
        LoadCompletion { key, layer_id, rx },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (LoadSignal, LoadCompletion, LoadStateCell) {
        let cell = LoadStateCell::new();
        let (signal, completion) = load_channel(SlotKey::Settlement, LayerId::next(), cell.clone());
        (signal, completion, cell)
    }

    #[tokio::test]
    async fn test_settle_success_marks_ready() {
        let (signal, completion, cell) = pair();
        assert_eq!(cell.get(), LoadState::Pending);

        signal.settle(Ok(LoadOutcome::Features { count: 3 }));

        assert_eq!(completion.await, Ok(LoadOutcome::Features { count: 3 }));
        assert_eq!(cell.get(), LoadState::Ready);
    }

    #[tokio::test]
    async fn test_settle_failure_marks_failed() {
        let (signal, completion, cell) = pair();
        signal.settle(Err(LoadError::Parse("bad json".into())));

        assert!(matches!(completion.await, Err(LoadError::Parse(_))));
        assert_eq!(cell.get(), LoadState::Failed);
    }

    #[tokio::test]
    async fn test_dropped_signal_is_abandoned() {
        let (signal, completion, cell) = pair();
        drop(signal);

        assert_eq!(completion.await, Err(LoadError::Abandoned));
        assert_eq!(cell.get(), LoadState::Failed);
    }

    #[tokio::test]
    async fn test_settled_can_be_awaited_by_many() {
        let (signal, _completion, cell) = pair();
        let first = cell.clone();
        let second = cell.clone();
        let waiters = tokio::spawn(async move { (first.settled().await, second.settled().await) });
        tokio::task::yield_now().await;

        signal.settle(Err(LoadError::Tile("404".into())));

        assert_eq!(waiters.await.unwrap(), (LoadState::Failed, LoadState::Failed));
        assert_eq!(cell.settled().await, LoadState::Failed);
    }

    #[test]
    fn test_settle_without_receiver_records_state() {
        let (signal, completion, cell) = pair();
        drop(completion);
        signal.settle(Ok(LoadOutcome::NothingRequested));
        assert_eq!(cell.get(), LoadState::Ready);
    }
}
