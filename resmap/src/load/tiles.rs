//! Tile-event driven load tracking for raster layers.
//!
//! The rendering engine owns tile fetching. It reports every tile request
//! start, end and error to the layer's tracker, which settles the layer's
//! [`LoadSignal`]:
//!
//! - outstanding tiles back at zero, no error → `Tiles { count }`
//! - first tile error → `Err(Tile)`
//! - no tile requested within the fallback window → `NothingRequested`
//!
//! Events arriving after settlement (panning, zooming) only update the
//! counters.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use super::completion::{LoadError, LoadOutcome, LoadSignal};

/// Grace window before a tile layer that never requested anything resolves.
pub const DEFAULT_FALLBACK_WINDOW: Duration = Duration::from_millis(100);

/// Tile counters of one raster layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileStats {
    pub requested: usize,
    pub pending: usize,
    pub completed: usize,
    pub failed: usize,
}

#[derive(Debug)]
struct TrackerInner {
    signal: Option<LoadSignal>,
    stats: TileStats,
}

impl TrackerInner {
    fn settle(&mut self, result: Result<LoadOutcome, LoadError>) {
        if let Some(signal) = self.signal.take() {
            debug!(
                slot = %signal.key(),
                layer_id = %signal.layer_id(),
                requested = self.stats.requested,
                ok = result.is_ok(),
                "Tile layer load settled"
            );
            signal.settle(result);
        }
    }
}

/// Sink for tile events of one raster layer.
///
/// Cheap to clone; clones share the same counters and signal.
#[derive(Debug, Clone)]
pub struct TileLoadTracker {
    inner: Arc<Mutex<TrackerInner>>,
}

impl TileLoadTracker {
    /// Create a tracker and arm its fallback timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(signal: LoadSignal, fallback: Duration) -> Self {
        let inner = Arc::new(Mutex::new(TrackerInner {
            signal: Some(signal),
            stats: TileStats::default(),
        }));

        let weak: Weak<Mutex<TrackerInner>> = Arc::downgrade(&inner);
        tokio::spawn(async move {
            tokio::time::sleep(fallback).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut guard = inner.lock();
            if guard.stats.requested == 0 {
                guard.settle(Ok(LoadOutcome::NothingRequested));
            }
        });

        Self { inner }
    }

    pub fn tile_started(&self) {
        let mut guard = self.inner.lock();
        guard.stats.requested += 1;
        guard.stats.pending += 1;
        trace!(pending = guard.stats.pending, "Tile load started");
    }

    pub fn tile_finished(&self) {
        let mut guard = self.inner.lock();
        guard.stats.pending = guard.stats.pending.saturating_sub(1);
        guard.stats.completed += 1;
        if guard.stats.pending == 0 && guard.stats.failed == 0 {
            let count = guard.stats.completed;
            guard.settle(Ok(LoadOutcome::Tiles { count }));
        }
    }

    pub fn tile_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let mut guard = self.inner.lock();
        guard.stats.pending = guard.stats.pending.saturating_sub(1);
        guard.stats.failed += 1;
        if guard.signal.is_some() {
            warn!(reason = %reason, "Tile load failed");
        }
        guard.settle(Err(LoadError::Tile(reason)));
    }

    pub fn stats(&self) -> TileStats {
        self.inner.lock().stats
    }

    pub fn is_settled(&self) -> bool {
        self.inner.lock().signal.is_none()
    }
}
