//! Serialised layer transitions.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{join, join_all};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::table::{rank_in, working_set, RETAINED};
use crate::cache::LayerCache;
use crate::layer::{LayerHandle, SlotKey};
use crate::load::{LoadCompletion, LoadError, LoadResult, LoadState};
use crate::navigation::{NavigationState, Screen};
use crate::source::LayerFactory;
use crate::style::{style_for, Style};
use crate::surface::RenderSurface;

/// What triggered a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Every non-retained layer is detached before the new set goes up.
    Screen,
    /// Only layers leaving the working set are detached.
    Step,
}

/// Summary of a completed transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionReport {
    pub id: u64,
    pub state: NavigationState,
    /// Slots whose layer was created by this run.
    pub created: Vec<SlotKey>,
    /// Slots reused while still loading; waited for, not created here.
    pub awaited: Vec<SlotKey>,
    /// Newly created slots whose load was rejected.
    pub failed: Vec<(SlotKey, LoadError)>,
}

/// Result of [`TransitionController::navigate`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    Completed(TransitionReport),
    /// A newer navigation started before this one finished.
    Superseded { id: u64 },
}

impl TransitionOutcome {
    pub fn is_superseded(&self) -> bool {
        matches!(self, TransitionOutcome::Superseded { .. })
    }

    pub fn report(&self) -> Option<&TransitionReport> {
        match self {
            TransitionOutcome::Completed(report) => Some(report),
            TransitionOutcome::Superseded { .. } => None,
        }
    }
}

/// Result of [`TransitionController::refresh`].
#[derive(Debug)]
pub struct RefreshReport {
    pub layer: LayerHandle,
    /// Whether the slot is part of the current view and was reattached.
    pub attached: bool,
    pub result: LoadResult,
}

/// What one apply phase left to wait for.
struct Applied {
    created: Vec<LoadCompletion>,
    pending: Vec<LayerHandle>,
}

/// Applies the working-set table to the cache and the surface.
///
/// Each navigation takes a monotonically increasing id and a cancellation
/// token from the current epoch; starting a navigation cancels the
/// previous epoch. Runs mutate the cache and the surface one at a time
/// behind an async gate and re-check their token once they hold it, so a
/// superseded run never touches either. While waiting for loads a run
/// stops as soon as it is superseded.
///
/// Refreshes queue on the same gate without cancelling anything. The busy
/// flag counts outstanding runs and refreshes and drops to `false` when
/// the last one settles or is superseded.
pub struct TransitionController {
    cache: Arc<LayerCache>,
    surface: Arc<dyn RenderSurface>,
    factory: Arc<dyn LayerFactory>,
    root: CancellationToken,
    epoch: Mutex<CancellationToken>,
    gate: tokio::sync::Mutex<()>,
    next_id: AtomicU64,
    applied: Mutex<NavigationState>,
    busy: watch::Sender<bool>,
    active: Mutex<usize>,
}

impl TransitionController {
    pub fn new(
        cache: Arc<LayerCache>,
        surface: Arc<dyn RenderSurface>,
        factory: Arc<dyn LayerFactory>,
    ) -> Self {
        let root = CancellationToken::new();
        let epoch = root.child_token();
        let (busy, _) = watch::channel(false);
        Self {
            cache,
            surface,
            factory,
            root,
            epoch: Mutex::new(epoch),
            gate: tokio::sync::Mutex::new(()),
            next_id: AtomicU64::new(1),
            applied: Mutex::new(NavigationState::default()),
            busy,
            active: Mutex::new(0),
        }
    }

    pub fn cache(&self) -> &Arc<LayerCache> {
        &self.cache
    }

    /// The state whose working set was last applied.
    pub fn applied_state(&self) -> NavigationState {
        *self.applied.lock()
    }

    /// Subscribe to the busy indicator.
    pub fn busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    /// Cancel every pending run and clear the busy flag.
    ///
    /// Later navigations are superseded at once.
    pub fn shutdown(&self) {
        self.root.cancel();
        let mut active = self.active.lock();
        *active = 0;
        self.busy.send_replace(false);
    }

    fn begin(&self) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut active = self.active.lock();
        *active += 1;
        self.busy.send_replace(true);
        id
    }

    fn finish(&self) {
        let mut active = self.active.lock();
        *active = active.saturating_sub(1);
        if *active == 0 {
            self.busy.send_replace(false);
        }
    }

    fn next_epoch(&self) -> CancellationToken {
        let mut epoch = self.epoch.lock();
        epoch.cancel();
        *epoch = self.root.child_token();
        epoch.clone()
    }

    /// Create the retained layers and attach them.
    ///
    /// Returns the completions of the slots created here, keyed by slot;
    /// the caller decides what to wait for.
    pub async fn bootstrap(&self) -> Vec<LoadCompletion> {
        let _gate = self.gate.lock().await;
        let screen = self.applied_state().screen;
        let mut completions = Vec::new();
        for (key, z) in RETAINED {
            let layer = match self.cache.get(key) {
                Some(layer) if layer.load_state() != LoadState::Failed => layer,
                _ => {
                    let (layer, completion) = self.factory.create(key, style_for(key, screen));
                    self.cache.set(key, Arc::clone(&layer));
                    completions.push(completion);
                    layer
                }
            };
            layer.set_z_rank(z);
            self.surface.attach(layer);
        }
        debug!(created = completions.len(), "Bootstrapped retained layers");
        completions
    }

    /// Move the map to `state`.
    pub async fn navigate(&self, state: NavigationState, kind: TransitionKind) -> TransitionOutcome {
        let token = self.next_epoch();
        let id = self.begin();
        debug!(transition = id, state = %state, kind = ?kind, "Transition requested");

        let guard = tokio::select! {
            guard = self.gate.lock() => guard,
            _ = token.cancelled() => {
                debug!(transition = id, "Transition superseded while queued");
                return self.superseded(id);
            }
        };
        if token.is_cancelled() {
            debug!(transition = id, "Transition superseded before applying");
            return self.superseded(id);
        }

        let Applied { created, pending } = self.apply(state, kind);
        drop(guard);

        let keys: Vec<SlotKey> = created.iter().map(LoadCompletion::key).collect();
        let awaited: Vec<SlotKey> = pending.iter().map(|l| l.key()).collect();
        let settled = join(
            join_all(created),
            join_all(pending.iter().map(|l| l.settled())),
        );
        let (results, states) = tokio::select! {
            settled = settled => settled,
            _ = token.cancelled() => {
                debug!(transition = id, "Transition superseded while loading");
                return self.superseded(id);
            }
        };

        let failed: Vec<(SlotKey, LoadError)> = keys
            .iter()
            .zip(results)
            .filter_map(|(key, result)| result.err().map(|e| (*key, e)))
            .collect();
        for (key, error) in &failed {
            warn!(transition = id, slot = %key, error = %error, "Layer load failed");
        }
        for (key, load) in awaited.iter().zip(states) {
            if load == LoadState::Failed {
                warn!(transition = id, slot = %key, "Reused layer failed to load");
            }
        }

        self.finish();
        info!(
            transition = id,
            state = %state,
            created = keys.len(),
            awaited = awaited.len(),
            failed = failed.len(),
            "Transition complete"
        );

        TransitionOutcome::Completed(TransitionReport {
            id,
            state,
            created: keys,
            awaited,
            failed,
        })
    }

    fn superseded(&self, id: u64) -> TransitionOutcome {
        self.finish();
        TransitionOutcome::Superseded { id }
    }

    /// Mutate the cache and surface for `state`. Never suspends.
    fn apply(&self, state: NavigationState, kind: TransitionKind) -> Applied {
        let target = working_set(state);
        let wanted: HashSet<SlotKey> = target.iter().map(|(k, _)| *k).collect();

        for layer in self.surface.layers() {
            let key = layer.key();
            let leaving = match kind {
                TransitionKind::Screen => !key.is_retained(),
                TransitionKind::Step => !key.is_retained() && !wanted.contains(&key),
            };
            let orphan = self.cache.get(key).map(|l| l.id()) != Some(layer.id());
            if leaving || orphan {
                self.surface.detach(layer.id());
            }
        }

        let mut completions = Vec::new();
        let mut pending = Vec::new();
        let mut layers = Vec::with_capacity(target.len());
        for (key, z) in target {
            let layer = match self.cache.get(*key) {
                Some(layer) if layer.load_state() != LoadState::Failed => {
                    if kind == TransitionKind::Screen {
                        layer.set_style(style_for(*key, state.screen));
                    }
                    if layer.load_state() == LoadState::Pending {
                        pending.push(Arc::clone(&layer));
                    }
                    layer
                }
                previous => {
                    if previous.is_some() {
                        debug!(slot = %key, "Recreating failed layer");
                    }
                    let (layer, completion) = self.factory.create(*key, style_for(*key, state.screen));
                    self.cache.set(*key, Arc::clone(&layer));
                    completions.push(completion);
                    layer
                }
            };
            layer.set_z_rank(*z);
            layers.push(layer);
        }

        // The table is z-sorted; attach bottom to top.
        for layer in layers {
            self.surface.attach(layer);
        }

        *self.applied.lock() = state;
        Applied {
            created: completions,
            pending,
        }
    }

    /// Invalidate one slot and load it again.
    ///
    /// The new layer gets `style` if given, or the slot's style on the
    /// current screen. It is attached only if the slot is visible in the
    /// applied state.
    pub async fn refresh(&self, key: SlotKey, style: Option<Style>) -> RefreshReport {
        let id = self.begin();
        let guard = self.gate.lock().await;

        let state = self.applied_state();
        self.cache.clear(key);
        let style = style.unwrap_or_else(|| style_for(key, state.screen));
        let (layer, completion) = self.factory.create(key, style);
        self.cache.set(key, Arc::clone(&layer));

        let attached = match rank_in(state, key) {
            Some(z) => {
                layer.set_z_rank(z);
                self.surface.attach(Arc::clone(&layer));
                true
            }
            None => false,
        };
        drop(guard);
        debug!(transition = id, slot = %key, layer_id = %layer.id(), attached, "Refreshing slot");

        let result = tokio::select! {
            result = completion => result,
            _ = self.root.cancelled() => Err(LoadError::Abandoned),
        };
        if let Err(e) = &result {
            warn!(transition = id, slot = %key, error = %e, "Refresh failed");
        }
        self.finish();

        RefreshReport {
            layer,
            attached,
            result,
        }
    }

    /// Screen of the applied state.
    pub fn screen(&self) -> Screen {
        self.applied_state().screen
    }
}

impl std::fmt::Debug for TransitionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionController")
            .field("applied", &self.applied_state())
            .field("busy", &self.is_busy())
            .finish()
    }
}
