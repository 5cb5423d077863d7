use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::coord::{Extent, LonLat};
use crate::layer::LayerHandle;
use crate::surface::ViewController;

/// Animation timings and camera targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    /// Pixels kept free around a fitted extent.
    pub fit_padding: u32,
    pub fit_duration: Duration,
    /// Zoom the boundary animation settles at.
    pub close_zoom: f64,
    pub fly_zoom: f64,
    pub fly_duration: Duration,
    pub fade_duration: Duration,
    /// Opacity steps in the fade-in.
    pub fade_frames: u32,
    pub world_center: LonLat,
    pub world_zoom: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            fit_padding: 50,
            fit_duration: Duration::from_millis(1000),
            close_zoom: 14.0,
            fly_zoom: 17.0,
            fly_duration: Duration::from_millis(1500),
            fade_duration: Duration::from_millis(1000),
            fade_frames: 20,
            world_center: LonLat::new(78.9, 20.6),
            world_zoom: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Boundary,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed,
    /// A newer animation of the same kind took over.
    Superseded,
}

/// Drives the camera through a [`ViewController`].
pub struct ViewportAnimator {
    view: Arc<dyn ViewController>,
    config: ViewportConfig,
    pending: Mutex<HashMap<AnimationKind, CancellationToken>>,
}

impl ViewportAnimator {
    pub fn new(view: Arc<dyn ViewController>, config: ViewportConfig) -> Self {
        Self {
            view,
            config,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Cancel the pending animation of `kind` and register a new one.
    fn claim(&self, kind: AnimationKind) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.pending.lock().insert(kind, token.clone()) {
            previous.cancel();
        }
        token
    }

    fn cancel(&self, kind: AnimationKind) {
        if let Some(previous) = self.pending.lock().remove(&kind) {
            previous.cancel();
        }
    }

    /// Leave `layers` visible unless a newer boundary animation owns them.
    fn abandon_fade(&self, layers: &[LayerHandle]) -> AnimationOutcome {
        if !self.pending.lock().contains_key(&AnimationKind::Boundary) {
            for layer in layers {
                layer.set_opacity(1.0);
            }
        }
        superseded(AnimationKind::Boundary)
    }

    /// Fit `extent`, zoom in, then fade `layers` from transparent to opaque.
    ///
    /// If cancelled without a newer boundary animation taking over, the
    /// layers are restored to full opacity.
    pub async fn fit_boundary(&self, extent: Extent, layers: &[LayerHandle]) -> AnimationOutcome {
        let token = self.claim(AnimationKind::Boundary);
        let cfg = &self.config;

        for layer in layers {
            layer.set_opacity(0.0);
        }

        if !extent.is_degenerate() {
            self.view
                .fit_extent(extent, cfg.fit_padding, cfg.fit_duration);
            if !pause(&token, cfg.fit_duration).await {
                return self.abandon_fade(layers);
            }
        }

        self.view
            .animate_to(extent.center(), cfg.close_zoom, cfg.fit_duration);
        if !pause(&token, cfg.fit_duration).await {
            return self.abandon_fade(layers);
        }

        let frames = cfg.fade_frames.max(1);
        let frame = cfg.fade_duration / frames;
        for i in 1..=frames {
            if !pause(&token, frame).await {
                return self.abandon_fade(layers);
            }
            let opacity = i as f32 / frames as f32;
            for layer in layers {
                layer.set_opacity(opacity);
            }
        }

        info!(center = %extent.center(), zoom = cfg.close_zoom, "Boundary view settled");
        AnimationOutcome::Completed
    }

    /// Fly to the user's position.
    pub async fn fly_to(&self, at: LonLat) -> AnimationOutcome {
        let token = self.claim(AnimationKind::Location);
        self.view
            .animate_to(at, self.config.fly_zoom, self.config.fly_duration);
        if !pause(&token, self.config.fly_duration).await {
            return superseded(AnimationKind::Location);
        }
        debug!(at = %at, "Location fly-to finished");
        AnimationOutcome::Completed
    }

    /// Degraded mode after a boundary failure.
    pub fn reset_world_view(&self) {
        self.cancel(AnimationKind::Boundary);
        info!(
            center = %self.config.world_center,
            zoom = self.config.world_zoom,
            "Resetting to world view"
        );
        self.view
            .set_view(self.config.world_center, self.config.world_zoom);
    }
}

/// Sleep unless cancelled. Returns `false` on cancellation.
async fn pause(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(duration) => true,
        _ = token.cancelled() => false,
    }
}

fn superseded(kind: AnimationKind) -> AnimationOutcome {
    debug!(kind = ?kind, "Animation superseded");
    AnimationOutcome::Superseded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Layer, SlotKey};
    use crate::load::LoadStateCell;
    use crate::source::SourceDescriptor;
    use crate::style::Style;
    use crate::surface::{InMemorySurface, ViewCommand};

    fn animator() -> (Arc<InMemorySurface>, Arc<ViewportAnimator>) {
        let surface = Arc::new(InMemorySurface::new());
        let animator = Arc::new(ViewportAnimator::new(
            surface.clone(),
            ViewportConfig::default(),
        ));
        (surface, animator)
    }

    fn boundary_layer() -> LayerHandle {
        Arc::new(Layer::new(
            SlotKey::AdminBoundary,
            SlotKey::AdminBoundary.kind(),
            SourceDescriptor::Local,
            Style::default(),
            LoadStateCell::new(),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_fit_boundary_sequence() {
        let (surface, animator) = animator();
        let layer = boundary_layer();
        let extent = Extent::new(74.0, 24.0, 76.0, 26.0);

        let outcome = animator
            .fit_boundary(extent, std::slice::from_ref(&layer))
            .await;

        assert_eq!(outcome, AnimationOutcome::Completed);
        let commands = surface.view_commands();
        assert!(matches!(commands[0], ViewCommand::Fit { padding: 50, .. }));
        assert!(matches!(
            commands[1],
            ViewCommand::AnimateTo { zoom, .. } if zoom == 14.0
        ));
        assert_eq!(layer.opacity(), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_point_extent_skips_fit() {
        let (surface, animator) = animator();
        let extent = Extent::from_point(LonLat::new(75.0, 25.0));

        animator.fit_boundary(extent, &[]).await;

        let commands = surface.view_commands();
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], ViewCommand::AnimateTo { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_fly_to_supersedes() {
        let (surface, animator) = animator();

        let first = {
            let animator = Arc::clone(&animator);
            tokio::spawn(async move { animator.fly_to(LonLat::new(75.0, 25.0)).await })
        };
        tokio::task::yield_now().await;
        let second = animator.fly_to(LonLat::new(76.0, 26.0)).await;

        assert_eq!(first.await.unwrap(), AnimationOutcome::Superseded);
        assert_eq!(second, AnimationOutcome::Completed);
        assert!(matches!(
            surface.last_view(),
            Some(ViewCommand::AnimateTo { center, .. }) if center == LonLat::new(76.0, 26.0)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_location_does_not_cancel_boundary() {
        let (_surface, animator) = animator();
        let layer = boundary_layer();

        let boundary = {
            let animator = Arc::clone(&animator);
            let layer = Arc::clone(&layer);
            tokio::spawn(async move {
                animator
                    .fit_boundary(Extent::new(74.0, 24.0, 76.0, 26.0), &[layer])
                    .await
            })
        };
        tokio::task::yield_now().await;
        assert_eq!(
            animator.fly_to(LonLat::new(75.0, 25.0)).await,
            AnimationOutcome::Completed
        );
        assert_eq!(boundary.await.unwrap(), AnimationOutcome::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_world_view_cancels_boundary() {
        let (surface, animator) = animator();
        let layer = boundary_layer();

        let boundary = {
            let animator = Arc::clone(&animator);
            let layer = Arc::clone(&layer);
            tokio::spawn(async move {
                animator
                    .fit_boundary(Extent::new(74.0, 24.0, 76.0, 26.0), &[layer])
                    .await
            })
        };
        tokio::task::yield_now().await;
        assert_eq!(layer.opacity(), 0.0);
        animator.reset_world_view();

        assert_eq!(boundary.await.unwrap(), AnimationOutcome::Superseded);
        assert!(matches!(
            surface.last_view(),
            Some(ViewCommand::SetView { zoom, .. }) if zoom == 4.0
        ));
        assert_eq!(layer.opacity(), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_boundary_keeps_its_fade() {
        let (_surface, animator) = animator();
        let layer = boundary_layer();

        let first = {
            let animator = Arc::clone(&animator);
            let layer = Arc::clone(&layer);
            tokio::spawn(async move {
                animator
                    .fit_boundary(Extent::new(74.0, 24.0, 76.0, 26.0), &[layer])
                    .await
            })
        };
        tokio::task::yield_now().await;
        let second = {
            let animator = Arc::clone(&animator);
            let layer = Arc::clone(&layer);
            tokio::spawn(async move {
                animator
                    .fit_boundary(Extent::new(74.0, 24.0, 76.0, 26.0), &[layer])
                    .await
            })
        };
        tokio::task::yield_now().await;

        assert_eq!(first.await.unwrap(), AnimationOutcome::Superseded);
        assert_eq!(layer.opacity(), 0.0);
        assert_eq!(second.await.unwrap(), AnimationOutcome::Completed);
        assert_eq!(layer.opacity(), 1.0);
    }
}
