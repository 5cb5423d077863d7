use std::sync::Arc;

use futures::future::join_all;
use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::watch;
use tracing::{info, warn};

use super::error::SessionError;
use super::options::SessionOptions;
use crate::cache::LayerCache;
use crate::coord::LonLat;
use crate::hit_test::HitTestDispatcher;
use crate::layer::{Feature, Geometry, LayerHandle, Properties, ResourceType, SlotKey};
use crate::load::{LoadCompletion, LoadError, LoadResult};
use crate::location::LocationSource;
use crate::navigation::{FeatureSelection, NavigationState, NavigationStateMachine, Panel, Screen};
use crate::source::{
    AsyncHttpClient, LayerCatalog, LayerFactory, PlanContext, RasterQueryClient,
    ServiceLayerFactory,
};
use crate::style::{style_for, ClickMatchResolver, Style};
use crate::surface::{RenderSurface, ViewController};
use crate::survey::{FormKind, FormLink, SubmissionClient, SubmissionPayload};
use crate::transition::{working_set, TransitionController, TransitionKind, TransitionOutcome};
use crate::viewport::{AnimationOutcome, ViewportAnimator};

/// Attribute names a settlement id is stored under.
const SETTLEMENT_ID_KEYS: [&str; 2] = ["settlement_id", "id"];

/// Result of [`MapSession::start`].
#[derive(Debug, Clone, PartialEq)]
pub struct StartReport {
    pub boundary: LoadResult,
    /// `None` when the world-view fallback was used instead.
    pub animation: Option<AnimationOutcome>,
}

/// Result of [`MapSession::submit_form`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The server accepted the submission and the slot was reloaded.
    Refreshed {
        layer: LayerHandle,
        result: LoadResult,
    },
    /// The server answered with something other than success.
    Rejected { message: String },
}

/// One map of one plan.
pub struct MapSession<C> {
    plan: PlanContext,
    catalog: LayerCatalog,
    cache: Arc<LayerCache>,
    surface: Arc<dyn RenderSurface>,
    controller: Arc<TransitionController>,
    dispatcher: HitTestDispatcher,
    animator: ViewportAnimator,
    raster: RasterQueryClient<C>,
    submissions: SubmissionClient<C>,
    form_base_url: String,
    navigation: Mutex<NavigationStateMachine>,
    last_click: Mutex<Option<LonLat>>,
}

impl<C: AsyncHttpClient + 'static> MapSession<C> {
    /// Build a session drawing on `surface` and fetching through `client`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new<S>(client: Arc<C>, surface: Arc<S>, options: SessionOptions) -> Self
    where
        S: RenderSurface + ViewController + 'static,
    {
        let catalog = LayerCatalog::new(&options.geoserver_url);
        let factory: Arc<dyn LayerFactory> = Arc::new(
            ServiceLayerFactory::new(Arc::clone(&client), catalog.clone(), options.plan.clone())
                .with_fallback_window(options.fallback_window),
        );
        let render: Arc<dyn RenderSurface> = surface.clone();
        let view: Arc<dyn ViewController> = surface;

        let cache = Arc::new(LayerCache::new(Arc::clone(&render)));
        let controller = Arc::new(TransitionController::new(
            Arc::clone(&cache),
            Arc::clone(&render),
            factory,
        ));

        Self {
            dispatcher: HitTestDispatcher::new(Arc::clone(&cache), Arc::clone(&render)),
            animator: ViewportAnimator::new(view, options.viewport.clone()),
            raster: RasterQueryClient::new(Arc::clone(&client), &options.geoserver_url),
            submissions: SubmissionClient::new(client, &options.submit_url),
            form_base_url: options.form_base_url,
            plan: options.plan,
            catalog,
            cache,
            surface: render,
            controller,
            navigation: Mutex::new(NavigationStateMachine::new()),
            last_click: Mutex::new(None),
        }
    }

    pub fn plan(&self) -> &PlanContext {
        &self.plan
    }

    pub fn cache(&self) -> &Arc<LayerCache> {
        &self.cache
    }

    pub fn controller(&self) -> &Arc<TransitionController> {
        &self.controller
    }

    pub fn navigation_state(&self) -> NavigationState {
        self.navigation.lock().state()
    }

    pub fn selection(&self) -> Option<FeatureSelection> {
        self.navigation.lock().selection().cloned()
    }

    pub fn busy(&self) -> watch::Receiver<bool> {
        self.controller.busy()
    }

    /// Load the retained layers and frame the admin boundary.
    ///
    /// Falls back to the world view if the boundary fails to load or has
    /// no extent.
    pub async fn start(&self) -> StartReport {
        let completions = self.controller.bootstrap().await;
        let (boundary, others): (Vec<LoadCompletion>, Vec<LoadCompletion>) = completions
            .into_iter()
            .partition(|c| c.key() == SlotKey::AdminBoundary);

        let boundary_result = match boundary.into_iter().next() {
            Some(completion) => completion.await,
            None => Err(LoadError::Abandoned),
        };
        let keys: Vec<SlotKey> = others.iter().map(LoadCompletion::key).collect();
        let results = join_all(others).await;
        for (key, result) in keys.into_iter().zip(results) {
            if let Err(e) = result {
                warn!(slot = %key, error = %e, "Retained layer failed to load");
            }
        }

        let boundary_layer = self.cache.get(SlotKey::AdminBoundary);
        let extent = boundary_layer.as_ref().and_then(|l| l.extent());
        let animation = match (&boundary_result, boundary_layer, extent) {
            (Ok(_), Some(layer), Some(extent)) => {
                let mut fading = vec![layer];
                fading.extend(self.cache.get(SlotKey::UserMarker));
                Some(self.animator.fit_boundary(extent, &fading).await)
            }
            _ => {
                warn!(result = ?boundary_result, "Boundary unavailable");
                self.animator.reset_world_view();
                None
            }
        };

        info!(plan = %self.plan.plan_suffix(), "Session started");
        StartReport {
            boundary: boundary_result,
            animation,
        }
    }

    /// Switch screen. Resets the step and the selection.
    pub async fn set_screen(&self, screen: Screen) -> TransitionOutcome {
        let state = self.navigation.lock().set_screen(screen);
        self.controller.navigate(state, TransitionKind::Screen).await
    }

    /// Switch step within the current screen.
    pub async fn set_step(&self, step: u8) -> Result<TransitionOutcome, SessionError> {
        let state = self.navigation.lock().set_step(step)?;
        Ok(self.controller.navigate(state, TransitionKind::Step).await)
    }

    /// Resolve a click and store the selection.
    ///
    /// Falls back to a raster point query when no vector feature is hit and
    /// a queryable raster is visible.
    pub async fn click(&self, at: LonLat) -> Option<FeatureSelection> {
        *self.last_click.lock() = Some(at);
        let state = self.navigation_state();

        let selection = match self.dispatcher.dispatch(state.screen, at) {
            Some(hit) => Some(hit.selection),
            None => self.query_rasters(state, at).await,
        };

        if let Some(selection) = &selection {
            self.navigation.lock().select(selection.clone());
        }
        selection
    }

    async fn query_rasters(&self, state: NavigationState, at: LonLat) -> Option<FeatureSelection> {
        for (key, _) in working_set(state) {
            let Some((workspace, layer)) = self.catalog.raster_query_layer(*key, &self.plan) else {
                continue;
            };
            let attached = self
                .cache
                .get(*key)
                .is_some_and(|l| self.surface.contains(l.id()));
            if !attached {
                continue;
            }

            match self.raster.query(&workspace, &layer, at).await {
                Ok(Some(value)) => {
                    return Some(FeatureSelection::new(
                        *key,
                        None,
                        value.properties,
                        Panel::RasterInfo,
                        at,
                    ));
                }
                Ok(None) => {}
                Err(e) => warn!(slot = %key, error = %e, "Raster query failed"),
            }
        }
        None
    }

    /// Move the user marker to `at` and fly there.
    pub async fn update_location(&self, at: LonLat) -> AnimationOutcome {
        if let Some(marker) = self.cache.get(SlotKey::UserMarker) {
            let mut props = Properties::new();
            props.insert("kind".to_string(), json!("user_location"));
            marker.set_features(vec![Feature::new(Some(Geometry::point(at)), props)]);
        }
        self.animator.fly_to(at).await
    }

    /// Ask `source` for the position and fly there.
    pub async fn locate<L: LocationSource>(&self, source: &L) -> Result<AnimationOutcome, SessionError> {
        let at = source.current().await?;
        Ok(self.update_location(at).await)
    }

    /// Deep link to the form for `resource_type` at the last click.
    ///
    /// A selected settlement is passed along as the record's settlement.
    pub fn form_link(&self, resource_type: ResourceType, kind: FormKind) -> Result<String, SessionError> {
        let at = (*self.last_click.lock()).ok_or(SessionError::NoClick)?;
        let mut link = FormLink::new(&self.form_base_url, resource_type, &self.plan, at).with_kind(kind);

        let settlement = self
            .navigation
            .lock()
            .selection()
            .filter(|s| s.slot == SlotKey::Settlement)
            .and_then(|s| {
                SETTLEMENT_ID_KEYS
                    .iter()
                    .find_map(|k| s.properties.get(*k))
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            });
        if let Some(id) = settlement {
            link = link.with_settlement(&id);
        }
        Ok(link.url()?)
    }

    /// Report a completed form and, on success, reload the affected slot.
    ///
    /// The reloaded layer highlights the feature at the last click.
    pub async fn submit_form(&self, resource_type: ResourceType) -> Result<SubmitOutcome, SessionError> {
        let payload = SubmissionPayload::new(resource_type, &self.plan);
        let response = self.submissions.submit(&payload).await?;
        if !response.is_success() {
            warn!(layer = %payload.layer_name, message = %response.message, "Submission rejected");
            return Ok(SubmitOutcome::Rejected {
                message: response.message,
            });
        }

        let key = resource_type.slot();
        let screen = self.navigation_state().screen;
        let style = (*self.last_click.lock()).map(|at| {
            Style::resolver(ClickMatchResolver::new(style_for(key, screen).to_resolver(), at))
        });

        let report = self.controller.refresh(key, style).await;
        Ok(SubmitOutcome::Refreshed {
            layer: report.layer,
            result: report.result,
        })
    }

    /// Cancel pending work and drop every layer.
    pub fn shutdown(&self) {
        self.controller.shutdown();
        self.cache.clear_all();
    }
}
