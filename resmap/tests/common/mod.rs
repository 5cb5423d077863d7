//! Shared fixtures for the session integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use resmap::layer::SlotKey;
use resmap::session::{MapSession, SessionOptions};
use resmap::source::{AsyncHttpClient, PlanContext, SourceError};
use resmap::surface::{InMemorySurface, RenderSurface};
use serde_json::{json, Value};

pub const GEOSERVER: &str = "https://geo.test/geoserver";
pub const SUBMIT_URL: &str = "https://api.test/add_resources/";

/// Names every remote layer of [`plan`] is scoped by.
pub const AREA: &str = "bhilwara_mandalgarh";
pub const SCOPED: &str = "7_bhilwara_mandalgarh";

pub fn plan() -> PlanContext {
    PlanContext::new("7", "Test plan", "Bhilwara", "Mandalgarh")
}

struct Route {
    pattern: String,
    response: Result<Vec<u8>, SourceError>,
    delay: Duration,
}

/// Scripted HTTP client.
///
/// Routes match by URL substring, first match wins, and may answer after a
/// delay. Unmatched URLs get a 404.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<String>>>,
    posts: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(&self, pattern: &str, body: Value) -> &Self {
        self.delayed_json(pattern, body, Duration::ZERO)
    }

    pub fn delayed_json(&self, pattern: &str, body: Value, delay: Duration) -> &Self {
        self.routes.lock().push(Route {
            pattern: pattern.to_string(),
            response: Ok(body.to_string().into_bytes()),
            delay,
        });
        self
    }

    pub fn fail(&self, pattern: &str, status: u16) -> &Self {
        self.routes.lock().push(Route {
            pattern: pattern.to_string(),
            response: Err(SourceError::Status {
                status,
                url: pattern.to_string(),
            }),
            delay: Duration::ZERO,
        });
        self
    }

    pub fn request_count(&self, pattern: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|u| u.contains(pattern))
            .count()
    }

    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().clone()
    }

    async fn respond(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        self.requests.lock().push(url.to_string());
        let found = self
            .routes
            .lock()
            .iter()
            .find(|r| url.contains(r.pattern.as_str()))
            .map(|r| (r.response.clone(), r.delay));

        match found {
            Some((response, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            None => Err(SourceError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

impl AsyncHttpClient for ScriptedClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        self.respond(url).await
    }

    async fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, SourceError> {
        self.posts
            .lock()
            .push((url.to_string(), json_body.to_string()));
        self.respond(url).await
    }
}

pub fn point(lon: f64, lat: f64, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [lon, lat]},
        "properties": properties
    })
}

pub fn collection(features: Vec<Value>) -> Value {
    json!({"type": "FeatureCollection", "features": features})
}

/// Square panchayat boundary around (75.0..75.5, 25.0..25.5).
pub fn boundary() -> Value {
    collection(vec![json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[75.0, 25.0], [75.5, 25.0], [75.5, 25.5], [75.0, 25.5], [75.0, 25.0]]]
        },
        "properties": {"panchayat": "Rampura"}
    })])
}

pub fn settlements() -> Value {
    collection(vec![
        point(75.10, 25.10, json!({"settlement_id": "S-1", "sett_name": "Khedi"})),
        point(75.20, 25.20, json!({"settlement_id": "S-2", "sett_name": "Bhimpura"})),
    ])
}

/// Client answering every Groundwater step 0 layer and the boundary.
pub fn groundwater_client() -> ScriptedClient {
    let client = ScriptedClient::new();
    client
        .json("panchayat_boundaries", boundary())
        .json(&format!("deltaG_well_depth_{}", AREA), collection(vec![]))
        .json(&format!("deltaG_fortnight_{}", AREA), collection(vec![]))
        .json(&format!("settlement_{}", SCOPED), settlements())
        .json(&format!("waterbody_{}", SCOPED), collection(vec![]))
        .json(&format!("plan_gw_{}", SCOPED), collection(vec![]));
    client
}

pub fn options() -> SessionOptions {
    SessionOptions::new(plan(), GEOSERVER).with_submit_url(SUBMIT_URL)
}

pub fn session(client: &ScriptedClient) -> (MapSession<ScriptedClient>, Arc<InMemorySurface>) {
    let surface = Arc::new(InMemorySurface::new());
    let session = MapSession::new(Arc::new(client.clone()), Arc::clone(&surface), options());
    (session, surface)
}

/// Attached slots, bottom to top.
pub fn attached(surface: &InMemorySurface) -> Vec<SlotKey> {
    surface.layers().iter().map(|l| l.key()).collect()
}
