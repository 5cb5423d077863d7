//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let location_endpoint = config.server.location_endpoint.as_deref().unwrap_or("");
    let vp = &config.viewport;

    format!(
        r#"[server]
; Feature and tile server (WFS / WMS)
geoserver_url = {}
; Endpoint notified after a survey form was submitted
submit_url = {}
; Base URL of the survey forms
form_base_url = {}
; Device-local location endpoint answering {{"latitude", "longitude"}} (optional)
location_endpoint = {}
; HTTP timeout in seconds (default: 30)
timeout = {}

[plan]
; Plan the session works on. District and block scope every layer name.
plan_id = {}
plan_name = {}
district = {}
block = {}

[loading]
; Milliseconds a tile layer may stay idle before it counts as loaded (default: 100)
fallback_window_ms = {}

[viewport]
; Pixels kept free around the fitted boundary (default: 50)
fit_padding = {}
fit_duration_ms = {}
; Zoom level after fitting the boundary (default: 14)
close_zoom = {}
; Zoom level when flying to the user's position (default: 17)
fly_zoom = {}
fly_duration_ms = {}
; Fade-in of boundary and asset layers
fade_duration_ms = {}
fade_frames = {}
; World view shown when the boundary cannot be loaded
world_lon = {}
world_lat = {}
world_zoom = {}

[logging]
; Log directory (default: ~/.resmap/logs)
directory = {}
file = {}
"#,
        config.server.geoserver_url,
        config.server.submit_url,
        config.server.form_base_url,
        location_endpoint,
        config.server.timeout,
        config.plan.plan_id,
        config.plan.plan_name,
        config.plan.district,
        config.plan.block,
        config.loading.fallback_window_ms,
        vp.fit_padding,
        vp.fit_duration_ms,
        vp.close_zoom,
        vp.fly_zoom,
        vp.fly_duration_ms,
        vp.fade_duration_ms,
        vp.fade_frames,
        vp.world_lon,
        vp.world_lat,
        vp.world_zoom,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Render a path, abbreviating the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
