//! Default values for all configuration settings.

use super::file::config_directory;
use super::settings::*;

pub const DEFAULT_GEOSERVER_URL: &str = "https://geoserver.core-stack.org:8443/geoserver";
pub const DEFAULT_SUBMIT_URL: &str = "https://api.core-stack.org/api/v1/add_resources/";
pub const DEFAULT_FORM_BASE_URL: &str = "https://odk.core-stack.org";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_FALLBACK_WINDOW_MS: u64 = 100;

pub const DEFAULT_FIT_PADDING: u32 = 50;
pub const DEFAULT_FIT_DURATION_MS: u64 = 1000;
pub const DEFAULT_CLOSE_ZOOM: f64 = 14.0;
pub const DEFAULT_FLY_ZOOM: f64 = 17.0;
pub const DEFAULT_FLY_DURATION_MS: u64 = 1500;
pub const DEFAULT_FADE_DURATION_MS: u64 = 1000;
pub const DEFAULT_FADE_FRAMES: u32 = 20;
pub const DEFAULT_WORLD_LON: f64 = 78.9;
pub const DEFAULT_WORLD_LAT: f64 = 20.6;
pub const DEFAULT_WORLD_ZOOM: f64 = 4.0;

/// Highest zoom level the tile services serve.
pub const MAX_ZOOM: f64 = 22.0;

pub const DEFAULT_LOG_FILE: &str = "resmap.log";

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            geoserver_url: DEFAULT_GEOSERVER_URL.to_string(),
            submit_url: DEFAULT_SUBMIT_URL.to_string(),
            form_base_url: DEFAULT_FORM_BASE_URL.to_string(),
            location_endpoint: None,
            timeout: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Default for LoadingSettings {
    fn default() -> Self {
        Self {
            fallback_window_ms: DEFAULT_FALLBACK_WINDOW_MS,
        }
    }
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            fit_padding: DEFAULT_FIT_PADDING,
            fit_duration_ms: DEFAULT_FIT_DURATION_MS,
            close_zoom: DEFAULT_CLOSE_ZOOM,
            fly_zoom: DEFAULT_FLY_ZOOM,
            fly_duration_ms: DEFAULT_FLY_DURATION_MS,
            fade_duration_ms: DEFAULT_FADE_DURATION_MS,
            fade_frames: DEFAULT_FADE_FRAMES,
            world_lon: DEFAULT_WORLD_LON,
            world_lat: DEFAULT_WORLD_LAT,
            world_zoom: DEFAULT_WORLD_ZOOM,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: config_directory().join("logs"),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            plan: PlanSettings::default(),
            loading: LoadingSettings::default(),
            viewport: ViewportSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}
