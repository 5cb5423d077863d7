//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;
use std::time::Duration;

use crate::coord::LonLat;
use crate::source::PlanContext;
use crate::viewport::ViewportConfig;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub server: ServerSettings,
    pub plan: PlanSettings,
    pub loading: LoadingSettings,
    pub viewport: ViewportSettings,
    pub logging: LoggingSettings,
}

/// Remote endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Base URL of the feature and tile server.
    pub geoserver_url: String,
    /// Endpoint notified after a form submission.
    pub submit_url: String,
    /// Base URL form paths are appended to.
    pub form_base_url: String,
    /// Device-local location endpoint, if any.
    pub location_endpoint: Option<String>,
    /// HTTP timeout in seconds.
    pub timeout: u64,
}

/// The plan a session works on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanSettings {
    pub plan_id: String,
    pub plan_name: String,
    pub district: String,
    pub block: String,
}

impl PlanSettings {
    pub fn context(&self) -> PlanContext {
        PlanContext::new(&self.plan_id, &self.plan_name, &self.district, &self.block)
    }

    /// A plan needs at least a district and a block to name its layers.
    pub fn is_complete(&self) -> bool {
        !self.district.trim().is_empty() && !self.block.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingSettings {
    /// Grace window for tile layers that never request a tile.
    pub fallback_window_ms: u64,
}

impl LoadingSettings {
    pub fn fallback_window(&self) -> Duration {
        Duration::from_millis(self.fallback_window_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportSettings {
    pub fit_padding: u32,
    pub fit_duration_ms: u64,
    pub close_zoom: f64,
    pub fly_zoom: f64,
    pub fly_duration_ms: u64,
    pub fade_duration_ms: u64,
    pub fade_frames: u32,
    pub world_lon: f64,
    pub world_lat: f64,
    pub world_zoom: f64,
}

impl ViewportSettings {
    pub fn to_config(&self) -> ViewportConfig {
        ViewportConfig {
            fit_padding: self.fit_padding,
            fit_duration: Duration::from_millis(self.fit_duration_ms),
            close_zoom: self.close_zoom,
            fly_zoom: self.fly_zoom,
            fly_duration: Duration::from_millis(self.fly_duration_ms),
            fade_duration: Duration::from_millis(self.fade_duration_ms),
            fade_frames: self.fade_frames,
            world_center: LonLat::new(self.world_lon, self.world_lat),
            world_zoom: self.world_zoom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Directory the log file is written to.
    pub directory: PathBuf,
    /// Log file name.
    pub file: String,
}
