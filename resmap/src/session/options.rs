use std::time::Duration;

use crate::config::ConfigFile;
use crate::load::DEFAULT_FALLBACK_WINDOW;
use crate::source::PlanContext;
use crate::viewport::ViewportConfig;

/// Everything a [`MapSession`](super::MapSession) needs besides its
/// collaborators.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub plan: PlanContext,
    pub geoserver_url: String,
    pub submit_url: String,
    pub form_base_url: String,
    pub fallback_window: Duration,
    pub viewport: ViewportConfig,
}

impl SessionOptions {
    pub fn new(plan: PlanContext, geoserver_url: &str) -> Self {
        let defaults = ConfigFile::default();
        Self {
            plan,
            geoserver_url: geoserver_url.to_string(),
            submit_url: defaults.server.submit_url,
            form_base_url: defaults.server.form_base_url,
            fallback_window: DEFAULT_FALLBACK_WINDOW,
            viewport: ViewportConfig::default(),
        }
    }

    pub fn from_config(config: &ConfigFile) -> Self {
        Self {
            plan: config.plan.context(),
            geoserver_url: config.server.geoserver_url.clone(),
            submit_url: config.server.submit_url.clone(),
            form_base_url: config.server.form_base_url.clone(),
            fallback_window: config.loading.fallback_window(),
            viewport: config.viewport.to_config(),
        }
    }

    pub fn with_submit_url(mut self, url: &str) -> Self {
        self.submit_url = url.to_string();
        self
    }

    pub fn with_form_base_url(mut self, url: &str) -> Self {
        self.form_base_url = url.to_string();
        self
    }

    pub fn with_fallback_window(mut self, window: Duration) -> Self {
        self.fallback_window = window;
        self
    }

    pub fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_every_section() {
        let mut config = ConfigFile::default();
        config.plan.district = "Bhilwara".to_string();
        config.plan.block = "Mandalgarh".to_string();
        config.loading.fallback_window_ms = 250;
        config.viewport.close_zoom = 15.0;

        let options = SessionOptions::from_config(&config);
        assert_eq!(options.plan.area_suffix(), "bhilwara_mandalgarh");
        assert_eq!(options.fallback_window, Duration::from_millis(250));
        assert_eq!(options.viewport.close_zoom, 15.0);
        assert_eq!(options.geoserver_url, config.server.geoserver_url);
    }

    #[test]
    fn test_viewport_defaults_agree() {
        assert_eq!(
            ConfigFile::default().viewport.to_config(),
            ViewportConfig::default()
        );
    }
}
