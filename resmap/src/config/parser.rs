//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::defaults::MAX_ZOOM;
use super::file::ConfigFileError;
use super::settings::ConfigFile;

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse `key` from `section` if present.
fn parse<T: FromStr>(
    props: &Properties,
    section: &str,
    key: &str,
    reason: &str,
) -> Result<Option<T>, ConfigFileError> {
    match props.get(key) {
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(section, key, v, reason)),
        None => Ok(None),
    }
}

fn parse_zoom(props: &Properties, section: &str, key: &str) -> Result<Option<f64>, ConfigFileError> {
    let reason = "must be a number between 0 and 22";
    match parse::<f64>(props, section, key, reason)? {
        Some(z) if !(0.0..=MAX_ZOOM).contains(&z) => {
            Err(invalid(section, key, &z.to_string(), reason))
        }
        other => Ok(other),
    }
}

fn parse_url(props: &Properties, section: &str, key: &str) -> Result<Option<String>, ConfigFileError> {
    match props.get(key).map(str::trim) {
        Some("") | None => Ok(None),
        Some(v) if v.starts_with("http://") || v.starts_with("https://") => {
            Ok(Some(v.trim_end_matches('/').to_string()))
        }
        Some(v) => Err(invalid(section, key, v, "must be an http:// or https:// URL")),
    }
}

fn non_empty(props: &Properties, key: &str) -> Option<String> {
    props
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [server] section
    if let Some(s) = ini.section(Some("server")) {
        if let Some(v) = parse_url(s, "server", "geoserver_url")? {
            config.server.geoserver_url = v;
        }
        if let Some(v) = parse_url(s, "server", "submit_url")? {
            // The submission endpoint expects its trailing slash.
            config.server.submit_url = format!("{}/", v);
        }
        if let Some(v) = parse_url(s, "server", "form_base_url")? {
            config.server.form_base_url = v;
        }
        config.server.location_endpoint = parse_url(s, "server", "location_endpoint")?;
        if let Some(v) = parse::<u64>(s, "server", "timeout", "must be a positive integer (seconds)")? {
            if v == 0 {
                return Err(invalid("server", "timeout", "0", "must be a positive integer (seconds)"));
            }
            config.server.timeout = v;
        }
    }

    // [plan] section
    if let Some(s) = ini.section(Some("plan")) {
        if let Some(v) = non_empty(s, "plan_id") {
            config.plan.plan_id = v;
        }
        if let Some(v) = non_empty(s, "plan_name") {
            config.plan.plan_name = v;
        }
        if let Some(v) = non_empty(s, "district") {
            config.plan.district = v;
        }
        if let Some(v) = non_empty(s, "block") {
            config.plan.block = v;
        }
    }

    // [loading] section
    if let Some(s) = ini.section(Some("loading")) {
        if let Some(v) = parse(s, "loading", "fallback_window_ms", "must be an integer (milliseconds)")? {
            config.loading.fallback_window_ms = v;
        }
    }

    // [viewport] section
    if let Some(s) = ini.section(Some("viewport")) {
        let vp = &mut config.viewport;
        let ms = "must be an integer (milliseconds)";
        if let Some(v) = parse(s, "viewport", "fit_padding", "must be an integer (pixels)")? {
            vp.fit_padding = v;
        }
        if let Some(v) = parse(s, "viewport", "fit_duration_ms", ms)? {
            vp.fit_duration_ms = v;
        }
        if let Some(v) = parse_zoom(s, "viewport", "close_zoom")? {
            vp.close_zoom = v;
        }
        if let Some(v) = parse_zoom(s, "viewport", "fly_zoom")? {
            vp.fly_zoom = v;
        }
        if let Some(v) = parse(s, "viewport", "fly_duration_ms", ms)? {
            vp.fly_duration_ms = v;
        }
        if let Some(v) = parse(s, "viewport", "fade_duration_ms", ms)? {
            vp.fade_duration_ms = v;
        }
        if let Some(v) = parse::<u32>(s, "viewport", "fade_frames", "must be a positive integer")? {
            if v == 0 {
                return Err(invalid("viewport", "fade_frames", "0", "must be a positive integer"));
            }
            vp.fade_frames = v;
        }
        if let Some(v) = parse::<f64>(s, "viewport", "world_lon", "must be a longitude")? {
            if !(-180.0..=180.0).contains(&v) {
                return Err(invalid("viewport", "world_lon", &v.to_string(), "must be within -180..180"));
            }
            vp.world_lon = v;
        }
        if let Some(v) = parse::<f64>(s, "viewport", "world_lat", "must be a latitude")? {
            if !(-90.0..=90.0).contains(&v) {
                return Err(invalid("viewport", "world_lat", &v.to_string(), "must be within -90..90"));
            }
            vp.world_lat = v;
        }
        if let Some(v) = parse_zoom(s, "viewport", "world_zoom")? {
            vp.world_zoom = v;
        }
    }

    // [logging] section
    if let Some(s) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(s, "directory") {
            config.logging.directory = expand_tilde(&v);
        }
        if let Some(v) = non_empty(s, "file") {
            config.logging.file = v;
        }
    }

    Ok(config)
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        std::fs::write(&path, content).unwrap();
        ConfigFile::load_from(&path)
    }

    #[test]
    fn test_plan_section() {
        let config = load(
            r#"
[plan]
plan_id = 42
plan_name = Check dams
district = Bhilwara
block = Mandal Garh
"#,
        )
        .unwrap();

        let plan = config.plan.context();
        assert_eq!(plan.plan_suffix(), "42_bhilwara_mandal_garh");
        assert!(config.plan.is_complete());
    }

    #[test]
    fn test_invalid_timeout() {
        let err = load("[server]\ntimeout = soon\n").unwrap_err();
        assert!(err.to_string().contains("server.timeout"));
        assert!(err.to_string().contains("seconds"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(load("[server]\ntimeout = 0\n").is_err());
    }

    #[test]
    fn test_invalid_url() {
        let err = load("[server]\ngeoserver_url = ftp://example.org\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "geoserver_url"));
    }

    #[test]
    fn test_submit_url_keeps_trailing_slash() {
        let config = load("[server]\nsubmit_url = https://api.example.org/add_resources\n").unwrap();
        assert_eq!(config.server.submit_url, "https://api.example.org/add_resources/");
    }

    #[test]
    fn test_empty_location_endpoint_is_none() {
        let config = load("[server]\nlocation_endpoint =\n").unwrap();
        assert!(config.server.location_endpoint.is_none());
    }

    #[test]
    fn test_zoom_out_of_range() {
        let err = load("[viewport]\nclose_zoom = 30\n").unwrap_err();
        assert!(err.to_string().contains("close_zoom"));
    }

    #[test]
    fn test_loading_window() {
        let config = load("[loading]\nfallback_window_ms = 250\n").unwrap();
        assert_eq!(config.loading.fallback_window().as_millis(), 250);
    }

    #[test]
    fn test_unspecified_values_keep_defaults() {
        let config = load("[viewport]\nfly_zoom = 16\n").unwrap();
        assert_eq!(config.viewport.fly_zoom, 16.0);
        assert_eq!(config.viewport.close_zoom, DEFAULT_CLOSE_ZOOM);
        assert_eq!(config.server.timeout, DEFAULT_HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("test/path"));
        }
        assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
    }
}
