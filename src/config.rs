use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::api::VEHICLE_POSITIONS_URL;
use crate::map::{LatLon, MapSettings, MarkerIcon};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// GTFS-RT vehicle positions endpoint
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Seconds between refresh cycles
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Timeout for a single feed request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    // Map configuration
    /// Latitude the map is centered on
    #[serde(default = "default_map_center_lat")]
    pub map_center_lat: f64,

    /// Longitude the map is centered on
    #[serde(default = "default_map_center_lon")]
    pub map_center_lon: f64,

    /// Initial zoom level
    #[serde(default = "default_map_zoom")]
    pub map_zoom: u8,

    /// Map width in pixels
    #[serde(default = "default_display_width")]
    pub display_width: u32,

    /// Map height in pixels
    #[serde(default = "default_display_height")]
    pub display_height: u32,

    // Dashboard configuration
    /// Title shown in the browser tab and page header
    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// Address the dashboard listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port the dashboard listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_feed_url() -> String {
    VEHICLE_POSITIONS_URL.to_string()
}

fn default_refresh_interval() -> u64 {
    15
}

fn default_request_timeout() -> u64 {
    10
}

fn default_map_center_lat() -> f64 {
    -34.9285
}

fn default_map_center_lon() -> f64 {
    138.6007
}

fn default_map_zoom() -> u8 {
    12
}

fn default_display_width() -> u32 {
    1400
}

fn default_display_height() -> u32 {
    800
}

fn default_page_title() -> String {
    "Adelaide Realtime Map".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load from `ADELAIDE_RT_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("ADELAIDE_RT"))
            .build()?
            .try_deserialize()
    }

    /// Period between refresh cycles
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Timeout applied to each feed request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Map center, zoom and display size for the renderer
    pub fn map_settings(&self) -> MapSettings {
        MapSettings {
            center: LatLon {
                lat: self.map_center_lat,
                lon: self.map_center_lon,
            },
            zoom: self.map_zoom,
            width: self.display_width,
            height: self.display_height,
            icon: MarkerIcon::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests touch process-wide environment variables
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "ADELAIDE_RT_FEED_URL",
        "ADELAIDE_RT_REFRESH_INTERVAL_SECS",
        "ADELAIDE_RT_MAP_ZOOM",
        "ADELAIDE_RT_PORT",
        "ADELAIDE_RT_LOG_LEVEL",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let _lock = TEST_LOCK.lock().unwrap();
        clear_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.feed_url, VEHICLE_POSITIONS_URL);
        assert_eq!(config.refresh_interval(), Duration::from_secs(15));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.map_settings(), MapSettings::default());
    }

    #[test]
    fn test_custom_config() {
        let _lock = TEST_LOCK.lock().unwrap();

        std::env::set_var("ADELAIDE_RT_FEED_URL", "http://localhost:9000/vp.bin");
        std::env::set_var("ADELAIDE_RT_REFRESH_INTERVAL_SECS", "30");
        std::env::set_var("ADELAIDE_RT_MAP_ZOOM", "14");
        std::env::set_var("ADELAIDE_RT_PORT", "9090");
        std::env::set_var("ADELAIDE_RT_LOG_LEVEL", "debug");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.feed_url, "http://localhost:9000/vp.bin");
        assert_eq!(config.refresh_interval_secs, 30);
        assert_eq!(config.map_settings().zoom, 14);
        assert_eq!(config.port, 9090);
        assert_eq!(config.log_level, "debug");

        clear_env();
    }
}
