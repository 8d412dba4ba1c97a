use serde::{Deserialize, Serialize};

/// A single vehicle taken from one refresh of the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Vehicle identifier (fleet number), empty if the feed omits it
    pub id: String,

    /// Route the vehicle's current trip belongs to, may be empty
    pub route: String,

    /// Latitude in WGS84 degrees
    pub lat: f64,

    /// Longitude in WGS84 degrees
    pub lon: f64,
}

impl VehicleRecord {
    pub fn new(id: impl Into<String>, route: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            route: route.into(),
            lat,
            lon,
        }
    }
}

impl std::fmt::Display for VehicleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle {} on Route {} at ({:.6}, {:.6})",
            self.id, self.route, self.lat, self.lon
        )
    }
}

/// Severity of a message shown above the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Success,
    Warning,
    Error,
}

/// A user-visible notification produced during a refresh cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Error, text: text.into() }
    }
}

/// Message surface of the dashboard.
///
/// The feed client reports failures through this instead of returning them,
/// so a bad cycle degrades to an empty vehicle list.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: StatusMessage);

    fn success(&self, text: &str) {
        self.notify(StatusMessage::success(text));
    }

    fn warning(&self, text: &str) {
        self.notify(StatusMessage::warning(text));
    }

    fn error(&self, text: &str) {
        self.notify(StatusMessage::error(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats_position() {
        let v = VehicleRecord::new("B123", "M44", -34.92, 138.6);
        assert_eq!(v.to_string(), "Vehicle B123 on Route M44 at (-34.920000, 138.600000)");
    }

    #[test]
    fn test_status_level_serializes_lowercase() {
        let json = serde_json::to_string(&StatusMessage::warning("No vehicle data available.")).unwrap();
        assert_eq!(json, r#"{"level":"warning","text":"No vehicle data available."}"#);
    }
}
