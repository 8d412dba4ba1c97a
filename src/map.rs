use serde::{Deserialize, Serialize};

use crate::models::VehicleRecord;

/// A WGS84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Font Awesome marker style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub color: String,
    pub name: String,
    pub prefix: String,
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
            name: "bus".to_string(),
            prefix: "fa".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    /// Popup label, `Vehicle: {id}<br>Route: {route}` with the feed values as-is
    pub popup: String,
    /// Raw identifiers; the page builds the popup from these as text
    pub vehicle_id: String,
    pub route: String,
    pub icon: MarkerIcon,
}

/// Everything the dashboard needs to draw one map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub control_scale: bool,
    pub markers: Vec<Marker>,
}

/// Fixed parts of every rendered view
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center: LatLon,
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub icon: MarkerIcon,
}

impl Default for MapSettings {
    fn default() -> Self {
        // Adelaide CBD
        Self {
            center: LatLon { lat: -34.9285, lon: 138.6007 },
            zoom: 12,
            width: 1400,
            height: 800,
            icon: MarkerIcon::default(),
        }
    }
}

/// Build a map view with one marker per vehicle
pub fn render(vehicles: &[VehicleRecord], settings: &MapSettings) -> MapView {
    let markers = vehicles
        .iter()
        .map(|v| Marker {
            lat: v.lat,
            lon: v.lon,
            popup: popup_text(v),
            vehicle_id: v.id.clone(),
            route: v.route.clone(),
            icon: settings.icon.clone(),
        })
        .collect();

    MapView {
        center: settings.center,
        zoom: settings.zoom,
        width: settings.width,
        height: settings.height,
        control_scale: true,
        markers,
    }
}

fn popup_text(v: &VehicleRecord) -> String {
    format!("Vehicle: {}<br>Route: {}", v.id, v.route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<VehicleRecord> {
        vec![
            VehicleRecord::new("B123", "M44", -34.92, 138.60),
            VehicleRecord::new("T7", "GLN1", -34.98, 138.52),
            VehicleRecord::new("T7", "GLN1", -34.98, 138.52),
        ]
    }

    #[test]
    fn test_empty_input_renders_centered_map() {
        let view = render(&[], &MapSettings::default());

        assert!(view.markers.is_empty());
        assert_eq!(view.center, LatLon { lat: -34.9285, lon: 138.6007 });
        assert_eq!(view.zoom, 12);
        assert_eq!((view.width, view.height), (1400, 800));
    }

    #[test]
    fn test_one_marker_per_record_without_dedup() {
        let vehicles = sample();
        let view = render(&vehicles, &MapSettings::default());

        assert_eq!(view.markers.len(), vehicles.len());
        for (marker, v) in view.markers.iter().zip(&vehicles) {
            assert_eq!((marker.lat, marker.lon), (v.lat, v.lon));
            assert!(marker.popup.contains(&v.id));
            assert!(marker.popup.contains(&v.route));
            assert_eq!(marker.icon, MarkerIcon::default());
        }
    }

    #[test]
    fn test_single_vehicle_popup() {
        let view = render(
            &[VehicleRecord::new("B123", "M44", -34.92, 138.60)],
            &MapSettings::default(),
        );

        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].popup, "Vehicle: B123<br>Route: M44");
        assert_eq!((view.markers[0].lat, view.markers[0].lon), (-34.92, 138.60));
    }

    #[test]
    fn test_render_is_repeatable() {
        let vehicles = sample();
        let settings = MapSettings::default();
        assert_eq!(render(&vehicles, &settings), render(&vehicles, &settings));
    }

    #[test]
    fn test_popup_keeps_special_characters() {
        let view = render(
            &[VehicleRecord::new("A&B", "R<1>", -34.9, 138.6)],
            &MapSettings::default(),
        );

        let marker = &view.markers[0];
        assert!(marker.popup.contains("A&B"));
        assert!(marker.popup.contains("R<1>"));
        assert_eq!(marker.vehicle_id, "A&B");
        assert_eq!(marker.route, "R<1>");
    }

    #[test]
    fn test_custom_settings_are_applied() {
        let settings = MapSettings {
            center: LatLon { lat: -33.86, lon: 151.2 },
            zoom: 10,
            width: 800,
            height: 600,
            icon: MarkerIcon {
                color: "red".to_string(),
                ..MarkerIcon::default()
            },
        };

        let view = render(&sample()[..1], &settings);

        assert_eq!(view.center, settings.center);
        assert_eq!(view.zoom, 10);
        assert_eq!(view.markers[0].icon.color, "red");
    }
}
