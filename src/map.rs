//! Two-point map visualization spec
//!
//! Pure construction of the pickup/dropoff map view: two markers, two offset
//! text labels, and a view state centered on the midpoint. Independent of
//! the prediction outcome; the frontend renders this spec as-is.

use serde::Serialize;

use crate::models::Point;

/// Fixed zoom level of the ride map
pub const MAP_ZOOM: u8 = 10;

/// Text labels sit this far south of their marker
pub const LABEL_LATITUDE_OFFSET: f64 = 0.007;

const MARKER_COLOR: [u8; 3] = [255, 0, 0];
const MARKER_RADIUS_METERS: f64 = 100.0;
const LABEL_COLOR: [u8; 3] = [0, 250, 250];
const LABEL_SIZE: u8 = 13;

/// Initial camera position of the map
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

/// A point marker on the map
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub color: [u8; 3],
    pub radius_meters: f64,
}

/// A text label rendered near a marker
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextLabel {
    pub latitude: f64,
    pub longitude: f64,
    pub text: String,
    pub size: u8,
    pub color: [u8; 3],
}

/// Complete description of the two-point map view
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapSpec {
    pub view: ViewState,
    pub markers: Vec<Marker>,
    pub labels: Vec<TextLabel>,
}

/// Build the map spec for a pickup/dropoff pair
#[must_use]
pub fn build_map_spec(pickup: &Point, dropoff: &Point) -> MapSpec {
    let center = pickup.midpoint(dropoff);

    let view = ViewState {
        latitude: center.latitude,
        longitude: center.longitude,
        zoom: MAP_ZOOM,
    };

    let markers = [("Pickup", pickup), ("Dropoff", dropoff)]
        .into_iter()
        .map(|(name, point)| Marker {
            latitude: point.latitude,
            longitude: point.longitude,
            name: name.to_string(),
            color: MARKER_COLOR,
            radius_meters: MARKER_RADIUS_METERS,
        })
        .collect();

    let labels = [("Pickup", pickup), ("Dropoff", dropoff)]
        .into_iter()
        .map(|(text, point)| TextLabel {
            latitude: point.latitude - LABEL_LATITUDE_OFFSET,
            longitude: point.longitude,
            text: text.to_string(),
            size: LABEL_SIZE,
            color: LABEL_COLOR,
        })
        .collect();

    MapSpec {
        view,
        markers,
        labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pickup() -> Point {
        Point {
            latitude: 40.643714,
            longitude: -73.777271,
        }
    }

    fn dropoff() -> Point {
        Point {
            latitude: 40.776621,
            longitude: -73.965007,
        }
    }

    #[test]
    fn test_view_centered_at_midpoint_with_fixed_zoom() {
        let spec = build_map_spec(&pickup(), &dropoff());

        assert_eq!(spec.view.latitude, (40.643714 + 40.776621) / 2.0);
        assert_eq!(spec.view.longitude, (-73.777271 + -73.965007) / 2.0);
        assert_eq!(spec.view.zoom, 10);
    }

    #[test]
    fn test_markers_at_ride_endpoints() {
        let spec = build_map_spec(&pickup(), &dropoff());

        assert_eq!(spec.markers.len(), 2);
        assert_eq!(spec.markers[0].name, "Pickup");
        assert_eq!(spec.markers[0].latitude, 40.643714);
        assert_eq!(spec.markers[0].longitude, -73.777271);
        assert_eq!(spec.markers[1].name, "Dropoff");
        assert_eq!(spec.markers[1].latitude, 40.776621);
        assert_eq!(spec.markers[1].longitude, -73.965007);
    }

    #[test]
    fn test_labels_offset_south_of_markers() {
        let spec = build_map_spec(&pickup(), &dropoff());

        assert_eq!(spec.labels.len(), 2);
        for (label, marker) in spec.labels.iter().zip(spec.markers.iter()) {
            assert_eq!(label.latitude, marker.latitude - 0.007);
            assert_eq!(label.longitude, marker.longitude);
            assert_eq!(label.text, marker.name);
            assert_eq!(label.size, 13);
        }
    }

    #[test]
    fn test_spec_is_deterministic() {
        let first = build_map_spec(&pickup(), &dropoff());
        let second = build_map_spec(&pickup(), &dropoff());
        assert_eq!(first, second);
    }
}
