//! Data models for ride requests and prediction responses
//!
//! This module contains the data structures exchanged with the remote fare
//! prediction endpoint, plus the coordinate primitives used by the form and
//! the map view.

use chrono::NaiveDateTime;
use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

use crate::FarecastError;

/// Datetime format expected by the prediction endpoint
pub const PICKUP_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Smallest passenger count the form accepts
pub const PASSENGER_MIN: u8 = 1;
/// Largest passenger count the form accepts
pub const PASSENGER_MAX: u8 = 6;

/// Geographic coordinate pair
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Point {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Point {
    /// Create a point, validating coordinate ranges
    pub fn checked(latitude: f64, longitude: f64) -> crate::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(FarecastError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(FarecastError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Arithmetic midpoint of two points
    #[must_use]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point {
            latitude: (self.latitude + other.latitude) / 2.0,
            longitude: (self.longitude + other.longitude) / 2.0,
        }
    }

    /// Great-circle distance to another point in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Point) -> f64 {
        let from = HaversineLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        };
        let to = HaversineLocation {
            latitude: other.latitude,
            longitude: other.longitude,
        };
        distance(from, to, Units::Kilometers)
    }
}

/// Clamp a requested passenger count into the valid range
#[must_use]
pub fn clamp_passenger_count(requested: i64) -> u8 {
    requested.clamp(i64::from(PASSENGER_MIN), i64::from(PASSENGER_MAX)) as u8
}

/// Payload sent to the prediction endpoint as query parameters.
///
/// Field names match the endpoint's expected query keys exactly.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RideRequest {
    pub pickup_datetime: String,
    pub pickup_longitude: f64,
    pub pickup_latitude: f64,
    pub dropoff_longitude: f64,
    pub dropoff_latitude: f64,
    pub passenger_count: u8,
}

impl RideRequest {
    /// Build a request from validated form inputs.
    ///
    /// The passenger count is clamped into `[PASSENGER_MIN, PASSENGER_MAX]`
    /// rather than rejected.
    #[must_use]
    pub fn new(pickup_at: NaiveDateTime, pickup: Point, dropoff: Point, passengers: i64) -> Self {
        Self {
            pickup_datetime: pickup_at.format(PICKUP_DATETIME_FORMAT).to_string(),
            pickup_longitude: pickup.longitude,
            pickup_latitude: pickup.latitude,
            dropoff_longitude: dropoff.longitude,
            dropoff_latitude: dropoff.latitude,
            passenger_count: clamp_passenger_count(passengers),
        }
    }

    /// Pickup coordinates of this request
    #[must_use]
    pub fn pickup(&self) -> Point {
        Point {
            latitude: self.pickup_latitude,
            longitude: self.pickup_longitude,
        }
    }

    /// Dropoff coordinates of this request
    #[must_use]
    pub fn dropoff(&self) -> Point {
        Point {
            latitude: self.dropoff_latitude,
            longitude: self.dropoff_longitude,
        }
    }
}

/// Response body of the prediction endpoint.
///
/// The `fare` key is optional; its absence is a valid, handled state.
#[derive(Debug, Deserialize)]
pub struct FareResponse {
    pub fare: Option<f64>,
}

/// Interpreted result of one prediction call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictionOutcome {
    /// The endpoint returned a fare
    Fare(f64),
    /// The endpoint answered but the response carried no fare
    MissingFare,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rstest::rstest;

    fn sample_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 7)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn jfk() -> Point {
        Point {
            latitude: 40.643714,
            longitude: -73.777271,
        }
    }

    fn upper_west_side() -> Point {
        Point {
            latitude: 40.776621,
            longitude: -73.965007,
        }
    }

    #[test]
    fn test_request_has_exactly_six_keys() {
        let request = RideRequest::new(sample_datetime(), jfk(), upper_west_side(), 2);
        let value = serde_json::to_value(&request).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 6);
        for key in [
            "pickup_datetime",
            "pickup_longitude",
            "pickup_latitude",
            "dropoff_longitude",
            "dropoff_latitude",
            "passenger_count",
        ] {
            assert!(object.contains_key(key), "missing key: {key}");
        }

        assert!(object["pickup_datetime"].is_string());
        assert!(object["pickup_longitude"].is_f64());
        assert!(object["passenger_count"].is_u64());
    }

    #[test]
    fn test_request_datetime_format() {
        let request = RideRequest::new(sample_datetime(), jfk(), upper_west_side(), 1);
        assert_eq!(request.pickup_datetime, "2026-08-07 14:30:00");

        // The formatted string must parse back with the documented format
        let parsed =
            NaiveDateTime::parse_from_str(&request.pickup_datetime, PICKUP_DATETIME_FORMAT);
        assert!(parsed.is_ok());
    }

    #[rstest]
    #[case(-5, 1)]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(3, 3)]
    #[case(6, 6)]
    #[case(7, 6)]
    #[case(100, 6)]
    fn test_passenger_count_clamping(#[case] requested: i64, #[case] expected: u8) {
        assert_eq!(clamp_passenger_count(requested), expected);

        let request = RideRequest::new(sample_datetime(), jfk(), upper_west_side(), requested);
        assert_eq!(request.passenger_count, expected);
    }

    #[rstest]
    #[case(40.643714, -73.777271)]
    #[case(-90.0, 180.0)]
    #[case(90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn test_point_checked_valid(#[case] latitude: f64, #[case] longitude: f64) {
        assert!(Point::checked(latitude, longitude).is_ok());
    }

    #[rstest]
    #[case(90.1, 0.0)]
    #[case(-91.0, 0.0)]
    #[case(0.0, 180.5)]
    #[case(0.0, -181.0)]
    fn test_point_checked_out_of_range(#[case] latitude: f64, #[case] longitude: f64) {
        let result = Point::checked(latitude, longitude);
        assert!(matches!(result, Err(FarecastError::Validation { .. })));
    }

    #[test]
    fn test_midpoint() {
        let mid = jfk().midpoint(&upper_west_side());
        assert_eq!(mid.latitude, (40.643714 + 40.776621) / 2.0);
        assert_eq!(mid.longitude, (-73.777271 + -73.965007) / 2.0);
    }

    #[test]
    fn test_distance_jfk_to_upper_west_side() {
        let distance = jfk().distance_km(&upper_west_side());
        // Roughly 21-22 km as the crow flies
        assert!(distance > 18.0 && distance < 25.0, "got {distance}");
    }

    #[test]
    fn test_fare_response_parsing() {
        let with_fare: FareResponse = serde_json::from_str(r#"{"fare": 23.5}"#).unwrap();
        assert_eq!(with_fare.fare, Some(23.5));

        let empty: FareResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.fare, None);

        let null_fare: FareResponse = serde_json::from_str(r#"{"fare": null}"#).unwrap();
        assert_eq!(null_fare.fare, None);
    }
}
