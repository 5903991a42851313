//! JSON API for the ride form
//!
//! `GET /predict` validates the form inputs, calls the prediction endpoint
//! once, and returns the outcome together with the ride summary and the map
//! spec. Upstream failures are rendered as an `"error"` status in the body,
//! not as an HTTP error of this API; only invalid input is rejected.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::FarecastError;
use crate::config::RideDefaults;
use crate::map::{self, MapSpec};
use crate::models::{Point, PredictionOutcome, RideRequest};
use crate::predict::{self, FareClient};

/// Shared state of the API handlers
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<FareClient>,
    pub defaults: RideDefaults,
}

impl AppState {
    #[must_use]
    pub fn new(client: FareClient, defaults: RideDefaults) -> Self {
        Self {
            client: Arc::new(client),
            defaults,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", get(predict_fare))
        .route("/defaults", get(ride_defaults))
        .with_state(state)
}

/// Raw form inputs as they arrive on the query string
#[derive(Debug, Deserialize)]
pub struct RideQuery {
    pub date: String,
    pub time: String,
    pub pickup_longitude: f64,
    pub pickup_latitude: f64,
    pub dropoff_longitude: f64,
    pub dropoff_latitude: f64,
    pub passenger_count: i64,
}

impl RideQuery {
    /// Validate the raw inputs into a ride request
    fn into_request(self) -> crate::Result<RideRequest> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            FarecastError::validation(format!("Date must be YYYY-MM-DD, got: {}", self.date))
        })?;
        let time = parse_ride_time(&self.time)?;

        let pickup = Point::checked(self.pickup_latitude, self.pickup_longitude)?;
        let dropoff = Point::checked(self.dropoff_latitude, self.dropoff_longitude)?;

        Ok(RideRequest::new(
            NaiveDateTime::new(date, time),
            pickup,
            dropoff,
            self.passenger_count,
        ))
    }
}

// HTML time inputs send HH:MM, or HH:MM:SS when seconds are enabled
fn parse_ride_time(raw: &str) -> crate::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| {
            FarecastError::validation(format!("Time must be HH:MM or HH:MM:SS, got: {raw}"))
        })
}

/// Body of a `/predict` response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// One of "success", "warning", "error"
    pub status: &'static str,
    /// User-visible message for the result banner
    pub message: String,
    /// Predicted fare, present only on success
    pub fare: Option<f64>,
    /// The request as sent to the prediction endpoint
    pub ride: RideRequest,
    /// Straight-line pickup to dropoff distance
    pub distance_km: f64,
    /// Map view of the ride endpoints
    pub map: MapSpec,
}

async fn predict_fare(
    State(state): State<AppState>,
    Query(query): Query<RideQuery>,
) -> Result<Json<PredictResponse>, ApiError> {
    let request = query.into_request()?;
    let pickup = request.pickup();
    let dropoff = request.dropoff();

    let (status, message, fare) = match state.client.predict(&request).await {
        Ok(PredictionOutcome::Fare(fare)) => ("success", predict::fare_message(fare), Some(fare)),
        Ok(PredictionOutcome::MissingFare) => {
            ("warning", predict::MISSING_FARE_MESSAGE.to_string(), None)
        }
        Err(err) => {
            error!(error = %err, "fare prediction failed");
            ("error", predict::PREDICTION_FAILED_MESSAGE.to_string(), None)
        }
    };

    Ok(Json(PredictResponse {
        status,
        message,
        fare,
        distance_km: pickup.distance_km(&dropoff),
        map: map::build_map_spec(&pickup, &dropoff),
        ride: request,
    }))
}

async fn ride_defaults(State(state): State<AppState>) -> Json<RideDefaults> {
    Json(state.defaults.clone())
}

/// Error wrapper mapping [`FarecastError`] onto HTTP responses
pub struct ApiError(FarecastError);

impl From<FarecastError> for ApiError {
    fn from(err: FarecastError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            FarecastError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            FarecastError::Api { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.0.user_message(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_query() -> RideQuery {
        RideQuery {
            date: "2026-08-07".to_string(),
            time: "14:30".to_string(),
            pickup_longitude: -73.777271,
            pickup_latitude: 40.643714,
            dropoff_longitude: -73.965007,
            dropoff_latitude: 40.776621,
            passenger_count: 2,
        }
    }

    #[rstest]
    #[case("14:30", 14, 30, 0)]
    #[case("14:30:45", 14, 30, 45)]
    #[case("00:00", 0, 0, 0)]
    fn test_parse_ride_time(
        #[case] raw: &str,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] second: u32,
    ) {
        let time = parse_ride_time(raw).unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(hour, minute, second).unwrap());
    }

    #[rstest]
    #[case("25:00")]
    #[case("noon")]
    #[case("")]
    fn test_parse_ride_time_invalid(#[case] raw: &str) {
        assert!(parse_ride_time(raw).is_err());
    }

    #[test]
    fn test_query_builds_formatted_request() {
        let request = valid_query().into_request().unwrap();
        assert_eq!(request.pickup_datetime, "2026-08-07 14:30:00");
        assert_eq!(request.passenger_count, 2);
        assert_eq!(request.pickup_latitude, 40.643714);
    }

    #[test]
    fn test_query_rejects_bad_date() {
        let mut query = valid_query();
        query.date = "07/08/2026".to_string();
        let result = query.into_request();
        assert!(matches!(result, Err(FarecastError::Validation { .. })));
    }

    #[test]
    fn test_query_rejects_out_of_range_coordinates() {
        let mut query = valid_query();
        query.pickup_latitude = 140.0;
        assert!(query.into_request().is_err());
    }
}
