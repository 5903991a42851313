//! HTTP client for the remote fare prediction endpoint
//!
//! Issues exactly one GET per prediction with the ride parameters as query
//! parameters. The call is bounded by the configured timeout; transport
//! failures and non-success statuses surface as [`FarecastError::Api`] so
//! the caller can render a visible error state instead of crashing.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use crate::FarecastError;
use crate::config::PredictionConfig;
use crate::models::{FareResponse, PredictionOutcome, RideRequest};

/// Warning shown when the endpoint answers without a fare
pub const MISSING_FARE_MESSAGE: &str = "The API response did not contain a predicted fare.";

/// Error shown when the endpoint cannot be reached or answers non-200
pub const PREDICTION_FAILED_MESSAGE: &str =
    "Failed to retrieve prediction. Please try again later.";

/// Success message for a predicted fare, formatted to two decimal places
#[must_use]
pub fn fare_message(fare: f64) -> String {
    format!("The predicted fare for your ride is: ${fare:.2}")
}

/// Client for the fare prediction service
pub struct FareClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl FareClient {
    /// Create a new prediction client
    pub fn new(config: &PredictionConfig) -> crate::Result<Self> {
        let timeout = Duration::from_secs(u64::from(config.timeout_seconds));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("farecast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FarecastError::general(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Request a fare prediction for one ride.
    ///
    /// Performs a single attempt; no retry.
    #[instrument(skip(self, request), fields(passengers = request.passenger_count))]
    pub async fn predict(&self, request: &RideRequest) -> crate::Result<PredictionOutcome> {
        let url = format!("{}/predict", self.base_url);
        debug!(%url, pickup_datetime = %request.pickup_datetime, "requesting fare prediction");

        let started = Instant::now();

        let response = self
            .http
            .get(&url)
            .query(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FarecastError::api(format!(
                        "Prediction request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    FarecastError::api(format!("Failed to reach prediction endpoint: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "prediction endpoint returned an error status");
            return Err(FarecastError::api(format!(
                "Prediction endpoint returned HTTP {status}"
            )));
        }

        let body: FareResponse = response
            .json()
            .await
            .map_err(|e| FarecastError::api(format!("Invalid prediction response: {e}")))?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "prediction response received"
        );

        match body.fare {
            Some(fare) => Ok(PredictionOutcome::Fare(fare)),
            None => {
                warn!("prediction response did not contain a fare");
                Ok(PredictionOutcome::MissingFare)
            }
        }
    }
}
