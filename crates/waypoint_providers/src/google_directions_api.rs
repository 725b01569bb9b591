use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::directions_provider::{DirectionsProvider, LegCostText};

#[derive(Debug, Error)]
pub enum GoogleDirectionsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Directions request rejected with status {status}: {message}")]
    Rejected { status: String, message: String },

    #[error("Route has no legs")]
    IncompleteResponse,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,

    #[serde(default)]
    routes: Vec<DirectionsRoute>,

    error_message: Option<String>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    legs: Vec<DirectionsLeg>,
}

#[derive(Deserialize)]
struct DirectionsLeg {
    duration: TextValue,
    distance: TextValue,
}

#[derive(Deserialize)]
struct TextValue {
    text: String,
}

pub struct GoogleDirectionsClientParams {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

pub const GOOGLE_MAPS_API_URL: &str = "https://maps.googleapis.com";
pub const GOOGLE_DIRECTIONS_API_PATH: &str = "/maps/api/directions/json";

const TRAVEL_MODE: &str = "driving";

pub struct GoogleDirectionsClient {
    params: GoogleDirectionsClientParams,
    client: reqwest::Client,
}

impl GoogleDirectionsClient {
    pub fn new(params: GoogleDirectionsClientParams) -> Result<Self, GoogleDirectionsError> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self { params, client })
    }

    fn url(&self) -> String {
        format!("{}{}", self.params.base_url, GOOGLE_DIRECTIONS_API_PATH)
    }
}

fn first_leg(response: DirectionsResponse) -> Result<Option<LegCostText>, GoogleDirectionsError> {
    match response.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" | "NOT_FOUND" => return Ok(None),
        _ => {
            return Err(GoogleDirectionsError::Rejected {
                status: response.status,
                message: response.error_message.unwrap_or_default(),
            });
        }
    }

    let Some(route) = response.routes.into_iter().next() else {
        return Ok(None);
    };

    let leg = route
        .legs
        .into_iter()
        .next()
        .ok_or(GoogleDirectionsError::IncompleteResponse)?;

    Ok(Some(LegCostText::new(leg.duration.text, leg.distance.text)))
}

impl DirectionsProvider for GoogleDirectionsClient {
    type Error = GoogleDirectionsError;

    async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<LegCostText>, GoogleDirectionsError> {
        debug!("GoogleDirectionsApi: {} -> {}", origin, destination);

        let response = self
            .client
            .get(self.url())
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", TRAVEL_MODE),
                ("key", self.params.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GoogleDirectionsError::Api { status, message });
        }

        let directions: DirectionsResponse = response.json().await?;

        first_leg(directions)
    }
}
