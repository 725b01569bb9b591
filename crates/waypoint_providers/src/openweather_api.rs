use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{coordinate::Coordinate, geocoder::Geocoder};

#[derive(Debug, Error)]
pub enum OpenWeatherError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

#[derive(Deserialize)]
struct WeatherResponse {
    coord: WeatherCoord,
}

#[derive(Deserialize)]
struct WeatherCoord {
    lat: f64,
    lon: f64,
}

pub struct OpenWeatherGeocoderParams {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

pub const OPENWEATHER_API_URL: &str = "https://api.openweathermap.org";
pub const OPENWEATHER_WEATHER_API_PATH: &str = "/data/2.5/weather";

/// Geocodes city names through the OpenWeatherMap current weather endpoint,
/// which echoes back the coordinates of the matched city.
pub struct OpenWeatherGeocoder {
    params: OpenWeatherGeocoderParams,
    client: reqwest::Client,
}

impl OpenWeatherGeocoder {
    pub fn new(params: OpenWeatherGeocoderParams) -> Result<Self, OpenWeatherError> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self { params, client })
    }

    fn url(&self) -> String {
        format!("{}{}", self.params.base_url, OPENWEATHER_WEATHER_API_PATH)
    }
}

impl Geocoder for OpenWeatherGeocoder {
    type Error = OpenWeatherError;

    async fn geocode(&self, place: &str) -> Result<Option<Coordinate>, OpenWeatherError> {
        debug!("OpenWeatherApi: geocoding {}", place);

        let response = self
            .client
            .get(self.url())
            .query(&[("q", place), ("appid", self.params.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OpenWeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let weather: WeatherResponse = response.json().await?;

        Ok(Some(Coordinate::new(weather.coord.lat, weather.coord.lon)))
    }
}
