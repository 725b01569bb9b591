use std::{path::PathBuf, time::Duration};

use jiff::SpanRelativeTo;

use crate::{
    cache::CACHE_FOLDER_ENV_VAR,
    google_directions_api::{GOOGLE_MAPS_API_URL, GoogleDirectionsClientParams},
    openweather_api::{OPENWEATHER_API_URL, OpenWeatherGeocoderParams},
};

pub const OPENWEATHER_API_KEY_ENV_VAR: &str = "OPENWEATHER_API_KEY";
pub const GOOGLE_MAPS_API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const REQUEST_TIMEOUT_ENV_VAR: &str = "WAYPOINT_REQUEST_TIMEOUT";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Accepts "30s", "5m", "PT1H30M" or a plain number of seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration.unsigned_abs());
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration.unsigned_abs());
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(Duration::from_secs(seconds.unsigned_abs()));
    }

    Err(String::from("Invalid duration"))
}

#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    pub openweather_api_key: Option<String>,
    pub google_maps_api_key: Option<String>,
    pub cache_folder: Option<PathBuf>,
    pub request_timeout: Duration,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            google_maps_api_key: None,
            cache_folder: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl ProvidersConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let request_timeout = match non_empty_var(REQUEST_TIMEOUT_ENV_VAR) {
            Some(value) => parse_duration(&value).map_err(|err| {
                anyhow::anyhow!("{}: {} ({})", REQUEST_TIMEOUT_ENV_VAR, err, value)
            })?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            openweather_api_key: non_empty_var(OPENWEATHER_API_KEY_ENV_VAR),
            google_maps_api_key: non_empty_var(GOOGLE_MAPS_API_KEY_ENV_VAR),
            cache_folder: non_empty_var(CACHE_FOLDER_ENV_VAR).map(PathBuf::from),
            request_timeout,
        })
    }

    pub fn openweather_params(&self) -> Result<OpenWeatherGeocoderParams, anyhow::Error> {
        let api_key = self
            .openweather_api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("{} is not set", OPENWEATHER_API_KEY_ENV_VAR))?;

        Ok(OpenWeatherGeocoderParams {
            api_key,
            base_url: OPENWEATHER_API_URL.to_string(),
            timeout: self.request_timeout,
        })
    }

    pub fn google_directions_params(&self) -> Result<GoogleDirectionsClientParams, anyhow::Error> {
        let api_key = self
            .google_maps_api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("{} is not set", GOOGLE_MAPS_API_KEY_ENV_VAR))?;

        Ok(GoogleDirectionsClientParams {
            api_key,
            base_url: GOOGLE_MAPS_API_URL.to_string(),
            timeout: self.request_timeout,
        })
    }
}
