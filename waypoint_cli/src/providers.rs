use std::sync::Arc;

use clap::ValueEnum;
use waypoint_providers::{
    as_the_crow_flies::AsTheCrowFlies,
    cache::CoordinateCache,
    coordinate::Coordinate,
    directions_provider::{DirectionsProvider, LegCostText},
    gazetteer::Gazetteer,
    geocoder::Geocoder,
    google_directions_api::{GoogleDirectionsClient, GoogleDirectionsError},
    openweather_api::{OpenWeatherError, OpenWeatherGeocoder},
};
use waypoint_route::geo_lookup::GeoLookup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeocoderKind {
    /// OpenWeatherMap city lookup (needs OPENWEATHER_API_KEY)
    Openweather,
    /// Offline lookup in a JSON file of `"place": [lat, lon]` entries
    Gazetteer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionsKind {
    /// Google Maps driving directions (needs GOOGLE_MAPS_API_KEY)
    Google,
    /// Great-circle distance at a constant speed
    CrowFlies,
}

pub enum PlaceGeocoder {
    OpenWeather(OpenWeatherGeocoder),
    Gazetteer(Gazetteer),
}

impl Geocoder for PlaceGeocoder {
    type Error = OpenWeatherError;

    async fn geocode(&self, place: &str) -> Result<Option<Coordinate>, OpenWeatherError> {
        match self {
            PlaceGeocoder::OpenWeather(geocoder) => geocoder.geocode(place).await,
            PlaceGeocoder::Gazetteer(gazetteer) => {
                Ok(gazetteer.geocode(place).await.unwrap_or_else(|never| match never {}))
            }
        }
    }
}

pub type PlaceCache = Box<dyn CoordinateCache + Send + Sync>;

/// Memoized geocoding shared by the route builder and offline directions.
pub type PlaceLookup = GeoLookup<PlaceGeocoder, PlaceCache>;

pub enum RoadDirections {
    Google(GoogleDirectionsClient),
    AsTheCrowFlies(AsTheCrowFlies<Arc<PlaceLookup>>),
}

impl DirectionsProvider for RoadDirections {
    type Error = GoogleDirectionsError;

    async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<LegCostText>, GoogleDirectionsError> {
        match self {
            RoadDirections::Google(client) => client.directions(origin, destination).await,
            RoadDirections::AsTheCrowFlies(provider) => Ok(provider
                .directions(origin, destination)
                .await
                .unwrap_or_else(|never| match never {})),
        }
    }
}
