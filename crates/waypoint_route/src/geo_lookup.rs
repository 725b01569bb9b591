use std::{convert::Infallible, time::Duration};

use fxhash::FxHashMap;
use parking_lot::Mutex;
use tracing::{debug, warn};
use waypoint_providers::{
    cache::{CoordinateCache, NoCache},
    config::DEFAULT_REQUEST_TIMEOUT,
    coordinate::Coordinate,
    geocoder::Geocoder,
};

/// Memoizing front of a [`Geocoder`].
///
/// Between two calls to [`GeoLookup::clear`], a name is sent to the provider
/// at most once, whether the answer was a coordinate or not found. Provider
/// failures and timeouts are logged and reported as not found.
///
/// `GeoLookup` is itself a [`Geocoder`], so offline directions can share the
/// memo of the route being built.
pub struct GeoLookup<G, C = NoCache> {
    geocoder: G,
    cache: C,
    timeout: Duration,
    resolved: Mutex<FxHashMap<String, Option<Coordinate>>>,
}

impl<G: Geocoder> GeoLookup<G, NoCache> {
    pub fn new(geocoder: G) -> Self {
        Self::with_cache(geocoder, NoCache)
    }
}

impl<G, C> GeoLookup<G, C>
where
    G: Geocoder,
    C: CoordinateCache,
{
    pub fn with_cache(geocoder: G, cache: C) -> Self {
        Self {
            geocoder,
            cache,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            resolved: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn resolve(&self, place: &str) -> Option<Coordinate> {
        let memoized = self.resolved.lock().get(place).copied();
        if let Some(coordinate) = memoized {
            return coordinate;
        }

        let coordinate = self.lookup(place).await;
        self.resolved.lock().insert(place.to_string(), coordinate);

        coordinate
    }

    /// Forgets every memoized answer, including failures. The persistent
    /// cache is left untouched.
    pub fn clear(&self) {
        self.resolved.lock().clear();
    }

    /// Number of distinct names resolved since the last `clear`, located or not.
    pub fn resolved_len(&self) -> usize {
        self.resolved.lock().len()
    }

    async fn lookup(&self, place: &str) -> Option<Coordinate> {
        match self.cache.get_cached(place) {
            Ok(Some(coordinate)) => {
                debug!("GeoLookup: cache hit for {}", place);
                return Some(coordinate);
            }
            Ok(None) => {}
            Err(err) => warn!(place, "GeoLookup: could not read cache: {}", err),
        }

        let coordinate = match tokio::time::timeout(self.timeout, self.geocoder.geocode(place)).await
        {
            Ok(Ok(Some(coordinate))) => coordinate,
            Ok(Ok(None)) => {
                warn!(place, "GeoLookup: place not found");
                return None;
            }
            Ok(Err(err)) => {
                warn!(place, "GeoLookup: geocoding failed: {}", err);
                return None;
            }
            Err(_) => {
                warn!(place, "GeoLookup: geocoding timed out after {:?}", self.timeout);
                return None;
            }
        };

        if let Err(err) = self.cache.cache(place, &coordinate) {
            warn!(place, "GeoLookup: could not write cache: {}", err);
        }

        Some(coordinate)
    }
}

impl<G, C> Geocoder for GeoLookup<G, C>
where
    G: Geocoder + Sync,
    C: CoordinateCache + Sync,
{
    type Error = Infallible;

    async fn geocode(&self, place: &str) -> Result<Option<Coordinate>, Infallible> {
        Ok(self.resolve(place).await)
    }
}
