use std::{io, sync::Arc, time::Duration};

use fxhash::{FxHashMap, FxHashSet};
use parking_lot::Mutex;
use waypoint_providers::{
    coordinate::Coordinate,
    directions_provider::{DirectionsProvider, LegCostText},
    geocoder::Geocoder,
};
use waypoint_route::{geo_lookup::GeoLookup, leg_cost::LegCost, route_builder::RouteBuilder};

pub type TestRouteBuilder = RouteBuilder<Arc<FakeGeocoder>, Arc<FakeDirections>>;

/// Knows a fixed set of places. Anything else is not found. Places
/// registered with `failing` always return a transport error, places
/// registered with `failing_once` only on their first request.
#[derive(Default)]
pub struct FakeGeocoder {
    places: FxHashMap<String, Coordinate>,
    failing: FxHashSet<String>,
    failing_once: Mutex<FxHashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn new(places: &[(&str, f64, f64)]) -> Self {
        Self {
            places: places
                .iter()
                .map(|&(name, latitude, longitude)| {
                    (name.to_string(), Coordinate::new(latitude, longitude))
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing(mut self, place: &str) -> Self {
        self.failing.insert(place.to_string());
        self
    }

    pub fn failing_once(self, place: &str) -> Self {
        self.failing_once.lock().insert(place.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls_for(&self, place: &str) -> usize {
        self.calls.lock().iter().filter(|call| *call == place).count()
    }
}

impl Geocoder for FakeGeocoder {
    type Error = io::Error;

    async fn geocode(&self, place: &str) -> Result<Option<Coordinate>, io::Error> {
        self.calls.lock().push(place.to_string());

        if self.failing.contains(place) {
            return Err(io::Error::other("quota exceeded"));
        }

        if self.failing_once.lock().remove(place) {
            return Err(io::Error::other("connection reset"));
        }

        Ok(self.places.get(place).copied())
    }
}

/// Directed legs with scripted costs. Unknown legs fall back to the default
/// cost, or have no route when there is none.
#[derive(Default)]
pub struct FakeDirections {
    legs: FxHashMap<(String, String), LegCostText>,
    default: Option<LegCostText>,
    failing: FxHashSet<(String, String)>,
    slow: FxHashSet<(String, String)>,
    calls: Mutex<Vec<(String, String)>>,
}

fn key(from: &str, to: &str) -> (String, String) {
    (from.to_string(), to.to_string())
}

impl FakeDirections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(duration: &str, distance: &str) -> Self {
        Self {
            default: Some(LegCostText::new(duration, distance)),
            ..Default::default()
        }
    }

    pub fn leg(mut self, from: &str, to: &str, duration: &str, distance: &str) -> Self {
        self.legs
            .insert(key(from, to), LegCostText::new(duration, distance));
        self
    }

    pub fn failing(mut self, from: &str, to: &str) -> Self {
        self.failing.insert(key(from, to));
        self
    }

    pub fn slow(mut self, from: &str, to: &str) -> Self {
        self.slow.insert(key(from, to));
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

impl DirectionsProvider for FakeDirections {
    type Error = io::Error;

    async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<LegCostText>, io::Error> {
        let leg = key(origin, destination);
        self.calls.lock().push(leg.clone());

        if self.slow.contains(&leg) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        if self.failing.contains(&leg) {
            return Err(io::Error::other("connection refused"));
        }

        Ok(self.legs.get(&leg).cloned().or_else(|| self.default.clone()))
    }
}

pub fn create_route_builder(
    geocoder: &Arc<FakeGeocoder>,
    directions: &Arc<FakeDirections>,
) -> TestRouteBuilder {
    RouteBuilder::new(
        GeoLookup::new(Arc::clone(geocoder)),
        LegCost::new(Arc::clone(directions)),
    )
}

pub fn sorted(places: &[&str]) -> Vec<String> {
    let mut places: Vec<String> = places.iter().map(|place| place.to_string()).collect();
    places.sort();
    places
}
