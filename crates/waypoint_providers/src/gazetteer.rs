use std::{convert::Infallible, path::Path};

use fxhash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{coordinate::Coordinate, geocoder::Geocoder};

#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("Failed to read gazetteer: {0}")]
    Io(#[from] std::io::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// A fixed list of known places, read from a JSON object mapping each place
/// name to `[latitude, longitude]`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(transparent)]
pub struct Gazetteer {
    places: FxHashMap<String, [f64; 2]>,
}

impl Gazetteer {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GazetteerError> {
        let file = std::fs::File::open(path)?;
        let gazetteer = serde_json::from_reader(std::io::BufReader::new(file))?;

        Ok(gazetteer)
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinate)>,
        S: Into<String>,
    {
        Self {
            places: entries
                .into_iter()
                .map(|(name, coordinate)| {
                    (name.into(), [coordinate.latitude, coordinate.longitude])
                })
                .collect(),
        }
    }

    pub fn get(&self, place: &str) -> Option<Coordinate> {
        self.places
            .get(place)
            .map(|&[latitude, longitude]| Coordinate::new(latitude, longitude))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Geocoder for Gazetteer {
    type Error = Infallible;

    async fn geocode(&self, place: &str) -> Result<Option<Coordinate>, Infallible> {
        Ok(self.get(place))
    }
}
