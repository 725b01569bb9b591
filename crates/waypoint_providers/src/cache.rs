use std::{
    hash::{Hash, Hasher},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use fxhash::FxHasher64;
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

pub const CACHE_FOLDER_ENV_VAR: &str = "WAYPOINT_CACHE_FOLDER";

/// Persistent store of geocoding results shared between runs.
pub trait CoordinateCache {
    fn cache(&self, place: &str, coordinate: &Coordinate) -> Result<(), anyhow::Error>;

    fn get_cached(&self, place: &str) -> Result<Option<Coordinate>, anyhow::Error>;
}

#[derive(Default)]
pub struct NoCache;

impl CoordinateCache for NoCache {
    fn cache(&self, _place: &str, _coordinate: &Coordinate) -> Result<(), anyhow::Error> {
        Ok(())
    }

    fn get_cached(&self, _place: &str) -> Result<Option<Coordinate>, anyhow::Error> {
        Ok(None)
    }
}

impl<C: CoordinateCache + ?Sized> CoordinateCache for Box<C> {
    fn cache(&self, place: &str, coordinate: &Coordinate) -> Result<(), anyhow::Error> {
        C::cache(self, place, coordinate)
    }

    fn get_cached(&self, place: &str) -> Result<Option<Coordinate>, anyhow::Error> {
        C::get_cached(self, place)
    }
}

#[derive(Deserialize, Serialize)]
struct CachedCoordinate {
    place: String,
    coordinate: Coordinate,
}

/// One JSON file per place, named after the hash of the place name.
pub struct FileCache {
    folder: PathBuf,
}

fn get_filename(place: &str) -> String {
    let mut hasher = FxHasher64::default();
    place.hash(&mut hasher);

    format!("{:016x}.json", hasher.finish())
}

impl FileCache {
    pub fn new<P: AsRef<Path>>(folder: P) -> Result<Self, anyhow::Error> {
        let folder = folder.as_ref();

        if !folder.is_dir() {
            return Err(anyhow::anyhow!(format!(
                "Path {} is not a directory",
                folder.display()
            )));
        }

        Ok(Self {
            folder: folder.to_path_buf(),
        })
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let folder = std::env::var(CACHE_FOLDER_ENV_VAR)?;

        Self::new(folder)
    }
}

impl CoordinateCache for FileCache {
    fn cache(&self, place: &str, coordinate: &Coordinate) -> Result<(), anyhow::Error> {
        let file = std::fs::File::create(self.folder.join(get_filename(place)))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(
            &mut writer,
            &CachedCoordinate {
                place: place.to_string(),
                coordinate: *coordinate,
            },
        )?;
        writer.flush()?;

        Ok(())
    }

    fn get_cached(&self, place: &str) -> Result<Option<Coordinate>, anyhow::Error> {
        let file_path = self.folder.join(get_filename(place));

        if !file_path.is_file() {
            return Ok(None);
        }

        let file = std::fs::File::open(file_path)?;
        let cached: CachedCoordinate = serde_json::from_reader(file)?;

        // Hash collision: treat as a miss, the next `cache` call overwrites it.
        if cached.place != place {
            return Ok(None);
        }

        Ok(Some(cached.coordinate))
    }
}
