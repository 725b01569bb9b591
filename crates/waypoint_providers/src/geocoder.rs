use std::{future::Future, sync::Arc};

use crate::coordinate::Coordinate;

/// Resolves a free-text place name to a coordinate.
///
/// `Ok(None)` means the provider answered but does not know the place.
pub trait Geocoder {
    type Error: std::error::Error + Send + Sync + 'static;

    fn geocode(
        &self,
        place: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, Self::Error>> + Send;
}

impl<G> Geocoder for Arc<G>
where
    G: Geocoder + Send + Sync,
{
    type Error = G::Error;

    fn geocode(
        &self,
        place: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, Self::Error>> + Send {
        G::geocode(self, place)
    }
}
