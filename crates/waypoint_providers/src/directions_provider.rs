use std::{future::Future, sync::Arc};

use serde::{Deserialize, Serialize};

/// Duration and distance of a single leg, as the provider phrased them
/// (e.g. "1 hour 20 mins", "12.3 km").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LegCostText {
    pub duration_text: String,
    pub distance_text: String,
}

impl LegCostText {
    pub fn new(duration_text: impl Into<String>, distance_text: impl Into<String>) -> Self {
        Self {
            duration_text: duration_text.into(),
            distance_text: distance_text.into(),
        }
    }
}

/// Driving directions between two named places.
///
/// `Ok(None)` means the provider found no route. Implementations must not
/// assume `a -> b` and `b -> a` cost the same.
pub trait DirectionsProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = Result<Option<LegCostText>, Self::Error>> + Send;
}

impl<D> DirectionsProvider for Arc<D>
where
    D: DirectionsProvider + Send + Sync,
{
    type Error = D::Error;

    fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = Result<Option<LegCostText>, Self::Error>> + Send {
        D::directions(self, origin, destination)
    }
}
