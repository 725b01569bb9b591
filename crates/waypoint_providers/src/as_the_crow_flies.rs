use crate::{
    directions_provider::{DirectionsProvider, LegCostText},
    geocoder::Geocoder,
};

/// Offline directions: great-circle distance driven at a constant speed.
///
/// Answers in the same phrasing as the Google directions API so the result
/// flows through the same parsers.
pub struct AsTheCrowFlies<G> {
    geocoder: G,
    speed_kmh: f64,
}

impl<G: Geocoder> AsTheCrowFlies<G> {
    pub fn new(geocoder: G, speed_kmh: f64) -> Self {
        Self {
            geocoder,
            speed_kmh,
        }
    }
}

fn plural(quantity: u64, unit: &str) -> String {
    if quantity == 1 {
        format!("{quantity} {unit}")
    } else {
        format!("{quantity} {unit}s")
    }
}

/// "1 hour 5 mins", "2 hours", "45 mins"
pub fn format_duration_text(minutes: u64) -> String {
    let hours = minutes / 60;
    let minutes = minutes % 60;

    match (hours, minutes) {
        (0, minutes) => plural(minutes, "min"),
        (hours, 0) => plural(hours, "hour"),
        (hours, minutes) => format!("{} {}", plural(hours, "hour"), plural(minutes, "min")),
    }
}

pub fn format_distance_text(kilometers: f64) -> String {
    format!("{:.1} km", kilometers)
}

impl<G> DirectionsProvider for AsTheCrowFlies<G>
where
    G: Geocoder + Sync,
{
    type Error = G::Error;

    async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<LegCostText>, G::Error> {
        let Some(from) = self.geocoder.geocode(origin).await? else {
            return Ok(None);
        };
        let Some(to) = self.geocoder.geocode(destination).await? else {
            return Ok(None);
        };

        let kilometers = from.haversine_distance(&to) / 1000.0;
        let minutes = (kilometers / self.speed_kmh * 60.0).round() as u64;

        Ok(Some(LegCostText::new(
            format_duration_text(minutes.max(1)),
            format_distance_text(kilometers),
        )))
    }
}
