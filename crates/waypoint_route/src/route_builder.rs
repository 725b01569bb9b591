use std::sync::Arc;

use tracing::{Level, debug, info, instrument, warn};
use waypoint_providers::{
    cache::{CoordinateCache, NoCache},
    coordinate::Coordinate,
    directions_provider::DirectionsProvider,
    geocoder::Geocoder,
};

use crate::{
    distance_parser::parse_distance_km,
    duration_parser::parse_duration_minutes,
    error::RouteError,
    geo_lookup::GeoLookup,
    leg_cost::{LegCost, LegCostResult},
    route_summary::{LegIssue, NO_ROUTE_FOUND, NOT_AVAILABLE, RouteLeg, RouteStop, RouteSummary},
};

struct Candidate {
    position: usize,
    coordinate: Option<Coordinate>,
    distance: f64,
}

/// Greedy nearest-neighbor sequencing of drop points.
///
/// From the last visited place, the next stop is the remaining drop point
/// with the smallest great-circle distance; the first one in input order wins
/// ties. Unlocatable places are infinitely far away, so they are only picked
/// when nothing locatable is left (or when the tail itself is unlocatable).
///
/// The great-circle distance only ranks candidates. Totals come from the
/// directions provider for each committed leg.
///
/// Geocoding answers are memoized for one `build_route` call. The lookup is
/// held in an [`Arc`] so a directions provider can resolve places through the
/// same memo; concurrent calls on one builder share it.
///
/// This is a local heuristic and does not search for the shortest tour.
pub struct RouteBuilder<G, D, C = NoCache> {
    geo_lookup: Arc<GeoLookup<G, C>>,
    leg_cost: LegCost<D>,
}

fn validate<S: AsRef<str>>(origin: &str, drop_points: &[S]) -> Result<(), RouteError> {
    if origin.trim().is_empty() {
        return Err(RouteError::MissingOrigin);
    }

    if drop_points.is_empty() {
        return Err(RouteError::NoDropPoints);
    }

    if let Some(index) = drop_points
        .iter()
        .position(|drop_point| drop_point.as_ref().trim().is_empty())
    {
        return Err(RouteError::BlankDropPoint { index });
    }

    Ok(())
}

impl<G, D, C> RouteBuilder<G, D, C>
where
    G: Geocoder,
    D: DirectionsProvider,
    C: CoordinateCache,
{
    pub fn new(geo_lookup: GeoLookup<G, C>, leg_cost: LegCost<D>) -> Self {
        Self::with_shared_lookup(Arc::new(geo_lookup), leg_cost)
    }

    pub fn with_shared_lookup(geo_lookup: Arc<GeoLookup<G, C>>, leg_cost: LegCost<D>) -> Self {
        Self {
            geo_lookup,
            leg_cost,
        }
    }

    pub fn geo_lookup(&self) -> &GeoLookup<G, C> {
        &self.geo_lookup
    }

    pub fn leg_cost(&self) -> &LegCost<D> {
        &self.leg_cost
    }

    #[instrument(skip(self, drop_points), level = Level::DEBUG)]
    pub async fn build_route<S: AsRef<str>>(
        &self,
        origin: &str,
        drop_points: &[S],
    ) -> Result<RouteSummary, RouteError> {
        validate(origin, drop_points)?;
        self.geo_lookup.clear();

        let mut remaining: Vec<&str> = drop_points.iter().map(AsRef::as_ref).collect();
        let mut visited: Vec<&str> = Vec::with_capacity(remaining.len() + 1);
        let mut legs = Vec::with_capacity(remaining.len());

        visited.push(origin);
        let mut tail = origin;

        while !remaining.is_empty() {
            let tail_coordinate = self.geo_lookup.resolve(tail).await;
            let nearest = self.nearest_candidate(tail_coordinate, &remaining).await;
            let selected = remaining.remove(nearest.position);

            debug!(
                "RouteBuilder: {} -> {} ({:.1} km as the crow flies, {} left)",
                tail,
                selected,
                nearest.distance / 1000.0,
                remaining.len()
            );

            let mut issues = Vec::new();
            if tail_coordinate.is_none() {
                issues.push(LegIssue::UnlocatablePlace(tail.to_string()));
            }
            if nearest.coordinate.is_none() {
                issues.push(LegIssue::UnlocatablePlace(selected.to_string()));
            }

            legs.push(self.price_leg(tail, selected, issues).await);
            visited.push(selected);
            tail = selected;
        }

        let mut path = Vec::with_capacity(visited.len());
        for place in &visited {
            if let Some(coordinate) = self.geo_lookup.resolve(place).await {
                path.push(RouteStop {
                    place: place.to_string(),
                    coordinate,
                });
            }
        }

        let summary = RouteSummary::new(
            visited.into_iter().map(String::from).collect(),
            legs,
            path,
        );

        info!(
            "RouteBuilder: {} stops, {:.1} km, {} minutes, {} degraded legs",
            summary.visited().len(),
            summary.total_distance_km(),
            summary.total_time_minutes(),
            summary.degraded_legs().count()
        );

        Ok(summary)
    }

    async fn nearest_candidate(
        &self,
        tail: Option<Coordinate>,
        remaining: &[&str],
    ) -> Candidate {
        let mut nearest = Candidate {
            position: 0,
            coordinate: None,
            distance: f64::INFINITY,
        };

        for (position, candidate) in remaining.iter().enumerate() {
            let coordinate = self.geo_lookup.resolve(candidate).await;
            let distance = match (tail, coordinate) {
                (Some(from), Some(to)) => from.haversine_distance(&to),
                _ => f64::INFINITY,
            };

            if position == 0 || distance < nearest.distance {
                nearest = Candidate {
                    position,
                    coordinate,
                    distance,
                };
            }
        }

        nearest
    }

    async fn price_leg(&self, from: &str, to: &str, mut issues: Vec<LegIssue>) -> RouteLeg {
        let cost = match self.leg_cost.query(from, to).await {
            LegCostResult::Found(cost) => cost,
            LegCostResult::NoRoute => {
                issues.push(LegIssue::NoRouteFound);

                return RouteLeg {
                    from: from.to_string(),
                    to: to.to_string(),
                    duration_text: NO_ROUTE_FOUND.to_string(),
                    distance_text: NOT_AVAILABLE.to_string(),
                    minutes: 0,
                    kilometers: 0.0,
                    issues,
                };
            }
        };

        let minutes = parse_duration_minutes(&cost.duration_text).unwrap_or_else(|err| {
            warn!(from, to, "RouteBuilder: {}: {}", cost.duration_text, err);
            issues.push(LegIssue::MalformedDuration(cost.duration_text.clone()));
            0
        });

        let kilometers = parse_distance_km(&cost.distance_text).unwrap_or_else(|err| {
            warn!(from, to, "RouteBuilder: {}: {}", cost.distance_text, err);
            issues.push(LegIssue::MalformedDistance(cost.distance_text.clone()));
            0.0
        });

        RouteLeg {
            from: from.to_string(),
            to: to.to_string(),
            duration_text: cost.duration_text,
            distance_text: cost.distance_text,
            minutes,
            kilometers,
            issues,
        }
    }
}
