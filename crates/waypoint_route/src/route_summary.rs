use std::fmt::Display;

use serde::Serialize;
use waypoint_providers::coordinate::Coordinate;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_ROUTE_FOUND: &str = "No route found";

/// Why a leg's cost could not be trusted. None of these stop the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LegIssue {
    UnlocatablePlace(String),
    NoRouteFound,
    MalformedDuration(String),
    MalformedDistance(String),
}

impl Display for LegIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegIssue::UnlocatablePlace(place) => write!(f, "could not locate {}", place),
            LegIssue::NoRouteFound => write!(f, "no route found"),
            LegIssue::MalformedDuration(text) => write!(f, "unreadable duration '{}'", text),
            LegIssue::MalformedDistance(text) => write!(f, "unreadable distance '{}'", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub duration_text: String,
    pub distance_text: String,
    pub minutes: u64,
    pub kilometers: f64,
    pub issues: Vec<LegIssue>,
}

impl RouteLeg {
    pub fn is_degraded(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn trace_entry(&self) -> String {
        format!(
            "{} -> {} - Distance: {}, Travel Time: {}",
            self.from, self.to, self.distance_text, self.duration_text
        )
    }
}

/// A visited place that could be located, for drawing the route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub place: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    visited: Vec<String>,
    legs: Vec<RouteLeg>,
    total_distance_km: f64,
    total_time_minutes: u64,
    path: Vec<RouteStop>,
}

impl RouteSummary {
    pub(crate) fn new(visited: Vec<String>, legs: Vec<RouteLeg>, path: Vec<RouteStop>) -> Self {
        let total_distance_km = legs.iter().map(|leg| leg.kilometers).sum();
        let total_time_minutes = legs.iter().map(|leg| leg.minutes).sum();

        Self {
            visited,
            legs,
            total_distance_km,
            total_time_minutes,
            path,
        }
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn total_time_minutes(&self) -> u64 {
        self.total_time_minutes
    }

    /// Located stops in visiting order. Unlocatable places are skipped.
    pub fn path(&self) -> &[RouteStop] {
        &self.path
    }

    pub fn degraded_legs(&self) -> impl Iterator<Item = &RouteLeg> {
        self.legs.iter().filter(|leg| leg.is_degraded())
    }

    pub fn trace(&self) -> Vec<String> {
        self.legs.iter().map(RouteLeg::trace_entry).collect()
    }
}

impl Display for RouteSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Optimized Route: {}",
            self.visited.first().map(String::as_str).unwrap_or_default()
        )?;

        for leg in &self.legs {
            write!(
                f,
                " -> {} - Distance: {}, Travel Time: {}",
                leg.to, leg.distance_text, leg.duration_text
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Total Distance: {:.1} km", self.total_distance_km)?;
        write!(f, "Total Time: {} minutes", self.total_time_minutes)
    }
}
