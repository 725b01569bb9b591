use std::{sync::Arc, time::Duration};

use waypoint_route::{
    geo_lookup::GeoLookup,
    leg_cost::LegCost,
    route_builder::RouteBuilder,
    route_summary::{LegIssue, NO_ROUTE_FOUND, NOT_AVAILABLE},
};

use crate::test_utils::{self, FakeDirections, FakeGeocoder};

#[tokio::test]
async fn test_unlocatable_drop_point_is_visited_last() {
    let geocoder = Arc::new(FakeGeocoder::new(&[
        ("A", 0.0, 0.0),
        ("B", 0.0, 1.0),
        ("C", 0.0, 2.0),
    ]));
    let directions = Arc::new(FakeDirections::with_default("10 mins", "8 km"));
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder.build_route("A", &["Atlantis", "C", "B"]).await.unwrap();

    assert_eq!(summary.visited(), ["A", "B", "C", "Atlantis"]);
    assert_eq!(
        summary.visited().iter().filter(|place| *place == "Atlantis").count(),
        1
    );

    let last = &summary.legs()[2];
    assert_eq!(last.issues, vec![LegIssue::UnlocatablePlace(String::from("Atlantis"))]);
    // The road leg itself was still priced.
    assert_eq!(last.minutes, 10);
    assert_eq!(summary.degraded_legs().count(), 1);
}

#[tokio::test]
async fn test_geocoding_error_counts_as_unlocatable() {
    let geocoder = Arc::new(
        FakeGeocoder::new(&[("A", 0.0, 0.0), ("B", 0.0, 1.0), ("C", 0.0, 2.0)]).failing("B"),
    );
    let directions = Arc::new(FakeDirections::with_default("10 mins", "8 km"));
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder.build_route("A", &["B", "C"]).await.unwrap();

    assert_eq!(summary.visited(), ["A", "C", "B"]);
    assert_eq!(geocoder.calls_for("B"), 1);
}

#[tokio::test]
async fn test_all_candidates_unlocatable_keeps_input_order() {
    let geocoder = Arc::new(FakeGeocoder::new(&[("A", 0.0, 0.0)]));
    let directions = Arc::new(FakeDirections::with_default("10 mins", "8 km"));
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder
        .build_route("A", &["X", "Y", "Z"])
        .await
        .unwrap();

    assert_eq!(summary.visited(), ["A", "X", "Y", "Z"]);
    assert_eq!(summary.legs().len(), 3);
    assert_eq!(summary.total_time_minutes(), 30);
    assert!(summary.legs().iter().all(|leg| leg.is_degraded()));
}

#[tokio::test]
async fn test_unlocatable_origin_keeps_input_order() {
    let geocoder = Arc::new(FakeGeocoder::new(&[("B", 0.0, 5.0), ("C", 0.0, 1.0)]));
    let directions = Arc::new(FakeDirections::with_default("10 mins", "8 km"));
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder.build_route("Home", &["B", "C"]).await.unwrap();

    assert_eq!(summary.visited(), ["Home", "B", "C"]);
    assert_eq!(
        summary.legs()[0].issues,
        vec![LegIssue::UnlocatablePlace(String::from("Home"))]
    );
    assert!(!summary.legs()[1].is_degraded());
}

#[tokio::test]
async fn test_no_route_does_not_stall_the_route() {
    let geocoder = Arc::new(FakeGeocoder::new(&[
        ("A", 0.0, 0.0),
        ("B", 0.0, 1.0),
        ("Island", 0.0, 2.0),
        ("D", 0.0, 3.0),
    ]));
    let directions = Arc::new(
        FakeDirections::new()
            .leg("A", "B", "1 hour 20 mins", "112 km")
            .leg("Island", "D", "45 mins", "60 km"),
    );
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder.build_route("A", &["D", "Island", "B"]).await.unwrap();

    assert_eq!(summary.visited(), ["A", "B", "Island", "D"]);

    let island = &summary.legs()[1];
    assert_eq!(island.distance_text, NOT_AVAILABLE);
    assert_eq!(island.duration_text, NO_ROUTE_FOUND);
    assert_eq!(island.minutes, 0);
    assert_eq!(island.kilometers, 0.0);
    assert_eq!(island.issues, vec![LegIssue::NoRouteFound]);

    assert_eq!(summary.total_time_minutes(), 80 + 45);
    assert_eq!(summary.total_distance_km(), 172.0);
    assert_eq!(
        summary.trace()[1],
        "B -> Island - Distance: N/A, Travel Time: No route found"
    );
}

#[tokio::test]
async fn test_directions_error_is_a_degraded_leg() {
    let geocoder = Arc::new(FakeGeocoder::new(&[("A", 0.0, 0.0), ("B", 0.0, 1.0)]));
    let directions = Arc::new(FakeDirections::with_default("10 mins", "8 km").failing("A", "B"));
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder.build_route("A", &["B"]).await.unwrap();

    assert_eq!(summary.legs()[0].issues, vec![LegIssue::NoRouteFound]);
    assert_eq!(summary.total_time_minutes(), 0);
}

#[tokio::test]
async fn test_malformed_cost_text_contributes_zero() {
    let geocoder = Arc::new(FakeGeocoder::new(&[
        ("A", 0.0, 0.0),
        ("B", 0.0, 1.0),
        ("C", 0.0, 2.0),
    ]));
    let directions = Arc::new(
        FakeDirections::new()
            .leg("A", "B", "soon", "12 km")
            .leg("B", "C", "15 mins", "a bit"),
    );
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder.build_route("A", &["B", "C"]).await.unwrap();

    assert_eq!(
        summary.legs()[0].issues,
        vec![LegIssue::MalformedDuration(String::from("soon"))]
    );
    assert_eq!(
        summary.legs()[1].issues,
        vec![LegIssue::MalformedDistance(String::from("a bit"))]
    );
    assert_eq!(summary.total_time_minutes(), 15);
    assert_eq!(summary.total_distance_km(), 12.0);
    assert_eq!(
        summary.trace()[0],
        "A -> B - Distance: 12 km, Travel Time: soon"
    );
}

#[tokio::test(start_paused = true)]
async fn test_stalled_directions_time_out() {
    let geocoder = Arc::new(FakeGeocoder::new(&[
        ("A", 0.0, 0.0),
        ("B", 0.0, 1.0),
        ("C", 0.0, 2.0),
    ]));
    let directions = Arc::new(FakeDirections::with_default("10 mins", "8 km").slow("A", "B"));
    let builder = RouteBuilder::new(
        GeoLookup::new(Arc::clone(&geocoder)).with_timeout(Duration::from_secs(5)),
        LegCost::new(Arc::clone(&directions)).with_timeout(Duration::from_secs(5)),
    );

    let summary = builder.build_route("A", &["B", "C"]).await.unwrap();

    assert_eq!(summary.visited(), ["A", "B", "C"]);
    assert_eq!(summary.legs()[0].issues, vec![LegIssue::NoRouteFound]);
    assert_eq!(summary.total_time_minutes(), 10);
}
