use std::sync::Arc;

use crate::test_utils::{self, FakeDirections, FakeGeocoder};

fn line_geocoder() -> Arc<FakeGeocoder> {
    Arc::new(FakeGeocoder::new(&[
        ("Depot", 0.0, 0.0),
        ("B", 0.0, 1.0),
        ("C", 0.0, 2.0),
        ("D", 0.0, 3.0),
    ]))
}

#[tokio::test]
async fn test_total_time_is_the_sum_of_legs() {
    let geocoder = line_geocoder();
    let directions = Arc::new(
        FakeDirections::new()
            .leg("Depot", "B", "1 hour 20 mins", "112 km")
            .leg("B", "C", "2 hours", "150 km")
            .leg("C", "D", "45 mins", "40.5 km"),
    );
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder.build_route("Depot", &["B", "C", "D"]).await.unwrap();

    let minutes: Vec<u64> = summary.legs().iter().map(|leg| leg.minutes).collect();
    assert_eq!(minutes, vec![80, 120, 45]);
    assert_eq!(summary.total_time_minutes(), 245);
    assert!((summary.total_distance_km() - 302.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_miles_are_converted_to_kilometers() {
    let geocoder = line_geocoder();
    let directions = Arc::new(
        FakeDirections::new()
            .leg("Depot", "B", "20 mins", "10 mi")
            .leg("B", "C", "5 mins", "1,000 m"),
    );
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder.build_route("Depot", &["B", "C"]).await.unwrap();

    assert!((summary.legs()[0].kilometers - 16.09344).abs() < 1e-9);
    assert!((summary.total_distance_km() - 17.09344).abs() < 1e-9);
    // The trace keeps the provider wording.
    assert_eq!(
        summary.trace()[0],
        "Depot -> B - Distance: 10 mi, Travel Time: 20 mins"
    );
}

#[tokio::test]
async fn test_report() {
    let geocoder = line_geocoder();
    let directions = Arc::new(
        FakeDirections::new()
            .leg("Depot", "B", "1 hour", "100 km")
            .leg("B", "C", "30 mins", "50.5 km"),
    );
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder.build_route("Depot", &["C", "B"]).await.unwrap();

    assert_eq!(
        summary.to_string(),
        "Optimized Route: Depot -> B - Distance: 100 km, Travel Time: 1 hour \
         -> C - Distance: 50.5 km, Travel Time: 30 mins\n\
         Total Distance: 150.5 km\n\
         Total Time: 90 minutes"
    );
}

#[tokio::test]
async fn test_summary_serializes_to_json() {
    let geocoder = line_geocoder();
    let directions = Arc::new(FakeDirections::new().leg("Depot", "B", "1 hour", "100 km"));
    let builder = test_utils::create_route_builder(&geocoder, &directions);

    let summary = builder.build_route("Depot", &["B", "Nowhere"]).await.unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["visited"], serde_json::json!(["Depot", "B", "Nowhere"]));
    assert_eq!(json["total_time_minutes"], 60);
    assert_eq!(json["legs"][0]["minutes"], 60);
    assert_eq!(json["legs"][1]["distance_text"], "N/A");
    assert_eq!(json["legs"][1]["issues"][0]["kind"], "unlocatable_place");
    assert_eq!(json["legs"][1]["issues"][1]["kind"], "no_route_found");
    assert_eq!(json["path"].as_array().unwrap().len(), 2);
    assert_eq!(json["path"][1]["coordinate"]["longitude"], 1.0);
}
