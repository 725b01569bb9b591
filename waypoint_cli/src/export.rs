use std::path::Path;

use geojson::Value::{LineString, Point};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use waypoint_route::route_summary::RouteSummary;

/// The visiting order as a LineString, plus one Point per located stop.
/// Unlocatable stops have no geometry and are left out.
pub fn route_geojson(summary: &RouteSummary) -> GeoJson {
    let mut features = Vec::with_capacity(summary.path().len() + 1);

    if summary.path().len() > 1 {
        let mut properties = geojson::JsonObject::new();
        properties.insert(
            String::from("total_distance_km"),
            summary.total_distance_km().into(),
        );
        properties.insert(
            String::from("total_time_minutes"),
            summary.total_time_minutes().into(),
        );

        features.push(Feature {
            bbox: None,
            id: None,
            properties: Some(properties),
            foreign_members: None,
            geometry: Some(Geometry::new(LineString(
                summary
                    .path()
                    .iter()
                    .map(|stop| vec![stop.coordinate.longitude, stop.coordinate.latitude])
                    .collect(),
            ))),
        });
    }

    for (order, stop) in summary.path().iter().enumerate() {
        let mut properties = geojson::JsonObject::new();
        properties.insert(String::from("place"), stop.place.clone().into());
        properties.insert(String::from("order"), order.into());

        features.push(Feature {
            bbox: None,
            id: None,
            properties: Some(properties),
            foreign_members: None,
            geometry: Some(Geometry::new(Point(vec![
                stop.coordinate.longitude,
                stop.coordinate.latitude,
            ]))),
        });
    }

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        foreign_members: None,
        features,
    })
}

fn create_parent_dir(path: &Path) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    Ok(())
}

pub fn write_geojson(path: &Path, summary: &RouteSummary) -> Result<(), anyhow::Error> {
    create_parent_dir(path)?;
    std::fs::write(path, route_geojson(summary).to_string())?;

    Ok(())
}

pub fn write_summary(path: &Path, summary: &RouteSummary) -> Result<(), anyhow::Error> {
    create_parent_dir(path)?;
    std::fs::write(path, serde_json::to_string_pretty(summary)?)?;

    Ok(())
}
