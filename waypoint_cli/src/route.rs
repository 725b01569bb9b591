use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Args;
use comfy_table::Table;
use tracing::info;
use waypoint_providers::{
    as_the_crow_flies::AsTheCrowFlies,
    cache::{FileCache, NoCache},
    config::{ProvidersConfig, parse_duration},
    gazetteer::Gazetteer,
    google_directions_api::GoogleDirectionsClient,
    openweather_api::OpenWeatherGeocoder,
};
use waypoint_route::{
    geo_lookup::GeoLookup, leg_cost::LegCost, route_builder::RouteBuilder,
    route_summary::RouteSummary,
};

use crate::{
    export,
    parsers::{self, DropPoints},
    providers::{
        DirectionsKind, GeocoderKind, PlaceCache, PlaceGeocoder, PlaceLookup, RoadDirections,
    },
};

#[derive(Args)]
pub struct RouteArgs {
    /// Where the route starts (e.g. "Rennes")
    #[arg(short, long, value_parser = parsers::parse_place)]
    origin: String,

    /// Comma separated drop points (e.g. "Nantes, Angers, Laval")
    #[arg(short = 'p', long, value_parser = parsers::parse_drop_points)]
    drops: DropPoints,

    #[arg(long, value_enum, default_value_t = GeocoderKind::Openweather)]
    geocoder: GeocoderKind,

    /// JSON file of `"place": [lat, lon]` entries, used with `--geocoder gazetteer`
    #[arg(long, required_if_eq("geocoder", "gazetteer"))]
    gazetteer: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = DirectionsKind::Google)]
    directions: DirectionsKind,

    /// Average speed used with `--directions crow-flies`
    #[arg(long, value_parser = parsers::parse_speed, default_value_t = 50.0)]
    speed_kmh: f64,

    /// Timeout of a single provider request (e.g., "10s", "PT1M")
    #[arg(short, long, value_parser = parse_duration)]
    timeout: Option<Duration>,

    /// Writes the route summary as JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Writes the route as a GeoJSON feature collection
    #[arg(long)]
    geojson: Option<PathBuf>,
}

fn create_geocoder(
    args: &RouteArgs,
    config: &ProvidersConfig,
) -> Result<PlaceGeocoder, anyhow::Error> {
    match args.geocoder {
        GeocoderKind::Openweather => Ok(PlaceGeocoder::OpenWeather(OpenWeatherGeocoder::new(
            config.openweather_params()?,
        )?)),
        GeocoderKind::Gazetteer => {
            let path = args
                .gazetteer
                .as_ref()
                .context("--gazetteer is required with --geocoder gazetteer")?;
            let gazetteer = Gazetteer::from_file(path)
                .with_context(|| format!("Could not load gazetteer {}", path.display()))?;

            info!("Loaded {} places from {}", gazetteer.len(), path.display());
            Ok(PlaceGeocoder::Gazetteer(gazetteer))
        }
    }
}

fn create_directions(
    args: &RouteArgs,
    config: &ProvidersConfig,
    geo_lookup: &Arc<PlaceLookup>,
) -> Result<RoadDirections, anyhow::Error> {
    match args.directions {
        DirectionsKind::Google => Ok(RoadDirections::Google(GoogleDirectionsClient::new(
            config.google_directions_params()?,
        )?)),
        DirectionsKind::CrowFlies => Ok(RoadDirections::AsTheCrowFlies(AsTheCrowFlies::new(
            Arc::clone(geo_lookup),
            args.speed_kmh,
        ))),
    }
}

fn create_cache(config: &ProvidersConfig) -> Result<PlaceCache, anyhow::Error> {
    match &config.cache_folder {
        Some(folder) => {
            info!("Caching coordinates in {}", folder.display());
            Ok(Box::new(FileCache::new(folder)?))
        }
        None => Ok(Box::new(NoCache)),
    }
}

fn legs_table(summary: &RouteSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "#", "From", "To", "Distance", "Travel Time", "km", "min", "Issues",
    ]);

    for (index, leg) in summary.legs().iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            leg.from.clone(),
            leg.to.clone(),
            leg.distance_text.clone(),
            leg.duration_text.clone(),
            format!("{:.1}", leg.kilometers),
            leg.minutes.to_string(),
            leg.issues
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ]);
    }

    table
}

pub async fn run(args: RouteArgs) -> anyhow::Result<()> {
    let mut config = ProvidersConfig::from_env()?;
    if let Some(timeout) = args.timeout {
        config.request_timeout = timeout;
    }

    let geo_lookup = Arc::new(
        GeoLookup::with_cache(create_geocoder(&args, &config)?, create_cache(&config)?)
            .with_timeout(config.request_timeout),
    );
    let directions = create_directions(&args, &config, &geo_lookup)?;

    let builder = RouteBuilder::with_shared_lookup(
        geo_lookup,
        LegCost::new(directions).with_timeout(config.request_timeout),
    );

    let DropPoints(drop_points) = &args.drops;
    info!(
        "Building route from {} through {} drop points",
        args.origin,
        drop_points.len()
    );

    let summary = builder.build_route(&args.origin, drop_points).await?;

    println!("{}", summary);
    println!("{}", legs_table(&summary));

    let degraded = summary.degraded_legs().count();
    if degraded > 0 {
        info!("{} of {} legs are degraded", degraded, summary.legs().len());
    }

    if let Some(output) = &args.output {
        export::write_summary(output, &summary)?;
        info!("Summary written to {}", output.display());
    }

    if let Some(geojson) = &args.geojson {
        export::write_geojson(geojson, &summary)?;
        info!("GeoJSON written to {}", geojson.display());
    }

    Ok(())
}
