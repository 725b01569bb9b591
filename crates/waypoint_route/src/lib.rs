pub mod distance_parser;
pub mod duration_parser;
pub mod error;
pub mod geo_lookup;
pub mod leg_cost;
pub mod route_builder;
pub mod route_summary;
