pub mod as_the_crow_flies;
pub mod cache;
pub mod config;
pub mod coordinate;
pub mod directions_provider;
pub mod gazetteer;
pub mod geocoder;
pub mod google_directions_api;
pub mod openweather_api;
