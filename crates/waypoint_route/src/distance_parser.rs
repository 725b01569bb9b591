use thiserror::Error;

pub const KILOMETERS_PER_MILE: f64 = 1.609344;
pub const KILOMETERS_PER_FOOT: f64 = 0.0003048;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseDistanceError {
    #[error("empty distance")]
    Empty,

    #[error("distance '{0}' has no unit")]
    MissingUnit(String),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("invalid magnitude '{0}'")]
    InvalidMagnitude(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DistanceUnit {
    Kilometers,
    Meters,
    Miles,
    Feet,
}

impl DistanceUnit {
    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Some(DistanceUnit::Kilometers)
            }
            "m" | "meter" | "meters" | "metre" | "metres" => Some(DistanceUnit::Meters),
            "mi" | "mile" | "miles" => Some(DistanceUnit::Miles),
            "ft" | "foot" | "feet" => Some(DistanceUnit::Feet),
            _ => None,
        }
    }

    fn kilometers(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => 1.0,
            DistanceUnit::Meters => 0.001,
            DistanceUnit::Miles => KILOMETERS_PER_MILE,
            DistanceUnit::Feet => KILOMETERS_PER_FOOT,
        }
    }
}

/// Converts a provider distance phrase such as "1,234.5 km" or "12 mi" into
/// kilometers. Imperial units are converted, never read as kilometers.
pub fn parse_distance_km(text: &str) -> Result<f64, ParseDistanceError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseDistanceError::Empty);
    }

    let unit_start = text
        .find(|c: char| c.is_alphabetic())
        .ok_or_else(|| ParseDistanceError::MissingUnit(text.to_string()))?;
    let (magnitude, unit) = text.split_at(unit_start);

    let magnitude = magnitude.trim();
    let digits: String = magnitude.chars().filter(|c| *c != ',').collect();
    let magnitude = digits
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| ParseDistanceError::InvalidMagnitude(magnitude.to_string()))?;

    let unit = unit.trim();
    let unit = DistanceUnit::from_token(unit)
        .ok_or_else(|| ParseDistanceError::UnknownUnit(unit.to_string()))?;

    Ok(magnitude * unit.kilometers())
}
