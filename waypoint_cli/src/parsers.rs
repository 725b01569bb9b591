#[derive(Debug, Clone, PartialEq)]
pub struct DropPoints(pub Vec<String>);

pub fn parse_place(input: &str) -> Result<String, String> {
    let place = input.trim();

    if place.is_empty() {
        return Err(String::from("Place cannot be empty"));
    }

    Ok(place.to_string())
}

/// "Nantes, Angers,, Laval " -> ["Nantes", "Angers", "Laval"]
pub fn parse_drop_points(input: &str) -> Result<DropPoints, String> {
    let drop_points: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|drop_point| !drop_point.is_empty())
        .map(String::from)
        .collect();

    if drop_points.is_empty() {
        return Err(String::from("Expected at least one drop point"));
    }

    Ok(DropPoints(drop_points))
}

pub fn parse_speed(input: &str) -> Result<f64, String> {
    let speed: f64 = input
        .parse()
        .map_err(|_| format!("Invalid speed: {}", input))?;

    if !speed.is_finite() || speed <= 0.0 {
        return Err(String::from("Speed must be greater than 0"));
    }

    Ok(speed)
}
