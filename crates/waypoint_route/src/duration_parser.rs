use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("quantity {0} has no unit")]
    MissingUnit(u64),

    #[error("unit '{0}' has no quantity")]
    MissingQuantity(String),

    #[error("unit '{0}' is repeated or out of order")]
    UnitOutOfOrder(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DurationUnit {
    Minute,
    Hour,
    Day,
}

impl DurationUnit {
    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "min" | "mins" | "minute" | "minutes" => Some(DurationUnit::Minute),
            "hr" | "hrs" | "hour" | "hours" => Some(DurationUnit::Hour),
            "day" | "days" => Some(DurationUnit::Day),
            _ => None,
        }
    }

    fn minutes(self) -> u64 {
        match self {
            DurationUnit::Minute => 1,
            DurationUnit::Hour => 60,
            DurationUnit::Day => 24 * 60,
        }
    }
}

enum DurationToken<'a> {
    Quantity(u64),
    Unit(DurationUnit, &'a str),
    Unknown(&'a str),
}

fn classify(token: &str) -> DurationToken<'_> {
    if let Ok(quantity) = token.parse::<u64>() {
        return DurationToken::Quantity(quantity);
    }

    match DurationUnit::from_token(token) {
        Some(unit) => DurationToken::Unit(unit, token),
        None => DurationToken::Unknown(token),
    }
}

/// Converts a provider duration phrase such as "1 hour 20 mins" into minutes.
///
/// Every whitespace separated token is classified as a quantity or a unit;
/// each unit consumes the quantity right before it. Units must go from the
/// largest to the smallest and each may appear once.
pub fn parse_duration_minutes(text: &str) -> Result<u64, ParseDurationError> {
    let mut total = 0u64;
    let mut pending: Option<u64> = None;
    let mut previous_unit: Option<DurationUnit> = None;
    let mut has_tokens = false;

    for token in text.split_whitespace() {
        has_tokens = true;

        match classify(token) {
            DurationToken::Quantity(quantity) => {
                if let Some(dangling) = pending.replace(quantity) {
                    return Err(ParseDurationError::MissingUnit(dangling));
                }
            }
            DurationToken::Unit(unit, raw) => {
                let quantity = pending
                    .take()
                    .ok_or_else(|| ParseDurationError::MissingQuantity(raw.to_string()))?;

                if previous_unit.is_some_and(|previous| unit >= previous) {
                    return Err(ParseDurationError::UnitOutOfOrder(raw.to_string()));
                }
                previous_unit = Some(unit);

                total = total.saturating_add(quantity.saturating_mul(unit.minutes()));
            }
            DurationToken::Unknown(raw) => {
                if raw.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.') {
                    return Err(ParseDurationError::InvalidQuantity(raw.to_string()));
                }
                return Err(ParseDurationError::UnknownUnit(raw.to_string()));
            }
        }
    }

    if !has_tokens {
        return Err(ParseDurationError::Empty);
    }

    if let Some(dangling) = pending {
        return Err(ParseDurationError::MissingUnit(dangling));
    }

    Ok(total)
}
