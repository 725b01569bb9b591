use thiserror::Error;

/// Rejected input. Raised before any provider is queried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("an origin is required")]
    MissingOrigin,

    #[error("at least one drop point is required")]
    NoDropPoints,

    #[error("drop point #{index} is blank")]
    BlankDropPoint { index: usize },
}
