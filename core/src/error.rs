use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaffingError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Location '{id}' not found")]
    UnknownLocation { id: String },

    #[error("Role catalog is empty")]
    EmptyCatalog,

    #[error("No locations configured")]
    NoLocations,

    #[error("Invalid divisor for role '{role}': {divisor}")]
    InvalidDivisor { role: String, divisor: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StaffingResult<T> = Result<T, StaffingError>;
