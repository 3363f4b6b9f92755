use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("coordinate is not a finite number")]
    NonFinite,
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// Malformed input, always reported to the caller before any work is done.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("stop '{stop_id}': {source}")]
    Coordinate {
        stop_id: String,
        #[source]
        source: CoordinateError,
    },
    #[error("stop id '{0}' appears more than once")]
    DuplicateStopId(String),
    #[error("stop at position {0} has an empty id")]
    EmptyStopId(usize),
    #[error("groupCount must be at least 1, got {0}")]
    InvalidGroupCount(i64),
    #[error("config.{field}: {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl ValidationError {
    /// Stable machine readable code of the failure.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::Coordinate { source, .. } => match source {
                CoordinateError::NonFinite => "non_finite_coordinate",
                CoordinateError::Latitude(_) => "invalid_latitude",
                CoordinateError::Longitude(_) => "invalid_longitude",
            },
            ValidationError::DuplicateStopId(_) => "duplicate_stop_id",
            ValidationError::EmptyStopId(_) => "empty_stop_id",
            ValidationError::InvalidGroupCount(_) => "invalid_group_count",
            ValidationError::InvalidConfig { .. } => "invalid_config",
            ValidationError::MalformedBody(_) => "malformed_body",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Computation produced something that cannot be a valid answer. The input
    /// is deterministic so retrying would fail the same way.
    #[error("internal fault: {0}")]
    Internal(String),
}

impl OptimizeError {
    pub fn kind(&self) -> &'static str {
        match self {
            OptimizeError::Validation(_) => "ValidationError",
            OptimizeError::Internal(_) => "InternalFault",
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            OptimizeError::Validation(error) => error.reason(),
            OptimizeError::Internal(_) => "internal_fault",
        }
    }
}
