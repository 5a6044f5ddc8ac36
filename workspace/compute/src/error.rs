use thiserror::Error;

/// Local input problems. These block a request and never reach the network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please select a valid location or enter coordinates")]
    MissingCoordinates,

    #[error("Latitude must be between -90 and 90 degrees")]
    LatitudeOutOfRange,

    #[error("Longitude must be between -180 and 180 degrees")]
    LongitudeOutOfRange,

    #[error("Panel area must be greater than 0")]
    InvalidPanelArea,

    #[error("Tilt angle must be between 0 and 90 degrees")]
    TiltOutOfRange,

    #[error("Azimuth angle must be between 0 and 360 degrees")]
    AzimuthOutOfRange,

    #[error("Unknown prediction type: {0}")]
    UnknownPredictionType(String),

    #[error("Please enter a location")]
    EmptyLocationQuery,
}

/// Transport-level failures talking to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response whose body was not a JSON envelope.
    #[error("HTTP error: {0}")]
    Http(u16),

    /// The body could not be decoded into the expected envelope.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Everything a controller action can surface to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport failure, rendered as "Error <operation>: <detail>".
    #[error("Error {operation}: {source}")]
    Api {
        operation: &'static str,
        #[source]
        source: ApiError,
    },

    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// A `success: true` envelope that does not carry the promised payload.
    #[error("Error {operation}: malformed response ({reason})")]
    MalformedResponse {
        operation: &'static str,
        reason: String,
    },

    #[error("No data to export. Please make a prediction first.")]
    NoDataToExport,

    #[error("Location not found. Please try a different location.")]
    LocationNotFound,

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Unable to retrieve your location. Please enter coordinates manually.")]
    GeolocationUnavailable,

    #[error("Export failed. Please try again.")]
    ExportFailed(String),
}

impl WorkflowError {
    pub fn api(operation: &'static str, source: ApiError) -> Self {
        Self::Api { operation, source }
    }

    pub fn malformed(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation,
            reason: reason.into(),
        }
    }
}

/// Failures while serializing the analytics export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// Type alias for Result with WorkflowError
pub type Result<T> = std::result::Result<T, WorkflowError>;
