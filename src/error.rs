//! Error types for stationflow operations.

use thiserror::Error;

/// Errors returned by stationflow operations.
#[derive(Error, Debug)]
pub enum StationflowError {
    /// A station carried coordinates that cannot be indexed
    /// (non-finite, or outside valid longitude/latitude ranges).
    #[error("Invalid coordinates for station '{id}': {reason}")]
    InvalidCoordinates { id: String, reason: String },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization or deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for stationflow operations.
pub type Result<T> = std::result::Result<T, StationflowError>;
