use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Snapshot could not be serialized into a prompt
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Profit margin outside `0..=1`
    #[error("Invalid profit margin: {0}")]
    InvalidMargin(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
