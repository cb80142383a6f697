//! Domain-level error type.

/// Errors produced by the pure domain layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A metric name that is not part of the fixed enumeration.
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// An update payload with no fields left after removing empty values.
    #[error("No fields to update after removing empty values")]
    EmptyUpdate,

    /// A DTO that could not be serialized to JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
