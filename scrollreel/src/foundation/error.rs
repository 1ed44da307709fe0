/// Convenience result type used across scrollreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Failures reported by an asset storage backend.
///
/// Every variant is recoverable at the call site: consumers fall back to an empty slot and
/// log the diagnostic. Nothing here is retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be opened (storage disabled, quota exhausted, missing root).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Iterating or reading stored records failed.
    #[error("store read failure: {0}")]
    ReadFailure(String),

    /// Persisting a record failed after the backend was opened.
    #[error("store write failure: {0}")]
    WriteFailure(String),

    /// The slot key cannot be used as a storage key.
    #[error("invalid asset key: {0}")]
    InvalidKey(String),
}

impl StoreError {
    /// Build a [`StoreError::Unavailable`] value.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Build a [`StoreError::ReadFailure`] value.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::ReadFailure(msg.into())
    }

    /// Build a [`StoreError::WriteFailure`] value.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::WriteFailure(msg.into())
    }

    /// Build a [`StoreError::InvalidKey`] value.
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }
}

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided data (timeline tables, configuration values, geometry).
    #[error("validation error: {0}")]
    Validation(String),

    /// Asset store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
