use thiserror::Error;

/// Top-level error type for the Staffdesk service.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for StaffdeskError` so that `?` works across
/// crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StaffdeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for StaffdeskError {
    fn from(err: toml::de::Error) -> Self {
        StaffdeskError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StaffdeskError {
    fn from(err: toml::ser::Error) -> Self {
        StaffdeskError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for StaffdeskError {
    fn from(err: serde_json::Error) -> Self {
        StaffdeskError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Staffdesk operations.
pub type Result<T> = std::result::Result<T, StaffdeskError>;
