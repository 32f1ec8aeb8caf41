//! Error types for pipewright-core.

use thiserror::Error;

/// Result type for pipewright-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pipewright-core.
#[derive(Debug, Error)]
pub enum Error {
    /// The component catalog is missing or malformed.
    ///
    /// Raised once at load time; the compiler must not serve requests
    /// until the registry loads.
    #[error("failed to load component catalog{}: {message}", path.as_ref().map(|p| format!(" from {p}")).unwrap_or_default())]
    RegistryLoad {
        path: Option<String>,
        message: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
