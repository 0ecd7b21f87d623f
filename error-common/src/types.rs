use thiserror::Error;

/// Process-level errors raised while starting or running the server
#[derive(Error, Debug)]
pub enum NurseOsError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for NurseOS operations
pub type Result<T> = std::result::Result<T, NurseOsError>;

/// Log an error together with the context it was raised in
pub fn log_error(context: &str, error: &NurseOsError) {
    tracing::error!(
        context = context,
        error = %error,
        "NurseOS error occurred"
    );
}
