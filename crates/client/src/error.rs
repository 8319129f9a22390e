use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Client-side error taxonomy. Everything a store can fail with is caught at
/// the store boundary and surfaced as a transient notice; nothing propagates
/// as a panic and nothing is retried automatically.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid startup configuration; fatal.
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// A required field is missing or out of range; form state is retained
    /// by the caller so the user can correct it.
    #[error("validation error: {0}")]
    Validation(String),
    /// No session; the operation was blocked before reaching the backend.
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("not found: {0}")]
    NotFound(String),
    /// The backend rejected or failed the operation; local state is left
    /// unchanged.
    #[error("remote operation failed: {0}")]
    Remote(String),
}
