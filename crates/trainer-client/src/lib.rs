//! Brain Trainer service client
//!
//! This crate holds the data contracts exchanged with the Brain Trainer
//! service (users, auth tokens, achievements, per-game statistics and their
//! partial updates), the login form encoding, and a reqwest-based transport
//! with typed endpoints.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod credentials;
pub mod http;
pub mod models;

pub use api::TrainerApi;
pub use credentials::{LoginCredential, OAuthClient};
pub use http::{ApiClient, ApiClientConfig, ApiError};
pub use models::{
    Achievement, AuthToken, ContractError, User, UserAchievement, UserAchievementUpdate,
    UserGameStat, UserGameStatUpdate, UserUpdate,
};

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for client operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Service or transport error
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A request body could not be encoded
    #[error("Could not encode {0}")]
    Encoding(String),

    /// An authenticated endpoint was called before login
    #[error("No active session - please login first")]
    NoSession,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A contract value violates its constraints
    #[error("Contract violation: {0}")]
    Contract(#[from] ContractError),
}

impl Error {
    /// Whether the service rejected the credentials or token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(e) if e.is_unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = Error::InvalidInput("test".to_string());
        assert!(err.to_string().contains("Invalid input"));

        let err = Error::from(ApiError::new(401, "Detail", "Not authenticated"));
        assert!(err.is_unauthorized());
        assert!(!Error::NoSession.is_unauthorized());
    }
}
