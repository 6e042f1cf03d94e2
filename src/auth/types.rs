//! Authentication types for the portal backend
//!
//! Request and response payload shapes are owned by the server; callers pass
//! their own `Serialize` types and choose what to deserialize responses into.

/// Authentication error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
