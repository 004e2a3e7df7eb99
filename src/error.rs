//! Error types for the wellness navigator

use thiserror::Error;

/// Result type alias for coaching and sync operations
pub type Result<T> = std::result::Result<T, CoachError>;

#[derive(Error, Debug)]
pub enum CoachError {

    // =============================
    // Downstream Delivery Errors
    // =============================

    #[error("Webhook rejected sync payload with status {status}: {body}")]
    WebhookRejected { status: u16, body: String },

    #[error("Webhook unreachable: {0}")]
    WebhookUnreachable(String),

    // =============================
    // Persistence Errors (never surfaced by /coach)
    // =============================

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(String),

    // =============================
    // Startup
    // =============================

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl CoachError {
    /// True for failures caused by the remote sync target rather than by us.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(
            self,
            CoachError::WebhookRejected { .. } | CoachError::WebhookUnreachable(_)
        )
    }
}

impl From<sqlx::Error> for CoachError {
    fn from(err: sqlx::Error) -> Self {
        CoachError::Database(err.to_string())
    }
}
