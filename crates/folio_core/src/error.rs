//! Error taxonomy for store-facing operations.
use thiserror::Error;

/// Failure classification attached to every [`StoreError`].
///
/// The taxonomy is part of the view-model contract: read paths absorb
/// Network/ServerRejected into empty results, write paths surface them, and
/// Validation never reaches the network layer at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport unreachable or timed out.
    Network,
    /// Referenced id absent from the store.
    NotFound,
    /// Local pre-network validation failure.
    Validation,
    /// The store returned an error status.
    ServerRejected,
    /// Anything that defies classification (decode failures, local I/O).
    Unknown,
}

/// Error returned by gateway, view-model, and form operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store rejected request ({status}): {message}")]
    ServerRejected { status: u16, message: String },

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl StoreError {
    /// Classification used for logging; views render only the message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::NotFound => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::ServerRejected { .. } => ErrorKind::ServerRejected,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Build a validation failure naming the empty required fields.
    ///
    /// # Returns
    /// A [`StoreError::Validation`] listing `fields` in order.
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::Validation(format!("missing required fields: {}", fields.join(", ")))
    }
}
