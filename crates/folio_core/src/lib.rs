//! Core domain library for the folio admin client (config, models, errors).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Process-global environment mutation helpers.
pub mod env;
/// Error taxonomy shared by every store-facing operation.
pub mod error;
/// Content models exchanged with the remote store.
pub mod models;
/// Persisted operator preferences (theme flag).
pub mod prefs;

pub use config::Config;
pub use constants::DEFAULT_API_URL;
pub use error::{ErrorKind, StoreError};
