//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use std::env;
use std::path::PathBuf;

/// Runtime configuration for the folio admin client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote content API.
    pub api_url: String,
    /// Request timeout applied to the HTTP client, in seconds.
    pub timeout_secs: u64,
    /// Directory where staged upload previews are written.
    pub preview_dir: PathBuf,
    /// Path of the persisted operator preferences file.
    pub prefs_path: PathBuf,
    /// Re-fetch the collection after every successful commit instead of
    /// patching in place. Slower, but reconciles against concurrent editors.
    pub reconcile_after_commit: bool,
}

/// Expand tilde (~) in paths to the user's home directory.
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    // Prefer explicit HOME if set (Unix, some Windows shells)
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows USERPROFILE (standard)
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    // Fallback to current directory if available
    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn default_state_path(segments: &[&str]) -> PathBuf {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    segments.iter().fold(home, |path, segment| path.join(segment))
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("FOLIO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout_secs: env::var("FOLIO_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            preview_dir: env::var("FOLIO_PREVIEW_DIR")
                .map(expand_tilde)
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_state_path(&[".cache", "folio", "previews"])),
            prefs_path: env::var("FOLIO_PREFS_PATH")
                .map(expand_tilde)
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_state_path(&[".config", "folio", "prefs.json"])),
            reconcile_after_commit: env_flag_enabled("FOLIO_RECONCILE"),
        }
    }
}
