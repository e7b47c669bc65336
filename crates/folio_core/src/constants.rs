//! Shared constants used across folio crates.

/// Default base URL for the remote content API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default request timeout applied to the HTTP client, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Multipart field name the store expects for batched image uploads.
pub const UPLOAD_FIELD_NAME: &str = "images";

/// Path suffix for the per-collection count endpoints.
pub const COUNT_SEGMENT: &str = "count";
