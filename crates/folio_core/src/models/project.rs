//! Portfolio project models.

use serde::{Deserialize, Serialize};

/// A portfolio project as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    /// Remote-hosted image URLs, first entry doubles as the cover.
    #[serde(default)]
    pub images: Vec<String>,
}

/// Request body for creating or updating a project.
///
/// Image entries are the already-uploaded remote URLs; the payload never
/// carries raw file data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}
