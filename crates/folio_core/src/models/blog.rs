//! Blog post models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub excerpt: String,
    #[serde(rename = "coverImage", default)]
    pub cover_image: Option<String>,
    #[serde(rename = "additionalImages", default)]
    pub additional_images: Vec<String>,
    /// Stamped by the store on creation; absent from older records.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for creating or updating a blog post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPayload {
    pub title: String,
    pub excerpt: String,
    #[serde(rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(rename = "additionalImages", default)]
    pub additional_images: Vec<String>,
}
