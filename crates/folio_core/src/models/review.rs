//! Visitor review model. Read-only from the admin's perspective.

use serde::{Deserialize, Serialize};

/// A visitor review as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    #[serde(alias = "_id")]
    pub id: String,
    pub author: String,
    pub content: String,
}
