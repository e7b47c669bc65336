//! Slideshow image model.

use serde::{Deserialize, Serialize};

/// One image in the landing-page slideshow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideImage {
    #[serde(alias = "_id")]
    pub id: String,
    pub url: String,
}
