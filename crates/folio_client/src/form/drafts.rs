//! Entity-specific drafts for the generic form controller.

use super::{Draft, ImageSet, ImageSlot};
use folio_core::models::{BlogPayload, BlogPost, Project, ProjectPayload};
use folio_core::StoreError;

/// Draft fields of a portfolio project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
}

impl Draft for ProjectDraft {
    type Record = Project;

    fn apply_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => return false,
        }
        true
    }

    fn validate(&self) -> Result<(), StoreError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::missing_fields(&missing))
        }
    }

    fn to_payload(&self, images: &ImageSet) -> ProjectPayload {
        ProjectPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            images: images.gallery.clone(),
        }
    }

    fn prefill(record: &Project) -> (Self, ImageSet) {
        (
            Self {
                name: record.name.clone(),
                description: record.description.clone(),
            },
            ImageSet {
                cover: None,
                gallery: record.images.clone(),
            },
        )
    }

    // Projects carry a flat image list; the first entry doubles as the
    // cover when rendered.
    fn supports_slot(slot: ImageSlot) -> bool {
        matches!(slot, ImageSlot::Gallery)
    }
}

/// Draft fields of a blog post.
#[derive(Debug, Clone, Default)]
pub struct BlogDraft {
    pub title: String,
    pub excerpt: String,
}

impl Draft for BlogDraft {
    type Record = BlogPost;

    fn apply_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "title" => self.title = value.to_string(),
            "excerpt" => self.excerpt = value.to_string(),
            _ => return false,
        }
        true
    }

    fn validate(&self) -> Result<(), StoreError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.excerpt.trim().is_empty() {
            missing.push("excerpt");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::missing_fields(&missing))
        }
    }

    fn to_payload(&self, images: &ImageSet) -> BlogPayload {
        BlogPayload {
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            cover_image: images.cover.clone(),
            additional_images: images.gallery.clone(),
        }
    }

    fn prefill(record: &BlogPost) -> (Self, ImageSet) {
        (
            Self {
                title: record.title.clone(),
                excerpt: record.excerpt.clone(),
            },
            ImageSet {
                cover: record.cover_image.clone(),
                gallery: record.additional_images.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{BlogDraft, Draft, ProjectDraft};
    use crate::form::ImageSet;
    use folio_core::ErrorKind;

    #[test]
    fn project_draft_validates_both_required_fields() {
        let mut draft = ProjectDraft::default();
        let err = draft.validate().expect_err("empty draft");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "Validation failed: missing required fields: name, description"
        );

        draft.apply_field("name", "Site");
        draft.apply_field("description", "A site");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn whitespace_only_fields_do_not_validate() {
        let mut draft = BlogDraft::default();
        draft.apply_field("title", "   ");
        draft.apply_field("excerpt", "ok");
        let err = draft.validate().expect_err("blank title");
        assert_eq!(
            err.to_string(),
            "Validation failed: missing required fields: title"
        );
    }

    #[test]
    fn blog_payload_carries_both_image_slots() {
        let mut draft = BlogDraft::default();
        draft.apply_field("title", "Hello");
        draft.apply_field("excerpt", "First");
        let payload = draft.to_payload(&ImageSet {
            cover: Some("cover.png".into()),
            gallery: vec!["one.png".into(), "two.png".into()],
        });
        assert_eq!(payload.cover_image.as_deref(), Some("cover.png"));
        assert_eq!(payload.additional_images.len(), 2);
    }
}
