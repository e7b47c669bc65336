//! Draft editing and submission.
//!
//! A [`FormController`] owns exactly one draft: the typed fields of the
//! entity being created or edited, plus its image slots. Persisted image
//! references and pending local attachments live side by side in the slots;
//! submission resolves the pending ones through the upload pipeline before
//! the draft is committed to the store.

use crate::collection::Committed;
use crate::store::{UploadedImage, Writable, WriteStore, Uploader};
use crate::upload::{upload_and_resolve, PendingUpload};
use folio_core::StoreError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub mod drafts;

/// Whether the draft creates a new entity or edits a persisted one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Image role a file is attached to. Cover slots hold at most one image
/// (attach replaces), gallery slots append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Cover,
    Gallery,
}

impl ImageSlot {
    fn name(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Gallery => "gallery",
        }
    }
}

/// Resolved remote image references, grouped by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    pub cover: Option<String>,
    pub gallery: Vec<String>,
}

/// Entity-specific draft state editable through the generic controller.
pub trait Draft: Default {
    type Record: Writable;

    /// Apply a field edit by name. Returns `false` for unknown fields.
    fn apply_field(&mut self, field: &str, value: &str) -> bool;

    /// Check required fields. Must be free of side effects; a failure here
    /// is surfaced before any network call.
    fn validate(&self) -> Result<(), StoreError>;

    /// Build the wire payload from the draft fields and the resolved
    /// image set.
    fn to_payload(&self, images: &ImageSet) -> <Self::Record as Writable>::Payload;

    /// Prefill draft fields from a persisted record and split its image
    /// references into slots.
    fn prefill(record: &Self::Record) -> (Self, ImageSet);

    /// Which image slots this entity uses.
    fn supports_slot(slot: ImageSlot) -> bool {
        let _ = slot;
        true
    }
}

#[derive(Debug)]
enum SlotEntry {
    /// Remote URL already persisted on the record.
    Persisted(String),
    /// Local file staged for upload.
    Pending(PendingUpload),
}

impl SlotEntry {
    fn release_if_pending(&mut self) {
        if let Self::Pending(upload) = self {
            upload.release_preview();
        }
    }
}

/// Owns one draft and mediates its submission.
#[derive(Debug)]
pub struct FormController<D: Draft> {
    mode: FormMode,
    draft: D,
    cover: Option<SlotEntry>,
    gallery: Vec<SlotEntry>,
    dirty: BTreeSet<String>,
    preview_dir: PathBuf,
}

fn next_url<'a>(
    urls: &mut impl Iterator<Item = &'a UploadedImage>,
) -> Result<String, StoreError> {
    urls.next().map(|item| item.url.clone()).ok_or_else(|| {
        StoreError::Unknown("resolved upload count does not match attachments".to_string())
    })
}

impl<D: Draft> FormController<D> {
    /// Start a create-mode draft with type-appropriate defaults.
    pub fn create(preview_dir: PathBuf) -> Self {
        Self {
            mode: FormMode::Create,
            draft: D::default(),
            cover: None,
            gallery: Vec::new(),
            dirty: BTreeSet::new(),
            preview_dir,
        }
    }

    /// Start an edit-mode draft prefilled from `record`.
    pub fn edit(record: &D::Record, preview_dir: PathBuf) -> Self {
        use crate::store::Resource;
        let (draft, images) = D::prefill(record);
        Self {
            mode: FormMode::Edit {
                id: record.id().to_string(),
            },
            draft,
            cover: images.cover.map(SlotEntry::Persisted),
            gallery: images.gallery.into_iter().map(SlotEntry::Persisted).collect(),
            dirty: BTreeSet::new(),
            preview_dir,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Field names edited since the draft was initialized.
    pub fn dirty_fields(&self) -> impl Iterator<Item = &str> {
        self.dirty.iter().map(String::as_str)
    }

    /// Apply a field edit. Pure local mutation; marks the field dirty.
    ///
    /// # Returns
    /// `false` when the draft has no field with that name.
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        if self.draft.apply_field(field, value) {
            self.dirty.insert(field.to_string());
            return true;
        }
        false
    }

    /// Attach a local file to `slot`, staging its preview synchronously.
    ///
    /// Cover attachments replace (releasing the superseded preview);
    /// gallery attachments append.
    pub fn attach_file(&mut self, slot: ImageSlot, path: &Path) -> Result<(), StoreError> {
        if !D::supports_slot(slot) {
            return Err(StoreError::Validation(format!(
                "this entity has no {} image slot",
                slot.name()
            )));
        }
        let staged = PendingUpload::stage(path, &self.preview_dir)?;
        match slot {
            ImageSlot::Cover => {
                if let Some(mut old) = self.cover.take() {
                    old.release_if_pending();
                }
                self.cover = Some(SlotEntry::Pending(staged));
            }
            ImageSlot::Gallery => self.gallery.push(SlotEntry::Pending(staged)),
        }
        Ok(())
    }

    /// Detach a pending attachment or mark a persisted reference for
    /// omission on the next submit. Never deletes remote sub-resources.
    ///
    /// # Returns
    /// `true` when something was detached.
    pub fn detach_file(&mut self, slot: ImageSlot, index: Option<usize>) -> bool {
        match slot {
            ImageSlot::Cover => match self.cover.take() {
                Some(mut entry) => {
                    entry.release_if_pending();
                    true
                }
                None => false,
            },
            ImageSlot::Gallery => {
                let Some(index) = index else {
                    return false;
                };
                if index >= self.gallery.len() {
                    return false;
                }
                let mut entry = self.gallery.remove(index);
                entry.release_if_pending();
                true
            }
        }
    }

    /// Pending attachments in cover-then-gallery order.
    fn pending_uploads(&self) -> Vec<&PendingUpload> {
        let cover = self.cover.iter().filter_map(|entry| match entry {
            SlotEntry::Pending(upload) => Some(upload),
            SlotEntry::Persisted(_) => None,
        });
        let gallery = self.gallery.iter().filter_map(|entry| match entry {
            SlotEntry::Pending(upload) => Some(upload),
            SlotEntry::Persisted(_) => None,
        });
        cover.chain(gallery).collect()
    }

    /// Number of pending local attachments.
    pub fn pending_count(&self) -> usize {
        self.pending_uploads().len()
    }

    /// Merge persisted references with freshly uploaded URLs, preserving
    /// slot order.
    fn resolved_images(&self, uploaded: &[UploadedImage]) -> Result<ImageSet, StoreError> {
        let mut urls = uploaded.iter();
        let cover = match &self.cover {
            Some(SlotEntry::Persisted(url)) => Some(url.clone()),
            Some(SlotEntry::Pending(_)) => Some(next_url(&mut urls)?),
            None => None,
        };
        let mut gallery = Vec::with_capacity(self.gallery.len());
        for entry in &self.gallery {
            gallery.push(match entry {
                SlotEntry::Persisted(url) => url.clone(),
                SlotEntry::Pending(_) => next_url(&mut urls)?,
            });
        }
        Ok(ImageSet { cover, gallery })
    }

    /// After a confirmed submit, pending entries become persisted URLs and
    /// their previews are released.
    fn mark_uploaded(&mut self, images: ImageSet) {
        if let Some(mut entry) = self.cover.take() {
            entry.release_if_pending();
        }
        self.cover = images.cover.map(SlotEntry::Persisted);
        for mut entry in self.gallery.drain(..) {
            entry.release_if_pending();
        }
        self.gallery = images.gallery.into_iter().map(SlotEntry::Persisted).collect();
    }

    /// Discard the draft: release every pending preview and reset to
    /// create-mode defaults.
    pub fn discard(&mut self) {
        if let Some(mut entry) = self.cover.take() {
            entry.release_if_pending();
        }
        for mut entry in self.gallery.drain(..) {
            entry.release_if_pending();
        }
        self.mode = FormMode::Create;
        self.draft = D::default();
        self.dirty.clear();
    }

    /// Validate, upload pending attachments, and commit the draft.
    ///
    /// Validation failures return before any network call. Submitting with
    /// zero attachments is always valid. On failure the draft (fields and
    /// attachments alike) is left untouched so the operator can retry
    /// without re-entering anything.
    pub async fn submit<S, U>(
        &mut self,
        store: &S,
        uploader: &U,
    ) -> Result<Committed<D::Record>, StoreError>
    where
        S: WriteStore<D::Record>,
        U: Uploader,
    {
        self.draft.validate()?;

        let uploaded = {
            let pending = self.pending_uploads();
            upload_and_resolve(uploader, pending).await?
        };
        let images = self.resolved_images(&uploaded)?;
        let payload = self.draft.to_payload(&images);

        let record = match &self.mode {
            FormMode::Create => store.create(&payload).await?,
            FormMode::Edit { id } => store.update(id, &payload).await?,
        };

        self.mark_uploaded(images);
        Ok(if self.is_edit() {
            Committed::Updated(record)
        } else {
            Committed::Created(record)
        })
    }
}
