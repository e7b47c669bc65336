//! Upload pipeline: staged local files, preview handles, and batched
//! resolution to remote URLs.
//!
//! Previews are transient local resources and must be released exactly
//! once. [`PreviewHandle::release`] is the explicit path (on replacement,
//! detach, or successful submit); `Drop` is the backstop for drafts that
//! are torn down without one.

use crate::store::{UploadFile, UploadedImage, Uploader};
use folio_core::StoreError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Separator between the correlation token and the original file name in
/// the multipart part file name.
const TOKEN_SEPARATOR: &str = "__";

/// A staged preview file for a not-yet-uploaded attachment.
#[derive(Debug)]
pub struct PreviewHandle {
    path: PathBuf,
    released: bool,
}

impl PreviewHandle {
    fn stage(source: &Path, preview_dir: &Path, token: &str) -> Result<Self, StoreError> {
        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                StoreError::Validation(format!("not a readable file path: {}", source.display()))
            })?;
        fs::create_dir_all(preview_dir).map_err(|err| {
            StoreError::Unknown(format!(
                "failed to prepare preview dir {}: {}",
                preview_dir.display(),
                err
            ))
        })?;
        let path = preview_dir.join(format!("{}-{}", token, file_name));
        fs::copy(source, &path).map_err(|err| {
            StoreError::Unknown(format!("failed to stage preview for {}: {}", file_name, err))
        })?;
        Ok(Self {
            path,
            released: false,
        })
    }

    /// Location of the staged preview file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release the preview file. Idempotent; later calls are no-ops.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = fs::remove_file(&self.path) {
            debug!("preview cleanup failed for {}: {}", self.path.display(), err);
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// A local file selection waiting to be uploaded.
#[derive(Debug)]
pub struct PendingUpload {
    token: String,
    source: PathBuf,
    file_name: String,
    preview: PreviewHandle,
}

impl PendingUpload {
    /// Stage `source` for upload: assign a correlation token and generate a
    /// local preview under `preview_dir`. No network I/O.
    pub fn stage(source: &Path, preview_dir: &Path) -> Result<Self, StoreError> {
        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                StoreError::Validation(format!("not a readable file path: {}", source.display()))
            })?
            .to_string();
        let token = Uuid::new_v4().simple().to_string();
        let preview = PreviewHandle::stage(source, preview_dir, &token)?;
        Ok(Self {
            token,
            source: source.to_path_buf(),
            file_name,
            preview,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }

    /// Release the staged preview (idempotent).
    pub fn release_preview(&mut self) {
        self.preview.release();
    }

    /// Part file name carrying the correlation token.
    fn correlated_name(&self) -> String {
        format!("{}{}{}", self.token, TOKEN_SEPARATOR, self.file_name)
    }

    fn read_bytes(&self) -> Result<Vec<u8>, StoreError> {
        fs::read(&self.source).map_err(|err| {
            StoreError::Unknown(format!(
                "failed to read {} for upload: {}",
                self.source.display(),
                err
            ))
        })
    }
}

/// Split a correlated part file name back into (token, original name).
fn split_correlation(name: &str) -> Option<(&str, &str)> {
    name.split_once(TOKEN_SEPARATOR)
}

/// Upload staged files in one batch and return their remote descriptors in
/// request order.
///
/// The store's response order is unguaranteed, so each response item is
/// matched back to its originating file by the correlation token echoed in
/// the file name. When the store echoes no names at all, response order is
/// accepted as-is provided the counts line up. Anything in between fails
/// the whole batch: either all files resolve or none are considered
/// attached.
pub async fn upload_and_resolve<'a, U, I>(
    uploader: &U,
    staged: I,
) -> Result<Vec<UploadedImage>, StoreError>
where
    U: Uploader,
    I: IntoIterator<Item = &'a PendingUpload>,
{
    let staged: Vec<&PendingUpload> = staged.into_iter().collect();
    if staged.is_empty() {
        return Ok(Vec::new());
    }

    let mut files = Vec::with_capacity(staged.len());
    for upload in &staged {
        files.push(UploadFile {
            file_name: upload.correlated_name(),
            bytes: upload.read_bytes()?,
        });
    }

    let resolved = uploader.upload_batch(files).await?;
    align_to_request_order(&staged, resolved)
}

fn align_to_request_order(
    staged: &[&PendingUpload],
    resolved: Vec<UploadedImage>,
) -> Result<Vec<UploadedImage>, StoreError> {
    let mut tagged: HashMap<String, UploadedImage> = HashMap::new();
    let mut untagged: Vec<UploadedImage> = Vec::new();
    for item in resolved {
        match item
            .file_name
            .as_deref()
            .and_then(split_correlation)
            .map(|(token, _)| token.to_string())
        {
            Some(token) => {
                tagged.insert(token, item);
            }
            None => untagged.push(item),
        }
    }

    if untagged.is_empty() {
        return staged
            .iter()
            .map(|upload| {
                tagged.remove(upload.token()).ok_or_else(|| {
                    StoreError::Unknown(format!(
                        "upload response missing an entry for {}",
                        upload.file_name()
                    ))
                })
            })
            .collect();
    }

    if tagged.is_empty() && untagged.len() == staged.len() {
        // No correlation survived the store; trust its order.
        return Ok(untagged);
    }

    Err(StoreError::Unknown(
        "upload response could not be aligned with the request".to_string(),
    ))
}
