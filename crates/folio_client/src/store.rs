//! Capability traits that define what the remote store can do for each
//! content type, plus the wire types shared by upload paths.
//!
//! The split mirrors the admin surface: reviews are list-only, slideshow
//! images can be deleted and batch-uploaded but never edited, projects and
//! blogs support the full create/update/delete cycle. Implementations are
//! the [`HttpGateway`](crate::gateway::HttpGateway) and in-memory test
//! doubles.

use folio_core::error::StoreError;
use folio_core::models::{BlogPayload, BlogPost, Project, ProjectPayload, ReviewEntry, SlideImage};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A content type the store can list and fetch by id.
pub trait Resource: DeserializeOwned + Clone {
    /// Collection path segment under the API base (e.g. `projects`).
    const COLLECTION: &'static str;

    /// Store-issued unique identifier.
    fn id(&self) -> &str;
}

/// A resource with a create/update request body.
pub trait Writable: Resource {
    type Payload: Serialize;
}

/// A resource the operator can delete.
pub trait Deletable: Resource {
    /// Path segments of the delete endpoint for `id`.
    fn delete_segments(id: &str) -> Vec<String> {
        vec![Self::COLLECTION.to_string(), id.to_string()]
    }
}

/// Read operations. Implementations never fail outward: on any transport or
/// status error they log the failure and return an empty or absent result so
/// the caller always has a renderable state.
#[allow(async_fn_in_trait)]
pub trait ReadStore<R: Resource> {
    async fn list(&self) -> Vec<R>;
    async fn get(&self, id: &str) -> Option<R>;
    async fn count(&self) -> u64;
}

/// Create/update operations. Failures surface as classified [`StoreError`]s;
/// silently swallowing a write failure would desynchronize the UI from the
/// store.
#[allow(async_fn_in_trait)]
pub trait WriteStore<R: Writable> {
    async fn create(&self, payload: &R::Payload) -> Result<R, StoreError>;
    async fn update(&self, id: &str, payload: &R::Payload) -> Result<R, StoreError>;
}

/// Delete operation. Failures surface like writes.
#[allow(async_fn_in_trait)]
pub trait DeleteStore<R: Deletable> {
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Batched multipart upload of raw image files.
#[allow(async_fn_in_trait)]
pub trait Uploader {
    /// Upload `files` in one request. The response order is unguaranteed;
    /// callers re-align by the echoed file name (see
    /// [`upload_and_resolve`](crate::upload::upload_and_resolve)).
    async fn upload_batch(&self, files: Vec<UploadFile>) -> Result<Vec<UploadedImage>, StoreError>;
}

/// One raw file payload in an upload batch. `file_name` is the multipart
/// part file name and carries the client correlation token.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Descriptor of one uploaded image as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    #[serde(alias = "_id")]
    pub id: String,
    pub url: String,
    /// Echo of the submitted part file name, when the store provides one.
    #[serde(rename = "fileName", alias = "name", default)]
    pub file_name: Option<String>,
}

impl Resource for Project {
    const COLLECTION: &'static str = "projects";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Writable for Project {
    type Payload = ProjectPayload;
}

impl Deletable for Project {}

impl Resource for BlogPost {
    const COLLECTION: &'static str = "blogs";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Writable for BlogPost {
    type Payload = BlogPayload;
}

impl Deletable for BlogPost {}

impl Resource for ReviewEntry {
    const COLLECTION: &'static str = "reviews";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for SlideImage {
    const COLLECTION: &'static str = "slideshow";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Deletable for SlideImage {
    // The store exposes slideshow deletion under a verb segment instead of
    // the usual `{collection}/{id}` shape.
    fn delete_segments(id: &str) -> Vec<String> {
        vec![
            Self::COLLECTION.to_string(),
            "delete".to_string(),
            id.to_string(),
        ]
    }
}
