//! In-memory store doubles shared by the unit tests.

use crate::store::{
    DeleteStore, ReadStore, UploadFile, UploadedImage, Uploader, WriteStore,
};
use folio_core::models::{BlogPayload, BlogPost, Project, ProjectPayload, ReviewEntry};
use folio_core::StoreError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Build a project fixture.
pub(crate) fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} description", name),
        images: Vec::new(),
    }
}

/// Build a blog post fixture.
pub(crate) fn blog(id: &str, title: &str) -> BlogPost {
    BlogPost {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: format!("{} excerpt", title),
        cover_image: None,
        additional_images: Vec::new(),
        created_at: None,
    }
}

/// In-memory project store with scriptable failures and call recording.
#[derive(Debug, Default)]
pub(crate) struct MockProjectStore {
    items: Mutex<Vec<Project>>,
    read_fail: AtomicBool,
    write_fail: Mutex<Option<StoreError>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl MockProjectStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_items(items: Vec<Project>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    /// Make every read behave like a gateway that absorbed a failure.
    pub(crate) fn fail_reads(&self) {
        self.read_fail.store(true, Ordering::SeqCst);
    }

    /// Fail the next write or delete with `err`.
    pub(crate) fn fail_next_write(&self, err: StoreError) {
        *self.write_fail.lock().expect("write_fail lock") = Some(err);
    }

    pub(crate) fn replace_items(&self, items: Vec<Project>) {
        *self.items.lock().expect("items lock") = items;
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn take_write_failure(&self) -> Option<StoreError> {
        self.write_fail.lock().expect("write_fail lock").take()
    }
}

impl ReadStore<Project> for MockProjectStore {
    async fn list(&self) -> Vec<Project> {
        self.record("list".to_string());
        if self.read_fail.load(Ordering::SeqCst) {
            return Vec::new();
        }
        self.items.lock().expect("items lock").clone()
    }

    async fn get(&self, id: &str) -> Option<Project> {
        self.record(format!("get {}", id));
        if self.read_fail.load(Ordering::SeqCst) {
            return None;
        }
        self.items
            .lock()
            .expect("items lock")
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    async fn count(&self) -> u64 {
        self.record("count".to_string());
        if self.read_fail.load(Ordering::SeqCst) {
            return 0;
        }
        self.items.lock().expect("items lock").len() as u64
    }
}

impl WriteStore<Project> for MockProjectStore {
    async fn create(&self, payload: &ProjectPayload) -> Result<Project, StoreError> {
        self.record("create".to_string());
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        let id = format!("m{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let created = Project {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            images: payload.images.clone(),
        };
        self.items.lock().expect("items lock").push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, payload: &ProjectPayload) -> Result<Project, StoreError> {
        self.record(format!("update {}", id));
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        let mut items = self.items.lock().expect("items lock");
        let Some(slot) = items.iter_mut().find(|item| item.id == id) else {
            return Err(StoreError::NotFound);
        };
        slot.name = payload.name.clone();
        slot.description = payload.description.clone();
        slot.images = payload.images.clone();
        Ok(slot.clone())
    }
}

impl DeleteStore<Project> for MockProjectStore {
    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.record(format!("delete {}", id));
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        let mut items = self.items.lock().expect("items lock");
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// In-memory blog store; only the write surface the form controller needs.
#[derive(Debug, Default)]
pub(crate) struct MockBlogStore {
    items: Mutex<Vec<BlogPost>>,
    write_fail: Mutex<Option<StoreError>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl MockBlogStore {
    pub(crate) fn with_items(items: Vec<BlogPost>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl WriteStore<BlogPost> for MockBlogStore {
    async fn create(&self, payload: &BlogPayload) -> Result<BlogPost, StoreError> {
        self.record("create".to_string());
        if let Some(err) = self.write_fail.lock().expect("write_fail lock").take() {
            return Err(err);
        }
        let id = format!("b{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let created = BlogPost {
            id,
            title: payload.title.clone(),
            excerpt: payload.excerpt.clone(),
            cover_image: payload.cover_image.clone(),
            additional_images: payload.additional_images.clone(),
            created_at: None,
        };
        self.items.lock().expect("items lock").push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, payload: &BlogPayload) -> Result<BlogPost, StoreError> {
        self.record(format!("update {}", id));
        if let Some(err) = self.write_fail.lock().expect("write_fail lock").take() {
            return Err(err);
        }
        let mut items = self.items.lock().expect("items lock");
        let Some(slot) = items.iter_mut().find(|item| item.id == id) else {
            return Err(StoreError::NotFound);
        };
        slot.title = payload.title.clone();
        slot.excerpt = payload.excerpt.clone();
        slot.cover_image = payload.cover_image.clone();
        slot.additional_images = payload.additional_images.clone();
        Ok(slot.clone())
    }
}

/// Uploader double. By default echoes each file back in order with a URL
/// derived from the original file name; response shape is scriptable.
#[derive(Debug, Default)]
pub(crate) struct MockUploader {
    reverse: AtomicBool,
    strip_names: AtomicBool,
    scripted: Mutex<Option<Result<Vec<UploadedImage>, StoreError>>>,
    batches: AtomicUsize,
}

impl MockUploader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Return the batch in reverse order, still tagged with file names.
    pub(crate) fn reverse_response_order(&self) {
        self.reverse.store(true, Ordering::SeqCst);
    }

    /// Drop the echoed file names from the response.
    pub(crate) fn strip_file_names(&self) {
        self.strip_names.store(true, Ordering::SeqCst);
    }

    /// Respond with an exact payload instead of echoing.
    pub(crate) fn respond_with(&self, items: Vec<UploadedImage>) {
        *self.scripted.lock().expect("scripted lock") = Some(Ok(items));
    }

    /// Fail the next batch with `err`.
    pub(crate) fn fail_with(&self, err: StoreError) {
        *self.scripted.lock().expect("scripted lock") = Some(Err(err));
    }

    pub(crate) fn batches_seen(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }
}

impl Uploader for MockUploader {
    async fn upload_batch(&self, files: Vec<UploadFile>) -> Result<Vec<UploadedImage>, StoreError> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        if let Some(result) = self.scripted.lock().expect("scripted lock").take() {
            return result;
        }
        let strip = self.strip_names.load(Ordering::SeqCst);
        let mut items: Vec<UploadedImage> = files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                let original = file
                    .file_name
                    .split_once("__")
                    .map(|(_, name)| name)
                    .unwrap_or(file.file_name.as_str());
                UploadedImage {
                    id: format!("u{}", index + 1),
                    url: format!("https://cdn.test/{}", original),
                    file_name: if strip {
                        None
                    } else {
                        Some(file.file_name.clone())
                    },
                }
            })
            .collect();
        if self.reverse.load(Ordering::SeqCst) {
            items.reverse();
        }
        Ok(items)
    }
}

/// Fixed per-collection counts for dashboard tests.
#[derive(Debug, Default)]
pub(crate) struct MockCountStore {
    pub(crate) projects: u64,
    pub(crate) blogs: u64,
    pub(crate) reviews: u64,
}

impl ReadStore<Project> for MockCountStore {
    async fn list(&self) -> Vec<Project> {
        Vec::new()
    }

    async fn get(&self, _id: &str) -> Option<Project> {
        None
    }

    async fn count(&self) -> u64 {
        self.projects
    }
}

impl ReadStore<BlogPost> for MockCountStore {
    async fn list(&self) -> Vec<BlogPost> {
        Vec::new()
    }

    async fn get(&self, _id: &str) -> Option<BlogPost> {
        None
    }

    async fn count(&self) -> u64 {
        self.blogs
    }
}

impl ReadStore<ReviewEntry> for MockCountStore {
    async fn list(&self) -> Vec<ReviewEntry> {
        Vec::new()
    }

    async fn get(&self, _id: &str) -> Option<ReviewEntry> {
        None
    }

    async fn count(&self) -> u64 {
        self.reviews
    }
}
