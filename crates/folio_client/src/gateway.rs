//! Typed HTTP gateway to the remote content store.
//!
//! One wrapper around `reqwest` implements every store capability trait.
//! Read paths are fail-soft: any transport or status failure is logged and
//! absorbed into an empty or absent result. Write paths classify failures
//! into the [`StoreError`] taxonomy and surface them to the caller.

use crate::store::{
    Deletable, DeleteStore, ReadStore, Resource, UploadFile, UploadedImage, Uploader, Writable,
    WriteStore,
};
use folio_core::constants::{COUNT_SEGMENT, UPLOAD_FIELD_NAME};
use folio_core::models::SlideImage;
use folio_core::{Config, StoreError};
use reqwest::multipart;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base: reqwest::Url,
}

#[derive(Debug, Deserialize)]
struct CountBody {
    count: u64,
}

/// Strip trailing slashes so joined endpoint paths stay canonical.
fn normalize_base(base: &str) -> &str {
    base.trim_end_matches('/')
}

fn classify_transport(err: &reqwest::Error) -> StoreError {
    StoreError::Network(err.to_string())
}

/// Extract a display-ready message from an error response body.
///
/// Prefers the store's JSON `{"error": …}` field, then the raw body, then
/// the canonical status reason.
fn error_message_for_response(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

fn classify_status(status: StatusCode, body: &str) -> StoreError {
    if status == StatusCode::NOT_FOUND {
        return StoreError::NotFound;
    }
    StoreError::ServerRejected {
        status: status.as_u16(),
        message: error_message_for_response(status, body),
    }
}

async fn ensure_success(res: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(classify_status(status, &body))
}

/// Decode a success body, rejecting empty ones.
///
/// Create/update must return the persisted resource (at minimum its id) so
/// local state can reconcile; an empty 2xx body is therefore an error, not
/// a success.
async fn decode_body<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, StoreError> {
    let body = res.text().await.map_err(|err| classify_transport(&err))?;
    if body.trim().is_empty() {
        return Err(StoreError::Unknown(
            "store returned an empty success body".to_string(),
        ));
    }
    serde_json::from_str(&body)
        .map_err(|err| StoreError::Unknown(format!("undecodable store response: {}", err)))
}

impl HttpGateway {
    /// Build a gateway from runtime configuration.
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        Self::with_base(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    /// Build a gateway for an explicit base URL and request timeout.
    ///
    /// # Returns
    /// A gateway whose underlying client applies `timeout` to every request;
    /// the core carries no timeout or retry policy of its own.
    pub fn with_base(base: &str, timeout: Duration) -> Result<Self, StoreError> {
        let base = reqwest::Url::parse(normalize_base(base)).map_err(|err| {
            StoreError::Validation(format!("invalid API base URL '{}': {}", base, err))
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| StoreError::Unknown(format!("failed to build HTTP client: {}", err)))?;
        Ok(Self { client, base })
    }

    /// Join path segments onto the API base with proper encoding.
    fn api_url<S: AsRef<str>>(&self, segments: &[S]) -> Result<reqwest::Url, StoreError> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                StoreError::Validation("API base URL cannot be used as a base".to_string())
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
        }
        Ok(url)
    }

    async fn fetch_list<R: Resource>(&self) -> Result<Vec<R>, StoreError> {
        let url = self.api_url(&[R::COLLECTION])?;
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;
        decode_body(ensure_success(res).await?).await
    }

    async fn fetch_one<R: Resource>(&self, id: &str) -> Result<R, StoreError> {
        let url = self.api_url(&[R::COLLECTION, id])?;
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;
        decode_body(ensure_success(res).await?).await
    }

    async fn fetch_count<R: Resource>(&self) -> Result<u64, StoreError> {
        let url = self.api_url(&[R::COLLECTION, COUNT_SEGMENT])?;
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;
        let body: CountBody = decode_body(ensure_success(res).await?).await?;
        Ok(body.count)
    }
}

impl<R: Resource> ReadStore<R> for HttpGateway {
    async fn list(&self) -> Vec<R> {
        match self.fetch_list::<R>().await {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    collection = R::COLLECTION,
                    kind = ?err.kind(),
                    "list failed, rendering empty collection: {}",
                    err
                );
                Vec::new()
            }
        }
    }

    async fn get(&self, id: &str) -> Option<R> {
        match self.fetch_one::<R>(id).await {
            Ok(item) => Some(item),
            Err(StoreError::NotFound) => None,
            Err(err) => {
                warn!(
                    collection = R::COLLECTION,
                    id = id,
                    kind = ?err.kind(),
                    "get failed, treating as absent: {}",
                    err
                );
                None
            }
        }
    }

    async fn count(&self) -> u64 {
        match self.fetch_count::<R>().await {
            Ok(count) => count,
            Err(err) => {
                warn!(
                    collection = R::COLLECTION,
                    kind = ?err.kind(),
                    "count failed, defaulting to zero: {}",
                    err
                );
                0
            }
        }
    }
}

impl<R: Writable> WriteStore<R> for HttpGateway {
    async fn create(&self, payload: &R::Payload) -> Result<R, StoreError> {
        let url = self.api_url(&[R::COLLECTION])?;
        let res = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;
        decode_body(ensure_success(res).await?).await
    }

    async fn update(&self, id: &str, payload: &R::Payload) -> Result<R, StoreError> {
        let url = self.api_url(&[R::COLLECTION, id])?;
        let res = self
            .client
            .put(url)
            .json(payload)
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;
        decode_body(ensure_success(res).await?).await
    }
}

impl<R: Deletable> DeleteStore<R> for HttpGateway {
    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let segments = R::delete_segments(id);
        let url = self.api_url(&segments)?;
        let res = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;
        ensure_success(res).await?;
        Ok(())
    }
}

impl Uploader for HttpGateway {
    async fn upload_batch(&self, files: Vec<UploadFile>) -> Result<Vec<UploadedImage>, StoreError> {
        let url = self.api_url(&[SlideImage::COLLECTION, "upload"])?;
        let mut form = multipart::Form::new();
        for file in files {
            let part = multipart::Part::bytes(file.bytes).file_name(file.file_name);
            form = form.part(UPLOAD_FIELD_NAME, part);
        }
        let res = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;
        decode_body(ensure_success(res).await?).await
    }
}
