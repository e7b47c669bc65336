//! Client-side content-management core for the folio portfolio site.
//!
//! The pieces compose in one direction: the admin shell owns a
//! [`Collection`] per content type, hydrates it through a store
//! implementation (usually [`HttpGateway`]), edits one entity at a time
//! through a [`form::FormController`], and funnels local files through the
//! [`upload`] pipeline before a draft is committed back into its
//! collection.

/// Collection view-model: per-collection CRUD state.
pub mod collection;
/// Dashboard count summaries.
pub mod dashboard;
/// Draft editing and submission.
pub mod form;
/// HTTP gateway to the remote content store.
pub mod gateway;
/// Store capability traits and wire types.
pub mod store;
/// Upload pipeline and preview handle lifecycle.
pub mod upload;

pub use collection::{Collection, Committed};
pub use dashboard::{load_counts, DashboardCounts};
pub use form::{drafts, Draft, FormController, FormMode, ImageSlot};
pub use gateway::HttpGateway;
pub use store::{
    Deletable, DeleteStore, ReadStore, Resource, UploadFile, UploadedImage, Uploader, Writable,
    WriteStore,
};
pub use upload::{upload_and_resolve, PendingUpload, PreviewHandle};

#[cfg(test)]
pub(crate) mod testing;
