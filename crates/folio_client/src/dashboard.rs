//! Dashboard count summaries.

use crate::store::ReadStore;
use folio_core::models::{BlogPost, Project, ReviewEntry};
use serde::Serialize;

/// Per-collection totals shown on the admin landing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub projects: u64,
    pub blogs: u64,
    pub reviews: u64,
}

/// Load all three collection counts. Count reads are fail-soft, so a store
/// outage renders as zeros rather than an error page.
pub async fn load_counts<S>(store: &S) -> DashboardCounts
where
    S: ReadStore<Project> + ReadStore<BlogPost> + ReadStore<ReviewEntry>,
{
    DashboardCounts {
        projects: ReadStore::<Project>::count(store).await,
        blogs: ReadStore::<BlogPost>::count(store).await,
        reviews: ReadStore::<ReviewEntry>::count(store).await,
    }
}
