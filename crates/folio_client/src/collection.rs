//! Per-collection CRUD state container.
//!
//! One [`Collection`] instance owns the in-memory state for a single
//! content type: the current items in server order, a loading flag, and the
//! last operation error. State is mutated only by the collection's own
//! operations; the form controller commits through [`Collection::commit`],
//! never by touching `items` directly.

use crate::store::{Deletable, DeleteStore, ReadStore, Resource};
use folio_core::StoreError;
use tracing::{debug, error};

/// Outcome of a successful form submission, ready to be patched into the
/// collection.
#[derive(Debug, Clone)]
pub enum Committed<R> {
    /// Append the newly created item.
    Created(R),
    /// Replace the existing item with the same id.
    Updated(R),
}

/// Monotonic ticket dispenser that lets the collection discard results of
/// operations that have been overtaken by a newer one. The remote store is
/// not ordered: a slow hydrate must not clobber the result of a mutation
/// the operator issued after it.
#[derive(Debug, Default)]
struct OpSequencer {
    issued: u64,
    applied: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpTicket(u64);

impl OpSequencer {
    fn begin(&mut self) -> OpTicket {
        self.issued += 1;
        OpTicket(self.issued)
    }

    /// Returns `false` when a newer operation already applied its result,
    /// in which case the caller must discard its own.
    fn try_apply(&mut self, ticket: OpTicket) -> bool {
        if ticket.0 < self.applied {
            return false;
        }
        self.applied = ticket.0;
        true
    }
}

/// CRUD state for one content collection.
#[derive(Debug)]
pub struct Collection<R> {
    items: Vec<R>,
    loading: bool,
    error: Option<StoreError>,
    seq: OpSequencer,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Collection<R> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            seq: OpSequencer::default(),
        }
    }

    /// Items in server order.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    /// True while exactly one hydrate-or-mutate request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Display-ready message of the last failed operation, if any.
    ///
    /// The internal classification stays internal; views render only this.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|err| err.to_string())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<R: Resource> Collection<R> {
    /// Hydrate the collection from the store.
    ///
    /// Read failures never surface here: the store absorbs them and this
    /// settles on an empty (but renderable) collection. A load overtaken by
    /// a newer operation discards its result instead of double-applying.
    pub async fn load<S: ReadStore<R>>(&mut self, store: &S) {
        let ticket = self.seq.begin();
        self.loading = true;
        self.error = None;
        let items = store.list().await;
        if !self.seq.try_apply(ticket) {
            debug!(
                collection = R::COLLECTION,
                "discarding stale load result ({} items)",
                items.len()
            );
            return;
        }
        self.items = items;
        self.loading = false;
    }

    /// Explicit re-fetch after a mutation, for callers that prefer
    /// reconciling against the store over the in-place patch of
    /// [`Collection::commit`].
    pub async fn reconcile<S: ReadStore<R>>(&mut self, store: &S) {
        self.load(store).await;
    }

    /// Patch a committed form submission into the collection in place.
    ///
    /// An update whose target vanished locally is appended, keeping the
    /// collection consistent with what the store just confirmed.
    pub fn commit(&mut self, outcome: Committed<R>) {
        // Commits apply immediately; any still-outstanding load is stale now.
        let ticket = self.seq.begin();
        self.seq.try_apply(ticket);
        self.error = None;
        match outcome {
            Committed::Created(item) => self.items.push(item),
            Committed::Updated(item) => {
                match self.items.iter_mut().find(|have| have.id() == item.id()) {
                    Some(slot) => *slot = item,
                    None => self.items.push(item),
                }
            }
        }
        self.loading = false;
    }

    /// Delete `id` from the store, then from local state.
    ///
    /// The local removal happens only after the store confirms; a failed
    /// delete leaves `items` untouched and records the error.
    pub async fn remove<S: DeleteStore<R>>(&mut self, store: &S, id: &str) -> Result<(), StoreError>
    where
        R: Deletable,
    {
        let ticket = self.seq.begin();
        self.loading = true;
        self.error = None;
        let result = store.delete(id).await;
        if !self.seq.try_apply(ticket) {
            debug!(collection = R::COLLECTION, id = id, "discarding stale delete result");
            return result;
        }
        self.loading = false;
        match result {
            Ok(()) => {
                self.items.retain(|item| item.id() != id);
                Ok(())
            }
            Err(err) => {
                error!(
                    collection = R::COLLECTION,
                    id = id,
                    kind = ?err.kind(),
                    "delete failed: {}",
                    err
                );
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Committed, Collection, OpSequencer};
    use crate::testing::{project, MockProjectStore};
    use folio_core::models::Project;
    use folio_core::StoreError;

    #[tokio::test]
    async fn load_mirrors_store_list_exactly() {
        let store = MockProjectStore::with_items(vec![project("1", "A"), project("2", "B")]);
        let mut col = Collection::<Project>::new();

        col.load(&store).await;

        assert_eq!(col.len(), 2);
        assert_eq!(col.items()[0].name, "A");
        assert_eq!(col.items()[1].name, "B");
        assert!(!col.is_loading());
        assert!(col.error_message().is_none());
    }

    #[tokio::test]
    async fn load_absorbs_read_failure_into_empty_collection() {
        let store = MockProjectStore::with_items(vec![project("1", "A")]);
        store.fail_reads();
        let mut col = Collection::<Project>::new();

        col.load(&store).await;

        assert!(col.is_empty());
        assert!(!col.is_loading());
        assert!(col.error_message().is_none());
    }

    #[tokio::test]
    async fn remove_confirmed_by_store_drops_exactly_one_item() {
        let store = MockProjectStore::with_items(vec![project("1", "A"), project("2", "B")]);
        let mut col = Collection::<Project>::new();
        col.load(&store).await;

        col.remove(&store, "2").await.expect("delete");

        assert_eq!(col.len(), 1);
        assert_eq!(col.items()[0].id, "1");
        assert_eq!(col.items()[0].name, "A");
        assert!(col.error_message().is_none());
    }

    #[tokio::test]
    async fn failed_remove_leaves_items_unchanged_and_sets_error() {
        let store = MockProjectStore::with_items(vec![project("1", "A"), project("2", "B")]);
        let mut col = Collection::<Project>::new();
        col.load(&store).await;
        store.fail_next_write(StoreError::Network("store unreachable".into()));

        let err = col.remove(&store, "2").await.expect_err("should fail");

        assert_eq!(err, StoreError::Network("store unreachable".into()));
        assert_eq!(col.len(), 2);
        assert_eq!(
            col.error_message().as_deref(),
            Some("Network error: store unreachable")
        );
        assert!(!col.is_loading());
    }

    #[tokio::test]
    async fn commit_created_appends_and_updated_replaces_by_id() {
        let store = MockProjectStore::with_items(vec![project("1", "A")]);
        let mut col = Collection::<Project>::new();
        col.load(&store).await;

        col.commit(Committed::Created(project("2", "B")));
        assert_eq!(col.len(), 2);

        col.commit(Committed::Updated(project("1", "A2")));
        assert_eq!(col.len(), 2);
        assert_eq!(col.items()[0].name, "A2");
    }

    #[tokio::test]
    async fn commit_clears_previous_error() {
        let store = MockProjectStore::with_items(vec![project("1", "A")]);
        let mut col = Collection::<Project>::new();
        col.load(&store).await;
        store.fail_next_write(StoreError::NotFound);
        let _ = col.remove(&store, "1").await;
        assert!(col.error_message().is_some());

        col.commit(Committed::Created(project("2", "B")));
        assert!(col.error_message().is_none());
    }

    #[tokio::test]
    async fn reconcile_refetches_from_store() {
        let store = MockProjectStore::with_items(vec![project("1", "A")]);
        let mut col = Collection::<Project>::new();
        col.load(&store).await;

        store.replace_items(vec![project("1", "A"), project("2", "B")]);
        col.reconcile(&store).await;

        assert_eq!(col.len(), 2);
    }

    #[test]
    fn sequencer_discards_results_overtaken_by_newer_ops() {
        let mut seq = OpSequencer::default();
        let slow = seq.begin();
        let fast = seq.begin();

        assert!(seq.try_apply(fast), "newest op applies");
        assert!(!seq.try_apply(slow), "overtaken op is discarded");
    }

    #[test]
    fn sequencer_applies_in_order_operations() {
        let mut seq = OpSequencer::default();
        let first = seq.begin();
        assert!(seq.try_apply(first));
        let second = seq.begin();
        assert!(seq.try_apply(second));
    }
}
