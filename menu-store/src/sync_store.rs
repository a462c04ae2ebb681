//! Collection sync store: an in-memory cache reconciled against the remote store.
//!
//! Every operation follows the same four-phase protocol: clear the previous error and
//! raise the loading flag; issue exactly one remote call; on success reconcile the
//! cache from the authoritative response and notify; on failure keep the cache, record
//! the error and notify. The loading flag is lowered on every path. Failures never
//! propagate past the store; they surface through [`CollectionSyncStore::error`] and
//! the notification sink.

use std::sync::Arc;

use menu_core::{
    CategoryFilter, ItemId, MenuError, MenuItem, MenuItemPatch, NewMenuItem, Notification,
    NotificationSink, RemoteResourceClient,
};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

/// How `update`/`set_availability` treat a confirmation query that returned zero rows.
///
/// The remote contract cannot distinguish "target not found" from "no visible change",
/// so the choice is explicit rather than guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroRowsPolicy {
    /// Zero rows is a silent no-op: no cache change, no error, no notification.
    #[default]
    Silent,
    /// Zero rows is a failure: the error is recorded and a failure notification emitted.
    RequireMatch,
}

#[derive(Debug, Default)]
struct StoreState {
    items: Vec<MenuItem>,
    loading: bool,
    error: Option<String>,
}

/// In-memory mirror of the remote `menu_items` collection.
///
/// Collaborators are constructor-injected. Reads return snapshots; operations take
/// `&self` and never hold the state lock across the remote await, so a caller may
/// overlap operations — overlapping calls race only on the store-wide
/// `loading`/`error` flags (last to resume wins), and each cache mutation is applied
/// under a single write-lock acquisition, so no torn state is observable.
pub struct CollectionSyncStore {
    client: Arc<dyn RemoteResourceClient>,
    notifier: Arc<dyn NotificationSink>,
    policy: ZeroRowsPolicy,
    state: RwLock<StoreState>,
}

impl CollectionSyncStore {
    /// Creates a store with the default [`ZeroRowsPolicy::Silent`]. The cache starts
    /// empty; call [`load`](Self::load) to populate it.
    pub fn new(
        client: Arc<dyn RemoteResourceClient>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::with_policy(client, notifier, ZeroRowsPolicy::default())
    }

    /// Creates a store with an explicit zero-rows policy.
    pub fn with_policy(
        client: Arc<dyn RemoteResourceClient>,
        notifier: Arc<dyn NotificationSink>,
        policy: ZeroRowsPolicy,
    ) -> Self {
        Self {
            client,
            notifier,
            policy,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Snapshot of the cached items.
    pub async fn items(&self) -> Vec<MenuItem> {
        self.state.read().await.items.clone()
    }

    /// True while an operation's remote call is outstanding (store-wide flag).
    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Message of the most recent failed operation, cleared at the start of every
    /// new operation.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// The fixed category filter list shown by the admin surface.
    pub fn categories(&self) -> &'static [CategoryFilter] {
        &CategoryFilter::ALL_FILTERS
    }

    /// Replaces the cache wholesale with the remote collection (ordered by id
    /// ascending). On failure the cache is left untouched.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        self.begin().await;
        match self.client.list_all().await {
            Ok(rows) => {
                let mut state = self.state.write().await;
                info!(count = rows.len(), "Loaded menu items");
                state.items = rows;
                state.loading = false;
            }
            Err(e) => self.fail(e, "Failed to load menu items.").await,
        }
    }

    /// Creates an item on the remote store and appends the confirmed row (carrying the
    /// server-assigned id and timestamps) to the end of the cache.
    ///
    /// Availability is forced to true; a caller cannot create an unavailable item.
    /// Validation of non-empty name and positive price is the caller's precondition;
    /// this operation performs no domain validation beyond what the remote enforces.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add(&self, draft: NewMenuItem) {
        self.begin().await;
        match self.client.insert(draft.into_insert()).await {
            Ok(rows) => {
                let confirmed = rows.into_iter().next();
                {
                    let mut state = self.state.write().await;
                    state.loading = false;
                    if let Some(row) = &confirmed {
                        info!(id = %row.id, "Added menu item");
                        state.items.push(row.clone());
                    }
                }
                if confirmed.is_some() {
                    self.notify_info("Item added", "Menu item added successfully.")
                        .await;
                }
            }
            Err(e) => self.fail(e, "Failed to add menu item.").await,
        }
    }

    /// Applies a partial update and replaces the matching cache entry with the
    /// confirmed row.
    ///
    /// The confirmed row is authoritative and fully replaces the prior value; it is
    /// never merged with the locally intended partial, so server-computed fields
    /// (e.g. `updated_at`) cannot diverge. Zero returned rows follow the store's
    /// [`ZeroRowsPolicy`].
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: ItemId, patch: MenuItemPatch) {
        self.begin().await;
        match self.client.update_where(id, patch).await {
            Ok(rows) => {
                self.reconcile_updated(id, rows, "Item updated", "Menu item updated successfully.")
                    .await
            }
            Err(e) => self.fail(e, "Failed to update menu item.").await,
        }
    }

    /// Deletes the row remotely, then prunes the matching cache entry unconditionally
    /// (independent of how many rows the remote reports deleted).
    #[instrument(skip(self))]
    pub async fn remove(&self, id: ItemId) {
        self.begin().await;
        match self.client.delete_where(id).await {
            Ok(()) => {
                {
                    let mut state = self.state.write().await;
                    state.loading = false;
                    state.items.retain(|item| item.id != id);
                }
                info!(id = %id, "Removed menu item");
                self.notify_info("Item deleted", "Menu item removed.").await;
            }
            Err(e) => self.fail(e, "Failed to delete menu item.").await,
        }
    }

    /// Toggles `is_available`: an update restricted to that single field, with a
    /// notification reflecting the new state.
    #[instrument(skip(self))]
    pub async fn set_availability(&self, id: ItemId, available: bool) {
        self.begin().await;
        match self
            .client
            .update_where(id, MenuItemPatch::availability(available))
            .await
        {
            Ok(rows) => {
                let message = if available {
                    "Item is now available."
                } else {
                    "Item is now unavailable."
                };
                self.reconcile_updated(id, rows, "Availability updated", message)
                    .await
            }
            Err(e) => self.fail(e, "Failed to update availability.").await,
        }
    }

    /// Phase 1 of every operation: clear the previous error, raise the loading flag.
    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    /// Success path shared by `update` and `set_availability`: replace the matching
    /// entry with the confirmed row, or apply the zero-rows policy.
    async fn reconcile_updated(
        &self,
        id: ItemId,
        rows: Vec<MenuItem>,
        title: &str,
        message: &str,
    ) {
        match rows.into_iter().next() {
            Some(row) => {
                {
                    let mut state = self.state.write().await;
                    state.loading = false;
                    if let Some(entry) = state.items.iter_mut().find(|item| item.id == id) {
                        *entry = row;
                    }
                }
                info!(id = %id, "Updated menu item");
                self.notify_info(title, message).await;
            }
            None => match self.policy {
                ZeroRowsPolicy::Silent => {
                    let mut state = self.state.write().await;
                    state.loading = false;
                    info!(id = %id, "Update matched no rows; cache unchanged");
                }
                ZeroRowsPolicy::RequireMatch => {
                    self.fail(MenuError::NotFound(id), "Failed to update menu item.")
                        .await
                }
            },
        }
    }

    /// Failure path shared by every operation: keep the cache, record the error,
    /// lower the loading flag, emit a failure notification.
    async fn fail(&self, err: MenuError, notice: &str) {
        let message = err.to_string();
        {
            let mut state = self.state.write().await;
            state.loading = false;
            state.error = Some(message.clone());
        }
        error!(error = %message, "{}", notice);
        self.notifier
            .notify(Notification::error("Error", notice))
            .await;
    }

    async fn notify_info(&self, title: &str, message: &str) {
        self.notifier
            .notify(Notification::info(title, message))
            .await;
    }
}
