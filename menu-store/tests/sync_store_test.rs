//! Integration tests for [`menu_store::CollectionSyncStore`].
//!
//! Covers the reconciliation contract: wholesale replace on load, append on add,
//! full-row replace on update, unconditional prune on remove, availability toggle,
//! forced availability on create, error clearing, zero-rows policies, and the
//! loading flag lifecycle. Uses InMemoryRemoteClient plus a recording notification
//! sink; no network.

use std::sync::Arc;

use async_trait::async_trait;
use menu_core::{
    Category, ItemId, MenuItem, MenuItemInsert, MenuItemPatch, NewMenuItem, Notification,
    NotificationSink, RemoteResourceClient, Result, Severity, SpiceLevel,
};
use menu_store::{CollectionSyncStore, InMemoryRemoteClient, ZeroRowsPolicy};
use tokio::sync::{Mutex, Notify};

/// Sink that records every notification for assertions.
#[derive(Default)]
struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, notification: Notification) {
        self.notifications.lock().await.push(notification);
    }
}

impl RecordingSink {
    async fn taken(&self) -> Vec<Notification> {
        self.notifications.lock().await.clone()
    }
}

/// Builds a creation draft with the given name, price and category.
fn draft(name: &str, price: f64, category: Category) -> NewMenuItem {
    NewMenuItem {
        name: name.to_string(),
        description: None,
        price,
        category,
        is_veg: true,
        spice_level: SpiceLevel::Mild,
        image_url: None,
    }
}

/// Builds a client, a recording sink, and a store wired to both.
fn setup() -> (Arc<InMemoryRemoteClient>, Arc<RecordingSink>, CollectionSyncStore) {
    let client = Arc::new(InMemoryRemoteClient::new());
    let sink = Arc::new(RecordingSink::default());
    let store = CollectionSyncStore::new(client.clone(), sink.clone());
    (client, sink, store)
}

/// Seeds the remote with one item via the client and returns its confirmed row.
async fn seed_one(client: &InMemoryRemoteClient, name: &str, price: f64) -> MenuItem {
    let rows = client
        .insert(draft(name, price, Category::Appetizers).into_insert())
        .await
        .expect("Failed to seed remote");
    rows.into_iter().next().expect("Insert returned no row")
}

/// **Test: Scenario A — load replaces an empty cache with the remote collection.**
///
/// **Setup:** Remote holds one item ("Samosa", price 5, appetizers); cache empty.
/// **Action:** `load()`.
/// **Expected:** Cache is exactly that one-element sequence; `loading` false;
/// `error` none.
#[tokio::test]
async fn test_load_replaces_cache_wholesale() {
    let (client, _sink, store) = setup();
    let seeded = seed_one(&client, "Samosa", 5.0).await;

    store.load().await;

    let items = store.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0], seeded);
    assert!(!store.loading().await);
    assert!(store.error().await.is_none());
}

/// **Test: load failure leaves the cache untouched and notifies.**
///
/// **Setup:** Cache populated by a first load; remote set to fail once.
/// **Action:** `load()` again.
/// **Expected:** Cache still holds the previous rows; `error` set to the failure
/// message; one Error notification "Failed to load menu items.".
#[tokio::test]
async fn test_load_failure_keeps_last_known_good_cache() {
    let (client, sink, store) = setup();
    seed_one(&client, "Samosa", 5.0).await;
    store.load().await;
    let before = store.items().await;

    client.fail_next("network error").await;
    store.load().await;

    assert_eq!(store.items().await, before);
    let error = store.error().await.expect("Error should be set");
    assert!(error.contains("network error"));
    assert!(!store.loading().await);

    let notifications = sink.taken().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
    assert_eq!(notifications[0].message, "Failed to load menu items.");
}

/// **Test: Scenario B — add appends the confirmed row last.**
///
/// **Setup:** Remote pre-populated with one item, cache loaded.
/// **Action:** `add(draft("Naan", 3, breads))`.
/// **Expected:** Cache gains exactly one entry, appended last, carrying the
/// server-assigned id and `is_available = true`; one Info notification.
#[tokio::test]
async fn test_add_appends_confirmed_row() {
    let (client, sink, store) = setup();
    seed_one(&client, "Samosa", 5.0).await;
    store.load().await;

    store.add(draft("Naan", 3.0, Category::Breads)).await;

    let items = store.items().await;
    assert_eq!(items.len(), 2);
    let added = items.last().unwrap();
    assert_eq!(added.name, "Naan");
    assert_eq!(added.id, ItemId::from(2));
    assert!(added.is_available);
    assert!(!store.loading().await);
    assert!(store.error().await.is_none());

    let notifications = sink.taken().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Info);
    assert_eq!(notifications[0].title, "Item added");
}

/// **Test: the row sent on create always has `is_available = true`.**
///
/// **Setup:** Empty remote and store.
/// **Action:** `add(...)`; inspect the wire row the client received.
/// **Expected:** `last_insert().is_available` is true (the draft type cannot even
/// carry an availability value).
#[tokio::test]
async fn test_add_forces_availability_on_wire_row() {
    let (client, _sink, store) = setup();

    store.add(draft("Lassi", 2.5, Category::Beverages)).await;

    let sent = client.last_insert().await.expect("Insert was not received");
    assert!(sent.is_available);
}

/// **Test: add failure leaves the cache structurally identical.**
///
/// **Setup:** Cache loaded with one item; remote set to fail once.
/// **Action:** `add(...)`.
/// **Expected:** Cache unchanged (same entries, values, order); `error` set; one
/// Error notification "Failed to add menu item.".
#[tokio::test]
async fn test_add_failure_leaves_cache_unchanged() {
    let (client, sink, store) = setup();
    seed_one(&client, "Samosa", 5.0).await;
    store.load().await;
    let before = store.items().await;

    client.fail_next("insert rejected").await;
    store.add(draft("Naan", 3.0, Category::Breads)).await;

    assert_eq!(store.items().await, before);
    assert!(store.error().await.is_some());
    let notifications = sink.taken().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "Failed to add menu item.");
}

/// **Test: update replaces the matching entry with the confirmed row.**
///
/// **Setup:** Cache loaded with one item (price 5).
/// **Action:** `update(id, patch price 4)`.
/// **Expected:** The entry's price is 4 and its `updated_at` comes from the confirmed
/// row (full replace, not a local merge); success notification emitted.
#[tokio::test]
async fn test_update_replaces_entry_with_confirmed_row() {
    let (client, sink, store) = setup();
    let seeded = seed_one(&client, "Samosa", 5.0).await;
    store.load().await;

    let patch = MenuItemPatch {
        price: Some(4.0),
        ..Default::default()
    };
    store.update(seeded.id, patch).await;

    let items = store.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].price, 4.0);
    assert_eq!(items[0].name, "Samosa");
    assert!(items[0].updated_at >= seeded.updated_at);
    assert!(store.error().await.is_none());

    let notifications = sink.taken().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Item updated");
}

/// **Test: update and toggle failures leave the cache structurally identical.**
///
/// **Setup:** Cache loaded with one item; remote set to fail once before each call.
/// **Action:** `update(id, patch)` against the failing remote, then
/// `set_availability(id, false)` against the failing remote.
/// **Expected:** Cache unchanged after each call (same entries, values, order);
/// `error` set to the failure message; two Error notifications with the update and
/// availability failure messages.
#[tokio::test]
async fn test_update_and_toggle_failure_leave_cache_unchanged() {
    let (client, sink, store) = setup();
    let seeded = seed_one(&client, "Samosa", 5.0).await;
    store.load().await;
    let before = store.items().await;

    client.fail_next("update rejected").await;
    store
        .update(
            seeded.id,
            MenuItemPatch {
                price: Some(4.0),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(store.items().await, before);
    let error = store.error().await.expect("Error should be set");
    assert!(error.contains("update rejected"));

    client.fail_next("network error").await;
    store.set_availability(seeded.id, false).await;
    assert_eq!(store.items().await, before);
    let error = store.error().await.expect("Error should be set");
    assert!(error.contains("network error"));
    assert!(!store.loading().await);

    let notifications = sink.taken().await;
    assert_eq!(notifications.len(), 2);
    assert!(notifications.iter().all(|n| n.severity == Severity::Error));
    assert_eq!(notifications[0].message, "Failed to update menu item.");
    assert_eq!(notifications[1].message, "Failed to update availability.");
}

/// **Test: Scenario D — zero rows on update is a silent no-op under the default
/// policy.**
///
/// **Setup:** Cache loaded with one item; update targets an id not present remotely.
/// **Action:** `update(ItemId::from(99), patch)`.
/// **Expected:** Cache unchanged; `error` remains none; no notification emitted.
#[tokio::test]
async fn test_update_zero_rows_is_silent_noop() {
    let (client, sink, store) = setup();
    seed_one(&client, "Samosa", 5.0).await;
    store.load().await;
    let before = store.items().await;

    let patch = MenuItemPatch {
        price: Some(4.0),
        ..Default::default()
    };
    store.update(ItemId::from(99), patch).await;

    assert_eq!(store.items().await, before);
    assert!(store.error().await.is_none());
    assert!(!store.loading().await);
    assert!(sink.taken().await.is_empty());
}

/// **Test: zero rows on update is a failure under RequireMatch.**
///
/// **Setup:** Store built with `ZeroRowsPolicy::RequireMatch`; remote empty.
/// **Action:** `update(ItemId::from(99), patch)`.
/// **Expected:** `error` set to a not-found message; one Error notification; cache
/// unchanged.
#[tokio::test]
async fn test_update_zero_rows_fails_under_require_match() {
    let client = Arc::new(InMemoryRemoteClient::new());
    let sink = Arc::new(RecordingSink::default());
    let store =
        CollectionSyncStore::with_policy(client, sink.clone(), ZeroRowsPolicy::RequireMatch);

    let patch = MenuItemPatch {
        price: Some(4.0),
        ..Default::default()
    };
    store.update(ItemId::from(99), patch).await;

    let error = store.error().await.expect("Error should be set");
    assert!(error.contains("No row matched id 99"));
    assert!(store.items().await.is_empty());
    let notifications = sink.taken().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
}

/// **Test: Scenario C — remove failure keeps the entry and notifies.**
///
/// **Setup:** Cache loaded with one item; remote set to fail once.
/// **Action:** `remove(id)`.
/// **Expected:** The entry is still present and unchanged; `error` non-null; one
/// Error notification emitted.
#[tokio::test]
async fn test_remove_failure_keeps_entry() {
    let (client, sink, store) = setup();
    let seeded = seed_one(&client, "Samosa", 5.0).await;
    store.load().await;

    client.fail_next("network error").await;
    store.remove(seeded.id).await;

    let items = store.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0], seeded);
    assert!(store.error().await.is_some());
    let notifications = sink.taken().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
}

/// **Test: remove prunes the entry and notifies success.**
///
/// **Setup:** Cache loaded with two items.
/// **Action:** `remove(first id)`.
/// **Expected:** Only the other entry remains; Info notification "Item deleted".
#[tokio::test]
async fn test_remove_prunes_entry() {
    let (client, sink, store) = setup();
    let first = seed_one(&client, "Samosa", 5.0).await;
    let second = seed_one(&client, "Naan", 3.0).await;
    store.load().await;

    store.remove(first.id).await;

    let items = store.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, second.id);
    assert!(store.error().await.is_none());
    let notifications = sink.taken().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Item deleted");
}

/// **Test: Scenario E — availability toggle replaces the entry and reports the new
/// state.**
///
/// **Setup:** Cache loaded with one available item.
/// **Action:** `set_availability(id, false)`.
/// **Expected:** The entry's `is_available` is false, all fields taken from the
/// confirmed row; Info notification with message "Item is now unavailable.".
#[tokio::test]
async fn test_set_availability_toggles_and_notifies_state() {
    let (client, sink, store) = setup();
    let seeded = seed_one(&client, "Samosa", 5.0).await;
    store.load().await;

    store.set_availability(seeded.id, false).await;

    let items = store.items().await;
    assert!(!items[0].is_available);
    assert_eq!(items[0].name, "Samosa");
    let notifications = sink.taken().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Availability updated");
    assert_eq!(notifications[0].message, "Item is now unavailable.");
}

/// **Test: invoking any operation clears a previously set error.**
///
/// **Setup:** A failed load leaves `error` set.
/// **Action:** A successful `load()`.
/// **Expected:** `error` is none afterwards.
#[tokio::test]
async fn test_new_operation_clears_previous_error() {
    let (client, _sink, store) = setup();
    client.fail_next("network error").await;
    store.load().await;
    assert!(store.error().await.is_some());

    store.load().await;
    assert!(store.error().await.is_none());
}

/// **Test: the cache never holds two entries with the same id.**
///
/// **Setup:** Empty remote.
/// **Action:** A sequence of add, reload, update and toggle operations.
/// **Expected:** After every step, all cached ids are distinct.
#[tokio::test]
async fn test_cache_ids_stay_unique_across_operations() {
    let (client, _sink, store) = setup();

    store.add(draft("Samosa", 5.0, Category::Appetizers)).await;
    store.add(draft("Naan", 3.0, Category::Breads)).await;
    store.load().await;
    store
        .update(
            ItemId::from(1),
            MenuItemPatch {
                price: Some(6.0),
                ..Default::default()
            },
        )
        .await;
    store.set_availability(ItemId::from(2), false).await;

    let items = store.items().await;
    let mut ids: Vec<ItemId> = items.iter().map(|i| i.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), items.len());
}

/// Client whose `list_all` blocks until released, for observing the loading flag
/// mid-flight. Other calls delegate straight to the inner client.
struct GatedClient {
    inner: InMemoryRemoteClient,
    gate: Notify,
}

#[async_trait]
impl RemoteResourceClient for GatedClient {
    async fn list_all(&self) -> Result<Vec<MenuItem>> {
        self.gate.notified().await;
        self.inner.list_all().await
    }

    async fn insert(&self, row: MenuItemInsert) -> Result<Vec<MenuItem>> {
        self.inner.insert(row).await
    }

    async fn update_where(&self, id: ItemId, patch: MenuItemPatch) -> Result<Vec<MenuItem>> {
        self.inner.update_where(id, patch).await
    }

    async fn delete_where(&self, id: ItemId) -> Result<()> {
        self.inner.delete_where(id).await
    }
}

/// **Test: `loading` is true exactly while the remote call is outstanding.**
///
/// **Setup:** Store over a gated client whose `list_all` blocks until released.
/// **Action:** Spawn `load()`; observe `loading` before and after releasing the gate.
/// **Expected:** `loading` is true while the call is blocked and false once the
/// operation resolves.
#[tokio::test]
async fn test_loading_flag_tracks_inflight_call() {
    let client = Arc::new(GatedClient {
        inner: InMemoryRemoteClient::new(),
        gate: Notify::new(),
    });
    let sink = Arc::new(RecordingSink::default());
    let store = Arc::new(CollectionSyncStore::new(client.clone(), sink));

    assert!(!store.loading().await);

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.load().await }
    });

    // Let the spawned operation reach its suspension point at the remote call.
    for _ in 0..10 {
        if store.loading().await {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(store.loading().await);

    client.gate.notify_one();
    task.await.expect("load task panicked");
    assert!(!store.loading().await);
}
