//! Remote resource client abstraction over the `menu_items` collection.
//!
//! [`RemoteResourceClient`] is transport-agnostic: menu-postgrest implements it over
//! HTTP, menu-store ships an in-memory implementation for tests and demo runs.

use crate::error::Result;
use crate::types::{ItemId, MenuItem, MenuItemInsert, MenuItemPatch};
use async_trait::async_trait;

/// CRUD over the remote `menu_items` resource.
///
/// Rows returned by the remote store are authoritative; callers replace local state
/// with them rather than merging.
#[async_trait]
pub trait RemoteResourceClient: Send + Sync {
    /// Fetches the full collection ordered by id ascending.
    async fn list_all(&self) -> Result<Vec<MenuItem>>;

    /// Inserts one row and returns the inserted representation(s).
    async fn insert(&self, row: MenuItemInsert) -> Result<Vec<MenuItem>>;

    /// Applies a partial update to rows matching `id`. Returns the updated rows;
    /// empty when nothing matched (zero rows affected is not itself a failure).
    async fn update_where(&self, id: ItemId, patch: MenuItemPatch) -> Result<Vec<MenuItem>>;

    /// Deletes rows matching `id`. How many rows were deleted is not part of the
    /// contract.
    async fn delete_where(&self, id: ItemId) -> Result<()>;
}
