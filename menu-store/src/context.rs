//! Provider handle for the collection sync store.
//!
//! The store is owned by the composition root and threaded through explicitly rather
//! than looked up process-wide: consumers hold a [`StoreContext`], and accessing a
//! context that was never provided a store fails with
//! [`MenuError::MissingStoreContext`] at the access point.

use std::sync::Arc;

use menu_core::{MenuError, Result};

use crate::sync_store::CollectionSyncStore;

/// Cloneable handle to the store owned by the composition root.
#[derive(Clone, Default)]
pub struct StoreContext {
    inner: Option<Arc<CollectionSyncStore>>,
}

impl StoreContext {
    /// Creates a context providing the given store.
    pub fn new(store: Arc<CollectionSyncStore>) -> Self {
        Self { inner: Some(store) }
    }

    /// Returns the store, or [`MenuError::MissingStoreContext`] when this context was
    /// never provided one.
    pub fn store(&self) -> Result<&Arc<CollectionSyncStore>> {
        self.inner.as_ref().ok_or(MenuError::MissingStoreContext)
    }
}
