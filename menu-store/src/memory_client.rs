//! In-process implementation of [`RemoteResourceClient`].
//!
//! Behaves like the remote store: assigns ids and timestamps on insert, returns
//! confirmed representations, and reports zero rows for unmatched updates. Single-shot
//! failure injection (`fail_next`) lets tests exercise the failure branches; the admin
//! CLI uses it for `--demo` runs without a live backend.

use chrono::Utc;
use menu_core::{
    ItemId, MenuError, MenuItem, MenuItemInsert, MenuItemPatch, RemoteResourceClient, Result,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    rows: Vec<MenuItem>,
    next_id: i64,
    fail_next: Option<String>,
    last_insert: Option<MenuItemInsert>,
}

/// In-memory stand-in for the remote `menu_items` resource.
pub struct InMemoryRemoteClient {
    inner: RwLock<Inner>,
}

impl InMemoryRemoteClient {
    /// Creates an empty client; the first inserted row gets id 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Creates a client pre-populated with the given rows; id assignment continues
    /// after the highest seeded id.
    pub fn with_rows(rows: Vec<MenuItem>) -> Self {
        let next_id = rows.iter().map(|r| r.id.as_i64()).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Inner {
                rows,
                next_id,
                ..Inner::default()
            }),
        }
    }

    /// Makes the next remote call fail with the given message.
    pub async fn fail_next(&self, message: impl Into<String>) {
        self.inner.write().await.fail_next = Some(message.into());
    }

    /// The wire row received by the most recent `insert`, for assertions on what
    /// the store actually sent.
    pub async fn last_insert(&self) -> Option<MenuItemInsert> {
        self.inner.read().await.last_insert.clone()
    }

    fn take_failure(inner: &mut Inner) -> Result<()> {
        match inner.fail_next.take() {
            Some(message) => Err(MenuError::Remote(message)),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryRemoteClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteResourceClient for InMemoryRemoteClient {
    async fn list_all(&self) -> Result<Vec<MenuItem>> {
        let mut inner = self.inner.write().await;
        Self::take_failure(&mut inner)?;
        let mut rows = inner.rows.clone();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn insert(&self, row: MenuItemInsert) -> Result<Vec<MenuItem>> {
        let mut inner = self.inner.write().await;
        Self::take_failure(&mut inner)?;
        inner.last_insert = Some(row.clone());

        let now = Utc::now();
        let confirmed = MenuItem {
            id: ItemId::from(inner.next_id),
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            is_veg: row.is_veg,
            spice_level: row.spice_level,
            image_url: row.image_url,
            is_available: row.is_available,
            created_at: now,
            updated_at: now,
        };
        inner.next_id += 1;
        inner.rows.push(confirmed.clone());
        Ok(vec![confirmed])
    }

    async fn update_where(&self, id: ItemId, patch: MenuItemPatch) -> Result<Vec<MenuItem>> {
        let mut inner = self.inner.write().await;
        Self::take_failure(&mut inner)?;

        let Some(row) = inner.rows.iter_mut().find(|r| r.id == id) else {
            return Ok(Vec::new());
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(description) = patch.description {
            row.description = Some(description);
        }
        if let Some(price) = patch.price {
            row.price = price;
        }
        if let Some(category) = patch.category {
            row.category = category;
        }
        if let Some(is_veg) = patch.is_veg {
            row.is_veg = is_veg;
        }
        if let Some(spice_level) = patch.spice_level {
            row.spice_level = spice_level;
        }
        if let Some(image_url) = patch.image_url {
            row.image_url = Some(image_url);
        }
        if let Some(is_available) = patch.is_available {
            row.is_available = is_available;
        }
        row.updated_at = Utc::now();
        Ok(vec![row.clone()])
    }

    async fn delete_where(&self, id: ItemId) -> Result<()> {
        let mut inner = self.inner.write().await;
        Self::take_failure(&mut inner)?;
        inner.rows.retain(|r| r.id != id);
        Ok(())
    }
}
