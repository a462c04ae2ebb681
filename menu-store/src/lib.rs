//! # menu-store
//!
//! Client-side mirror of the remote `menu_items` collection.
//!
//! ## Modules
//!
//! - [`sync_store`] – CollectionSyncStore: per-operation remote round-trip plus local
//!   cache reconciliation
//! - [`context`] – StoreContext provider handle
//! - [`memory_client`] – InMemoryRemoteClient, an in-process backend for tests and
//!   demo runs

pub mod context;
pub mod memory_client;
pub mod sync_store;

pub use context::StoreContext;
pub use memory_client::InMemoryRemoteClient;
pub use sync_store::{CollectionSyncStore, ZeroRowsPolicy};
