//! # menu-core
//!
//! Core types and traits for the menu admin mirror: [`MenuItem`] and its wire shapes,
//! the [`RemoteResourceClient`] and [`NotificationSink`] collaborator traits, error types,
//! and tracing initialization. Transport-agnostic; used by menu-store, menu-postgrest
//! and menu-admin.

pub mod client;
pub mod error;
pub mod logger;
pub mod notify;
pub mod types;

pub use client::RemoteResourceClient;
pub use error::{MenuError, Result};
pub use logger::init_tracing;
pub use notify::{Notification, NotificationSink, Severity, TracingNotificationSink};
pub use types::{
    Category, CategoryFilter, ItemId, MenuItem, MenuItemInsert, MenuItemPatch, NewMenuItem,
    SpiceLevel,
};
