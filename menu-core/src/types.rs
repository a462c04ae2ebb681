//! Core types: menu item row, identifier, category and spice enumerations,
//! and the wire shapes used for creation and partial update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MenuError;

/// Opaque server-assigned identifier for a menu item.
///
/// Never generated locally; the remote store assigns it on insert. Conversion to a
/// collaborator-specific representation (e.g. a PostgREST filter value) is the
/// collaborator's concern.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ItemId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

/// Categories a menu item can belong to.
///
/// The admin filter value `all` is deliberately not a variant here; it exists only on
/// [`CategoryFilter`], so it can never be sent as an item's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Appetizers,
    Mains,
    Rice,
    Breads,
    Desserts,
    Beverages,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Appetizers,
        Category::Mains,
        Category::Rice,
        Category::Breads,
        Category::Desserts,
        Category::Beverages,
    ];

    /// Wire/CLI identifier (lowercase).
    pub fn id(&self) -> &'static str {
        match self {
            Category::Appetizers => "appetizers",
            Category::Mains => "mains",
            Category::Rice => "rice",
            Category::Breads => "breads",
            Category::Desserts => "desserts",
            Category::Beverages => "beverages",
        }
    }

    /// Display name used by the admin surface.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Appetizers => "Appetizers",
            Category::Mains => "Main Course",
            Category::Rice => "Rice & Biryani",
            Category::Breads => "Breads",
            Category::Desserts => "Desserts",
            Category::Beverages => "Beverages",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = MenuError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| MenuError::Config(format!("Unknown category: {}", s)))
    }
}

/// Display-only category filter for listing surfaces.
///
/// `All` means "no filter" and is never serialized into an item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// The fixed filter list shown by the admin surface, `All` first.
    pub const ALL_FILTERS: [CategoryFilter; 7] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Appetizers),
        CategoryFilter::Only(Category::Mains),
        CategoryFilter::Only(Category::Rice),
        CategoryFilter::Only(Category::Breads),
        CategoryFilter::Only(Category::Desserts),
        CategoryFilter::Only(Category::Beverages),
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Items",
            CategoryFilter::Only(category) => category.display_name(),
        }
    }

    /// True if the item passes this filter.
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }
}

/// Spice level of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Hot => "hot",
        };
        f.write_str(s)
    }
}

impl FromStr for SpiceLevel {
    type Err = MenuError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "mild" => Ok(SpiceLevel::Mild),
            "medium" => Ok(SpiceLevel::Medium),
            "hot" => Ok(SpiceLevel::Hot),
            other => Err(MenuError::Config(format!("Unknown spice level: {}", other))),
        }
    }
}

/// Authoritative menu item row as confirmed by the remote store.
///
/// `id`, `created_at` and `updated_at` are server-managed; `image_url` may hold a URL
/// or a short symbolic/emoji token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Category,
    pub is_veg: bool,
    pub spice_level: SpiceLevel,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation draft: a candidate row without the server- or store-assigned fields
/// (`id`, `is_available`, timestamps). The draft cannot carry an availability value;
/// the store forces `is_available = true` when it builds the wire row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Category,
    pub is_veg: bool,
    pub spice_level: SpiceLevel,
    pub image_url: Option<String>,
}

impl NewMenuItem {
    /// Converts the draft into the wire row sent on creation, forcing
    /// `is_available = true`.
    pub fn into_insert(self) -> MenuItemInsert {
        MenuItemInsert {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            is_veg: self.is_veg,
            spice_level: self.spice_level,
            image_url: self.image_url,
            is_available: true,
        }
    }
}

/// Wire row sent on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemInsert {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: Category,
    pub is_veg: bool,
    pub spice_level: SpiceLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_available: bool,
}

/// Partial update; `None` fields are omitted from the wire payload, so the remote
/// store only touches the fields the caller set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_veg: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<SpiceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl MenuItemPatch {
    /// Single-field patch used by the availability toggle.
    pub fn availability(is_available: bool) -> Self {
        Self {
            is_available: Some(is_available),
            ..Self::default()
        }
    }
}
