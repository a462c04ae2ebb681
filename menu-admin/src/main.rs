//! menu-admin CLI: administrative surface for the remote `menu_items` collection.
//! Composition root: builds the remote client and notification sink, injects them into
//! the sync store, loads the collection first, then runs the requested operation.
//! Config from env (MENU_API_URL, MENU_API_KEY) or `--demo` for an in-process backend.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use menu_core::{
    init_tracing, Category, CategoryFilter, ItemId, MenuItem, MenuItemPatch, NewMenuItem,
    RemoteResourceClient, SpiceLevel, TracingNotificationSink,
};
use menu_postgrest::PostgrestClient;
use menu_store::{CollectionSyncStore, InMemoryRemoteClient, StoreContext};

#[derive(Parser)]
#[command(name = "menu-admin")]
#[command(about = "Menu admin CLI: list, add, update, remove, toggle", long_about = None)]
#[command(version)]
struct Cli {
    /// Run against an in-process seeded backend instead of a live endpoint.
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu items, optionally filtered by category.
    List {
        #[arg(long)]
        category: Option<Category>,
    },
    /// Add a menu item (availability is always set server-side to true).
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        veg: bool,
        #[arg(long, default_value = "mild")]
        spice_level: SpiceLevel,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Update fields of an existing item by id.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        veg: Option<bool>,
        #[arg(long)]
        spice_level: Option<SpiceLevel>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Remove an item by id.
    Remove { id: i64 },
    /// Toggle an item's availability.
    Toggle { id: i64, available: bool },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_file = std::env::var("MENU_LOG_FILE").ok();
    init_tracing(log_file.as_deref())?;

    let client = build_client(cli.demo).await?;
    let store = Arc::new(CollectionSyncStore::new(
        client,
        Arc::new(TracingNotificationSink),
    ));
    let context = StoreContext::new(store);
    let store = context.store()?;

    // Fetch-on-start: populate the mirror before running the operation.
    store.load().await;
    if let Some(error) = store.error().await {
        anyhow::bail!("Failed to load menu items: {}", error);
    }
    tracing::info!(count = store.items().await.len(), "Menu mirror loaded");

    match cli.command {
        Commands::List { category } => {
            let filter = match category {
                Some(c) => CategoryFilter::Only(c),
                None => CategoryFilter::All,
            };
            print_items(&store.items().await, filter);
            return Ok(());
        }
        Commands::Add {
            name,
            description,
            price,
            category,
            veg,
            spice_level,
            image_url,
        } => {
            // Caller-side preconditions; the store performs no domain validation.
            if name.trim().is_empty() {
                anyhow::bail!("Item name must not be empty");
            }
            if price <= 0.0 {
                anyhow::bail!("Item price must be greater than zero");
            }
            store
                .add(NewMenuItem {
                    name,
                    description,
                    price,
                    category,
                    is_veg: veg,
                    spice_level,
                    image_url,
                })
                .await;
        }
        Commands::Update {
            id,
            name,
            description,
            price,
            category,
            veg,
            spice_level,
            image_url,
        } => {
            store
                .update(
                    ItemId::from(id),
                    MenuItemPatch {
                        name,
                        description,
                        price,
                        category,
                        is_veg: veg,
                        spice_level,
                        image_url,
                        is_available: None,
                    },
                )
                .await;
        }
        Commands::Remove { id } => store.remove(ItemId::from(id)).await,
        Commands::Toggle { id, available } => {
            store.set_availability(ItemId::from(id), available).await
        }
    }

    if let Some(error) = store.error().await {
        anyhow::bail!("Operation failed: {}", error);
    }

    print_items(&store.items().await, CategoryFilter::All);
    Ok(())
}

/// Builds the remote client: an in-process seeded backend for `--demo`, otherwise a
/// PostgREST client configured from MENU_API_URL and MENU_API_KEY.
async fn build_client(demo: bool) -> Result<Arc<dyn RemoteResourceClient>> {
    if demo {
        return Ok(demo_client().await);
    }

    let base_url = std::env::var("MENU_API_URL")
        .context("MENU_API_URL is required (or pass --demo). Set it in .env or environment.")?;
    let api_key = std::env::var("MENU_API_KEY")
        .context("MENU_API_KEY is required (or pass --demo). Set it in .env or environment.")?;
    Ok(Arc::new(PostgrestClient::new(base_url, api_key)?))
}

/// In-process backend pre-seeded with a couple of items.
async fn demo_client() -> Arc<dyn RemoteResourceClient> {
    let client = Arc::new(InMemoryRemoteClient::new());
    let seeds = [
        NewMenuItem {
            name: "Samosa".to_string(),
            description: Some("Crisp pastry with spiced potato filling".to_string()),
            price: 5.0,
            category: Category::Appetizers,
            is_veg: true,
            spice_level: SpiceLevel::Medium,
            image_url: Some("🥟".to_string()),
        },
        NewMenuItem {
            name: "Butter Chicken".to_string(),
            description: Some("Tomato-cream curry".to_string()),
            price: 14.5,
            category: Category::Mains,
            is_veg: false,
            spice_level: SpiceLevel::Mild,
            image_url: None,
        },
    ];
    for seed in seeds {
        client
            .insert(seed.into_insert())
            .await
            .expect("Failed to seed demo data");
    }
    client
}

fn print_items(items: &[MenuItem], filter: CategoryFilter) {
    println!("{} ({} total)", filter.display_name(), items.len());
    for item in items.iter().filter(|i| filter.matches(i)) {
        let availability = if item.is_available { "available" } else { "unavailable" };
        println!(
            "{:>4}  {:<24} {:>7.2}  {:<14} {:<8} {}{}",
            item.id.as_i64(),
            item.name,
            item.price,
            item.category.display_name(),
            item.spice_level.to_string(),
            availability,
            if item.is_veg { "  (veg)" } else { "" },
        );
    }
}
