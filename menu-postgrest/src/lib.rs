//! # menu-postgrest
//!
//! HTTP implementation of [`RemoteResourceClient`] against a PostgREST-style endpoint
//! (e.g. the Supabase REST layer, `{base}/rest/v1`). One request per store operation;
//! writes ask for `return=representation` so the store receives the authoritative
//! rows. Non-2xx responses surface as [`MenuError::Remote`] with status and body.

use async_trait::async_trait;
use menu_core::{
    ItemId, MenuError, MenuItem, MenuItemInsert, MenuItemPatch, RemoteResourceClient, Result,
};
use tracing::{debug, instrument};

/// Resource path for the menu collection.
const RESOURCE: &str = "menu_items";

/// Builds the collection URL for the given base; a trailing slash on the base is
/// tolerated.
fn collection_url(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), RESOURCE)
}

/// Builds the `id=eq.{id}` filter used by update and delete.
fn id_filter(id: ItemId) -> String {
    format!("id=eq.{}", id)
}

/// PostgREST client for the `menu_items` resource.
///
/// The API key is sent both as `apikey` and as a bearer token, matching the
/// Supabase REST convention.
#[derive(Clone)]
pub struct PostgrestClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| MenuError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn expect_rows(response: reqwest::Response) -> Result<Vec<MenuItem>> {
        let response = Self::expect_success(response).await?;
        response
            .json::<Vec<MenuItem>>()
            .await
            .map_err(|e| MenuError::Remote(format!("Invalid response body: {}", e)))
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(MenuError::Remote(format!("HTTP {}: {}", status, body)))
    }
}

#[async_trait]
impl RemoteResourceClient for PostgrestClient {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<MenuItem>> {
        let url = format!("{}?select=*&order=id.asc", collection_url(&self.base_url));
        debug!(url = %url, "GET menu_items");
        let response = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(|e| MenuError::Remote(e.to_string()))?;
        Self::expect_rows(response).await
    }

    #[instrument(skip(self, row), fields(name = %row.name))]
    async fn insert(&self, row: MenuItemInsert) -> Result<Vec<MenuItem>> {
        let url = collection_url(&self.base_url);
        debug!(url = %url, "POST menu_items");
        let response = self
            .request(reqwest::Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await
            .map_err(|e| MenuError::Remote(e.to_string()))?;
        Self::expect_rows(response).await
    }

    #[instrument(skip(self, patch))]
    async fn update_where(&self, id: ItemId, patch: MenuItemPatch) -> Result<Vec<MenuItem>> {
        let url = format!("{}?{}", collection_url(&self.base_url), id_filter(id));
        debug!(url = %url, "PATCH menu_items");
        let response = self
            .request(reqwest::Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await
            .map_err(|e| MenuError::Remote(e.to_string()))?;
        Self::expect_rows(response).await
    }

    #[instrument(skip(self))]
    async fn delete_where(&self, id: ItemId) -> Result<()> {
        let url = format!("{}?{}", collection_url(&self.base_url), id_filter(id));
        debug!(url = %url, "DELETE menu_items");
        let response = self
            .request(reqwest::Method::DELETE, url)
            .send()
            .await
            .map_err(|e| MenuError::Remote(e.to_string()))?;
        Self::expect_success(response).await?;
        Ok(())
    }
}
