use std::future::Future;

use anyhow::Context;

use super::model::Category;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";
const ITEMS_PATH: &str = "items";

/// Source of the selectable categories shown on the points screen.
pub trait CategoryRepository {
    fn get_categories(
        &self,
    ) -> impl Future<Output = anyhow::Result<Vec<Category>>> + Send + 'static;
}

/// HTTP client for the collection-point backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Downloads raw bytes, used for category icons and the marker image.
    pub fn fetch_bytes(
        &self,
        url: String,
    ) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send + use<> {
        let client = self.client.clone();
        async move {
            let response = client
                .get(&url)
                .send()
                .await
                .with_context(|| format!("Request to {url} failed"))?
                .error_for_status()
                .with_context(|| format!("Unexpected response from {url}"))?;
            let bytes = response
                .bytes()
                .await
                .with_context(|| format!("Failed to read body from {url}"))?;
            Ok(bytes.to_vec())
        }
    }
}

impl CategoryRepository for ApiClient {
    fn get_categories(
        &self,
    ) -> impl Future<Output = anyhow::Result<Vec<Category>>> + Send + 'static {
        let body = self.fetch_bytes(self.endpoint(ITEMS_PATH));
        async move {
            let categories = decode_categories(&body.await?)?;
            tracing::debug!(count = categories.len(), "Fetched categories");
            Ok(categories)
        }
    }
}

/// Parses the `GET items` body: a JSON array of `{ id, title, image_url }`.
pub fn decode_categories(body: &[u8]) -> anyhow::Result<Vec<Category>> {
    serde_json::from_slice(body).context("Malformed category list")
}
