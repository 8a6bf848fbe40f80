//! Blog API read adapter for fetching posts

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use trading_insights_domain::model::Post;
use trading_insights_domain::ports::{CatalogError, PostCatalog};

use crate::blog_api::wire::{PostResponse, PostsResponse};

/// HTTP catalog backed by the public blog endpoints
pub struct HttpPostCatalog {
    client: Client,
    base_url: String,
}

impl HttpPostCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PostCatalog for HttpPostCatalog {
    async fn fetch_posts(&self) -> Result<Vec<Post>, CatalogError> {
        let url = format!("{}/posts", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(format!(
                "GET /posts returned {}: {}",
                status, body
            )));
        }

        let payload: PostsResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Api(e.to_string()))?;

        // One malformed record must not take down the whole listing.
        let mut posts = Vec::with_capacity(payload.posts.len());
        for record in payload.posts {
            match record.into_post() {
                Ok(post) => posts.push(post),
                Err(bad) => {
                    tracing::warn!(id = %bad.id, message = %bad.message, "Skipping malformed post record");
                }
            }
        }

        tracing::debug!(count = posts.len(), "Fetched posts");

        Ok(posts)
    }

    async fn fetch_post(&self, slug: &str) -> Result<Post, CatalogError> {
        let url = format!("{}/posts/{}", self.base_url, slug);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if response.status() == 404 {
            return Err(CatalogError::NotFound(slug.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(format!(
                "GET /posts/{} returned {}: {}",
                slug, status, body
            )));
        }

        let payload: PostResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Api(e.to_string()))?;

        payload.post.into_post().map_err(|bad| CatalogError::MalformedPost {
            id: bad.id,
            message: bad.message,
        })
    }
}
