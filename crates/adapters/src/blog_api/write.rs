//! Blog API write adapter for the admin endpoints

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use trading_insights_domain::model::{Post, PostDraft};
use trading_insights_domain::ports::{EditorError, PostEditor};

use crate::blog_api::wire::PostRecord;

/// HTTP editor backed by the admin endpoints
pub struct HttpPostEditor {
    client: Client,
    base_url: String,
}

impl HttpPostEditor {
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

    /// The servers echo the affected post back
    async fn decode_post(
        response: reqwest::Response,
        context: &str,
    ) -> Result<Post, EditorError> {
        let record: PostRecord = response
            .json()
            .await
            .map_err(|e| EditorError::Api(format!("{}: {}", context, e)))?;

        record
            .into_post()
            .map_err(|bad| EditorError::Api(format!("{}: record '{}': {}", context, bad.id, bad.message)))
    }
}

#[async_trait]
impl PostEditor for HttpPostEditor {
    async fn create_post(&self, draft: &PostDraft) -> Result<Post, EditorError> {
        let url = format!("{}/posts", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(|e| EditorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EditorError::Api(format!(
                "POST /posts returned {}: {}",
                status, body
            )));
        }

        let post = Self::decode_post(response, "create").await?;
        tracing::info!(id = %post.id, slug = %post.slug, "Created post");
        Ok(post)
    }

    async fn update_post(&self, id: &str, draft: &PostDraft) -> Result<Post, EditorError> {
        let url = format!("{}/admin/posts/{}", self.base_url, id);

        let response = self
            .client
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(|e| EditorError::Network(e.to_string()))?;

        if response.status() == 404 {
            return Err(EditorError::NotFound(id.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EditorError::Api(format!(
                "PUT /admin/posts/{} returned {}: {}",
                id, status, body
            )));
        }

        let post = Self::decode_post(response, "update").await?;
        tracing::info!(id = %post.id, "Updated post");
        Ok(post)
    }

    async fn delete_post(&self, id: &str) -> Result<(), EditorError> {
        let url = format!("{}/admin/posts/{}", self.base_url, id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| EditorError::Network(e.to_string()))?;

        if response.status() == 404 {
            return Err(EditorError::NotFound(id.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EditorError::Api(format!(
                "DELETE /admin/posts/{} returned {}: {}",
                id, status, body
            )));
        }

        tracing::info!(id = %id, "Deleted post");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;
    use trading_insights_domain::model::Category;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_draft() -> PostDraft {
        PostDraft {
            slug: "gold-breakout".to_string(),
            title: "Gold Breakout".to_string(),
            excerpt: "price action".to_string(),
            content: "The breakout continues.".to_string(),
            category: Category::Analysis,
            category_label: Category::Analysis.label().to_string(),
            featured_image: String::new(),
            author: "Research Desk".to_string(),
            publish_date: date!(2024 - 03 - 01),
            reading_time: 4,
            featured: false,
        }
    }

    fn created_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "slug": "gold-breakout",
            "title": "Gold Breakout",
            "excerpt": "price action",
            "content": "The breakout continues.",
            "category": "analysis",
            "categoryLabel": "Technical Analysis",
            "featuredImage": "",
            "author": "Research Desk",
            "publishDate": "2024-03-01",
            "readingTime": 4,
            "featured": false
        })
    }

    #[tokio::test]
    async fn create_post_sends_camel_case_payload() {
        let server = MockServer::start().await;

        let expected_body = json!({
            "slug": "gold-breakout",
            "title": "Gold Breakout",
            "excerpt": "price action",
            "content": "The breakout continues.",
            "category": "analysis",
            "categoryLabel": "Technical Analysis",
            "featuredImage": "",
            "author": "Research Desk",
            "publishDate": "2024-03-01",
            "readingTime": 4,
            "featured": false
        });

        Mock::given(method("POST"))
            .and(path("/posts"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(201).set_body_json(created_json("42")))
            .mount(&server)
            .await;

        let editor = HttpPostEditor::new(server.uri());
        let post = editor.create_post(&sample_draft()).await.unwrap();

        assert_eq!(post.id, "42");
        assert_eq!(post.slug, "gold-breakout");
    }

    #[tokio::test]
    async fn update_post_hits_admin_route() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/admin/posts/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(created_json("42")))
            .mount(&server)
            .await;

        let editor = HttpPostEditor::new(server.uri());
        let post = editor.update_post("42", &sample_draft()).await.unwrap();

        assert_eq!(post.id, "42");
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/admin/posts/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let editor = HttpPostEditor::new(server.uri());
        let result = editor.update_post("99", &sample_draft()).await;

        assert!(matches!(result, Err(EditorError::NotFound(id)) if id == "99"));
    }

    #[tokio::test]
    async fn delete_post_success_and_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/admin/posts/42"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/admin/posts/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let editor = HttpPostEditor::new(server.uri());
        editor.delete_post("42").await.unwrap();

        let result = editor.delete_post("99").await;
        assert!(matches!(result, Err(EditorError::NotFound(_))));
    }
}
