use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;

use crate::storage::FileStorage;

/// Remote object-store backend (HTTP direct, no vendor SDK).
///
/// Objects live under `{endpoint}/{container}/{path}/{name}`; authentication
/// is a static `x-api-key` header. Any store exposing plain
/// HEAD/GET/PUT/DELETE object semantics works.
#[derive(Debug)]
pub struct BlobStorage {
    http_client: reqwest::Client,
    endpoint: String,
    container: String,
}

impl BlobStorage {
    pub fn builder() -> BlobStorageBuilder {
        BlobStorageBuilder::default()
    }

    fn object_url(&self, path: &str, name: &str) -> String {
        if path.is_empty() {
            format!("{}/{}/{}", self.endpoint, self.container, name)
        } else {
            format!("{}/{}/{}/{}", self.endpoint, self.container, path, name)
        }
    }
}

#[async_trait]
impl FileStorage for BlobStorage {
    async fn check_exists(&self, path: &str, name: &str) -> Result<bool> {
        let response = self
            .http_client
            .head(self.object_url(path, name))
            .send()
            .await
            .context("blob HEAD request failed")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Ok(response.error_for_status().map(|_| true)?)
    }

    async fn read(&self, name: &str, path: &str) -> Result<String> {
        let response = self
            .http_client
            .get(self.object_url(path, name))
            .send()
            .await
            .context("blob GET request failed")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(String::new());
        }
        Ok(response.error_for_status()?.text().await?)
    }

    async fn write(&self, content: &str, name: &str, path: &str) -> Result<()> {
        self.http_client
            .put(self.object_url(path, name))
            .body(content.to_string())
            .send()
            .await
            .context("blob PUT request failed")?
            .error_for_status()?;
        Ok(())
    }

    async fn delete(&self, name: &str, path: &str) -> Result<()> {
        let response = self
            .http_client
            .delete(self.object_url(path, name))
            .send()
            .await
            .context("blob DELETE request failed")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        response.error_for_status()?;
        Ok(())
    }
}

/// Builder for BlobStorage
#[derive(Default)]
pub struct BlobStorageBuilder {
    endpoint: Option<String>,
    container: Option<String>,
    api_key: Option<String>,
}

impl BlobStorageBuilder {
    /// Set the object store base URL
    /// Example: "https://myaccount.blob.example.com"
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn build(self) -> Result<BlobStorage> {
        let endpoint = self.endpoint.context("Endpoint is required")?;
        let container = self.container.context("Container is required")?;
        let api_key = self.api_key.context("API key is required")?;

        // Remove trailing slash from endpoint
        let endpoint = endpoint.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&api_key).context("Invalid API key")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(BlobStorage {
            http_client,
            endpoint,
            container: container.trim_matches('/').to_string(),
        })
    }
}
