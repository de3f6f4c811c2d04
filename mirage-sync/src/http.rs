//! HTTP transport over reqwest.

use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use mirage_model::{Document, WriteRequest};
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Base URL resource paths are appended to, e.g. `https://api.example.com/v1`.
    pub base_url: String,
    /// Bearer token attached to every request, when set.
    pub bearer_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            bearer_token: None,
            timeout_secs: 30,
        }
    }
}

/// Transport implementation over plain HTTP.
///
/// No retries and no backoff: a failed request surfaces as one
/// [`TransportError`] and any retry policy lives with the consumer.
pub struct HttpTransport {
    config: HttpConfig,
    client: Client,
}

impl HttpTransport {
    /// Creates a transport from a config.
    pub fn new(config: HttpConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    /// Resolves a path against the base URL. Absolute URLs (the server's
    /// pagination cursors) pass through verbatim.
    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = &self.config.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send_document(&self, builder: RequestBuilder) -> Result<Document, TransportError> {
        let response = self.send(builder).await?;
        response
            .json::<Document>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, TransportError> {
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<serde_json::Value>().await.ok();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Document, TransportError> {
        debug!(%path, "GET");
        self.send_document(self.request(Method::GET, path)).await
    }

    async fn post(&self, path: &str, body: &WriteRequest) -> Result<Document, TransportError> {
        debug!(%path, "POST");
        self.send_document(self.request(Method::POST, path).json(body))
            .await
    }

    async fn patch(&self, path: &str, body: &WriteRequest) -> Result<Document, TransportError> {
        debug!(%path, "PATCH");
        self.send_document(self.request(Method::PATCH, path).json(body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<(), TransportError> {
        debug!(%path, "DELETE");
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}
