//! reqwest-backed transport for the data API

use crate::error::{ApiError, ApiResult};
use crate::transport::{Method, Request, Transport};
use async_trait::async_trait;
use pd_core::config::ApiConfig;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Transport that talks to the data API over HTTP
pub struct HttpTransport {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpTransport {
    /// Create a transport from configuration
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::InvalidConfig(
                "base_url cannot be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ApiError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Full URL of an endpoint path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("has_auth_token", &self.auth_token.is_some())
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> ApiResult<Arc<Value>> {
        let url = self.url(&request.path);
        log::debug!("{} {}", request.method, url);

        let mut http_request = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(body) = &request.body {
            http_request = http_request.json(body);
        }
        if let Some(ref token) = self.auth_token {
            http_request = http_request.bearer_auth(token);
        }

        let response = http_request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response.json().await.map_err(|e| ApiError::Decode {
            what: format!("reply from {}", url),
            message: e.to_string(),
        })?;
        Ok(Arc::new(value))
    }

    fn transport_type(&self) -> &'static str {
        "http"
    }
}
