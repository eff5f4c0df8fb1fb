//! LLM HTTP Client
//!
//! A reusable HTTP client for chat-completion APIs. Each call issues
//! exactly one request: failures surface to the caller, which decides
//! whether the batch continues. There is no retry or backoff layer.

use crate::error::{Result, VerbForgeError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Default timeout for HTTP requests (in seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// HTTP client for LLM API requests
#[derive(Clone)]
pub struct HttpClient {
    /// Reqwest HTTP client
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(VerbForgeError::Http)?;

        Ok(Self { client })
    }

    /// Make a single POST request with a JSON body.
    ///
    /// # Arguments
    /// * `url` - Request URL
    /// * `headers` - Request headers
    /// * `body` - Request body (serializable)
    /// * `provider` - Provider name used in error reporting
    ///
    /// # Returns
    /// Response body as string
    pub async fn post_json<T: Serialize>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &T,
        provider: &str,
    ) -> Result<String> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(VerbForgeError::Http)?;

        let status = response.status();

        if status.is_success() {
            let text = response.text().await.map_err(VerbForgeError::Http)?;
            return Ok(text);
        }

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());

        Err(VerbForgeError::Api {
            provider: provider.to_string(),
            status: status.as_u16(),
            message: response_text,
        })
    }

    /// Build standard headers for bearer-authenticated API requests
    pub fn bearer_headers(api_key: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| VerbForgeError::Config("API key is not a valid header value".to_string()))?,
        );
        Ok(headers)
    }
}
