//! DashScope API client implementation.

use super::generation::MultiModalModel;
use crate::providers::common::FromEnv;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::sync::Arc;

/// Default DashScope API base URL (Beijing region).
pub const DASHSCOPE_API_BASE_URL: &str = "https://dashscope.aliyuncs.com/api/v1";

/// DashScope API base URL for the Singapore region.
pub const DASHSCOPE_INTL_API_BASE_URL: &str = "https://dashscope-intl.aliyuncs.com/api/v1";

/// DashScope API client for creating multimodal generation models.
///
/// # Example
///
/// ```rust,ignore
/// use vigil::providers::dashscope::DashScopeClient;
/// use vigil::providers::FromEnv;
///
/// // From the DASHSCOPE_API_KEY environment variable
/// let client = DashScopeClient::from_env();
///
/// // With explicit API key
/// let client = DashScopeClient::new("sk-...");
///
/// // Singapore region
/// let client = DashScopeClient::builder()
///     .api_key("sk-...")
///     .base_url(vigil::providers::dashscope::DASHSCOPE_INTL_API_BASE_URL)
///     .build();
/// ```
#[derive(Clone)]
pub struct DashScopeClient {
    pub(crate) http_client: reqwest::Client,
    pub(crate) api_key: Arc<str>,
    pub(crate) base_url: Arc<str>,
}

impl std::fmt::Debug for DashScopeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashScopeClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl DashScopeClient {
    /// Create a new DashScope client with the given API key.
    ///
    /// Uses the default (Beijing region) API base URL.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> DashScopeClientBuilder {
        DashScopeClientBuilder::default()
    }

    /// Create a multimodal generation model with the specified model ID.
    ///
    /// # Arguments
    ///
    /// * `model_id` - The model identifier (e.g., "qwen3-vl-plus", "qwen3-vl-flash")
    #[must_use]
    pub fn multimodal_model(&self, model_id: impl Into<String>) -> MultiModalModel {
        MultiModalModel::new(self.clone(), model_id)
    }

    /// Get the base URL for API requests.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the authorization headers for API requests.
    pub(crate) fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .expect("Invalid API key format"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

impl FromEnv for DashScopeClient {
    /// Create a new DashScope client from environment variables.
    ///
    /// Uses `DASHSCOPE_API_KEY` for the API key and optionally
    /// `DASHSCOPE_BASE_URL` for a custom base URL (e.g., the Singapore
    /// region endpoint). Keys differ between regions.
    ///
    /// # Panics
    ///
    /// Panics if `DASHSCOPE_API_KEY` is not set.
    fn from_env() -> Self {
        let api_key = std::env::var("DASHSCOPE_API_KEY")
            .expect("DASHSCOPE_API_KEY environment variable not set");

        let mut builder = Self::builder().api_key(api_key);

        if let Ok(base_url) = std::env::var("DASHSCOPE_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        builder.build()
    }
}

/// Builder for [`DashScopeClient`].
#[derive(Debug, Default)]
pub struct DashScopeClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl DashScopeClientBuilder {
    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a custom base URL.
    ///
    /// Useful for the Singapore region endpoint or proxies.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub const fn timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// # Panics
    ///
    /// Panics if the API key is not set.
    #[must_use]
    pub fn build(self) -> DashScopeClient {
        let api_key = self.api_key.expect("API key is required");
        let base_url = self
            .base_url
            .unwrap_or_else(|| DASHSCOPE_API_BASE_URL.to_string());

        let mut client_builder = reqwest::Client::builder();

        if let Some(timeout) = self.timeout_secs {
            client_builder = client_builder.timeout(std::time::Duration::from_secs(timeout));
        }

        let http_client = client_builder.build().expect("Failed to build HTTP client");

        DashScopeClient {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builder_overrides_base_url() {
        let client = DashScopeClient::builder()
            .api_key("test-key")
            .base_url(DASHSCOPE_INTL_API_BASE_URL)
            .timeout_secs(30)
            .build();

        assert_eq!(client.base_url(), DASHSCOPE_INTL_API_BASE_URL);
    }

    #[test]
    fn default_base_url_is_beijing_region() {
        let client = DashScopeClient::new("test-key");
        assert_eq!(client.base_url(), DASHSCOPE_API_BASE_URL);
    }

    #[test]
    fn debug_redacts_the_api_key() {
        let client = DashScopeClient::new("sk-secret");
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-secret"));
    }
}
