//! Single-attempt HTTP client
//!
//! Handles base-URL joining, default headers (auth token, user agent),
//! per-request query parameters and JSON bodies, and error classification.
//! Every call is issued exactly once; non-2xx statuses and malformed JSON
//! become errors immediately.

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::types::Verb;
use reqwest::{Client, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the auth token, per the cloud API convention
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("rdskit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiClientConfig {
    /// Create a config for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Single-attempt HTTP client
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a client with the given configuration.
    ///
    /// The base URL must parse as an absolute URL; a bad endpoint fails
    /// here rather than on the first request.
    pub fn with_config(config: ApiClientConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client from a service configuration.
    ///
    /// The token and extra headers from the config become default headers.
    pub fn from_service(service: &ServiceConfig) -> Result<Self> {
        let mut config = ApiClientConfig::new(&service.endpoint);
        if let Some(token) = &service.token {
            config = config.header(AUTH_TOKEN_HEADER, token);
        }
        for (key, value) in &service.headers {
            config = config.header(key, value);
        }
        Self::with_config(config)
    }

    /// Issue a request with the given verb.
    ///
    /// Returns the response only on a 2xx status; everything else becomes
    /// an [`Error::HttpStatus`] with the response body attached.
    pub async fn send(&self, verb: Verb, path: &str, config: &RequestConfig) -> Result<Response> {
        let url = self.build_url(path);

        let mut req = self.client.request(verb.into(), &url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(body) = &config.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("request failed: {} {} -> {}", verb_name(verb), url, status);
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("request succeeded: {} {}", verb_name(verb), url);
        Ok(response)
    }

    /// Issue a request and parse the response body as JSON
    pub async fn send_json(&self, verb: Verb, path: &str, config: &RequestConfig) -> Result<Value> {
        let response = self.send(verb, path, config).await?;
        let value: Value = response.json().await?;
        Ok(value)
    }

    /// GET a path and parse the response body as JSON
    pub async fn get_json(&self, path: &str, config: &RequestConfig) -> Result<Value> {
        self.send_json(Verb::Get, path, config).await
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

fn verb_name(verb: Verb) -> &'static str {
    match verb {
        Verb::Get => "GET",
        Verb::Post => "POST",
        Verb::Put => "PUT",
        Verb::Delete => "DELETE",
    }
}
