//! HTTP transport shared by every strategy and the Notion client
//!
//! All outbound traffic goes through [`HttpTransport`] so tests can swap the
//! network for a scripted stub. [`HttpClient`] pairs a transport with the
//! [`HttpConfig`] (user agent, timeouts) and adds the small helpers the
//! strategies need.

use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub use reqwest::Method;

/// Browser user agent; the verse page serves reduced markup to unknown clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Shared HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Full page fetches (verse page, text API inside the text-API tier)
    pub page_timeout: Duration,
    /// Text API lookups made on behalf of another tier
    pub api_timeout: Duration,
    /// CDN existence probes
    pub probe_timeout: Duration,
    /// Notion block API calls
    pub notion_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_timeout: Duration::from_secs(10),
            api_timeout: Duration::from_secs(5),
            probe_timeout: Duration::from_secs(3),
            notion_timeout: Duration::from_secs(30),
        }
    }
}

/// Outbound request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(Method::HEAD, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Header lookup, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Response status and body text
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Transport-level failures (no HTTP status available)
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Request to {url} failed: {message}")]
    Connection { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

/// Anything that can carry an [`HttpRequest`]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by `reqwest`
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.page_timeout)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify(&request.url, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify(&request.url, e))?;

        Ok(HttpResponse { status, body })
    }
}

fn classify(url: &str, error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Connection {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// Transport plus shared configuration, cheap to clone
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn HttpTransport>,
    config: HttpConfig,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: HttpConfig) -> Self {
        Self { transport, config }
    }

    /// Client on the real network
    pub fn from_config(config: HttpConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.transport.send(request).await
    }

    /// GET a body, treating any non-2xx status as the source being unavailable
    pub async fn get_text(&self, url: &str, timeout: Duration) -> SyncResult<String> {
        debug!(url = %url, "GET");
        let response = self
            .send(HttpRequest::get(url).with_timeout(timeout))
            .await
            .map_err(|e| SyncError::SourceUnavailable(e.to_string()))?;

        if !response.is_success() {
            return Err(SyncError::SourceUnavailable(format!(
                "HTTP {} from {}",
                response.status, url
            )));
        }

        Ok(response.body)
    }

    /// HEAD probe: `Ok(true)` on 2xx, `Ok(false)` on any other status
    pub async fn exists(&self, url: &str, timeout: Duration) -> SyncResult<bool> {
        let response = self
            .send(HttpRequest::head(url).with_timeout(timeout))
            .await
            .map_err(|e| SyncError::SourceUnavailable(e.to_string()))?;

        debug!(url = %url, status = response.status, "HEAD");
        Ok(response.is_success())
    }
}
