//! Retrying GET client

use crate::error::{Error, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff strategy between retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// Constant delay between retries
    Constant,
    /// Delay grows linearly with the attempt number
    Linear,
    /// Delay doubles each attempt
    #[default]
    Exponential,
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL prepended to relative paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries per request
    pub max_retries: u32,
    /// Initial backoff delay
    pub initial_backoff: Duration,
    /// Backoff ceiling
    pub max_backoff: Duration,
    /// Backoff strategy
    pub backoff: Backoff,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(30),
            backoff: Backoff::Exponential,
            default_headers: HashMap::new(),
        }
    }
}

impl HttpClientConfig {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the retry budget
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the backoff strategy and bounds
    #[must_use]
    pub fn backoff(mut self, backoff: Backoff, initial: Duration, max: Duration) -> Self {
        self.backoff = backoff;
        self.initial_backoff = initial;
        self.max_backoff = max;
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
    /// Override timeout for this request
    pub timeout: Option<Duration>,
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

    /// Add several query parameters
    #[must_use]
    pub fn queries(mut self, params: HashMap<String, String>) -> Self {
        self.query.extend(params);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// GET client with retry and backoff
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("pagerkit/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.get_with_config(url, RequestConfig::default()).await
    }

    /// Make a GET request with per-request configuration
    pub async fn get_with_config(&self, url: &str, request: RequestConfig) -> Result<Response> {
        let full_url = self.build_url(url);
        let timeout = request.timeout.unwrap_or(self.config.timeout);

        let mut last_error = None;
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.backoff_delay(attempt - 1);
                warn!(
                    url = %full_url,
                    attempt,
                    max = self.config.max_retries,
                    ?delay,
                    "retrying request"
                );
                tokio::time::sleep(delay).await;
            }

            let mut req = self.client.get(&full_url).timeout(timeout);
            for (key, value) in &self.config.default_headers {
                req = req.header(key.as_str(), value.as_str());
            }
            for (key, value) in &request.headers {
                req = req.header(key.as_str(), value.as_str());
            }
            if !request.query.is_empty() {
                req = req.query(&request.query);
            }

            match req.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        debug!(url = %full_url, status = status.as_u16(), "request succeeded");
                        return Ok(response);
                    }

                    let err = Error::http_status(
                        status.as_u16(),
                        response.text().await.unwrap_or_default(),
                    );
                    if !retryable(status) {
                        return Err(err);
                    }
                    last_error = Some(err);
                }
                Err(e) if e.is_timeout() => {
                    last_error = Some(Error::Timeout {
                        timeout_ms: timeout.as_millis() as u64,
                    });
                }
                Err(e) if e.is_connect() => {
                    last_error = Some(Error::Http(e));
                }
                Err(e) => return Err(Error::Http(e)),
            }
        }

        Err(last_error.unwrap_or(Error::MaxRetriesExceeded {
            max_retries: self.config.max_retries,
        }))
    }

    /// Make a GET request and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        request: RequestConfig,
    ) -> Result<T> {
        let response = self.get_with_config(url, request).await?;
        response.json().await.map_err(Error::Http)
    }

    /// Resolve a possibly relative path against the base URL
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        match &self.config.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        }
    }

    /// Delay before retrying after `attempt` failed tries
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff {
            Backoff::Constant => self.config.initial_backoff,
            Backoff::Linear => self.config.initial_backoff * (attempt + 1),
            Backoff::Exponential => self.config.initial_backoff * 2u32.saturating_pow(attempt),
        };
        delay.min(self.config.max_backoff)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}
