//! HTTP client for the Siray API.

use crate::error::{Result, SirayError};
use crate::image::Image;
use crate::video::Video;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.siray.ai";

/// Environment variable consulted when no API key is given.
pub const API_KEY_ENV: &str = "SIRAY_API_KEY";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for [`Siray`].
#[derive(Debug, Clone)]
pub struct SirayBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
}

impl Default for SirayBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SirayBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `SIRAY_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL (defaults to `https://api.siray.ai`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout (defaults to 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client, resolving the API key.
    pub fn build(self) -> Result<Siray> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
            .ok_or_else(|| {
                SirayError::Auth(format!(
                    "API key is required. Provide it via api_key() or set {API_KEY_ENV}"
                ))
            })?;

        let base_url = self
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(Siray {
            client,
            api_key,
            base_url,
            timeout: self.timeout,
        })
    }
}

/// Client for the Siray generative-media API.
#[derive(Clone)]
pub struct Siray {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for Siray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Siray")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Siray {
    /// Creates a client from the `SIRAY_API_KEY` env var with default settings.
    pub fn new() -> Result<Self> {
        SirayBuilder::new().build()
    }

    /// Creates a new `SirayBuilder`.
    pub fn builder() -> SirayBuilder {
        SirayBuilder::new()
    }

    /// Image generation endpoints.
    pub fn image(&self) -> Image<'_> {
        Image::new(self)
    }

    /// Video generation endpoints.
    pub fn video(&self) -> Video<'_> {
        Video::new(self)
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Reads a local image and returns it as a `data:` URI for use in params.
    pub async fn load_from_local(&self, path: impl AsRef<Path>) -> Result<String> {
        crate::local_file::load_from_local(path).await
    }

    /// POSTs a JSON body to `endpoint` and returns the JSON reply.
    pub(crate) async fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        let url = self.url(endpoint);
        tracing::debug!(%url, "POST");
        self.send(self.client.post(url).json(body)).await
    }

    /// GETs `endpoint` and returns the JSON reply.
    pub(crate) async fn get(&self, endpoint: &str) -> Result<Value> {
        let url = self.url(endpoint);
        tracing::debug!(%url, "GET");
        self.send(self.client.get(url)).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "request failed");
            return Err(parse_error(status, &text));
        }

        response.json().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> SirayError {
        if err.is_timeout() {
            SirayError::RequestTimeout(self.timeout)
        } else {
            SirayError::Network(err)
        }
    }
}

/// Maps a non-success reply to [`SirayError::Api`].
///
/// Uses `error.message` / `error.code` from a JSON body when present.
fn parse_error(status: StatusCode, text: &str) -> SirayError {
    let response = serde_json::from_str::<Value>(text).ok();
    let error = response.as_ref().and_then(|body| body.get("error"));

    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        });

    let code = error.and_then(|e| e.get("code")).and_then(|c| match c {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    SirayError::Api {
        status: status.as_u16(),
        code,
        message,
        response,
    }
}
