//! HTTP client for the workflows API
//!
//! Every operation is a JSON POST to a single endpoint, authenticated with
//! the `X-API-KEY` header.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::config::Settings;
use crate::infrastructure::request::WorkflowRequest;
use crate::infrastructure::traits::WorkflowApi;
use crate::infrastructure::{InfraError, InfraResult};

/// Sent as `X-API-KEY`; header names are case-insensitive.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Connection parameters for [`WorkflowsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Explicit key wins over the one resolved by settings.
    pub fn from_settings(settings: &Settings, api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key
                .map(str::to_string)
                .or_else(|| settings.api_key.clone()),
            base_url: settings.base_url.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

/// Client for the ETLR workflows API.
#[derive(Debug, Clone)]
pub struct WorkflowsClient {
    http: Client,
    base_url: String,
}

impl WorkflowsClient {
    /// Build a client; fails if no API key is available.
    pub fn new(config: ClientConfig) -> InfraResult<Self> {
        let api_key = config
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| InfraError::Config {
                message: "API key not provided. Set ETLR_API_KEY environment variable or pass --api-key.".into(),
            })?;

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&api_key).map_err(|e| InfraError::Config {
            message: format!("invalid API key: {}", e),
        })?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| InfraError::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

impl WorkflowApi for WorkflowsClient {
    #[instrument(skip(self, request), fields(action = request.action()))]
    fn request(&self, request: &WorkflowRequest) -> InfraResult<Value> {
        debug!("POST {}", self.base_url);
        let response = self
            .http
            .post(&self.base_url)
            .json(request)
            .send()
            .map_err(InfraError::transport)?;

        let status = response.status();
        let body = response.text().map_err(InfraError::transport)?;
        debug!("response status={} bytes={}", status, body.len());

        let data: Value = serde_json::from_str(&body).unwrap_or_else(|_| json!({ "text": body }));

        if !status.is_success() {
            let message = match data.get("error") {
                Some(Value::String(msg)) => msg.clone(),
                Some(other) if !other.is_null() => other.to_string(),
                _ => format!("HTTP {}", status.as_u16()),
            };
            let details = data.get("details").filter(|d| !d.is_null()).cloned();
            return Err(InfraError::Api {
                message,
                status: Some(status.as_u16()),
                details,
            });
        }

        Ok(data)
    }
}
