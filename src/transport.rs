//! Transport seam between the request builder and the network.

use crate::config::{GatewayCredentials, HttpConfig};
use crate::error::TransportError;
use crate::request::{Method, RequestIntent};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Header carrying the optional gateway API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Executes a [`RequestIntent`] and returns the decoded response body.
///
/// Authentication, timeouts and retries are the implementor's concern.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, intent: &RequestIntent) -> Result<Value, TransportError>;
}

/// `reqwest`-backed transport for a single gateway.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ReqwestTransport {
    pub fn new(credentials: &GatewayCredentials, http: &HttpConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(http.timeout_secs))
            .danger_accept_invalid_certs(http.allow_insecure_ssl)
            .build()?;

        Ok(Self {
            client,
            base_url: credentials.url.trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone(),
        })
    }

    /// Probe the gateway root to confirm the credentials point at a live gateway.
    pub async fn check_credentials(&self) -> Result<Value, TransportError> {
        let url = format!("{}/", self.base_url);
        self.send(&RequestIntent {
            method: Method::Get,
            url,
            body: None,
        })
        .await
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, intent: &RequestIntent) -> Result<Value, TransportError> {
        let mut req = match intent.method {
            Method::Get => self.client.get(&intent.url),
            Method::Post => self.client.post(&intent.url),
        };

        if let Some(ref key) = self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        if let Some(ref body) = intent.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        debug!(status = status.as_u16(), url = %intent.url, "gateway responded");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(parse_body(&text))
    }
}

/// Decode a response body. Empty bodies become `{}`; non-JSON text is kept
/// as a JSON string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
