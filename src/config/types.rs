use super::defaults::{DEFAULT_SESSION, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};

// ============================================================================
// Gateway Credentials
// ============================================================================

/// Connection details for one WhatsApp-Web-JS gateway, read once per batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayCredentials {
    /// Base URL of the gateway, e.g. `http://localhost:3000`.
    #[serde(default)]
    pub url: String,
    /// Gateway-side session name.
    #[serde(default = "default_session")]
    pub session: String,
    /// Sent as `x-api-key` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_session() -> String {
    DEFAULT_SESSION.to_string()
}

impl Default for GatewayCredentials {
    fn default() -> Self {
        Self {
            url: String::new(),
            session: default_session(),
            api_key: None,
        }
    }
}

// ============================================================================
// HTTP Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub allow_insecure_ssl: bool,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            allow_insecure_ssl: false,
        }
    }
}
