//! Metadata API configuration.
//!
//! Configuration is constructed once at process start (from CLI flags and
//! environment) and passed explicitly into the bridge. Nothing is looked
//! up from ambient globals mid-call.

use serde::{Deserialize, Serialize};

/// Default Xano Metadata API root.
pub const DEFAULT_API_BASE: &str = "https://app.xano.com/api:meta";

/// Configuration for outbound Metadata API requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL. Tool routes are appended to this root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. The remote API is untrusted for
    /// latency, so every call carries an explicit bound.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Base URL without a trailing slash, ready for path joining.
    pub fn trimmed_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
