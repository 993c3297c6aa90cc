//! Bearer-token resolution for the Metadata API.
//!
//! Resolution order is fixed: an explicit value supplied at process start
//! (`--token`) wins over the environment variable fallback. The resolver
//! re-reads the environment on every call, so a token rotated externally
//! takes effect on the next invocation without a restart.

use thiserror::Error;

/// Default environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "XANO_API_TOKEN";

/// Errors from credential resolution.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No usable token from either source.
    #[error("no API token provided: pass --token or set {env_var}")]
    Missing { env_var: String },
}

/// Resolves the bearer token for each outbound request.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    explicit: Option<String>,
    env_var: String,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CredentialResolver {
    /// Create a resolver with an optional explicit token.
    pub fn new(explicit: Option<String>) -> Self {
        Self {
            explicit,
            env_var: TOKEN_ENV_VAR.to_string(),
        }
    }

    /// Override the environment variable name (used by tests to avoid
    /// racing on a shared variable).
    pub fn with_env_var(mut self, env_var: impl Into<String>) -> Self {
        self.env_var = env_var.into();
        self
    }

    /// Resolve a non-empty token. Explicit value first, then the
    /// environment. Whitespace-only values count as missing.
    pub fn resolve(&self) -> Result<String, CredentialError> {
        if let Some(token) = &self.explicit {
            if !token.trim().is_empty() {
                return Ok(token.clone());
            }
        }

        if let Ok(token) = std::env::var(&self.env_var) {
            if !token.trim().is_empty() {
                return Ok(token);
            }
        }

        Err(CredentialError::Missing {
            env_var: self.env_var.clone(),
        })
    }
}
