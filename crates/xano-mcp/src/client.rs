//! The request bridge: builds authenticated Metadata API requests for a
//! tool invocation, executes them, and normalizes the outcome.
//!
//! Every invocation gets its own `reqwest::Client` with a bounded
//! timeout, resolves its own credential, and returns its own envelope.
//! No state is shared between concurrent invocations.

use crate::envelope::Envelope;
use crate::error::McpError;
use crate::tools::ToolHandler;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{Map, Value};
use std::time::Duration;
use xano_core::{ApiConfig, CredentialResolver};

/// One segment of a tool's remote-resource path.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Fixed path component.
    Literal(&'static str),
    /// Caller-supplied identifier, interpolated directly (no escaping).
    Arg(&'static str),
}

/// Ordered path template rooted at the API base.
#[derive(Debug, Clone)]
pub struct Route {
    segments: Vec<Segment>,
}

impl Route {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Build the fully-qualified URL. Identifiers are passed through
    /// verbatim; existence and shape are the remote API's problem.
    pub fn url(&self, base: &str, args: &Map<String, Value>) -> Result<String, McpError> {
        let mut url = base.trim_end_matches('/').to_string();
        for segment in &self.segments {
            url.push('/');
            match segment {
                Segment::Literal(part) => url.push_str(part),
                Segment::Arg(name) => {
                    let value = args.get(*name).ok_or_else(|| McpError::InvalidRequest(
                        format!("route argument not supplied: {name}"),
                    ))?;
                    match value {
                        Value::String(s) => url.push_str(s),
                        other => url.push_str(&other.to_string()),
                    }
                }
            }
        }
        Ok(url)
    }
}

/// Human-readable operation labels used in error messages.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Infinitive form, e.g. "get instance details".
    pub label: &'static str,
    /// Gerund form, e.g. "getting instance details".
    pub gerund: &'static str,
}

/// Terminal state of one outbound call.
///
/// All three map to the envelope shape; the distinction only selects the
/// error message wording.
#[derive(Debug)]
pub enum CallOutcome {
    Succeeded(Value),
    RemoteRejected(u16),
    TransportFailed(String),
}

/// A tool backed by a GET against the Metadata API.
pub struct MetaTool {
    config: ApiConfig,
    credentials: CredentialResolver,
    route: Route,
    payload_key: &'static str,
    operation: Operation,
}

impl MetaTool {
    pub fn new(
        config: ApiConfig,
        credentials: CredentialResolver,
        route: Route,
        payload_key: &'static str,
        operation: Operation,
    ) -> Self {
        Self {
            config,
            credentials,
            route,
            payload_key,
            operation,
        }
    }

    /// Issue the GET and classify the outcome. Never returns an error:
    /// everything past credential resolution folds into `CallOutcome`.
    async fn execute(&self, url: &str, token: &str) -> CallOutcome {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.request_timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(e) => return CallOutcome::TransportFailed(e.to_string()),
        };

        let response = match client
            .get(url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return CallOutcome::TransportFailed(e.to_string()),
        };

        let status = response.status();
        if status != StatusCode::OK {
            // Non-200 bodies are not assumed to be well-formed JSON.
            return CallOutcome::RemoteRejected(status.as_u16());
        }

        match response.json::<Value>().await {
            Ok(body) => CallOutcome::Succeeded(body),
            Err(e) => CallOutcome::TransportFailed(e.to_string()),
        }
    }

    fn normalize(&self, outcome: CallOutcome) -> Envelope {
        match outcome {
            CallOutcome::Succeeded(body) => Envelope::success(self.payload_key, body),
            CallOutcome::RemoteRejected(status) => {
                tracing::warn!(operation = self.operation.label, status, "remote rejected request");
                Envelope::failure(format!("Failed to {}: {}", self.operation.label, status))
            }
            CallOutcome::TransportFailed(message) => {
                tracing::warn!(
                    operation = self.operation.label,
                    error = %message,
                    "transport failure"
                );
                Envelope::failure(format!("Error {}: {}", self.operation.gerund, message))
            }
        }
    }
}

#[async_trait]
impl ToolHandler for MetaTool {
    async fn call(&self, args: &Map<String, Value>) -> Result<Envelope, McpError> {
        // Resolved fresh per invocation; fails before any HTTP is issued.
        let token = self.credentials.resolve()?;
        let url = self.route.url(self.config.trimmed_base(), args)?;
        tracing::debug!(operation = self.operation.label, %url, "issuing Metadata API request");
        let outcome = self.execute(&url, &token).await;
        Ok(self.normalize(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_url_interpolates_identifiers() {
        let route = Route::new(vec![
            Segment::Literal("instance"),
            Segment::Arg("instance_name"),
            Segment::Literal("database"),
        ]);
        let url = route
            .url(
                "https://app.xano.com/api:meta",
                &args(&[("instance_name", json!("prod"))]),
            )
            .unwrap();
        assert_eq!(url, "https://app.xano.com/api:meta/instance/prod/database");
    }

    #[test]
    fn test_url_passes_identifiers_through_verbatim() {
        // Empty and odd identifiers are not rejected locally; the remote
        // 4xx is the error signal.
        let route = Route::new(vec![Segment::Literal("instance"), Segment::Arg("instance_name")]);
        let url = route
            .url("https://base", &args(&[("instance_name", json!(""))]))
            .unwrap();
        assert_eq!(url, "https://base/instance/");
    }

    #[test]
    fn test_url_coerces_numeric_identifiers() {
        let route = Route::new(vec![Segment::Literal("instance"), Segment::Arg("instance_name")]);
        let url = route
            .url("https://base", &args(&[("instance_name", json!(42))]))
            .unwrap();
        assert_eq!(url, "https://base/instance/42");
    }

    #[test]
    fn test_url_trims_trailing_base_slash() {
        let route = Route::new(vec![Segment::Literal("instance")]);
        let url = route.url("https://base/", &Map::new()).unwrap();
        assert_eq!(url, "https://base/instance");
    }
}
