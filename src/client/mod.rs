//! HTTP transport for the backend REST API.
//!
//! One [`ApiClient`] is built from config and injected into every service
//! and controller. All backend endpoints are plain GETs returning JSON, so
//! the client exposes exactly that: [`ApiClient::get`] for opaque payloads
//! and [`ApiClient::get_as`] for typed ones.
//!
//! Failures carry the endpoint (and HTTP status when the server answered)
//! in their context, and every completed request is appended to the
//! request history log — success or failure, one entry per request.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::OpsdeckConfig;
use crate::history::{self, RequestLogEntry};

/// Synchronous JSON client for the backend API.
///
/// Cheap to clone; each service/controller owns its own copy. Created
/// fresh per invocation — no connection pooling, no cross-request state.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    log_requests: bool,
}

impl ApiClient {
    /// Build a client from the resolved config.
    pub fn from_config(config: &OpsdeckConfig) -> Self {
        Self {
            base_url: config.backend.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.backend.timeout_ms),
            log_requests: config.history.enabled,
        }
    }

    /// Build a client against an explicit base URL, with history logging
    /// disabled. Used by tests talking to a stub backend.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            log_requests: false,
        }
    }

    /// Issue a GET and return the response body as opaque JSON.
    ///
    /// Backend payloads for lifecycle commands are backend-defined; they
    /// pass through to the view unmodified.
    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.get_as(path, query)
    }

    /// Issue a GET and deserialize the response body as `T`.
    ///
    /// Exactly one resolution per request: `Ok` with the parsed body, or
    /// `Err` naming the endpoint. Transport errors and non-success HTTP
    /// statuses are both `Err`; no retry, no recovery.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let endpoint = endpoint_label(path, query);
        let url = self.url_for(path, query);

        let started = Instant::now();
        let result = ureq::get(&url).timeout(self.timeout).call();
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(resp) => {
                self.record(&endpoint, Some(resp.status()), duration_ms, true, None);
                resp.into_json::<T>()
                    .with_context(|| format!("failed to parse JSON response from {endpoint}"))
            }
            Err(ureq::Error::Status(code, _)) => {
                let msg = format!("backend returned HTTP {code} for {endpoint}");
                self.record(&endpoint, Some(code), duration_ms, false, Some(&msg));
                Err(anyhow::anyhow!(msg))
            }
            Err(err) => {
                let msg = err.to_string();
                self.record(&endpoint, None, duration_ms, false, Some(&msg));
                Err(anyhow::Error::new(err))
                    .with_context(|| format!("request to {endpoint} failed"))
            }
        }
    }

    /// The configured base URL (trailing slash stripped).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full request URL.
    ///
    /// On Windows, "localhost" may resolve IPv6 (::1) first and stall when
    /// the backend only binds IPv4. Use 127.0.0.1 directly.
    fn url_for(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}/{}", self.base_url, path);
        append_query(&mut url, query);
        url.replace("://localhost", "://127.0.0.1")
    }

    /// Append a request log entry (best-effort; never fails the request).
    fn record(
        &self,
        endpoint: &str,
        status: Option<u16>,
        duration_ms: u64,
        ok: bool,
        error: Option<&str>,
    ) {
        if !self.log_requests {
            return;
        }
        history::append(&RequestLogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            endpoint: endpoint.to_string(),
            status,
            duration_ms,
            ok,
            error: error.map(str::to_string),
        });
    }
}

/// The endpoint as reported in errors and the history log: path plus
/// query string, without the base URL.
fn endpoint_label(path: &str, query: &[(&str, String)]) -> String {
    let mut label = path.to_string();
    append_query(&mut label, query);
    label
}

/// Query values are percent-encoded; keys are static identifiers and go
/// through verbatim.
fn append_query(target: &mut String, query: &[(&str, String)]) {
    for (i, (key, value)) in query.iter().enumerate() {
        target.push(if i == 0 { '?' } else { '&' });
        target.push_str(key);
        target.push('=');
        target.push_str(&encode_component(value));
    }
}

/// Everything outside RFC 3986 unreserved gets escaped. Covers both path
/// segments and query values, so `/`, `?`, `&`, `=`, and spaces in
/// backend-supplied identifiers can't break the request line.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a value for use as a path segment or query value.
///
/// Callers interpolating identifiers into paths (topic names, user ids)
/// must go through this; the client encodes query values itself.
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(1))
    }

    #[test]
    fn url_without_query() {
        let c = client("http://127.0.0.1:8080");
        assert_eq!(
            c.url_for("api/service/status", &[]),
            "http://127.0.0.1:8080/api/service/status"
        );
    }

    #[test]
    fn url_with_query_pairs_in_order() {
        let c = client("http://127.0.0.1:8080");
        let url = c.url_for(
            "api/users",
            &[("size", "50".to_string()), ("page", "2".to_string())],
        );
        assert_eq!(url, "http://127.0.0.1:8080/api/users?size=50&page=2");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let c = client("http://127.0.0.1:8080/");
        assert_eq!(c.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn localhost_is_rewritten_to_ipv4() {
        let c = client("http://localhost:8080");
        assert_eq!(
            c.url_for("api/connections/topics", &[]),
            "http://127.0.0.1:8080/api/connections/topics"
        );
    }

    #[test]
    fn endpoint_label_includes_query() {
        let label = endpoint_label("api/service", &[("command", "start".to_string())]);
        assert_eq!(label, "api/service?command=start");
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let c = client("http://127.0.0.1:8080");
        let url = c.url_for("api/queries/usersWithInterests", &[
            ("topics", "big data".to_string()),
            ("topics", "a&b=c".to_string()),
        ]);
        assert_eq!(
            url,
            "http://127.0.0.1:8080/api/queries/usersWithInterests?topics=big%20data&topics=a%26b%3Dc"
        );
    }

    #[test]
    fn encode_component_keeps_unreserved_bytes() {
        assert_eq!(encode_component("u42"), "u42");
        assert_eq!(encode_component("a-b_c.d~e"), "a-b_c.d~e");
    }

    #[test]
    fn encode_component_escapes_delimiters() {
        assert_eq!(encode_component("big data"), "big%20data");
        assert_eq!(encode_component("a/b?c"), "a%2Fb%3Fc");
    }
}
