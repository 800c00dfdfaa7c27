//! Network transport behind the provider.
//!
//! The provider never talks HTTP directly; it hands a [`JsonRequest`] to a
//! [`Transport`] and consumes the parsed response. [`HttpTransport`] is the
//! default implementation: one `reqwest` client with a configured user agent,
//! resolving service-relative paths against a base URL. Retry, backoff, and
//! timeout policy belong here (or in a custom `Transport`), never in the
//! provider.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};
use url::Url;

use crate::error::Error;

/// One outbound JSON request: method, service-relative path, optional body.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// The network collaborator the provider dispatches through.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue exactly one request, returning the parsed JSON body when the
    /// response carries one.
    ///
    /// # Errors
    ///
    /// Implementations surface connection failures as [`Error::Transport`]
    /// and non-success statuses as [`Error::Service`].
    async fn fetch_json(&self, request: JsonRequest) -> Result<Option<Value>, Error>;
}

fn service_error_message(body: &Value) -> &str {
    body.get("error").and_then(Value::as_str).unwrap_or("")
}

/// Resolve a service-relative path against a base URL.
///
/// # Errors
///
/// Returns an error if `base_url` cannot be parsed, has no host, or uses an
/// unsupported scheme.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<String, Error> {
    let url = Url::parse(base_url).map_err(|e| Error::BaseUrl(e.to_string()))?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| Error::BaseUrl("no host specified".to_string()))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => return Err(Error::BaseUrl(format!("unsupported scheme {scheme}"))),
        },
    };

    let endpoint_url = format!("{scheme}://{host}:{port}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}

/// Default HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for the application at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(user_agent: &str, base_url: impl Into<String>) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(Error::transport)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_json(&self, request: JsonRequest) -> Result<Option<Value>, Error> {
        let url = endpoint_url(&self.base_url, &request.path)?;

        let span = info_span!(
            "provider.fetch_json",
            http.method = %request.method,
            url = %url
        );
        async {
            let mut builder = self.client.request(request.method.clone(), &url);
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
            let response = builder.send().await.map_err(Error::transport)?;

            let status = response.status();
            let bytes = response.bytes().await.map_err(Error::transport)?;

            if !status.is_success() {
                let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
                return Err(Error::Service {
                    url,
                    status,
                    message: service_error_message(&body).to_string(),
                });
            }

            if bytes.is_empty() {
                return Ok(None);
            }
            Ok(Some(serde_json::from_slice(&bytes)?))
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{endpoint_url, service_error_message};
    use crate::error::Error;
    use anyhow::{anyhow, Result};
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn endpoint_url_defaults_http_port() -> Result<()> {
        let url = endpoint_url("http://example.com", "/auth/providers/p/register")?;
        assert_eq!(url, "http://example.com:80/auth/providers/p/register");
        Ok(())
    }

    #[test]
    fn endpoint_url_defaults_https_port() -> Result<()> {
        let url = endpoint_url("https://example.com", "/auth/providers/p/register")?;
        assert_eq!(url, "https://example.com:443/auth/providers/p/register");
        Ok(())
    }

    #[test]
    fn endpoint_url_rejects_unsupported_scheme() -> Result<()> {
        let err = endpoint_url("ftp://example.com", "/x")
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.to_string().contains("unsupported scheme"));
        Ok(())
    }

    #[test]
    fn service_errors_format_like_the_wire() {
        let err = Error::Service {
            url: "http://example.com:80/x".to_string(),
            status: StatusCode::CONFLICT,
            message: service_error_message(&json!({"error": "name already in use"})).to_string(),
        };
        assert_eq!(
            err.to_string(),
            "http://example.com:80/x - 409 Conflict, name already in use"
        );
    }
}
