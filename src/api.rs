// API client module: a small blocking HTTP client that talks to the URL
// shortener REST endpoint. One request per call, no retries; transport
// defaults decide timeouts.

use crate::config::Config;
use crate::error::{Result, ShortenerError};
use log::debug;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

/// The two operations the tool needs from the service. The resolver only
/// talks to this trait so it can run against a stub.
pub trait UrlShortener {
    fn shorten(&self, url: &str, key: &str) -> Result<ShortenResult>;
    fn expand(&self, url: &str, key: &str) -> Result<ExpandResult>;
}

/// Blocking client bound to one endpoint.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ShortenRequest<'a> {
    long_url: &'a str,
}

/// Response of the shorten call. `id` is the short URL; `kind` and other
/// extra fields are dropped.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResult {
    pub id: String,
    #[serde(default)]
    pub long_url: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpandResult {
    pub long_url: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Google-style error envelope: `{"error": {"code": 400, "message": "..."}}`.
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ShortenerError::Client(e.to_string()))?;
        Ok(ApiClient {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone())
    }
}

impl UrlShortener for ApiClient {
    /// POST `{"longUrl": url}` with the key as a query credential.
    fn shorten(&self, url: &str, key: &str) -> Result<ShortenResult> {
        debug!("shorten {} via {}", url, self.endpoint);
        let res = self
            .client
            .post(&self.endpoint)
            .query(&[("key", key)])
            .json(&ShortenRequest { long_url: url })
            .send()
            .map_err(transport_error)?;
        parse_body(res)
    }

    /// GET with `shortUrl=url` and the key as query parameters.
    fn expand(&self, url: &str, key: &str) -> Result<ExpandResult> {
        debug!("expand {} via {}", url, self.endpoint);
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[("shortUrl", url), ("key", key)])
            .send()
            .map_err(transport_error)?;
        parse_body(res)
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    let body = res.text().map_err(transport_error)?;
    if !status.is_success() {
        return Err(ShortenerError::Api {
            status: status.as_u16(),
            message: error_message(&body, status.canonical_reason()),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    reason.unwrap_or("unknown error").to_string()
}

fn transport_error(err: reqwest::Error) -> ShortenerError {
    let detail = error_chain(&err);
    debug!("transport failure: {}", detail);
    if is_host_not_found(&detail) {
        ShortenerError::HostNotFound(detail)
    } else {
        ShortenerError::Network(detail)
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(e) = source {
        parts.push(e.to_string());
        source = e.source();
    }
    parts.join(": ")
}

// hyper reports resolver failures as "dns error"; the OS message underneath
// varies by platform.
fn is_host_not_found(detail: &str) -> bool {
    let lower = detail.to_ascii_lowercase();
    [
        "dns error",
        "failed to lookup address",
        "name or service not known",
        "no such host",
        "nodename nor servname",
        "temporary failure in name resolution",
    ]
    .iter()
    .any(|needle| lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_result_ignores_kind() {
        let r: ShortenResult =
            serde_json::from_str(r#"{"kind":"urlshortener#url","id":"http://goo.gl/fbsS","longUrl":"http://www.google.com/"}"#)
                .unwrap();
        assert_eq!(r.id, "http://goo.gl/fbsS");
        assert_eq!(r.long_url.as_deref(), Some("http://www.google.com/"));
    }

    #[test]
    fn expand_result_requires_long_url() {
        let r: ExpandResult =
            serde_json::from_str(r#"{"kind":"urlshortener#url","longUrl":"http://www.google.com/","status":"OK"}"#)
                .unwrap();
        assert_eq!(r.long_url, "http://www.google.com/");
        assert_eq!(r.status.as_deref(), Some("OK"));
        assert!(serde_json::from_str::<ExpandResult>(r#"{"id":"x"}"#).is_err());
    }

    #[test]
    fn request_body_uses_camel_case() {
        let body = serde_json::to_value(ShortenRequest {
            long_url: "http://example.com",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"longUrl": "http://example.com"}));
    }

    #[test]
    fn error_message_prefers_envelope() {
        let body = r#"{"error":{"errors":[],"code":400,"message":"Bad Request"}}"#;
        assert_eq!(error_message(body, Some("Bad Request")), "Bad Request");
        assert_eq!(error_message("quota exceeded\n", None), "quota exceeded");
        assert_eq!(
            error_message("", Some("Service Unavailable")),
            "Service Unavailable"
        );
    }

    #[test]
    fn resolver_failures_are_host_not_found() {
        assert!(is_host_not_found(
            "error sending request: error trying to connect: dns error: failed to lookup address information: Name or service not known"
        ));
        assert!(!is_host_not_found(
            "error sending request: error trying to connect: tcp connect error: Connection refused (os error 111)"
        ));
    }
}
