use std::time::Duration;

use reqwest::{Client, Request, StatusCode, header};
use tokio::time::Instant;

use crate::args::HttpMethod;
use crate::error::HttpError;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("apiprobe/", env!("CARGO_PKG_VERSION"));

/// Everything needed to issue one request. Built by the command handlers
/// after interpolation and validation.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub auth: String,
    pub timeout: Duration,
}

/// A completed request/response exchange. Latency covers dispatch through
/// full consumption of the response body.
#[derive(Debug)]
pub struct Exchange {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub latency: Duration,
}

/// Caller-owned request executor wrapping a single reusable HTTP client.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// Creates an executor with a fresh HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new() -> Result<Self, HttpError> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| HttpError::BuildClient { source: err })?;
        Ok(Self { client })
    }

    /// Issues one exchange and reads the full response body before the
    /// latency clock stops.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be built, or on transport
    /// failure (refused connection, DNS, TLS, per-request timeout).
    pub async fn send(&self, spec: &RequestSpec) -> Result<Exchange, HttpError> {
        let request = self.build_request(spec)?;
        let start = Instant::now();
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| HttpError::Transport { source: err })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| HttpError::Transport { source: err })?;
        let latency = start.elapsed();
        Ok(Exchange {
            status,
            body: body.to_vec(),
            latency,
        })
    }

    pub(in crate::http) fn build_request(&self, spec: &RequestSpec) -> Result<Request, HttpError> {
        let mut builder = match spec.method {
            HttpMethod::Get => self.client.get(&spec.url),
            HttpMethod::Post => self.client.post(&spec.url),
            HttpMethod::Patch => self.client.patch(&spec.url),
            HttpMethod::Put => self.client.put(&spec.url),
            HttpMethod::Delete => self.client.delete(&spec.url),
        };
        builder = builder.timeout(spec.timeout);
        if !spec.body.is_empty() {
            if !has_content_type(&spec.headers) {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
            }
            builder = builder.body(spec.body.clone());
        }
        for (key, value) in &spec.headers {
            builder = builder.header(key, value);
        }
        if !spec.auth.is_empty() {
            builder = builder.header(header::AUTHORIZATION, authorization_value(&spec.auth));
        }
        builder
            .build()
            .map_err(|err| HttpError::BuildRequest { source: err })
    }
}

fn has_content_type(headers: &[(String, String)]) -> bool {
    headers
        .iter()
        .any(|(key, _)| key.eq_ignore_ascii_case("content-type"))
}

/// Normalizes a credential into an Authorization header value. Recognized
/// scheme prefixes pass through unchanged; anything else becomes a bearer
/// token.
#[must_use]
pub fn authorization_value(credential: &str) -> String {
    if credential.starts_with("Bearer ") || credential.starts_with("Basic ") {
        credential.to_owned()
    } else {
        format!("Bearer {}", credential)
    }
}
