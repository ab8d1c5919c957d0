//! HTTP client for the `ConsultaVD` REST backend.
//!
//! Wraps `reqwest` with backend-specific error handling and typed response
//! deserialization. Endpoint methods live in the `search`, `records`,
//! `export` and `admin` modules; this module owns construction, URL
//! building and the shared request path.

use std::time::Duration;

use consultavd_core::AppConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_DISPOSITION};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::types::Export;

const DEFAULT_USER_AGENT: &str = "consultavd/0.1 (command-center)";

/// Client for the `ConsultaVD` REST API.
///
/// Use [`ApiClient::from_config`] in the binary or [`ApiClient::new`] to
/// point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for `base_url` with the default user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        Self::build(base_url, timeout_secs, DEFAULT_USER_AGENT, None)
    }

    /// Creates a client from the loaded application configuration, sending
    /// `CONSULTAVD_API_TOKEN` as a bearer token when set.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`], plus [`ClientError::InvalidBaseUrl`] when
    /// the token cannot be used as a header value.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::build(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.api_token.as_deref(),
        )
    }

    fn build(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        token: Option<&str>,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                ClientError::InvalidBaseUrl {
                    url: base_url.to_owned(),
                    reason: format!("API token is not a valid header value: {e}"),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        // Normalise to exactly one trailing slash so path segments are
        // appended after any prefix the backend is mounted under.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL from raw path segments.
    ///
    /// Each segment is percent-encoded, so store ids and carrier names may
    /// contain `/`, spaces or accents.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// [`ApiClient::endpoint`] with query parameters appended.
    pub(crate) fn endpoint_with_query(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, ClientError> {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.client.post(url)
    }

    pub(crate) fn put(&self, url: Url) -> RequestBuilder {
        self.client.put(url)
    }

    pub(crate) fn delete(&self, url: Url) -> RequestBuilder {
        self.client.delete(url)
    }

    /// Sends `request`, asserts a 2xx status and deserializes the body.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx status, carrying the
    ///   backend's `detail` message when the body has one.
    /// - [`ClientError::Deserialize`] if the body does not match `T`.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                context: context.to_owned(),
                detail: error_detail(&body),
            });
        }

        tracing::debug!(
            context,
            status = status.as_u16(),
            bytes = body.len(),
            "response received"
        );
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Sends `request` and returns the body as a downloaded file.
    ///
    /// # Errors
    ///
    /// [`ClientError::Http`] on network failure, or
    /// [`ClientError::UnexpectedStatus`] on a non-2xx status.
    pub(crate) async fn download(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Export, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                context: context.to_owned(),
                detail: error_detail(&body),
            });
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_filename);
        let content = response.bytes().await?.to_vec();
        tracing::debug!(
            context,
            bytes = content.len(),
            ?filename,
            "download received"
        );
        Ok(Export { filename, content })
    }
}

/// `filename` parameter of a `Content-Disposition` header.
fn attachment_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|part| part.trim().strip_prefix("filename="))
        .map(|name| name.trim_matches('"'))
        .find(|name| !name.is_empty())
        .map(str::to_owned)
}

/// Extracts the backend's `detail` (or `error`) message from an error body.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::to_owned)
}
