use thiserror::Error;

/// Errors returned by the `ConsultaVD` API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with `"success": false` and a message.
    #[error("API error: {0}")]
    Api(String),

    /// A successful envelope arrived without its `data` field.
    #[error("response for {context} carried no data")]
    MissingData { context: String },

    /// Non-2xx HTTP status. `detail` is the backend's `detail` field when present.
    #[error("unexpected status {status} for {context}{}", detail_suffix(.detail.as_deref()))]
    UnexpectedStatus {
        status: u16,
        context: String,
        detail: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL cannot be parsed or cannot carry path segments.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(": {d}")).unwrap_or_default()
}
