use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP 404. The search pipeline recodes this as zero results.
    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    /// Any other non-2xx status. The display text is what users see in the
    /// error state, so it stays short.
    #[error("API error: {status} {reason}")]
    UnexpectedStatus {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("cannot map store record: {reason}")]
    Mapping { reason: String },
}
