use reqwest::StatusCode;
use thiserror::Error;

use crate::error::Error;

#[derive(Error, Debug)]
pub enum CloudflareProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl CloudflareProviderError {
    /// Classify a failed response. `body` is the response text, pretty-printed
    /// when it is JSON.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                CloudflareProviderError::Credential(body)
            }
            StatusCode::NOT_FOUND => CloudflareProviderError::NotFound(body),
            StatusCode::TOO_MANY_REQUESTS => CloudflareProviderError::RateLimited(body),
            _ => CloudflareProviderError::Api { status, body },
        }
    }
}

pub fn pretty_body(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| raw.to_string())
}

pub fn map_error(e: CloudflareProviderError) -> Error {
    use CloudflareProviderError::*;
    match e {
        Http(err) => Error::ProviderError(err.to_string()),
        Api { status, body } => Error::ProviderError(format!("{status}: {body}")),
        Credential(msg) => Error::CredentialError(msg),
        NotFound(msg) => Error::NotFound(msg),
        RateLimited(msg) => Error::ProviderError(format!("rate limited: {msg}")),
        Decode(msg) => Error::InvalidResponse(msg),
    }
}
