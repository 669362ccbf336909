use std::fmt;

/// Failures surfaced to the zone driver and `main`.
#[derive(Debug)]
pub enum Error {
    /// The API rejected a request or could not be reached.
    ProviderError(String),
    /// The token was refused (401/403).
    CredentialError(String),
    /// A zone or record id the API does not know.
    NotFound(String),
    /// The API answered 2xx with a body that is not a v4 envelope.
    InvalidResponse(String),
    ConfigError(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ProviderError(msg) => write!(f, "Provider error: {msg}"),
            Error::CredentialError(msg) => write!(f, "Credential error: {msg}"),
            Error::NotFound(msg) => write!(f, "Not found: {msg}"),
            Error::InvalidResponse(msg) => write!(f, "Invalid API response: {msg}"),
            Error::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}
