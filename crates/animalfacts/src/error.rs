//! Error types for Animalfacts

use thiserror::Error;

/// Errors raised while loading configuration
///
/// These are fatal: the process should stop before issuing any request.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} is not set. Please check your .env file.")]
    Missing(&'static str),

    /// BASE_URL could not be parsed as an http(s) URL
    #[error("Invalid BASE_URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Unknown value for ANIMALS_AUTH_SCHEME
    #[error("Invalid auth scheme {0:?}: must be x-api-key or bearer")]
    InvalidAuthScheme(String),

    /// Header name is not a valid HTTP header name
    #[error("Invalid API key header name {0:?}")]
    InvalidHeaderName(String),

    /// ANIMALS_TIMEOUT_SECS is not a positive integer
    #[error("Invalid timeout {0:?}: must be a positive number of seconds")]
    InvalidTimeout(String),
}

/// Errors raised when building a lookup query
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Name is empty after trimming
    #[error("Animal name cannot be empty.")]
    Empty,
}

/// Errors that can occur during a fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// API key cannot be sent in the configured header
    #[error("Invalid authentication header: {0}")]
    InvalidAuthHeader(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    Connect(#[source] reqwest::Error),

    /// Other transport-level failure
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("HTTP error occurred: status {status}")]
    HttpStatus { status: u16 },

    /// Body was not valid JSON
    #[error("Malformed JSON body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// Body was JSON but not a record list or envelope
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err)
        } else if err.is_connect() {
            FetchError::Connect(err)
        } else {
            FetchError::Request(err)
        }
    }

    /// True for network-level failures (no usable HTTP response)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::ClientBuild(_)
                | FetchError::Timeout(_)
                | FetchError::Connect(_)
                | FetchError::Request(_)
        )
    }

    /// Status code for HTTP status failures
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while rendering records to HTML
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Template has nowhere to put the records
    #[error("Template does not contain the {0} placeholder")]
    MissingPlaceholder(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::Missing("API_KEY").to_string(),
            "API_KEY is not set. Please check your .env file."
        );
        assert_eq!(
            ConfigError::InvalidAuthScheme("basic".into()).to_string(),
            "Invalid auth scheme \"basic\": must be x-api-key or bearer"
        );
        assert_eq!(QueryError::Empty.to_string(), "Animal name cannot be empty.");
        assert_eq!(
            FetchError::HttpStatus { status: 404 }.to_string(),
            "HTTP error occurred: status 404"
        );
    }

    #[test]
    fn test_status_and_transport() {
        let err = FetchError::HttpStatus { status: 503 };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_transport());

        let err = FetchError::UnexpectedShape("number".into());
        assert_eq!(err.status(), None);
        assert!(!err.is_transport());
    }
}
