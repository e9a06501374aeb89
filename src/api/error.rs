//! Errors raised while talking to the backend

use thiserror::Error;

/// Failure of a single API request
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed objects log: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;
