//! Error types for rs-opengraph.
//!
//! This module defines the errors returned by fetching, parsing, walking
//! and URL resolution.

/// Message carried by [`Error::UnsupportedContentType`].
pub const CONTENT_TYPE_MESSAGE: &str = "content type must be text/html";

/// Error type for Open Graph extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source URL (or the base used for resolution) could not be parsed.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// The offending input.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Transport-level failure reported by the fetcher.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The response does not declare an HTML content type.
    #[error("content type must be text/html")]
    UnsupportedContentType,

    /// The fetch did not complete before the caller's deadline.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// The caller cancelled the fetch.
    #[error("context canceled")]
    Cancelled,

    /// The byte stream could not be turned into a document.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// A numeric structured property held a non-numeric value.
    #[error("invalid value {value:?} for {property}")]
    Contribution {
        /// The `og:*` property being applied.
        property: String,
        /// The raw `content` attribute.
        value: String,
    },

    /// A URL field could not be made absolute.
    #[error("cannot resolve URL {0:?}")]
    Resolution(String),
}

impl Error {
    pub(crate) fn invalid_url(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(err.to_string())
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
