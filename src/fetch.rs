//! Page fetching.
//!
//! The extraction core only needs bytes and a declared content type for a
//! URL. [`HttpFetcher`] is that capability; [`SimpleHttpFetcher`] is the
//! default implementation over `reqwest`. Other fetchers (a headless browser
//! that executes scripts, a fixture store in tests) plug in through
//! [`Intent::fetcher`](crate::Intent::fetcher).

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};

/// User agent sent by the default client.
pub const USER_AGENT: &str = concat!("rs-opengraph/", env!("CARGO_PKG_VERSION"));

/// Maximum redirects followed by the default client.
const MAX_REDIRECTS: usize = 10;

/// A fetched document.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    /// Declared `Content-Type`, if the transport has one.
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResponse {
    /// A response declaring `text/html`.
    #[must_use]
    pub fn html(body: impl Into<Bytes>) -> Self {
        Self {
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.into(),
        }
    }
}

/// Capability that retrieves the document at a URL.
///
/// Implementations decide how transport failures and HTTP statuses map to
/// errors. Retries, if any, belong here too; the core never retries.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, url: &Url) -> Result<FetchResponse>;
}

/// Check that a declared content type is HTML.
///
/// A missing declaration is accepted.
pub fn ensure_html(content_type: Option<&str>) -> Result<()> {
    match content_type {
        Some(value) if !is_html(value) => Err(Error::UnsupportedContentType),
        _ => Ok(()),
    }
}

fn is_html(content_type: &str) -> bool {
    content_type
        .trim_start()
        .get(..9)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("text/html"))
}

/// Plain HTTP `GET` through a `reqwest` client.
#[derive(Debug, Clone)]
pub struct SimpleHttpFetcher {
    client: Client,
}

impl SimpleHttpFetcher {
    /// Wraps an existing client (proxies, TLS settings, per-client timeouts).
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client with the crate user agent and a connect timeout.
    pub fn with_defaults() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpFetcher for SimpleHttpFetcher {
    async fn get(&self, url: &Url) -> Result<FetchResponse> {
        debug!(url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, %status, "non-success status");
            return Err(Error::Fetch(format!("{url} returned {status}")));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Reject before downloading a body we cannot use.
        if let Err(err) = ensure_html(Some(content_type.as_deref().unwrap_or_default())) {
            debug!(url = %url, content_type = ?content_type, "rejecting non-HTML response");
            return Err(err);
        }

        let body = response.bytes().await?;
        debug!(url = %url, bytes = body.len(), "fetched");
        Ok(FetchResponse { content_type, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_content_types() {
        assert!(ensure_html(Some("text/html")).is_ok());
        assert!(ensure_html(Some("text/html; charset=utf-8")).is_ok());
        assert!(ensure_html(Some("TEXT/HTML")).is_ok());
        assert!(ensure_html(None).is_ok());
    }

    #[test]
    fn test_non_html_content_types() {
        for value in ["application/json", "text/plain", "", "text/htm"] {
            let err = ensure_html(Some(value)).unwrap_err();
            assert_eq!(err.to_string(), "content type must be text/html");
        }
    }

    #[tokio::test]
    async fn test_simple_fetcher_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<title>hi</title>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = SimpleHttpFetcher::with_defaults().unwrap();
        let url = Url::parse(&server.url()).unwrap();
        let response = fetcher.get(&url).await.unwrap();

        assert_eq!(response.body.as_ref(), b"<title>hi</title>");
        assert_eq!(response.content_type.as_deref(), Some("text/html; charset=utf-8"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_simple_fetcher_rejects_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let fetcher = SimpleHttpFetcher::with_defaults().unwrap();
        let url = Url::parse(&server.url()).unwrap();
        let err = fetcher.get(&url).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedContentType));
    }

    #[tokio::test]
    async fn test_simple_fetcher_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_header("content-type", "text/html")
            .create_async()
            .await;

        let fetcher = SimpleHttpFetcher::with_defaults().unwrap();
        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();
        let err = fetcher.get(&url).await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }
}
