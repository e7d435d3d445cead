//! Fetch orchestration.
//!
//! Ties the pipeline together: fetch (bounded by the intent's deadline and
//! cancellation token), content-type check, decode, parse, walk, and the
//! post-walk favicon default.

use std::io::Read;
use std::sync::Arc;

use dom_query::NodeRef;
use tracing::{debug, info, warn};
use url::Url;

use crate::dom;
use crate::encoding;
use crate::error::{Error, Result};
use crate::fetch::{ensure_html, FetchResponse, HttpFetcher, SimpleHttpFetcher};
use crate::options::Intent;
use crate::result::OpenGraph;
use crate::walk;

/// Fetch `url` and extract its Open Graph metadata with the default intent.
pub async fn fetch(url: &str) -> Result<OpenGraph> {
    fetch_with(url, Intent::default()).await
}

/// Fetch `url` and extract its Open Graph metadata under `intent`.
///
/// `intent.url` is replaced by `url` and ends up in
/// [`OpenGraph::source_url`]. A malformed `url` fails immediately
/// with [`Error::InvalidUrl`]; no result is produced for any error.
pub async fn fetch_with(url: &str, mut intent: Intent) -> Result<OpenGraph> {
    let parsed = Url::parse(url).map_err(|err| Error::invalid_url(url, err))?;
    intent.url = url.to_string();

    let fetcher: Arc<dyn HttpFetcher> = match &intent.fetcher {
        Some(fetcher) => Arc::clone(fetcher),
        None => Arc::new(SimpleHttpFetcher::with_defaults()?),
    };

    info!(url, strict = intent.strict, "fetching page");
    let response = bounded_get(fetcher.as_ref(), &parsed, &intent).await?;
    let content_type = response.content_type.as_deref();
    ensure_html(content_type)?;

    let mut og = OpenGraph::parse_bytes(&response.body, content_type, &intent)?;
    if !intent.strict {
        og.apply_default_favicon();
    }

    debug!(
        url,
        title = %og.title,
        images = og.images.len(),
        videos = og.videos.len(),
        audios = og.audios.len(),
        "extracted"
    );
    Ok(og)
}

/// Run the fetch, racing it against the deadline and the cancellation token.
///
/// Whichever fires first wins; a losing fetch is dropped.
async fn bounded_get(fetcher: &dyn HttpFetcher, url: &Url, intent: &Intent) -> Result<FetchResponse> {
    let deadline = async {
        match intent.timeout {
            Some(timeout) => tokio::time::sleep(timeout).await,
            None => std::future::pending::<()>().await,
        }
    };
    let cancelled = async {
        match &intent.cancel {
            Some(token) => token.cancelled().await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = fetcher.get(url) => result,
        () = deadline => {
            warn!(url = %url, timeout = ?intent.timeout, "fetch deadline exceeded");
            Err(Error::DeadlineExceeded)
        }
        () = cancelled => {
            debug!(url = %url, "fetch cancelled");
            Err(Error::Cancelled)
        }
    }
}

impl OpenGraph {
    /// Extract from an HTML string.
    ///
    /// `intent.url` is kept as [`OpenGraph::source_url`]. No favicon default
    /// is applied; that belongs to [`fetch_with`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use rs_opengraph::{Intent, OpenGraph};
    ///
    /// let html = r#"<head>
    ///   <title>Fallback</title>
    ///   <meta property="og:title" content="Hello! Open Graph!!">
    ///   <meta property="og:image" content="/images/01.png">
    ///   <meta property="og:image:width" content="640">
    /// </head>"#;
    /// let og = OpenGraph::parse_html(html, &Intent::default())?;
    /// assert_eq!(og.title, "Hello! Open Graph!!");
    /// assert_eq!(og.images[0].width, 640);
    /// # Ok::<(), rs_opengraph::Error>(())
    /// ```
    pub fn parse_html(html: &str, intent: &Intent) -> Result<Self> {
        let doc = dom::parse(html);
        let mut og = Self::new();
        og.source_url.clone_from(&intent.url);
        og.walk(&doc.root(), intent)?;
        Ok(og)
    }

    /// Extract from raw bytes, decoding with the declared or sniffed charset.
    pub fn parse_bytes(html: &[u8], content_type: Option<&str>, intent: &Intent) -> Result<Self> {
        let decoded = encoding::decode_html(html, content_type);
        Self::parse_html(&decoded, intent)
    }

    /// Extract from a reader. Failing to read is [`Error::Parse`].
    pub fn parse_reader<R: Read>(mut reader: R, intent: &Intent) -> Result<Self> {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|err| Error::Parse(err.to_string()))?;
        Self::parse_bytes(&buf, None, intent)
    }

    /// Walk an already-parsed tree into `self`, trusting the tags `intent`
    /// allows.
    pub fn walk(&mut self, root: &NodeRef, intent: &Intent) -> Result<()> {
        let trusted = intent.trusted_tags();
        walk::walk(root, self, &trusted, intent.strict)
    }
}
