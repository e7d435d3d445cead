//! Extraction policy.
//!
//! [`Intent`] describes how a page is fetched and which tags the walk is
//! allowed to trust. It carries no Open Graph meaning of its own.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::fetch::HttpFetcher;

/// HTML tag kinds the walk knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<meta>`
    Meta,
    /// `<title>`
    Title,
    /// `<link>`
    Link,
}

/// Tag name to kind lookup table.
const TAG_TABLE: &[(&str, TagKind)] = &[
    ("meta", TagKind::Meta),
    ("title", TagKind::Title),
    ("link", TagKind::Link),
];

impl TagKind {
    /// Looks up the kind for a lowercase tag name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        TAG_TABLE
            .iter()
            .find(|(tag, _)| *tag == name)
            .map(|(_, kind)| *kind)
    }

    /// The HTML tag name of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Title => "title",
            Self::Link => "link",
        }
    }
}

/// How to fetch, parse and complete an [`OpenGraph`](crate::OpenGraph).
///
/// # Example
///
/// ```rust
/// use rs_opengraph::{Intent, TagKind};
/// use std::time::Duration;
///
/// let intent = Intent {
///     strict: true,
///     timeout: Some(Duration::from_secs(5)),
///     ..Intent::default()
/// };
/// assert_eq!(intent.trusted_tags(), vec![TagKind::Meta]);
/// ```
#[derive(Clone, Default)]
pub struct Intent {
    /// URL to fetch. This is NOT `og:url` of the page.
    ///
    /// Set by [`fetch_with`](crate::fetch_with). Copied into
    /// [`OpenGraph::source_url`](crate::OpenGraph::source_url), the
    /// resolution base when the page has no `og:url`.
    pub url: String,

    /// Honor `<meta>` only.
    ///
    /// `strict == true` means `trusted_tags == [Meta]`, and
    /// `strict == false` means `[Meta, Title, Link]`. Also disables the
    /// `name="description"` fallback and the default favicon.
    pub strict: bool,

    /// Tags to respect. Overrides `strict` when set.
    pub trusted_tags: Option<Vec<TagKind>>,

    /// Deadline for the fetch.
    pub timeout: Option<Duration>,

    /// External cancellation of the fetch.
    pub cancel: Option<CancellationToken>,

    /// Fetcher to use. A [`SimpleHttpFetcher`](crate::SimpleHttpFetcher) is
    /// built on demand when unset.
    pub fetcher: Option<Arc<dyn HttpFetcher>>,
}

impl Intent {
    /// Creates a default intent for `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_trusted_tags(mut self, tags: impl Into<Vec<TagKind>>) -> Self {
        self.trusted_tags = Some(tags.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Arc<dyn HttpFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Tags the walk may dispatch, derived from `strict` when not set.
    ///
    /// An explicitly empty list is treated like an unset one.
    #[must_use]
    pub fn trusted_tags(&self) -> Vec<TagKind> {
        match &self.trusted_tags {
            Some(tags) if !tags.is_empty() => tags.clone(),
            _ if self.strict => vec![TagKind::Meta],
            _ => vec![TagKind::Meta, TagKind::Title, TagKind::Link],
        }
    }
}

impl fmt::Debug for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intent")
            .field("url", &self.url)
            .field("strict", &self.strict)
            .field("trusted_tags", &self.trusted_tags)
            .field("timeout", &self.timeout)
            .field("cancel", &self.cancel.is_some())
            .field("fetcher", &self.fetcher.is_some())
            .finish()
    }
}
