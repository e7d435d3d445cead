//! Result types for extraction output.
//!
//! [`OpenGraph`] accumulates everything the walk discovers about a page.
//! Structured properties (`og:image`, `og:video`, `og:audio`) are kept in
//! document order.

use serde::{Deserialize, Serialize};

/// Favicon used when a non-strict fetch found no icon link.
pub const DEFAULT_FAVICON: &str = "/favicon.ico";

/// A structured `og:image` entry.
///
/// Populated from:
/// - `og:image` / `og:image:url`
/// - `og:image:secure_url`
/// - `og:image:type`
/// - `og:image:width`
/// - `og:image:height`
/// - `og:image:alt`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub secure_url: String,
    /// MIME type from `og:image:type`.
    pub content_type: String,
    pub width: i64,
    pub height: i64,
    pub alt: String,
}

/// A structured `og:video` entry.
///
/// Populated from `og:video`, `og:video:url`, `og:video:secure_url`,
/// `og:video:type`, `og:video:width`, `og:video:height` and
/// `og:video:duration`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub url: String,
    pub secure_url: String,
    pub content_type: String,
    pub width: i64,
    pub height: i64,
    /// Length in seconds.
    pub duration: i64,
}

/// A structured `og:audio` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audio {
    pub url: String,
    pub secure_url: String,
    pub content_type: String,
}

/// Open Graph metadata of one web page.
///
/// All fields default to empty; sequences are always present so that
/// serialization emits `[]` rather than omitting them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraph {
    /// `og:title`, falling back to `<title>`.
    pub title: String,

    /// `og:type`.
    #[serde(rename = "type")]
    pub og_type: String,

    /// `og:site_name`.
    pub site_name: String,

    /// `og:description`, falling back to `<meta name="description">`.
    pub description: String,

    /// `og:determiner`.
    pub determiner: String,

    /// `og:locale`.
    pub locale: String,

    /// Every `og:locale:alternate`, in document order.
    pub locale_alternates: Vec<String>,

    /// `og:url`. Empty when the page does not declare one.
    pub canonical_url: String,

    pub images: Vec<Image>,
    pub videos: Vec<Video>,
    pub audios: Vec<Audio>,

    /// Icon from `<link rel="icon">` or `<link rel="shortcut icon">`.
    pub favicon: String,

    /// Where the page came from, copied from [`Intent::url`](crate::Intent::url).
    ///
    /// Fallback base for [`to_absolute`](Self::to_absolute). Not serialized.
    #[serde(skip)]
    pub source_url: String,
}

impl OpenGraph {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the post-fetch default for pages without an icon link.
    pub(crate) fn apply_default_favicon(&mut self) {
        if self.favicon.is_empty() {
            self.favicon = DEFAULT_FAVICON.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequences_serialize_as_arrays() {
        let json = serde_json::to_value(OpenGraph::new()).unwrap();
        assert_eq!(json["images"], serde_json::json!([]));
        assert_eq!(json["videos"], serde_json::json!([]));
        assert_eq!(json["audios"], serde_json::json!([]));
        assert_eq!(json["locale_alternates"], serde_json::json!([]));
        assert_eq!(json["type"], serde_json::json!(""));
    }

    #[test]
    fn source_url_is_not_serialized() {
        let og = OpenGraph {
            source_url: "http://example.com/".to_string(),
            ..OpenGraph::default()
        };
        let json = serde_json::to_value(&og).unwrap();
        assert!(json.get("source_url").is_none());
    }

    #[test]
    fn default_favicon_only_fills_empty() {
        let mut og = OpenGraph::new();
        og.apply_default_favicon();
        assert_eq!(og.favicon, DEFAULT_FAVICON);

        let mut og = OpenGraph {
            favicon: "/static/icon.png".to_string(),
            ..OpenGraph::default()
        };
        og.apply_default_favicon();
        assert_eq!(og.favicon, "/static/icon.png");
    }
}
