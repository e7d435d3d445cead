//! # rs-opengraph
//!
//! Fetches a web page and extracts its [Open Graph](https://ogp.me/)
//! metadata: title, type, canonical URL, images, videos, audio, description,
//! site name, locale and favicon.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), rs_opengraph::Error> {
//! let mut og = rs_opengraph::fetch("https://ogp.me/").await?;
//! og.to_absolute()?;
//! println!("{} ({})", og.title, og.og_type);
//! # Ok(()) }
//! ```
//!
//! ## Extraction rules
//!
//! - `og:title` always wins over `<title>`, whatever the document order.
//! - `og:description` wins over `<meta name="description">`, which is only
//!   used when nothing else set a description and the intent is not strict.
//! - Structured properties (`og:image:width`, `og:video:duration`, ...)
//!   attach to the most recently declared root of their kind and are
//!   dropped when no root precedes them.
//! - Strict intents only read `<meta>`; see [`Intent::trusted_tags`].

mod error;
mod extract;
mod options;
mod result;

/// DOM helpers over `dom_query` nodes.
pub mod dom;

/// Character decoding of fetched bytes.
pub mod encoding;

/// The fetch capability and its default `reqwest` implementation.
pub mod fetch;

/// Tag handlers for `<meta>`, `<title>` and `<link>`.
pub mod tags;

/// Relative-to-absolute URL resolution.
pub mod url_utils;

/// Pre-order document walk.
pub mod walk;

// Public API - re-exports
pub use error::{Error, Result, CONTENT_TYPE_MESSAGE};
pub use extract::{fetch, fetch_with};
pub use fetch::{FetchResponse, HttpFetcher, SimpleHttpFetcher};
pub use options::{Intent, TagKind};
pub use result::{Audio, Image, OpenGraph, Video, DEFAULT_FAVICON};
