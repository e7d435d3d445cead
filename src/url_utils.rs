//! URL Utility Functions
//!
//! Conversion of the relative URLs a page declares (`og:image`, favicon, ...)
//! into absolute form against the page's base URL.

use url::{ParseError, Url};

use crate::error::{Error, Result};
use crate::result::OpenGraph;

/// Parse a base URL, which must be absolute.
pub fn parse_base(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|err| Error::invalid_url(raw, err))
}

/// Scheme-and-authority prefix of `base`, e.g. `https://example.com:8080`.
fn origin_prefix(base: &Url) -> Result<String> {
    let host = base
        .host_str()
        .ok_or_else(|| Error::Resolution(base.to_string()))?;
    Ok(match base.port() {
        Some(port) => format!("{}://{host}:{port}", base.scheme()),
        None => format!("{}://{host}", base.scheme()),
    })
}

/// Convert `value` to an absolute URL against `base`.
///
/// - Absolute URLs (anything with a scheme) are returned unchanged.
/// - `//host/x` inherits the scheme of `base`.
/// - `/x` is placed on the host of `base`.
/// - Anything else is joined to the directory of `base`'s path.
///
/// # Example
///
/// ```rust
/// use rs_opengraph::url_utils::join_to_absolute;
/// use url::Url;
///
/// let base = Url::parse("http://example.com/a/b").unwrap();
/// assert_eq!(join_to_absolute(&base, "01.png").unwrap(), "http://example.com/a/01.png");
/// assert_eq!(join_to_absolute(&base, "/images/01.png").unwrap(), "http://example.com/images/01.png");
/// assert_eq!(join_to_absolute(&base, "//cdn.example.com/x.png").unwrap(), "http://cdn.example.com/x.png");
/// ```
pub fn join_to_absolute(base: &Url, value: &str) -> Result<String> {
    match Url::parse(value) {
        Ok(_) => return Ok(value.to_string()),
        Err(ParseError::RelativeUrlWithoutBase) => {}
        Err(_) => return Err(Error::Resolution(value.to_string())),
    }

    // Let the URL parser reject malformed references before we splice them.
    if base.join(value).is_err() {
        return Err(Error::Resolution(value.to_string()));
    }

    if value.starts_with("//") {
        return Ok(format!("{}:{value}", base.scheme()));
    }

    let prefix = origin_prefix(base)?;
    if value.starts_with('/') {
        return Ok(format!("{prefix}{value}"));
    }

    let (path, suffix) = split_suffix(value);
    let joined = join_paths(dirname(base.path()), path);
    Ok(format!("{prefix}{joined}{suffix}"))
}

/// Split a reference into its path and its `?query#fragment` tail.
fn split_suffix(value: &str) -> (&str, &str) {
    match value.find(['?', '#']) {
        Some(idx) => value.split_at(idx),
        None => (value, ""),
    }
}

/// Directory part of an absolute path: `/a/b` -> `/a`, `/a/` -> `/a`, `` -> `/`.
fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// Join `rel` onto `dir` and collapse `.` and `..` segments.
///
/// The result is always rooted; `..` never climbs above `/`. A trailing
/// slash on `rel` (or a trailing `.`/`..` segment) is kept.
fn join_paths(dir: &str, rel: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let combined = dir.split('/').chain(rel.split('/'));
    for segment in combined {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut out = String::with_capacity(dir.len() + rel.len() + 1);
    for segment in &segments {
        out.push('/');
        out.push_str(segment);
    }
    let trailing = rel.is_empty()
        || rel.ends_with('/')
        || rel == "."
        || rel == ".."
        || rel.ends_with("/.")
        || rel.ends_with("/..");
    if out.is_empty() || trailing {
        out.push('/');
    }
    out
}

impl OpenGraph {
    /// Make every URL field absolute.
    ///
    /// The base is `og:url` when the page declared one, else
    /// [`source_url`](Self::source_url). With neither, this is
    /// [`Error::InvalidUrl`].
    /// Image, video and audio URLs and the favicon are rewritten. Empty
    /// values stay empty.
    ///
    /// This is all-or-nothing: if any value fails to resolve, no field is
    /// modified and the error is returned.
    pub fn to_absolute(&mut self) -> Result<()> {
        let raw = if self.canonical_url.is_empty() {
            self.source_url.as_str()
        } else {
            self.canonical_url.as_str()
        };
        let base = parse_base(raw)?;

        let resolve = |value: &str| -> Result<String> {
            if value.is_empty() {
                Ok(String::new())
            } else {
                join_to_absolute(&base, value)
            }
        };

        let images = self
            .images
            .iter()
            .map(|image| resolve(&image.url))
            .collect::<Result<Vec<_>>>()?;
        let videos = self
            .videos
            .iter()
            .map(|video| resolve(&video.url))
            .collect::<Result<Vec<_>>>()?;
        let audios = self
            .audios
            .iter()
            .map(|audio| resolve(&audio.url))
            .collect::<Result<Vec<_>>>()?;
        let favicon = resolve(&self.favicon)?;

        for (image, url) in self.images.iter_mut().zip(images) {
            image.url = url;
        }
        for (video, url) in self.videos.iter_mut().zip(videos) {
            video.url = url;
        }
        for (audio, url) in self.audios.iter_mut().zip(audios) {
            audio.url = url;
        }
        self.favicon = favicon;
        Ok(())
    }
}
