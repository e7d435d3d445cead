//! Tag handlers.
//!
//! Each handler reads one kind of HTML element into a typed fact and applies
//! it to the result through [`Tag::contribute`]. Construction is tolerant:
//! unknown attributes are ignored and missing ones stay empty.

use dom_query::NodeRef;

use crate::dom;
use crate::error::{Error, Result};
use crate::options::TagKind;
use crate::result::{Audio, Image, Video};
use crate::walk::Collector;

/// A `<meta>`, `<title>` or `<link>` element read from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Meta(Meta),
    Title(Title),
    Link(Link),
}

impl Tag {
    /// Reads `node` as the handler for `kind`.
    #[must_use]
    pub fn from_node(kind: TagKind, node: &NodeRef) -> Self {
        match kind {
            TagKind::Meta => Self::Meta(Meta::from_node(node)),
            TagKind::Title => Self::Title(Title::from_node(node)),
            TagKind::Link => Self::Link(Link::from_node(node)),
        }
    }

    /// Applies this fact to the result under construction.
    pub(crate) fn contribute(&self, collector: &mut Collector<'_>) -> Result<()> {
        match self {
            Self::Meta(meta) => meta.contribute(collector),
            Self::Title(title) => {
                title.contribute(collector);
                Ok(())
            }
            Self::Link(link) => {
                link.contribute(collector);
                Ok(())
            }
        }
    }
}

/// Any `<meta ...>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub name: String,
    pub property: String,
    pub content: String,
}

/// What a `<meta property>` says, once classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Property<'a> {
    Title,
    Description,
    SiteName,
    Type,
    Url,
    Determiner,
    Locale,
    LocaleAlternate,
    ImageRoot,
    Image(&'a str),
    VideoRoot,
    Video(&'a str),
    AudioRoot,
    Audio(&'a str),
    Other,
}

impl<'a> Property<'a> {
    fn classify(property: &'a str) -> Self {
        match property {
            "og:title" => Self::Title,
            "og:description" => Self::Description,
            "og:site_name" => Self::SiteName,
            "og:type" => Self::Type,
            "og:url" => Self::Url,
            "og:determiner" => Self::Determiner,
            "og:locale" => Self::Locale,
            "og:locale:alternate" => Self::LocaleAlternate,
            "og:image" | "og:image:url" => Self::ImageRoot,
            "og:video" | "og:video:url" => Self::VideoRoot,
            "og:audio" | "og:audio:url" => Self::AudioRoot,
            _ => {
                if let Some(sub) = property.strip_prefix("og:image:") {
                    Self::Image(sub)
                } else if let Some(sub) = property.strip_prefix("og:video:") {
                    Self::Video(sub)
                } else if let Some(sub) = property.strip_prefix("og:audio:") {
                    Self::Audio(sub)
                } else {
                    Self::Other
                }
            }
        }
    }
}

impl Meta {
    /// Reads `name`, `property` and `content`.
    #[must_use]
    pub fn from_node(node: &NodeRef) -> Self {
        let mut meta = Self::default();
        for (key, value) in dom::attributes(node) {
            match key.as_str() {
                "property" => meta.property = value,
                "content" => meta.content = value,
                "name" => meta.name = value,
                _ => {}
            }
        }
        meta
    }

    /// Non-OGP `<meta name="description">`, the weakest description source.
    #[must_use]
    pub fn is_description(&self) -> bool {
        self.name == "description" && !self.content.is_empty()
    }

    fn contribute(&self, c: &mut Collector<'_>) -> Result<()> {
        let content = self.content.as_str();

        match Property::classify(&self.property) {
            Property::Title if !content.is_empty() => c.og.title = content.to_string(),
            Property::Description if !content.is_empty() => {
                c.og.description = content.to_string();
            }
            Property::SiteName => c.og.site_name = content.to_string(),
            Property::Type => c.og.og_type = content.to_string(),
            Property::Url => c.og.canonical_url = content.to_string(),
            Property::Determiner => c.og.determiner = content.to_string(),
            Property::Locale => c.og.locale = content.to_string(),
            Property::LocaleAlternate => c.og.locale_alternates.push(content.to_string()),
            Property::ImageRoot => c.push_image(Image {
                url: content.to_string(),
                ..Image::default()
            }),
            Property::VideoRoot => c.push_video(Video {
                url: content.to_string(),
                ..Video::default()
            }),
            Property::AudioRoot => c.push_audio(Audio {
                url: content.to_string(),
                ..Audio::default()
            }),
            Property::Image(sub) => {
                if let Some(image) = c.current_image() {
                    self.apply_image(image, sub)?;
                }
            }
            Property::Video(sub) => {
                if let Some(video) = c.current_video() {
                    self.apply_video(video, sub)?;
                }
            }
            Property::Audio(sub) => {
                if let Some(audio) = c.current_audio() {
                    self.apply_audio(audio, sub);
                }
            }
            Property::Other if self.is_description() => {
                if !c.strict && c.og.description.is_empty() {
                    c.og.description = content.to_string();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_image(&self, image: &mut Image, sub: &str) -> Result<()> {
        match sub {
            "secure_url" => image.secure_url.clone_from(&self.content),
            "type" => image.content_type.clone_from(&self.content),
            "width" => image.width = self.number()?,
            "height" => image.height = self.number()?,
            "alt" => image.alt.clone_from(&self.content),
            _ => {}
        }
        Ok(())
    }

    fn apply_video(&self, video: &mut Video, sub: &str) -> Result<()> {
        match sub {
            "secure_url" => video.secure_url.clone_from(&self.content),
            "type" => video.content_type.clone_from(&self.content),
            "width" => video.width = self.number()?,
            "height" => video.height = self.number()?,
            "duration" => video.duration = self.number()?,
            _ => {}
        }
        Ok(())
    }

    fn apply_audio(&self, audio: &mut Audio, sub: &str) {
        match sub {
            "secure_url" => audio.secure_url.clone_from(&self.content),
            "type" => audio.content_type.clone_from(&self.content),
            _ => {}
        }
    }

    fn number<T: std::str::FromStr>(&self) -> Result<T> {
        self.content
            .trim_ascii()
            .parse()
            .map_err(|_| Error::Contribution {
                property: self.property.clone(),
                value: self.content.clone(),
            })
    }
}

/// A `<title>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Title {
    pub text: String,
}

impl Title {
    #[must_use]
    pub fn from_node(node: &NodeRef) -> Self {
        Self {
            text: dom::first_child_text(node)
                .map(|text| text.trim().to_string())
                .unwrap_or_default(),
        }
    }

    // Lowest-priority title source: never replaces og:title.
    fn contribute(&self, c: &mut Collector<'_>) {
        if c.og.title.is_empty() && !self.text.is_empty() {
            c.og.title.clone_from(&self.text);
        }
    }
}

/// A `<link>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    #[must_use]
    pub fn from_node(node: &NodeRef) -> Self {
        let mut link = Self::default();
        for (key, value) in dom::attributes(node) {
            match key.as_str() {
                "rel" => link.rel = value,
                "href" => link.href = value,
                _ => {}
            }
        }
        link
    }

    /// Exact, case-sensitive match on `rel`.
    #[must_use]
    pub fn is_favicon(&self) -> bool {
        self.rel == "shortcut icon" || self.rel == "icon"
    }

    fn contribute(&self, c: &mut Collector<'_>) {
        if self.is_favicon() {
            c.og.favicon.clone_from(&self.href);
        }
    }
}
