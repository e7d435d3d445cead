//! Document walk.
//!
//! Visits every node of a parsed document in pre-order and hands trusted
//! `<meta>`, `<title>` and `<link>` elements to their [`Tag`] handler.
//! An explicit work stack keeps native stack usage flat no matter how deeply
//! the document nests.

use dom_query::NodeRef;
use tracing::trace;

use crate::dom;
use crate::error::Result;
use crate::options::TagKind;
use crate::result::{Audio, Image, OpenGraph, Video};
use crate::tags::Tag;

/// Mutable state of one walk: the result plus structured-property cursors.
///
/// Each cursor is the index of the entry most recently appended to its
/// sequence during this walk. Sub-properties only ever touch that entry.
pub(crate) struct Collector<'a> {
    pub(crate) og: &'a mut OpenGraph,
    pub(crate) strict: bool,
    image: Option<usize>,
    video: Option<usize>,
    audio: Option<usize>,
}

impl<'a> Collector<'a> {
    pub(crate) fn new(og: &'a mut OpenGraph, strict: bool) -> Self {
        Self {
            og,
            strict,
            image: None,
            video: None,
            audio: None,
        }
    }

    pub(crate) fn push_image(&mut self, image: Image) {
        self.image = Some(self.og.images.len());
        self.og.images.push(image);
    }

    pub(crate) fn push_video(&mut self, video: Video) {
        self.video = Some(self.og.videos.len());
        self.og.videos.push(video);
    }

    pub(crate) fn push_audio(&mut self, audio: Audio) {
        self.audio = Some(self.og.audios.len());
        self.og.audios.push(audio);
    }

    pub(crate) fn current_image(&mut self) -> Option<&mut Image> {
        self.image.and_then(|i| self.og.images.get_mut(i))
    }

    pub(crate) fn current_video(&mut self) -> Option<&mut Video> {
        self.video.and_then(|i| self.og.videos.get_mut(i))
    }

    pub(crate) fn current_audio(&mut self) -> Option<&mut Audio> {
        self.audio.and_then(|i| self.og.audios.get_mut(i))
    }
}

/// Walks the tree under `root`, contributing trusted tags to `og`.
///
/// Stops at the first handler error; whatever was contributed before it
/// stays in `og`.
pub fn walk(root: &NodeRef, og: &mut OpenGraph, trusted: &[TagKind], strict: bool) -> Result<()> {
    let mut collector = Collector::new(og, strict);
    let mut stack: Vec<NodeRef> = vec![*root];
    let mut dispatched = 0usize;

    while let Some(node) = stack.pop() {
        let kind = dom::tag_name(&node)
            .and_then(|name| TagKind::from_name(&name))
            .filter(|kind| trusted.contains(kind));

        if let Some(kind) = kind {
            trace!(tag = kind.name(), "dispatching");
            Tag::from_node(kind, &node).contribute(&mut collector)?;
            dispatched += 1;
            continue;
        }

        // Reversed so that children pop in document order.
        stack.extend(node.children().into_iter().rev());
    }

    trace!(dispatched, "walk finished");
    Ok(())
}
