//! DOM Operations Adapter
//!
//! Thin helpers over `dom_query` node references, giving the walk and the
//! tag handlers a small, stable vocabulary: parse, tag name, attributes,
//! first-child text.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef};

pub use tendril::StrTendril;

/// Parse an HTML string into a document.
///
/// html5ever recovers from any malformed markup, so this never fails.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Get tag name of an element node
///
/// html5ever lowercases HTML element names, so no folding is needed.
#[inline]
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<StrTendril> {
    if node.is_element() {
        node.node_name()
    } else {
        None
    }
}

/// Get all attributes as key-value pairs, in source order
#[must_use]
pub fn attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

/// Text of the first child when that child is a text node
///
/// `<title>` is parsed as RCDATA, so its whole content is one text child.
#[must_use]
pub fn first_child_text(node: &NodeRef) -> Option<StrTendril> {
    node.first_child()
        .filter(NodeRef::is_text)
        .map(|child| child.text())
}
