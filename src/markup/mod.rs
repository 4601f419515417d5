//! Output markup tree.
//!
//! The generator builds this tree bottom-up; [`to_html`] turns it into text.
//!
//! # Example
//!
//! ```
//! use scenemark::markup::{MarkupNode, to_html};
//!
//! let node = MarkupNode::element("div")
//!     .with_attr("class", "card-1")
//!     .with_children(vec![MarkupNode::text("Hi"), MarkupNode::line_break()]);
//! assert_eq!(to_html(&[node]), r#"<div class="card-1">Hi<br/></div>"#);
//! ```

mod html;
mod svg;

pub use html::{escape_xml, to_html};
pub use svg::parse_vector_fragment;

/// Attribute list in insertion order.
pub type Attributes = Vec<(String, String)>;

/// An element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Attributes,
    pub children: Vec<MarkupNode>,
}

/// Pre-rendered markup inlined verbatim (exported vector artwork).
///
/// Attribute values are unescaped; `inner` is kept in its escaped source form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFragment {
    pub tag: String,
    pub attributes: Attributes,
    pub inner: String,
}

impl InlineFragment {
    pub fn attr(&self, name: &str) -> Option<&str> {
        find_attr(&self.attributes, name)
    }
}

/// A node of the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element(Element),
    Text(String),
    InlineFragment(InlineFragment),
}

impl MarkupNode {
    pub fn element(tag: impl Into<String>) -> Self {
        MarkupNode::Element(Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn text(value: impl Into<String>) -> Self {
        MarkupNode::Text(value.into())
    }

    /// Explicit `<br>` element.
    pub fn line_break() -> Self {
        Self::element("br")
    }

    /// Add an attribute. No effect on text nodes.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            MarkupNode::Element(e) => e.attributes.push((name.into(), value.into())),
            MarkupNode::InlineFragment(f) => f.attributes.push((name.into(), value.into())),
            MarkupNode::Text(_) => {}
        }
        self
    }

    /// Replace the children of an element. No effect on other nodes.
    pub fn with_children(mut self, children: Vec<MarkupNode>) -> Self {
        if let MarkupNode::Element(e) = &mut self {
            e.children = children;
        }
        self
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Tag name of an element or fragment.
    pub fn tag(&self) -> Option<&str> {
        match self {
            MarkupNode::Element(e) => Some(&e.tag),
            MarkupNode::InlineFragment(f) => Some(&f.tag),
            MarkupNode::Text(_) => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            MarkupNode::Element(e) => find_attr(&e.attributes, name),
            MarkupNode::InlineFragment(f) => f.attr(name),
            MarkupNode::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Element(e) => &e.children,
            _ => &[],
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(MarkupNode::count).sum::<usize>()
    }
}

fn find_attr<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}
