//! Scene graph input types.
//!
//! The scene graph is owned by the host and is read-only to the generator.
//! Nodes deserialize from a host-like JSON shape so captured documents can be
//! replayed:
//!
//! ```
//! use scenemark::scene::{NodeKind, SceneNode};
//!
//! let json = r#"{ "type": "FRAME", "id": "1:2", "name": "Card",
//!                 "children": [{ "type": "ELLIPSE", "id": "1:3", "name": "Dot" }] }"#;
//! let node: SceneNode = serde_json::from_str(json).unwrap();
//! assert_eq!(node.kind, NodeKind::Frame);
//! assert!(node.visible);
//! ```

use serde::{Deserialize, Serialize};

/// Node type as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Text,
    Rectangle,
    Frame,
    Group,
    Component,
    ComponentSet,
    Instance,
    Vector,
    Ellipse,
    Polygon,
    Star,
    Line,
    BooleanOperation,
    /// Any node type this crate does not serialize (slices, stickies, ...).
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Kinds whose geometry is always vector artwork.
    pub fn is_vector_shape(self) -> bool {
        matches!(
            self,
            NodeKind::Vector
                | NodeKind::Ellipse
                | NodeKind::Polygon
                | NodeKind::Star
                | NodeKind::Line
                | NodeKind::BooleanOperation
        )
    }

    /// Kinds that group other nodes.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            NodeKind::Frame
                | NodeKind::Group
                | NodeKind::Component
                | NodeKind::ComponentSet
                | NodeKind::Instance
        )
    }
}

/// Opaque reference to image bytes held by the host (an image hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

/// RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// One entry of a node's paint stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Fill {
    Solid {
        color: Rgb,
        #[serde(default = "default_opacity")]
        opacity: f32,
    },
    Image {
        #[serde(rename = "imageHash", default)]
        image: Option<ImageRef>,
    },
    /// Gradients, videos and other paints.
    #[serde(other)]
    Other,
}

fn default_opacity() -> f32 {
    1.0
}

impl Fill {
    /// An image fill pointing at the given host image reference.
    pub fn image(reference: impl Into<String>) -> Self {
        Fill::Image {
            image: Some(ImageRef(reference.into())),
        }
    }

    pub fn solid(r: f32, g: f32, b: f32) -> Self {
        Fill::Solid {
            color: Rgb { r, g, b },
            opacity: 1.0,
        }
    }
}

/// Font family and numeric weight of a text node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontRef {
    pub family: String,
    #[serde(default = "default_weight")]
    pub weight: u16,
}

fn default_weight() -> u16 {
    400
}

impl FontRef {
    pub fn new(family: impl Into<String>, weight: u16) -> Self {
        Self {
            family: family.into(),
            weight,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A node in the host scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    /// Stable identity, unique within the document.
    pub id: String,
    /// Display name; neither unique nor identifier-safe.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub is_mask: bool,
    /// Host-reported: this container renders as fill-only vector art.
    #[serde(default)]
    pub renders_as_vector: bool,
    /// Paint stack, topmost first. Mixed fills are reported as empty.
    #[serde(default)]
    pub fills: Vec<Fill>,
    #[serde(default)]
    pub children: Vec<SceneNode>,
    /// Character content (text nodes only).
    #[serde(default)]
    pub characters: Option<String>,
    /// Font reference (text nodes only).
    #[serde(default)]
    pub font: Option<FontRef>,
}

impl SceneNode {
    /// Create a visible node with no fills or children.
    pub fn new(kind: NodeKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            visible: true,
            is_mask: false,
            renders_as_vector: false,
            fills: Vec::new(),
            children: Vec::new(),
            characters: None,
            font: None,
        }
    }

    /// Create a text node.
    pub fn text(
        id: impl Into<String>,
        name: impl Into<String>,
        characters: impl Into<String>,
        font: FontRef,
    ) -> Self {
        let mut node = Self::new(NodeKind::Text, id, name);
        node.characters = Some(characters.into());
        node.font = Some(font);
        node
    }

    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fills.push(fill);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn masked(mut self) -> Self {
        self.is_mask = true;
        self
    }

    pub fn vector_art(mut self) -> Self {
        self.renders_as_vector = true;
        self
    }

    /// The image reference of the topmost fill, if that fill is an image.
    ///
    /// Lower fills are never consulted.
    pub fn first_image_fill(&self) -> Option<Option<&ImageRef>> {
        match self.fills.first() {
            Some(Fill::Image { image }) => Some(image.as_ref()),
            _ => None,
        }
    }

    /// Visit this node's descendants depth-first in document order.
    pub fn for_each_descendant(&self, f: &mut impl FnMut(&SceneNode)) {
        for child in &self.children {
            f(child);
            child.for_each_descendant(&mut *f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let node: SceneNode =
            serde_json::from_str(r#"{ "type": "RECTANGLE", "id": "1:1", "name": "Box" }"#)
                .unwrap();
        assert_eq!(node.kind, NodeKind::Rectangle);
        assert!(node.visible);
        assert!(!node.is_mask);
        assert!(node.fills.is_empty());
    }

    #[test]
    fn test_deserialize_unknown_kind_and_fill() {
        let node: SceneNode = serde_json::from_str(
            r#"{ "type": "SLICE", "id": "1", "name": "s",
                 "fills": [{ "type": "GRADIENT_LINEAR" }, { "type": "IMAGE", "imageHash": "abc" }] }"#,
        )
        .unwrap();
        assert_eq!(node.kind, NodeKind::Other);
        assert_eq!(node.fills[0], Fill::Other);
        assert_eq!(node.fills[1], Fill::image("abc"));
    }

    #[test]
    fn test_first_image_fill_only_honors_top_fill() {
        let node = SceneNode::new(NodeKind::Rectangle, "1", "r")
            .with_fill(Fill::solid(1.0, 0.0, 0.0))
            .with_fill(Fill::image("abc"));
        assert_eq!(node.first_image_fill(), None);

        let node = SceneNode::new(NodeKind::Rectangle, "1", "r").with_fill(Fill::image("abc"));
        assert_eq!(node.first_image_fill(), Some(Some(&ImageRef("abc".into()))));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let tree = SceneNode::new(NodeKind::Group, "g", "g").with_children(vec![
            SceneNode::new(NodeKind::Vector, "a", "a")
                .with_children(vec![SceneNode::new(NodeKind::Vector, "b", "b")]),
            SceneNode::new(NodeKind::Vector, "c", "c"),
        ]);
        let mut seen = Vec::new();
        tree.for_each_descendant(&mut |n| seen.push(n.id.clone()));
        assert_eq!(seen, ["a", "b", "c"]);
    }
}
