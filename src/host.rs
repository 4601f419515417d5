//! Host scene-graph provider interface.
//!
//! The generator never talks to a design tool directly. Everything it needs
//! beyond the node tree itself (computed CSS, vector exports, image bytes,
//! fonts) is requested through [`SceneHost`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::HostError;
use crate::fonts::FontDescriptor;
use crate::scene::{ImageRef, SceneNode};
use crate::style::Declarations;

/// Capabilities supplied by the host scene-graph provider.
///
/// Calls are made sequentially in traversal order and at most once per node
/// and capability within a generation pass.
pub trait SceneHost {
    /// Computed CSS declarations for `node`, in host order.
    fn computed_style(&self, node: &SceneNode) -> Result<Declarations, HostError>;

    /// Bytes of a self-contained SVG document rendering `node`.
    fn export_vector(&self, node: &SceneNode) -> Result<Vec<u8>, HostError>;

    /// Raw bytes of an image referenced by a fill.
    fn fetch_image_bytes(&self, image: &ImageRef) -> Result<Vec<u8>, HostError>;

    /// Fonts installed in the host.
    fn list_available_fonts(&self) -> Result<Vec<FontDescriptor>, HostError> {
        Ok(Vec::new())
    }

    /// Make `font` available for accurate text measurement.
    fn load_font(&self, _font: &FontDescriptor) -> Result<(), HostError> {
        Ok(())
    }
}

impl<H: SceneHost + ?Sized> SceneHost for &H {
    fn computed_style(&self, node: &SceneNode) -> Result<Declarations, HostError> {
        (**self).computed_style(node)
    }

    fn export_vector(&self, node: &SceneNode) -> Result<Vec<u8>, HostError> {
        (**self).export_vector(node)
    }

    fn fetch_image_bytes(&self, image: &ImageRef) -> Result<Vec<u8>, HostError> {
        (**self).fetch_image_bytes(image)
    }

    fn list_available_fonts(&self) -> Result<Vec<FontDescriptor>, HostError> {
        (**self).list_available_fonts()
    }

    fn load_font(&self, font: &FontDescriptor) -> Result<(), HostError> {
        (**self).load_font(font)
    }
}

/// A host backed by scripted, in-memory answers.
///
/// Styles and vector exports are keyed by node identity, images by image
/// reference. Missing styles resolve to no declarations; missing vector
/// exports and images are host errors.
///
/// ```
/// use scenemark::host::{MemoryHost, SceneHost};
/// use scenemark::scene::{NodeKind, SceneNode};
///
/// let host = MemoryHost::new().with_style("1:1", &[("color", "red")]);
/// let node = SceneNode::new(NodeKind::Text, "1:1", "Label");
/// assert_eq!(host.computed_style(&node).unwrap()[0].1, "red");
/// ```
#[derive(Debug, Default)]
pub struct MemoryHost {
    styles: HashMap<String, Result<Declarations, HostError>>,
    vectors: HashMap<String, Result<Vec<u8>, HostError>>,
    images: HashMap<String, Vec<u8>>,
    fonts: Vec<FontDescriptor>,
    vector_exports: Cell<usize>,
    loaded_fonts: RefCell<Vec<FontDescriptor>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, node_id: &str, declarations: &[(&str, &str)]) -> Self {
        let declarations = declarations
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.styles.insert(node_id.to_string(), Ok(declarations));
        self
    }

    pub fn with_style_error(mut self, node_id: &str, message: &str) -> Self {
        self.styles
            .insert(node_id.to_string(), Err(HostError::new(message)));
        self
    }

    pub fn with_vector(mut self, node_id: &str, svg: impl Into<Vec<u8>>) -> Self {
        self.vectors.insert(node_id.to_string(), Ok(svg.into()));
        self
    }

    pub fn with_vector_error(mut self, node_id: &str, message: &str) -> Self {
        self.vectors
            .insert(node_id.to_string(), Err(HostError::new(message)));
        self
    }

    pub fn with_image(mut self, image: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.images.insert(image.to_string(), bytes.into());
        self
    }

    pub fn with_font(mut self, font: FontDescriptor) -> Self {
        self.fonts.push(font);
        self
    }

    /// Number of vector exports served so far.
    pub fn vector_exports(&self) -> usize {
        self.vector_exports.get()
    }

    /// Fonts loaded through [`SceneHost::load_font`], in call order.
    pub fn loaded_fonts(&self) -> Vec<FontDescriptor> {
        self.loaded_fonts.borrow().clone()
    }
}

impl SceneHost for MemoryHost {
    fn computed_style(&self, node: &SceneNode) -> Result<Declarations, HostError> {
        self.styles.get(&node.id).cloned().unwrap_or(Ok(Vec::new()))
    }

    fn export_vector(&self, node: &SceneNode) -> Result<Vec<u8>, HostError> {
        self.vector_exports.set(self.vector_exports.get() + 1);
        self.vectors.get(&node.id).cloned().unwrap_or_else(|| {
            Err(HostError::new(format!("no vector export for {}", node.id)))
        })
    }

    fn fetch_image_bytes(&self, image: &ImageRef) -> Result<Vec<u8>, HostError> {
        self.images
            .get(&image.0)
            .cloned()
            .ok_or_else(|| HostError::new(format!("unknown image {}", image.0)))
    }

    fn list_available_fonts(&self) -> Result<Vec<FontDescriptor>, HostError> {
        Ok(self.fonts.clone())
    }

    fn load_font(&self, font: &FontDescriptor) -> Result<(), HostError> {
        self.loaded_fonts.borrow_mut().push(font.clone());
        Ok(())
    }
}
