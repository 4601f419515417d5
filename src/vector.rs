//! Vector-shape classification.
//!
//! Vector artwork is exported wholesale by the host as a self-contained SVG
//! document. Nodes classified here are inlined from that export instead of
//! being walked.

use crate::scene::SceneNode;

/// Whether `node` should be serialized as inlined vector markup.
///
/// Only the node's own kind tag and host flag are consulted, never its
/// children.
pub fn is_vector_like(node: &SceneNode) -> bool {
    node.kind.is_vector_shape() || (node.kind.is_container() && node.renders_as_vector)
}
