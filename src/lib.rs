//! # scenemark
//!
//! Converts a visual design scene graph (frames, groups, text, shapes and
//! image fills) into HTML markup, a stylesheet and a font manifest.
//!
//! ## Features
//!
//! - One container element and one class rule per visible node
//! - Vector artwork inlined from the host's SVG export, never duplicated
//! - Image fills embedded as `data:` URIs
//! - Deterministic, collision-free class names derived from display names
//! - Host failures degrade single nodes and are reported as diagnostics
//!
//! ## Quick Start
//!
//! The design tool is reached through the [`SceneHost`] trait. [`MemoryHost`]
//! answers from scripted data:
//!
//! ```
//! use scenemark::{MarkupGenerator, MemoryHost};
//! use scenemark::scene::{Fill, NodeKind, SceneNode};
//!
//! let card = SceneNode::new(NodeKind::Frame, "1:1", "Card").with_children(vec![
//!     SceneNode::new(NodeKind::Rectangle, "1:2", "Cover").with_fill(Fill::image("img-1")),
//!     SceneNode::new(NodeKind::Ellipse, "1:3", "Badge"),
//! ]);
//!
//! let host = MemoryHost::new()
//!     .with_image("img-1", vec![0xFF, 0xD8, 0xFF, 0xE0])
//!     .with_vector("1:3", r#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="4"/></svg>"#)
//!     .with_style("1:1", &[("display", "flex")]);
//!
//! let doc = MarkupGenerator::new(&host).generate_document(&[card]);
//! assert_eq!(
//!     doc.markup_html(),
//!     concat!(
//!         r#"<div class="card-1">"#,
//!         r#"<img src="data:image/jpeg;base64,/9j/4A==" class="cover-2"/>"#,
//!         r#"<svg><circle r="4"/></svg>"#,
//!         "</div>",
//!     )
//! );
//! assert_eq!(doc.rules.len(), 2);
//! ```

pub mod error;
pub mod fonts;
pub mod generator;
pub mod host;
pub mod image;
pub mod markup;
pub mod naming;
pub mod scene;
pub mod style;
pub mod vector;

pub use error::{Diagnostic, Error, HostError, Result};
pub use generator::{GeneratedDocument, GeneratorConfig, MarkupGenerator};
pub use host::{MemoryHost, SceneHost};
pub use markup::MarkupNode;
pub use scene::SceneNode;
