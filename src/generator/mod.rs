//! Scene graph to markup generation.
//!
//! [`MarkupGenerator`] walks scene nodes depth-first in document order and
//! builds the markup tree, stylesheet and font manifest for one pass.
//!
//! Each visited node ends up in exactly one state:
//!
//! - skipped: invisible, masked, already covered by a vector export, or of a
//!   kind that is not serialized. Nothing is emitted for it or its subtree.
//! - image: a rectangle or frame whose top fill resolves to an embeddable
//!   image becomes a self-closing `img`. Its children are ignored.
//! - inline vector: vector artwork is exported by the host and inlined. The
//!   node and all its descendants are memoized.
//! - composite: everything else becomes a container element holding its
//!   visible children, or its text lines for text nodes.
//!
//! Host failures never abort a pass. They are recorded as [`Diagnostic`]s and
//! the node falls back to the next representation down that list.
//!
//! # Example
//!
//! ```
//! use scenemark::generator::MarkupGenerator;
//! use scenemark::host::MemoryHost;
//! use scenemark::scene::{FontRef, NodeKind, SceneNode};
//!
//! let frame = SceneNode::new(NodeKind::Frame, "1:1", "Card").with_children(vec![
//!     SceneNode::text("1:2", "Title", "Hello", FontRef::new("Inter", 700)),
//! ]);
//! let host = MemoryHost::new().with_style("1:2", &[("font-weight", "700")]);
//!
//! let doc = MarkupGenerator::new(&host).generate_document(&[frame]);
//! assert_eq!(
//!     doc.markup_html(),
//!     r#"<div class="card-1"><div class="title-2">Hello</div></div>"#
//! );
//! assert!(doc.stylesheet.contains(".title-2 {\n  font-weight: 700;\n}"));
//! ```

mod document;

pub use document::GeneratedDocument;

use std::collections::HashSet;

use log::{debug, warn};

use crate::error::{Diagnostic, Error};
use crate::fonts::{FontDescriptor, FontManifest};
use crate::host::SceneHost;
use crate::image::{DataUri, resolve_image};
use crate::markup::{MarkupNode, parse_vector_fragment};
use crate::naming::{IdCounter, format_identifier, node_anchor};
use crate::scene::{FontRef, NodeKind, SceneNode};
use crate::style::StyleCollector;
use crate::vector::is_vector_like;

/// When the class name counter advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterPolicy {
    /// Only nodes that receive a class name consume a value.
    #[default]
    EmittedOnly,
    /// Every visited node consumes a value, including skipped ones.
    EveryVisit,
}

/// Element used to wrap the lines of a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextWrapper {
    #[default]
    Div,
    Paragraph,
}

impl TextWrapper {
    fn tag(self) -> &'static str {
        match self {
            TextWrapper::Div => "div",
            TextWrapper::Paragraph => "p",
        }
    }
}

/// Configuration for markup generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub counter_policy: CounterPolicy,
    /// Keep each (family, weight) pair once in the font manifest.
    pub dedupe_fonts: bool,
    pub text_wrapper: TextWrapper,
    /// Record a style rule (and class) for inlined vector artwork too.
    pub record_vector_styles: bool,
    /// Add `id="node-<identity>"` to every element.
    pub emit_node_ids: bool,
    /// Load each text node's font through the host before serializing it.
    pub load_fonts: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            counter_policy: CounterPolicy::EmittedOnly,
            dedupe_fonts: true,
            text_wrapper: TextWrapper::Div,
            record_vector_styles: false,
            emit_node_ids: false,
            load_fonts: false,
        }
    }
}

/// Node identities already covered by an inlined vector export.
#[derive(Debug, Clone, Default)]
pub struct ExportMemo {
    ids: HashSet<String>,
}

impl ExportMemo {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Memoize `node` and every node below it.
    pub fn insert_subtree(&mut self, node: &SceneNode) {
        self.ids.insert(node.id.clone());
        node.for_each_descendant(&mut |n| {
            self.ids.insert(n.id.clone());
        });
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// State owned by one generation pass.
#[derive(Debug)]
struct Pass {
    counter: IdCounter,
    memo: ExportMemo,
    styles: StyleCollector,
    fonts: FontManifest,
    markup: Vec<MarkupNode>,
    diagnostics: Vec<Diagnostic>,
    /// Host font list, fetched on first use.
    available_fonts: Option<Vec<FontDescriptor>>,
}

impl Pass {
    fn new(config: &GeneratorConfig) -> Self {
        Self {
            counter: IdCounter::new(),
            memo: ExportMemo::default(),
            styles: StyleCollector::new(),
            fonts: if config.dedupe_fonts {
                FontManifest::new()
            } else {
                FontManifest::with_duplicates()
            },
            markup: Vec::new(),
            diagnostics: Vec::new(),
            available_fonts: None,
        }
    }
}

/// Converts scene nodes into markup, styles and a font manifest.
///
/// A generator accumulates one pass across calls to
/// [`generate`](Self::generate) until [`finish`](Self::finish) or
/// [`reset`](Self::reset). Concurrent passes need separate generators.
pub struct MarkupGenerator<H: SceneHost> {
    host: H,
    config: GeneratorConfig,
    pass: Pass,
}

impl<H: SceneHost> MarkupGenerator<H> {
    /// Create a generator with default configuration.
    pub fn new(host: H) -> Self {
        let config = GeneratorConfig::default();
        let pass = Pass::new(&config);
        Self { host, config, pass }
    }

    /// Configure the generator. Discards any pass in progress.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.pass = Pass::new(&config);
        self.config = config;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Discard the current pass.
    pub fn reset(&mut self) {
        self.pass = Pass::new(&self.config);
    }

    /// Generate markup for one root node within the current pass.
    ///
    /// Returns `None` when the root produces no output.
    pub fn generate(&mut self, root: &SceneNode) -> Option<&MarkupNode> {
        let node = self.visit(root)?;
        self.pass.markup.push(node);
        self.pass.markup.last()
    }

    /// Hand out everything generated in the current pass and start a new one.
    pub fn finish(&mut self) -> GeneratedDocument {
        let pass = std::mem::replace(&mut self.pass, Pass::new(&self.config));
        let stylesheet = pass.styles.stylesheet();
        GeneratedDocument {
            markup: pass.markup,
            stylesheet,
            rules: pass.styles.into_rules(),
            fonts: pass.fonts,
            diagnostics: pass.diagnostics,
        }
    }

    /// Generate a fresh document for `roots`.
    pub fn generate_document(&mut self, roots: &[SceneNode]) -> GeneratedDocument {
        self.reset();
        for root in roots {
            self.generate(root);
        }
        self.finish()
    }

    fn visit(&mut self, node: &SceneNode) -> Option<MarkupNode> {
        let visit_discriminator = match self.config.counter_policy {
            CounterPolicy::EveryVisit => Some(self.pass.counter.advance()),
            CounterPolicy::EmittedOnly => None,
        };

        if !node.visible || node.is_mask || self.pass.memo.contains(&node.id) {
            return None;
        }
        if node.kind == NodeKind::Other {
            debug!("ignoring {} ({}): unsupported node type", node.name, node.id);
            return None;
        }

        if matches!(node.kind, NodeKind::Rectangle | NodeKind::Frame)
            && let Some(image) = self.resolve_image_fill(node)
        {
            let class = self.record_style(node, visit_discriminator, Some(&image));
            let element = MarkupNode::element("img")
                .with_attr("src", image.as_str())
                .with_attr("class", class);
            return Some(self.with_anchor(element, node));
        }

        if is_vector_like(node) {
            match self.export_vector(node) {
                Ok(fragment) => {
                    self.pass.memo.insert_subtree(node);
                    let fragment = if self.config.record_vector_styles {
                        let class = self.record_style(node, visit_discriminator, None);
                        fragment.with_attr("class", class)
                    } else {
                        fragment
                    };
                    return Some(self.with_anchor(fragment, node));
                }
                Err(error) => self.diagnose(node, error),
            }
        }

        let class = self.record_style(node, visit_discriminator, None);
        let children = if node.kind == NodeKind::Text {
            if let Some(font) = &node.font {
                self.note_font(node, font);
            }
            text_lines(node.characters.as_deref().unwrap_or_default())
        } else {
            node.children
                .iter()
                .filter_map(|child| self.visit(child))
                .collect()
        };

        let tag = match node.kind {
            NodeKind::Text => self.config.text_wrapper.tag(),
            _ => "div",
        };
        let element = MarkupNode::element(tag)
            .with_attr("class", class)
            .with_children(children);
        Some(self.with_anchor(element, node))
    }

    /// Resolve the top fill of `node` when it is an image.
    ///
    /// Failures are diagnosed and yield `None`.
    fn resolve_image_fill(&mut self, node: &SceneNode) -> Option<DataUri> {
        let reference = node.first_image_fill()?;
        let result = match reference {
            None => Err(Error::ImageUnavailable("image fill has no reference".into())),
            Some(reference) => match self.host.fetch_image_bytes(reference) {
                Ok(bytes) if bytes.is_empty() => Err(Error::ImageUnavailable(format!(
                    "image {} is empty",
                    reference.0
                ))),
                Ok(bytes) => resolve_image(&bytes),
                Err(e) => Err(Error::ImageUnavailable(e.to_string())),
            },
        };

        match result {
            Ok(uri) => Some(uri),
            Err(error) => {
                self.diagnose(node, error);
                None
            }
        }
    }

    fn export_vector(&mut self, node: &SceneNode) -> Result<MarkupNode, Error> {
        let bytes = self
            .host
            .export_vector(node)
            .map_err(|e| Error::VectorExportFailed(e.to_string()))?;
        Ok(MarkupNode::InlineFragment(parse_vector_fragment(&bytes)?))
    }

    /// Assign a class name to `node` and record its style rule.
    fn record_style(
        &mut self,
        node: &SceneNode,
        visit_discriminator: Option<u32>,
        image: Option<&DataUri>,
    ) -> String {
        let discriminator = visit_discriminator.unwrap_or_else(|| self.pass.counter.advance());
        let class = format_identifier(&node.name, discriminator);

        let declarations = match self.host.computed_style(node) {
            Ok(declarations) => declarations,
            Err(e) => {
                self.diagnose(node, Error::StyleUnavailable(e.to_string()));
                Vec::new()
            }
        };
        self.pass.styles.record(class.clone(), declarations, image);
        class
    }

    fn note_font(&mut self, node: &SceneNode, font: &FontRef) {
        self.pass.fonts.add(font);
        if self.config.load_fonts {
            self.load_font(node, font);
        }
    }

    fn load_font(&mut self, node: &SceneNode, font: &FontRef) {
        if self.pass.available_fonts.is_none() {
            let fonts = match self.host.list_available_fonts() {
                Ok(fonts) => fonts,
                Err(e) => {
                    self.diagnose(node, Error::FontUnavailable(e.to_string()));
                    Vec::new()
                }
            };
            self.pass.available_fonts = Some(fonts);
        }

        let candidate = self
            .pass
            .available_fonts
            .iter()
            .flatten()
            .find(|f| !f.is_hidden() && f.family == font.family)
            .cloned();

        match candidate {
            Some(descriptor) => {
                if let Err(e) = self.host.load_font(&descriptor) {
                    self.diagnose(node, Error::FontUnavailable(e.to_string()));
                }
            }
            None => debug!("font family {} is not available in the host", font.family),
        }
    }

    fn with_anchor(&self, element: MarkupNode, node: &SceneNode) -> MarkupNode {
        if self.config.emit_node_ids {
            element.with_attr("id", node_anchor(&node.id))
        } else {
            element
        }
    }

    fn diagnose(&mut self, node: &SceneNode, error: Error) {
        let diagnostic = Diagnostic {
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            error,
        };
        warn!("{diagnostic}");
        self.pass.diagnostics.push(diagnostic);
    }
}

/// Split text on line breaks into text nodes separated by `<br>` elements.
///
/// Recognized breaks: CRLF, CR, LF, NEL (U+0085), LINE SEPARATOR (U+2028) and
/// PARAGRAPH SEPARATOR (U+2029).
pub fn text_lines(characters: &str) -> Vec<MarkupNode> {
    let mut nodes = Vec::new();
    let mut line = String::new();
    let mut chars = characters.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                nodes.push(MarkupNode::Text(std::mem::take(&mut line)));
                nodes.push(MarkupNode::line_break());
            }
            _ => line.push(c),
        }
    }
    nodes.push(MarkupNode::Text(line));
    nodes
}
