//! Output of a generation pass.

use crate::error::Diagnostic;
use crate::fonts::FontManifest;
use crate::markup::{MarkupNode, to_html};
use crate::style::StyleRule;

/// Markup, styles and fonts produced by one generation pass.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// One markup tree per root that produced output, in input order.
    pub markup: Vec<MarkupNode>,
    /// Stylesheet text, one rule per class in traversal order.
    pub stylesheet: String,
    /// The rules behind `stylesheet`.
    pub rules: Vec<StyleRule>,
    pub fonts: FontManifest,
    /// Node-local failures that degraded the output.
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedDocument {
    /// Serialize the markup trees.
    pub fn markup_html(&self) -> String {
        to_html(&self.markup)
    }

    /// Assemble a self-contained HTML snippet.
    ///
    /// Font links come first (when any text was generated), then the
    /// stylesheet in a `<style>` block, then the markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if !self.fonts.is_empty() {
            out.push_str(&self.fonts.to_link_tags());
        }
        out.push_str("<style>\n");
        out.push_str(&escape_style_text(&self.stylesheet));
        out.push_str("</style>\n");
        out.push_str(&self.markup_html());
        out
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }
}

/// Keep stylesheet text from closing its `<style>` element.
///
/// `</style` (any case) becomes `<\/style`; CSS reads `\/` as `/`.
fn escape_style_text(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(pos) = rest.find("</") {
        let after = &rest[pos + 2..];
        out.push_str(&rest[..pos]);
        let closes_style = after
            .get(..5)
            .is_some_and(|name| name.eq_ignore_ascii_case("style"));
        out.push_str(if closes_style { "<\\/" } else { "</" });
        rest = after;
    }
    out.push_str(rest);
    out
}
