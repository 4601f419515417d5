//! Font manifest for text nodes.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::markup::escape_xml;
use crate::scene::FontRef;

const FONTS_CSS_URL: &str = "https://fonts.googleapis.com/css2";

/// Characters kept literal in a `family` query value. Spaces become `+`.
const FAMILY_QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A font face the host can provide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontDescriptor {
    pub family: String,
    /// Style name as the host reports it ("Regular", "Bold Italic", ...).
    pub style: String,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }

    /// Hidden system families ("`.SF NS`") are not loadable by documents.
    pub fn is_hidden(&self) -> bool {
        self.family.starts_with('.')
    }
}

/// Ordered list of (family, weight) pairs used by text nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontManifest {
    entries: Vec<FontRef>,
    dedupe: bool,
}

impl Default for FontManifest {
    fn default() -> Self {
        Self::new()
    }
}

impl FontManifest {
    /// A manifest that keeps only the first occurrence of each pair.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            dedupe: true,
        }
    }

    /// A manifest that keeps every occurrence, in encounter order.
    pub fn with_duplicates() -> Self {
        Self {
            entries: Vec::new(),
            dedupe: false,
        }
    }

    pub fn add(&mut self, font: &FontRef) {
        if self.dedupe && self.entries.contains(font) {
            return;
        }
        self.entries.push(font.clone());
    }

    pub fn entries(&self) -> &[FontRef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render `<link>` tags loading every font from the web font service.
    ///
    /// The preconnect hints are always emitted, followed by one stylesheet
    /// link per entry.
    pub fn to_link_tags(&self) -> String {
        let mut out = String::from(
            "<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\"/>\n\
             <link rel=\"preconnect\" href=\"https://fonts.gstatic.com\" crossorigin=\"\"/>\n",
        );
        for font in &self.entries {
            writeln!(
                out,
                "<link href=\"{}\" rel=\"stylesheet\"/>",
                escape_xml(&font_css_url(font))
            )
            .unwrap();
        }
        out
    }
}

/// Web font stylesheet URL for one family and weight.
fn font_css_url(font: &FontRef) -> String {
    let family = utf8_percent_encode(&font.family, FAMILY_QUERY)
        .to_string()
        .replace(' ', "+");
    format!(
        "{FONTS_CSS_URL}?family={family}:wght@{}&display=swap",
        font.weight
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupes_by_default() {
        let mut fonts = FontManifest::new();
        fonts.add(&FontRef::new("Inter", 400));
        fonts.add(&FontRef::new("Inter", 700));
        fonts.add(&FontRef::new("Inter", 400));
        assert_eq!(
            fonts.entries(),
            &[FontRef::new("Inter", 400), FontRef::new("Inter", 700)]
        );
    }

    #[test]
    fn test_legacy_keeps_duplicates() {
        let mut fonts = FontManifest::with_duplicates();
        fonts.add(&FontRef::new("Inter", 400));
        fonts.add(&FontRef::new("Inter", 400));
        assert_eq!(fonts.len(), 2);
    }

    #[test]
    fn test_link_tags() {
        let mut fonts = FontManifest::new();
        fonts.add(&FontRef::new("Open Sans", 600));
        let tags = fonts.to_link_tags();
        assert!(tags.contains("rel=\"preconnect\""));
        assert!(tags.contains(
            "href=\"https://fonts.googleapis.com/css2?family=Open+Sans:wght@600&amp;display=swap\""
        ));
    }

    #[test]
    fn test_link_tags_encode_family() {
        let font = FontRef::new("M+ Sans & \"Co\"", 400);
        assert_eq!(
            font_css_url(&font),
            "https://fonts.googleapis.com/css2?family=M%2B+Sans+%26+%22Co%22:wght@400&display=swap"
        );

        let mut fonts = FontManifest::new();
        fonts.add(&font);
        let tags = fonts.to_link_tags();
        assert!(tags.contains(
            "<link href=\"https://fonts.googleapis.com/css2?family=M%2B+Sans+%26+%22Co%22:wght@400&amp;display=swap\" rel=\"stylesheet\"/>"
        ));
        assert!(!tags.contains("M++"));
    }

    #[test]
    fn test_hidden_families() {
        assert!(FontDescriptor::new(".SF NS", "Regular").is_hidden());
        assert!(!FontDescriptor::new("Inter", "Regular").is_hidden());
    }
}
