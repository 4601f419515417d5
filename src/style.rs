//! Stylesheet accumulation.
//!
//! Each serialized node contributes one class rule built from the host's
//! computed declarations. The host renders image fills with placeholder
//! values that are rewritten here before the rule is stored.
//!
//! # Example
//!
//! ```
//! use scenemark::style::StyleCollector;
//!
//! let mut styles = StyleCollector::new();
//! styles.record("card-1", vec![("display".into(), "flex".into())], None);
//! assert_eq!(styles.stylesheet(), ".card-1 {\n  display: flex;\n}\n");
//! ```

use std::fmt::Write;

use crate::image::DataUri;

/// Ordered CSS declarations as reported by the host.
pub type Declarations = Vec<(String, String)>;

/// Host placeholder for an image fill that has not been resolved.
pub const IMAGE_SENTINEL: &str = "url(<path-to-image>)";

/// Host placeholder color painted under unresolved image fills.
pub const PLACEHOLDER_COLOR: &str = "lightgray";

/// One class-scoped rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub class_name: String,
    pub declarations: Declarations,
}

impl StyleRule {
    fn write_css(&self, out: &mut String) {
        writeln!(out, ".{} {{", self.class_name).unwrap();
        for (property, value) in &self.declarations {
            writeln!(out, "  {property}: {value};").unwrap();
        }
        out.push_str("}\n");
    }
}

/// Append-only collection of style rules in traversal order.
#[derive(Debug, Clone, Default)]
pub struct StyleCollector {
    rules: Vec<StyleRule>,
}

impl StyleCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rule for `class_name`, rewriting placeholders first.
    ///
    /// `image` is the resolved first image fill of the node, if any.
    pub fn record(
        &mut self,
        class_name: impl Into<String>,
        declarations: Declarations,
        image: Option<&DataUri>,
    ) {
        self.rules.push(StyleRule {
            class_name: class_name.into(),
            declarations: rewrite_placeholders(declarations, image),
        });
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<StyleRule> {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render all rules as stylesheet text.
    pub fn stylesheet(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            rule.write_css(&mut out);
        }
        out
    }
}

/// Replace host placeholder values with resolved ones.
///
/// - values holding [`IMAGE_SENTINEL`] embed `image`, or are dropped when
///   there is no resolved image;
/// - [`PLACEHOLDER_COLOR`] in background declarations becomes `transparent`;
/// - nodes with a resolved image get `object-fit: cover` ahead of their
///   first background or cover declaration.
pub fn rewrite_placeholders(declarations: Declarations, image: Option<&DataUri>) -> Declarations {
    let mut out = Vec::with_capacity(declarations.len() + 1);
    let mut object_fit = false;

    for (property, mut value) in declarations {
        if value.contains(IMAGE_SENTINEL) {
            let Some(uri) = image else {
                continue;
            };
            value = value.replace(IMAGE_SENTINEL, &format!("url(\"{uri}\")"));
        }

        let is_background = property.starts_with("background");
        if is_background {
            value = value.replace(PLACEHOLDER_COLOR, "transparent");
        }

        if image.is_some() && !object_fit && (is_background || value.contains("cover")) {
            out.push(("object-fit".to_string(), "cover".to_string()));
            object_fit = true;
        }

        out.push((property, value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::resolve_image;

    fn decl(property: &str, value: &str) -> (String, String) {
        (property.to_string(), value.to_string())
    }

    fn png() -> DataUri {
        resolve_image(&[0x89, 0x50, 0x4E, 0x47]).unwrap()
    }

    #[test]
    fn test_stylesheet_in_recording_order() {
        let mut styles = StyleCollector::new();
        styles.record("b-1", vec![decl("color", "red")], None);
        styles.record("a-2", vec![], None);

        assert_eq!(styles.len(), 2);
        assert_eq!(
            styles.stylesheet(),
            ".b-1 {\n  color: red;\n}\n.a-2 {\n}\n"
        );
    }

    #[test]
    fn test_sentinel_embeds_resolved_image() {
        let image = png();
        let out = rewrite_placeholders(
            vec![
                decl("width", "10px"),
                decl(
                    "background",
                    "url(<path-to-image>) lightgray 50% / cover no-repeat",
                ),
            ],
            Some(&image),
        );

        assert_eq!(out[0], decl("width", "10px"));
        assert_eq!(out[1], decl("object-fit", "cover"));
        assert_eq!(
            out[2],
            decl(
                "background",
                &format!("url(\"{image}\") transparent 50% / cover no-repeat")
            )
        );
    }

    #[test]
    fn test_sentinel_removed_without_image() {
        let out = rewrite_placeholders(
            vec![
                decl("background", "url(<path-to-image>) lightgray 50% / cover"),
                decl("border-radius", "4px"),
            ],
            None,
        );
        assert_eq!(out, vec![decl("border-radius", "4px")]);
    }

    #[test]
    fn test_placeholder_color_only_rewritten_in_backgrounds() {
        let out = rewrite_placeholders(
            vec![
                decl("background-color", "lightgray"),
                decl("color", "lightgray"),
            ],
            None,
        );
        assert_eq!(
            out,
            vec![
                decl("background-color", "transparent"),
                decl("color", "lightgray"),
            ]
        );
    }

    #[test]
    fn test_object_fit_inserted_once() {
        let image = png();
        let out = rewrite_placeholders(
            vec![
                decl("background", "url(<path-to-image>)"),
                decl("background-size", "cover"),
            ],
            Some(&image),
        );
        let fits = out.iter().filter(|(p, _)| p == "object-fit").count();
        assert_eq!(fits, 1);
        assert_eq!(out.len(), 3);
    }
}
