//! Class name and anchor generation for scene nodes.
//!
//! Display names are arbitrary user text, so uniqueness comes from the
//! discriminator, never from the name.

use unicode_normalization::UnicodeNormalization;

/// Substituted when a name contains no usable letters.
const FALLBACK: &str = "n";

/// Reduce a display name to lowercase ASCII words joined by single hyphens.
///
/// Diacritics are stripped after NFD decomposition, every other character
/// outside `[a-zA-Z0-9-]` becomes a hyphen.
///
/// # Examples
///
/// ```
/// use scenemark::naming::slugify;
///
/// assert_eq!(slugify("Café Menu"), "cafe-menu");
/// assert_eq!(slugify("[Button] / Primary"), "button-primary");
/// assert_eq!(slugify("12:34"), "12-34");
/// ```
pub fn slugify(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Format a class name from a display name and a per-pass discriminator.
///
/// The result matches `[a-z][a-z0-9-]*-<discriminator>`.
///
/// # Examples
///
/// ```
/// use scenemark::naming::format_identifier;
///
/// assert_eq!(format_identifier("abc", 3), "abc-3");
/// assert_eq!(format_identifier("2 Column Layout", 7), "column-layout-7");
/// assert_eq!(format_identifier("404", 2), "n-2");
/// ```
pub fn format_identifier(raw_name: &str, discriminator: u32) -> String {
    let slug = slugify(raw_name);
    let slug = slug.trim_start_matches(|c: char| !c.is_ascii_lowercase());
    let slug = if slug.is_empty() { FALLBACK } else { slug };
    format!("{slug}-{discriminator}")
}

/// Element anchor for a node identity, e.g. `"12:34"` becomes `node-12-34`.
pub fn node_anchor(identity: &str) -> String {
    format!("node-{}", slugify(identity))
}

/// Monotonic discriminator source for one generation pass.
#[derive(Debug, Clone)]
pub struct IdCounter {
    next: u32,
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl IdCounter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Take the next discriminator.
    pub fn advance(&mut self) -> u32 {
        let value = self.next;
        self.next += 1;
        value
    }

    /// The value the next call to [`advance`](Self::advance) returns.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clean_name_is_unchanged() {
        assert_eq!(format_identifier("abc", 3), "abc-3");
    }

    #[test]
    fn test_uppercase_and_spaces() {
        assert_eq!(format_identifier("Hero Section", 1), "hero-section-1");
    }

    #[test]
    fn test_diacritics_stripped() {
        assert_eq!(format_identifier("Niño Ñandú", 4), "nino-nandu-4");
    }

    #[test]
    fn test_brackets_and_braces_removed() {
        assert_eq!(format_identifier("{icon} [24]", 2), "icon-24-2");
    }

    #[test]
    fn test_leading_digits_and_hyphens_stripped() {
        assert_eq!(format_identifier("--3d view", 5), "d-view-5");
        assert_eq!(format_identifier("9lives", 2), "lives-2");
    }

    #[test]
    fn test_degenerate_names_fall_back() {
        assert_eq!(format_identifier("", 1), "n-1");
        assert_eq!(format_identifier("!!!", 2), "n-2");
        assert_eq!(format_identifier("123", 3), "n-3");
        assert_eq!(format_identifier("日本語", 4), "n-4");
    }

    #[test]
    fn test_identical_names_distinct_discriminators() {
        assert_ne!(format_identifier("Button", 1), format_identifier("Button", 2));
        assert_ne!(format_identifier("42", 1), format_identifier("42", 2));
    }

    #[test]
    fn test_node_anchor() {
        assert_eq!(node_anchor("12:34"), "node-12-34");
        assert_eq!(node_anchor("I5:6;7:8"), "node-i5-6-7-8");
    }

    #[test]
    fn test_counter_is_monotonic() {
        let mut counter = IdCounter::new();
        assert_eq!(counter.peek(), 1);
        assert_eq!(counter.advance(), 1);
        assert_eq!(counter.advance(), 2);
        assert_eq!(counter.peek(), 3);
    }

    proptest! {
        #[test]
        fn prop_identifier_is_css_safe(name in ".*", disc in 0u32..100_000) {
            let id = format_identifier(&name, disc);
            prop_assert!(id.starts_with(|c: char| c.is_ascii_lowercase()));
            prop_assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!id.contains("--"));
            let suffix = format!("-{disc}");
            prop_assert!(id.ends_with(&suffix));
        }

        #[test]
        fn prop_distinct_discriminators_never_collide(
            a in ".*", b in ".*", x in 0u32..1000, y in 0u32..1000,
        ) {
            prop_assume!(x != y);
            prop_assert_ne!(format_identifier(&a, x), format_identifier(&b, y));
        }
    }
}
