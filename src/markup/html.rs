//! HTML serialization of the markup tree.

use std::fmt::Write;

use super::{Attributes, MarkupNode};

/// Elements written in self-closing form.
fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "hr" | "input" | "meta" | "link")
}

/// Serialize a sequence of markup nodes.
///
/// Output is compact: no whitespace is inserted between nodes.
pub fn to_html(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

fn write_node(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Text(value) => out.push_str(&escape_xml(value)),
        MarkupNode::Element(e) => {
            write!(out, "<{}", e.tag).unwrap();
            write_attrs(&e.attributes, out);
            if is_void(&e.tag) {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for child in &e.children {
                write_node(child, out);
            }
            write!(out, "</{}>", e.tag).unwrap();
        }
        MarkupNode::InlineFragment(f) => {
            write!(out, "<{}", f.tag).unwrap();
            write_attrs(&f.attributes, out);
            if f.inner.is_empty() {
                out.push_str("/>");
            } else {
                write!(out, ">{}</{}>", f.inner, f.tag).unwrap();
            }
        }
    }
}

fn write_attrs(attributes: &Attributes, out: &mut String) {
    for (name, value) in attributes {
        write!(out, " {}=\"{}\"", name, escape_xml(value)).unwrap();
    }
}

/// Escape special XML/HTML characters.
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
