//! Parsing of host vector exports into inline fragments.

use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};

use super::{Attributes, InlineFragment};
use crate::error::{Error, Result};

/// Parse an exported vector document into an [`InlineFragment`].
///
/// The first element of the document becomes the fragment. Its `xmlns`
/// attribute is dropped since the fragment is inlined into an HTML document,
/// and the remaining attribute values are stored unescaped. Everything between
/// its start and end tags is kept verbatim.
///
/// # Examples
///
/// ```
/// use scenemark::markup::parse_vector_fragment;
///
/// let svg = br#"<svg width="4" xmlns="http://www.w3.org/2000/svg"><circle r="2"/></svg>"#;
/// let fragment = parse_vector_fragment(svg).unwrap();
/// assert_eq!(fragment.tag, "svg");
/// assert_eq!(fragment.attr("width"), Some("4"));
/// assert_eq!(fragment.attr("xmlns"), None);
/// assert_eq!(fragment.inner, r#"<circle r="2"/>"#);
/// ```
pub fn parse_vector_fragment(bytes: &[u8]) -> Result<InlineFragment> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::VectorExportFailed(format!("export is not UTF-8: {e}")))?;

    let mut reader = Reader::from_str(text);

    // Locate the root element, skipping declarations, comments and whitespace.
    let (tag, attributes, self_closing) = loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                break (tag_name(&e), root_attributes(&e, reader.decoder())?, false);
            }
            Ok(Event::Empty(e)) => {
                break (tag_name(&e), root_attributes(&e, reader.decoder())?, true);
            }
            Ok(Event::Eof) => {
                return Err(Error::VectorExportFailed(
                    "export contains no root element".into(),
                ));
            }
            Err(e) => return Err(malformed(e)),
            _ => {}
        }
    };

    if self_closing {
        return Ok(InlineFragment {
            tag,
            attributes,
            inner: String::new(),
        });
    }

    let inner_start = reader.buffer_position() as usize;
    let mut depth = 1usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(Error::VectorExportFailed(format!(
                    "unterminated <{tag}> element"
                )));
            }
            Err(e) => return Err(malformed(e)),
            _ => {}
        }
    }

    // The closing tag of the root is the last `</` before the reader position.
    let consumed = &text[..reader.buffer_position() as usize];
    let inner_end = consumed.rfind("</").unwrap_or(inner_start).max(inner_start);

    Ok(InlineFragment {
        tag,
        attributes,
        inner: text[inner_start..inner_end].to_string(),
    })
}

fn tag_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn root_attributes(e: &BytesStart, decoder: Decoder) -> Result<Attributes> {
    let mut attributes = Attributes::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| malformed(err.into()))?;
        if attr.key.as_ref() == b"xmlns" {
            continue;
        }
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(malformed)?;
        attributes.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value.into_owned(),
        ));
    }
    Ok(attributes)
}

fn malformed(e: quick_xml::Error) -> Error {
    Error::VectorExportFailed(format!("malformed SVG: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_xmlns_keeps_other_attributes() {
        let svg = br##"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><path d="M0 0h24v24H0z" fill="#000"/></svg>"##;
        let fragment = parse_vector_fragment(svg).unwrap();

        let names: Vec<_> = fragment.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["width", "height", "viewBox", "fill", "xmlns:xlink"]);
        assert_eq!(fragment.inner, r##"<path d="M0 0h24v24H0z" fill="#000"/>"##);
    }

    #[test]
    fn test_attribute_values_unescaped() {
        let svg = br#"<svg style='font-family:"Inter"' aria-label="A &amp; B"><g/></svg>"#;
        let fragment = parse_vector_fragment(svg).unwrap();
        assert_eq!(fragment.attr("style"), Some(r#"font-family:"Inter""#));
        assert_eq!(fragment.attr("aria-label"), Some("A & B"));
    }

    #[test]
    fn test_skips_prolog() {
        let svg = b"<?xml version=\"1.0\"?>\n<!-- exported -->\n<svg><g><rect/></g></svg>\n";
        let fragment = parse_vector_fragment(svg).unwrap();
        assert_eq!(fragment.tag, "svg");
        assert_eq!(fragment.inner, "<g><rect/></g>");
    }

    #[test]
    fn test_nested_same_name_elements() {
        let svg = b"<svg><svg x=\"1\"><rect/></svg><circle/></svg>";
        let fragment = parse_vector_fragment(svg).unwrap();
        assert_eq!(fragment.inner, "<svg x=\"1\"><rect/></svg><circle/>");
    }

    #[test]
    fn test_self_closing_root() {
        let fragment = parse_vector_fragment(b"<svg width=\"0\"/>").unwrap();
        assert!(fragment.inner.is_empty());
        assert_eq!(fragment.attr("width"), Some("0"));
    }

    #[test]
    fn test_failures() {
        assert!(matches!(
            parse_vector_fragment(b""),
            Err(Error::VectorExportFailed(_))
        ));
        assert!(matches!(
            parse_vector_fragment(b"just text"),
            Err(Error::VectorExportFailed(_))
        ));
        assert!(matches!(
            parse_vector_fragment(b"<svg><g></svg>"),
            Err(Error::VectorExportFailed(_))
        ));
        assert!(matches!(
            parse_vector_fragment(&[0x3C, 0xFF, 0xFE]),
            Err(Error::VectorExportFailed(_))
        ));
    }
}
