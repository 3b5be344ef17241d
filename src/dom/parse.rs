use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{is_raw_text, is_void, Document, Element, NodeId};

/// Longest entity reference tried, `&` and `;` included.
const MAX_ENTITY_LEN: usize = 40;

/// Resolve HTML5 named and numeric character references. A `&` that does not
/// start a known reference is kept as text.
pub(super) fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&end| end < MAX_ENTITY_LEN)
            .and_then(|end| {
                unescape_with(&tail[..=end], resolve_html5_entity)
                    .ok()
                    .map(|text| (text.into_owned(), end + 1))
            });
        match decoded {
            Some((text, used)) => {
                out.push_str(&text);
                rest = &tail[used..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parse HTML-ish markup and append the resulting nodes under `parent`.
///
/// The reader runs in lenient mode: void elements need no closing slash,
/// attributes may be unquoted or valueless, and a stray closing tag pops back
/// to the nearest matching open element (or is ignored). Whitespace is kept
/// as written; `script` and `style` bodies are read as raw text.
pub(super) fn parse_into(doc: &mut Document, parent: NodeId, source: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(source);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut stack: Vec<NodeId> = vec![parent];

    loop {
        let top = stack.last().copied().unwrap_or(parent);
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) => {
                let element = element_from(e);
                let void = is_void(element.tag());
                let raw = is_raw_text(element.tag());
                let id = doc.insert_element(top, element);
                if raw {
                    let end = e.to_end().into_owned();
                    let body = reader
                        .read_text(end.name())
                        .map_err(|err| format!("unterminated raw text element: {}", err))?;
                    if !body.is_empty() {
                        doc.insert_text(id, &body);
                    }
                } else if !void {
                    stack.push(id);
                }
            }
            Ok(Event::Empty(ref e)) => {
                doc.insert_element(top, element_from(e));
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                if let Some(pos) = stack
                    .iter()
                    .skip(1)
                    .rposition(|&n| doc.tag(n) == Some(name.as_str()))
                {
                    let closed = stack[pos + 1];
                    if name == "textarea" {
                        let text = doc.text_content(closed);
                        if let Some(el) = doc.element_mut(closed) {
                            el.set_attr("value", &text);
                        }
                    }
                    stack.truncate(pos + 1);
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = decode_entities(&String::from_utf8_lossy(e));
                if !text.is_empty() {
                    doc.insert_text(top, &text);
                }
            }
            Ok(Event::CData(ref e)) => {
                let text = String::from_utf8_lossy(e).into_owned();
                doc.insert_text(top, &text);
            }
            // Comments, doctype, declarations and processing instructions carry
            // nothing the controllers read.
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "markup error at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
        }
    }

    Ok(())
}

fn element_from(start: &BytesStart) -> Element {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_lowercase();
    let mut element = Element::new(&tag);
    for attr in start.html_attributes().with_checks(false).flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_lowercase();
        let value = decode_entities(&String::from_utf8_lossy(&attr.value));
        element.set_attr(&key, &value);
    }
    element
}

#[cfg(test)]
mod tests {
    use super::super::Document;

    #[test]
    fn void_elements_do_not_swallow_siblings() {
        let doc = Document::parse(
            r#"<div id="card"><img src="a.jpg" alt="A"><h3>Title</h3><input type="checkbox" checked></div>"#,
        )
        .unwrap();
        let card = doc.get_element_by_id("card").unwrap();
        let tags: Vec<_> = doc
            .child_elements(card)
            .into_iter()
            .filter_map(|n| doc.tag(n).map(|t| t.to_string()))
            .collect();
        assert_eq!(tags, vec!["img", "h3", "input"]);
        let input = doc.by_tag(card, "input")[0];
        assert!(doc.checked(input));
    }

    #[test]
    fn stray_end_tags_are_tolerated() {
        let doc = Document::parse("<ul id=\"l\"><li>one</li></span><li>two</li></ul>").unwrap();
        let list = doc.get_element_by_id("l").unwrap();
        assert_eq!(doc.by_tag(list, "li").len(), 2);
    }

    #[test]
    fn entities_and_attributes_are_unescaped() {
        let doc = Document::parse(r#"<a id="x" href="a.html?x=1&amp;y=2">Tom &amp; Jerry</a>"#).unwrap();
        let a = doc.get_element_by_id("x").unwrap();
        assert_eq!(doc.attr(a, "href"), Some("a.html?x=1&y=2"));
        assert_eq!(doc.text_content(a), "Tom & Jerry");
    }

    #[test]
    fn named_entities_resolve_and_print_once() {
        let doc = Document::parse("<footer id=\"f\"><p>&copy; 2024&nbsp;İbrahim &amp; Co</p></footer>").unwrap();
        let f = doc.get_element_by_id("f").unwrap();
        assert_eq!(doc.text_content(f), "© 2024\u{a0}İbrahim & Co");
        assert_eq!(doc.inner_html(f), "<p>© 2024\u{a0}İbrahim &amp; Co</p>");
    }

    #[test]
    fn unknown_references_and_bare_ampersands_stay_literal() {
        let doc = Document::parse("<p id=\"p\">R&D &notanentity; &#x41; a & b</p>").unwrap();
        let p = doc.get_element_by_id("p").unwrap();
        assert_eq!(doc.text_content(p), "R&D &notanentity; A a & b");
    }

    #[test]
    fn spaces_between_inline_elements_survive() {
        let doc = Document::parse("<p id=\"p\">Merhaba <strong>dünya</strong> nasılsın</p>").unwrap();
        let p = doc.get_element_by_id("p").unwrap();
        assert_eq!(doc.text_content(p), "Merhaba dünya nasılsın");
        assert_eq!(doc.inner_html(p), "Merhaba <strong>dünya</strong> nasılsın");
    }

    #[test]
    fn script_and_style_bodies_are_raw_text() {
        let source = "<head><style>a > b { color: red; }</style></head><body><script>if (a < b && c) { x(); }</script><p id=\"p\">x</p></body>";
        let doc = Document::parse(source).unwrap();
        let html = doc.to_html();
        assert!(html.contains("<script>if (a < b && c) { x(); }</script><p id=\"p\">x</p>"));
        assert!(html.contains("<style>a > b { color: red; }</style>"));
        let body = doc.body();
        assert_eq!(doc.by_tag(body, "p").len(), 1);
        assert!(doc.get_element_by_id("p").is_some());
    }

    #[test]
    fn textarea_content_becomes_value() {
        let doc = Document::parse("<textarea id=\"t\">hello</textarea>").unwrap();
        let t = doc.get_element_by_id("t").unwrap();
        assert_eq!(doc.value(t), "hello");
    }
}
