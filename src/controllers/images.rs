use log::debug;

use crate::dom::{Document, NodeId};
use crate::events::{Action, EventKind};

/// Arm every `img[data-fallback]` under `scope`.
pub fn bind_fallbacks(doc: &mut Document, scope: NodeId) {
    for img in doc.by_attr(scope, "data-fallback") {
        if doc.tag(img) == Some("img") {
            doc.listen(img, EventKind::ImageError, Action::ImageFallback);
        }
    }
}

/// Swap a failed image for its placeholder. The handler disarms itself, so a
/// broken placeholder is never retried. Returns whether anything changed.
pub fn fallback(doc: &mut Document, img: NodeId) -> bool {
    doc.unlisten(img, EventKind::ImageError);
    let Some(placeholder) = doc.data(img, "fallback").map(str::to_string) else {
        return false;
    };
    if doc.attr(img, "src") == Some(placeholder.as_str()) {
        return false;
    }
    debug!(
        "Image failed to load: {}",
        doc.attr(img, "src").unwrap_or_default()
    );
    doc.set_attr(img, "src", &placeholder);
    if let Some(alt) = doc.data(img, "fallback-alt").map(str::to_string) {
        doc.set_attr(img, "alt", &alt);
    }
    doc.add_class(img, "image-error");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_applies_once() {
        let mut doc = Document::parse(
            r#"<img src="a.jpg" alt="A" data-fallback="ph.jpg" data-fallback-alt="A görseli yok">"#,
        )
        .unwrap();
        let body = doc.body();
        bind_fallbacks(&mut doc, body);
        let img = doc.by_tag(body, "img")[0];
        assert!(doc.has_listener(img, EventKind::ImageError, Action::ImageFallback));

        assert!(fallback(&mut doc, img));
        assert_eq!(doc.attr(img, "src"), Some("ph.jpg"));
        assert_eq!(doc.attr(img, "alt"), Some("A görseli yok"));
        assert!(doc.has_class(img, "image-error"));
        assert!(doc.listeners(img).is_empty());
        assert!(!fallback(&mut doc, img));
    }
}
