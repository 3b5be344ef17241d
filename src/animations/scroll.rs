use crate::dom::{Document, NodeId};

pub const REVEAL_CLASSES: [&str; 4] = [
    "animate-on-scroll",
    "animate-on-scroll-left",
    "animate-on-scroll-right",
    "animate-on-scroll-scale",
];
pub const SCROLL_TOP_ID: &str = "scrollToTop";

/// Stagger skill cards by 100 ms and cards by 150 ms via `data-delay`.
pub fn assign_stagger(doc: &mut Document) {
    let root = doc.root();
    for (i, card) in doc.by_class(root, "skill-card").into_iter().enumerate() {
        doc.set_data(card, "delay", &format!("{}ms", i * 100));
    }
    for (i, card) in doc.by_class(root, "card").into_iter().enumerate() {
        doc.set_data(card, "delay", &format!("{}ms", i * 150));
    }
}

/// Reveal candidates in document order.
pub fn candidates(doc: &Document) -> Vec<NodeId> {
    doc.select(doc.root(), |e| REVEAL_CLASSES.iter().any(|c| e.has_class(c)))
}

/// `data-delay` in milliseconds (`"150ms"`, `"150"`); zero when absent.
pub fn delay_ms(doc: &Document, node: NodeId) -> u64 {
    doc.data(node, "delay")
        .map(|d| d.trim().trim_end_matches("ms"))
        .and_then(|d| d.parse().ok())
        .unwrap_or(0)
}

pub fn update_scroll_top(doc: &mut Document, scroll_y: f64, threshold: f64) {
    if let Some(button) = doc.get_element_by_id(SCROLL_TOP_ID) {
        if scroll_y > threshold {
            doc.add_class(button, "visible");
        } else {
            doc.remove_class(button, "visible");
        }
    }
}

pub fn parallax(doc: &mut Document, scroll_y: f64, factor: f64) {
    if let Some(hero) = doc.first_by_class(doc.root(), "hero-banner") {
        doc.set_style(hero, "transform", &format!("translateY({}px)", scroll_y * factor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_and_delay_parsing() {
        let mut doc = Document::parse(
            r#"<div class="skill-card"></div><div class="skill-card"></div>
            <div class="card animate-on-scroll"></div><div class="card"></div><div class="card"></div>"#,
        )
        .unwrap();
        assert_eq!(candidates(&doc).len(), 1);
        assert_eq!(delay_ms(&doc, candidates(&doc)[0]), 0);
        assign_stagger(&mut doc);
        let root = doc.root();
        let cards = doc.by_class(root, "card");
        assert_eq!(delay_ms(&doc, cards[2]), 300);
        let skills = doc.by_class(root, "skill-card");
        assert_eq!(doc.data(skills[1], "delay"), Some("100ms"));
    }

    #[test]
    fn test_scroll_top_threshold_and_parallax() {
        let mut doc = Document::parse(
            r#"<button id="scrollToTop"></button><section class="hero-banner"></section>"#,
        )
        .unwrap();
        update_scroll_top(&mut doc, 300.0, 300.0);
        let button = doc.get_element_by_id(SCROLL_TOP_ID).unwrap();
        assert!(!doc.has_class(button, "visible"));
        update_scroll_top(&mut doc, 301.0, 300.0);
        assert!(doc.has_class(button, "visible"));

        parallax(&mut doc, 120.0, 0.5);
        let root = doc.root();
        let hero = doc.first_by_class(root, "hero-banner").unwrap();
        assert_eq!(doc.style(hero, "transform"), Some("translateY(60px)"));
    }
}
