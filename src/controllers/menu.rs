use crate::config::SiteSection;
use crate::dom::{Document, NodeId};
use crate::events::{Action, EventKind};

const OPEN_CLASS: &str = "active";

fn parts(doc: &Document, site: &SiteSection) -> Option<(NodeId, NodeId)> {
    Some((
        doc.get_element_by_id(&site.menu_trigger_id)?,
        doc.get_element_by_id(&site.nav_list_id)?,
    ))
}

/// Attach the trigger and the in-menu links of the current header.
pub fn bind(doc: &mut Document, site: &SiteSection) {
    let Some((trigger, list)) = parts(doc, site) else {
        return;
    };
    doc.listen(trigger, EventKind::Click, Action::ToggleMenu);
    doc.listen(trigger, EventKind::KeyDown, Action::ActivateOnKey);
    if doc.attr(trigger, "aria-expanded").is_none() {
        doc.set_attr(trigger, "aria-expanded", "false");
    }
    for link in doc.by_tag(list, "a") {
        doc.listen(link, EventKind::Click, Action::CloseMenu);
    }
}

pub fn is_open(doc: &Document, site: &SiteSection) -> bool {
    doc.get_element_by_id(&site.nav_list_id)
        .is_some_and(|list| doc.has_class(list, OPEN_CLASS))
}

fn set_open(doc: &mut Document, trigger: NodeId, list: NodeId, open: bool, step_ms: u64) {
    let items = doc.by_tag(list, "li");
    if open {
        doc.add_class(list, OPEN_CLASS);
        doc.add_class(trigger, OPEN_CLASS);
        for (i, li) in items.into_iter().enumerate() {
            doc.set_style(li, "transition-delay", &format!("{}ms", i as u64 * step_ms));
            doc.add_class(li, "show");
        }
    } else {
        doc.remove_class(list, OPEN_CLASS);
        doc.remove_class(trigger, OPEN_CLASS);
        for li in items {
            doc.remove_class(li, "show");
            doc.remove_style(li, "transition-delay");
        }
    }
    doc.set_attr(trigger, "aria-expanded", if open { "true" } else { "false" });
}

/// Returns whether the menu is open afterwards.
pub fn toggle(doc: &mut Document, site: &SiteSection, step_ms: u64) -> bool {
    let Some((trigger, list)) = parts(doc, site) else {
        return false;
    };
    let open = !doc.has_class(list, OPEN_CLASS);
    set_open(doc, trigger, list, open, step_ms);
    open
}

pub fn close(doc: &mut Document, site: &SiteSection) {
    if let Some((trigger, list)) = parts(doc, site) {
        set_open(doc, trigger, list, false, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Document {
        Document::parse(
            r#"<button id="hamburger"></button>
            <ul id="navLinks"><li><a href="index.html">A</a></li><li><a href="blog.html">B</a></li><li><a href="contact.html">C</a></li></ul>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_open_staggers_and_close_clears() {
        let mut doc = header();
        let site = SiteSection::default();
        bind(&mut doc, &site);
        assert!(toggle(&mut doc, &site, 40));
        let trigger = doc.get_element_by_id("hamburger").unwrap();
        assert_eq!(doc.attr(trigger, "aria-expanded"), Some("true"));
        let list = doc.get_element_by_id("navLinks").unwrap();
        let items = doc.by_tag(list, "li");
        assert_eq!(doc.style(items[2], "transition-delay"), Some("80ms"));

        close(&mut doc, &site);
        assert!(!is_open(&doc, &site));
        assert!(items.iter().all(|&li| !doc.has_class(li, "show")));
        assert!(items.iter().all(|&li| doc.style(li, "transition-delay").is_none()));
        assert_eq!(doc.attr(trigger, "aria-expanded"), Some("false"));
    }

    #[test]
    fn test_bind_twice_registers_once() {
        let mut doc = header();
        let site = SiteSection::default();
        bind(&mut doc, &site);
        bind(&mut doc, &site);
        let trigger = doc.get_element_by_id("hamburger").unwrap();
        assert_eq!(doc.listeners(trigger).len(), 2);
    }
}
