use url::Url;

use crate::config::SiteSection;
use crate::dom::{Document, NodeId};

/// File name of the page at `location`, or `default` for a bare directory.
pub fn current_page(location: &Url, default: &str) -> String {
    location
        .path_segments()
        .and_then(|mut s| s.next_back())
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Page a link points at. In-page anchors and other hosts have none.
pub fn link_page(href: &str, location: &Url, default: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let target = location.join(href).ok()?;
    if target.scheme() != location.scheme() || target.host_str() != location.host_str() {
        return None;
    }
    Some(current_page(&target, default))
}

/// Recompute the active link from scratch. The first link that targets the
/// current page is marked; every other link is cleared.
pub fn sync(doc: &mut Document, site: &SiteSection, location: &Url) -> Option<NodeId> {
    let list = doc.get_element_by_id(&site.nav_list_id)?;
    let page = current_page(location, &site.default_page);
    let mut active = None;
    for link in doc.by_tag(list, "a") {
        let matches = doc
            .attr(link, "href")
            .and_then(|href| link_page(href, location, &site.default_page))
            .is_some_and(|target| target == page);
        if matches && active.is_none() {
            doc.add_class(link, &site.nav_active_class);
            active = Some(link);
        } else {
            doc.remove_class(link, &site.nav_active_class);
        }
    }
    active
}

/// Staggered first reveal of the navigation items. Runs once per list.
pub fn reveal_once(doc: &mut Document, site: &SiteSection, base_ms: u64, step_ms: u64) -> bool {
    let Some(list) = doc.get_element_by_id(&site.nav_list_id) else {
        return false;
    };
    if doc.data(list, "revealed") == Some("true") {
        return false;
    }
    for (i, li) in doc.by_tag(list, "li").into_iter().enumerate() {
        doc.set_style(li, "transition-delay", &format!("{}ms", base_ms + i as u64 * step_ms));
        doc.add_class(li, "show");
    }
    doc.set_data(list, "revealed", "true");
    true
}
